// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded measurement history.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// One reported temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    /// When the measurement was reported.
    pub at: DateTime<Utc>,
    /// Measured temperature in °C.
    pub celsius: f64,
}

/// A sliding window over the most recent temperature measurements.
///
/// The history keeps at most [`CAPACITY`](Self::CAPACITY) samples in report
/// order; recording a sample beyond capacity drops the oldest one. Samples
/// are never reordered, so iteration always yields oldest first.
///
/// # Examples
///
/// ```
/// use valvr_lib::history::TemperatureHistory;
///
/// let mut history = TemperatureHistory::new();
/// history.record(21.6);
/// history.record(21.7);
///
/// let temps: Vec<f64> = history.iter().map(|s| s.celsius).collect();
/// assert_eq!(temps, [21.6, 21.7]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureHistory {
    samples: VecDeque<TemperatureSample>,
}

impl TemperatureHistory {
    /// Maximum number of retained samples.
    pub const CAPACITY: usize = 40;

    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Records a measurement timestamped with the current time.
    pub fn record(&mut self, celsius: f64) {
        self.record_at(Utc::now(), celsius);
    }

    /// Records a measurement with an explicit timestamp.
    pub fn record_at(&mut self, at: DateTime<Utc>, celsius: f64) {
        if self.samples.len() == Self::CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(TemperatureSample { at, celsius });
    }

    /// Returns the number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no measurement has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates over the retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TemperatureSample> {
        self.samples.iter()
    }

    /// Returns the most recently recorded sample.
    #[must_use]
    pub fn latest(&self) -> Option<&TemperatureSample> {
        self.samples.back()
    }
}

impl<'a> IntoIterator for &'a TemperatureHistory {
    type Item = &'a TemperatureSample;
    type IntoIter = std::collections::vec_deque::Iter<'a, TemperatureSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
