// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly schedule addressing.

use std::fmt;

use chrono::{Datelike, Local, Timelike};

use crate::error::ValueError;

/// A validated (day, hour) position in the weekly schedule grid.
///
/// Days run 0 (Monday) through 6 (Sunday); hours run 0 through 23. A slot
/// can only be constructed inside that domain, so schedule lookups never
/// need a panicking bounds check.
///
/// # Examples
///
/// ```
/// use valvr_lib::types::ScheduleSlot;
///
/// let slot = ScheduleSlot::new(5, 10).unwrap();
/// assert_eq!(slot.day(), 5);
/// assert_eq!(slot.hour(), 10);
///
/// // Out-of-domain positions are reported, never a panic
/// assert!(ScheduleSlot::new(7, 10).is_err());
/// assert!(ScheduleSlot::new(0, 24).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleSlot {
    day: u8,
    hour: u8,
}

impl ScheduleSlot {
    /// Highest valid day index (Sunday).
    pub const MAX_DAY: u8 = 6;

    /// Highest valid hour of day.
    pub const MAX_HOUR: u8 = 23;

    /// Creates a slot from a day-of-week and hour-of-day.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` when `day > 6` or `hour > 23`.
    pub fn new(day: u8, hour: u8) -> Result<Self, ValueError> {
        if day > Self::MAX_DAY {
            return Err(ValueError::OutOfRange {
                field: "day",
                max: Self::MAX_DAY,
                actual: day,
            });
        }
        if hour > Self::MAX_HOUR {
            return Err(ValueError::OutOfRange {
                field: "hour",
                max: Self::MAX_HOUR,
                actual: hour,
            });
        }
        Ok(Self { day, hour })
    }

    /// Returns the slot for the current local weekday and hour.
    ///
    /// Hourly-mode desired-temperature resolution evaluates the schedule at
    /// this slot.
    #[must_use]
    pub fn now() -> Self {
        Self::from_clock(&Local::now())
    }

    /// Returns the slot a clock value falls into.
    ///
    /// Weekday and hour are within the grid by definition of the calendar.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_clock<C: Datelike + Timelike>(clock: &C) -> Self {
        Self {
            day: clock.weekday().num_days_from_monday() as u8,
            hour: clock.hour() as u8,
        }
    }

    /// Returns the day index (0 = Monday).
    #[must_use]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour of day (0-23).
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} hour {}", self.day, self.hour)
    }
}
