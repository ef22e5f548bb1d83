// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed snapshot bodies served by read requests.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::history::TemperatureHistory;
use crate::state::ValveState;
use crate::types::{HeatingMode, PidGains, ScheduleSlot, TemperatureMode};

/// The full info bundle of one valve.
///
/// Carries every configuration field plus the derived desired temperature.
/// The `hourly` entry is only present when the request named a schedule
/// slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValveInfo {
    /// Comfort setpoint.
    pub comfort: f64,
    /// Eco setpoint.
    pub eco: f64,
    /// Last reported temperature, `null` until first report.
    pub current: Option<f64>,
    /// Setpoint currently in effect.
    pub desired: f64,
    /// Temperature mode (serialized as its index).
    pub mode: TemperatureMode,
    /// Heating mode (serialized as its index).
    pub heating_mode: HeatingMode,
    /// Hysteresis dead-band width.
    pub hysteresis_band: f64,
    /// Stored PID coefficients, flattened to `kp`/`ki`/`kd`.
    #[serde(flatten)]
    pub pid: PidGains,
    /// Scheduled setpoint at the requested slot, if one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<f64>,
}

impl ValveInfo {
    /// Snapshots a valve's full state.
    #[must_use]
    pub fn snapshot(state: &ValveState, slot: Option<ScheduleSlot>) -> Self {
        Self {
            comfort: state.comfort(),
            eco: state.eco(),
            current: state.current_temperature(),
            desired: state.desired_temperature(),
            mode: state.mode(),
            heating_mode: state.heating_mode(),
            hysteresis_band: state.hysteresis_band(),
            pid: state.pid(),
            hourly: slot.map(|s| state.scheduled(s)),
        }
    }
}

/// The temperature bundle of one valve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReport {
    /// Comfort setpoint.
    pub comfort: f64,
    /// Eco setpoint.
    pub eco: f64,
    /// Last reported temperature, `null` until first report.
    pub current: Option<f64>,
    /// Setpoint currently in effect.
    pub desired: f64,
    /// Scheduled setpoint at the requested slot, if one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly: Option<f64>,
}

impl TemperatureReport {
    /// Snapshots a valve's temperature-related state.
    #[must_use]
    pub fn snapshot(state: &ValveState, slot: Option<ScheduleSlot>) -> Self {
        Self {
            comfort: state.comfort(),
            eco: state.eco(),
            current: state.current_temperature(),
            desired: state.desired_temperature(),
            hourly: slot.map(|s| state.scheduled(s)),
        }
    }
}

/// The heating-algorithm bundle of one valve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatingReport {
    /// Heating mode (serialized as its index).
    pub heating_mode: HeatingMode,
    /// Hysteresis dead-band width.
    pub hysteresis_band: f64,
    /// Stored PID coefficients, flattened to `kp`/`ki`/`kd`.
    #[serde(flatten)]
    pub pid: PidGains,
}

impl HeatingReport {
    /// Snapshots a valve's heating configuration.
    #[must_use]
    pub fn snapshot(state: &ValveState) -> Self {
        Self {
            heating_mode: state.heating_mode(),
            hysteresis_band: state.hysteresis_band(),
            pid: state.pid(),
        }
    }
}

/// The measurement history of one valve.
///
/// Serializes as a JSON object keyed by the epoch second of each sample,
/// oldest entry first, matching the wire layout of the currents query.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryReport {
    entries: Vec<(i64, f64)>,
}

impl HistoryReport {
    /// Snapshots a measurement history.
    #[must_use]
    pub fn snapshot(history: &TemperatureHistory) -> Self {
        Self {
            entries: history
                .iter()
                .map(|sample| (sample.at.timestamp(), sample.celsius))
                .collect(),
        }
    }

    /// Returns the (epoch second, °C) entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[(i64, f64)] {
        &self.entries
    }
}

impl Serialize for HistoryReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (epoch, celsius) in &self.entries {
            map.serialize_entry(&epoch.to_string(), celsius)?;
        }
        map.end()
    }
}
