// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-valve state tracking.

use crate::history::TemperatureHistory;
use crate::schedule::WeekSchedule;
use crate::types::{HeatingMode, PidGains, ScheduleSlot, TemperatureMode};

use super::ValvePatch;

/// The full mutable state of one valve.
///
/// Holds the setpoints, the weekly schedule, the selected modes, the stored
/// heating-algorithm parameters, the last reported measurement with its
/// bounded history, and the free-form alias. The desired temperature is not
/// stored; it is derived from the temperature mode on every read.
///
/// # Examples
///
/// ```
/// use valvr_lib::state::ValveState;
/// use valvr_lib::types::TemperatureMode;
///
/// let mut state = ValveState::new();
/// assert_eq!(state.comfort(), 21.0);
/// assert_eq!(state.eco(), 17.0);
///
/// state.set_mode(TemperatureMode::Eco);
/// assert_eq!(state.desired_temperature(), 17.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValveState {
    comfort: f64,
    eco: f64,
    schedule: WeekSchedule,
    mode: TemperatureMode,
    heating_mode: HeatingMode,
    hysteresis_band: f64,
    pid: PidGains,
    current: Option<f64>,
    history: TemperatureHistory,
    alias: String,
}

impl ValveState {
    /// Factory comfort setpoint in °C.
    pub const DEFAULT_COMFORT: f64 = 21.0;

    /// Factory eco setpoint in °C.
    pub const DEFAULT_ECO: f64 = 17.0;

    /// Factory hysteresis dead-band width in °C.
    pub const DEFAULT_HYSTERESIS_BAND: f64 = 0.1;

    /// Creates a state with factory defaults.
    ///
    /// The schedule starts in the banded day/night pattern built from the
    /// default comfort and eco setpoints.
    #[must_use]
    pub fn new() -> Self {
        Self::with_setpoints(Self::DEFAULT_COMFORT, Self::DEFAULT_ECO)
    }

    /// Creates a state with the given setpoints and a matching banded
    /// schedule.
    #[must_use]
    pub fn with_setpoints(comfort: f64, eco: f64) -> Self {
        Self {
            comfort,
            eco,
            schedule: WeekSchedule::banded(comfort, eco),
            mode: TemperatureMode::default(),
            heating_mode: HeatingMode::default(),
            hysteresis_band: Self::DEFAULT_HYSTERESIS_BAND,
            pid: PidGains::default(),
            current: None,
            history: TemperatureHistory::new(),
            alias: String::new(),
        }
    }

    // ========== Setpoints ==========

    /// Returns the comfort setpoint.
    #[must_use]
    pub fn comfort(&self) -> f64 {
        self.comfort
    }

    /// Sets the comfort setpoint.
    pub fn set_comfort(&mut self, celsius: f64) {
        self.comfort = celsius;
    }

    /// Returns the eco setpoint.
    #[must_use]
    pub fn eco(&self) -> f64 {
        self.eco
    }

    /// Sets the eco setpoint.
    pub fn set_eco(&mut self, celsius: f64) {
        self.eco = celsius;
    }

    // ========== Schedule ==========

    /// Returns the scheduled setpoint at a slot.
    #[must_use]
    pub fn scheduled(&self, slot: ScheduleSlot) -> f64 {
        self.schedule.get(slot)
    }

    /// Replaces the scheduled setpoint at a slot.
    pub fn set_scheduled(&mut self, slot: ScheduleSlot, celsius: f64) {
        self.schedule.set(slot, celsius);
    }

    /// Returns the full weekly schedule.
    #[must_use]
    pub fn schedule(&self) -> &WeekSchedule {
        &self.schedule
    }

    // ========== Modes ==========

    /// Returns the temperature mode.
    #[must_use]
    pub fn mode(&self) -> TemperatureMode {
        self.mode
    }

    /// Sets the temperature mode.
    pub fn set_mode(&mut self, mode: TemperatureMode) {
        self.mode = mode;
    }

    /// Returns the heating mode.
    #[must_use]
    pub fn heating_mode(&self) -> HeatingMode {
        self.heating_mode
    }

    /// Sets the heating mode.
    pub fn set_heating_mode(&mut self, mode: HeatingMode) {
        self.heating_mode = mode;
    }

    // ========== Heating parameters ==========

    /// Returns the hysteresis dead-band width.
    #[must_use]
    pub fn hysteresis_band(&self) -> f64 {
        self.hysteresis_band
    }

    /// Sets the hysteresis dead-band width.
    pub fn set_hysteresis_band(&mut self, band: f64) {
        self.hysteresis_band = band;
    }

    /// Returns the stored PID coefficients.
    #[must_use]
    pub fn pid(&self) -> PidGains {
        self.pid
    }

    /// Replaces the stored PID coefficients as one triple.
    pub fn set_pid(&mut self, gains: PidGains) {
        self.pid = gains;
    }

    // ========== Measurements ==========

    /// Returns the last reported temperature, if any was reported yet.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current
    }

    /// Reports a measured temperature, appending it to the history.
    ///
    /// The history keeps the most recent
    /// [`TemperatureHistory::CAPACITY`] samples.
    pub fn record_current(&mut self, celsius: f64) {
        self.current = Some(celsius);
        self.history.record(celsius);
    }

    /// Returns the measurement history.
    #[must_use]
    pub fn history(&self) -> &TemperatureHistory {
        &self.history
    }

    // ========== Desired temperature ==========

    /// Returns the setpoint currently in effect.
    ///
    /// Comfort and Eco modes return their setpoint directly; Hourly mode
    /// reads the schedule at the current local weekday and hour.
    #[must_use]
    pub fn desired_temperature(&self) -> f64 {
        self.desired_at(ScheduleSlot::now())
    }

    /// Returns the setpoint in effect as of the given schedule slot.
    ///
    /// The slot only matters in Hourly mode.
    #[must_use]
    pub fn desired_at(&self, slot: ScheduleSlot) -> f64 {
        match self.mode {
            TemperatureMode::Comfort => self.comfort,
            TemperatureMode::Eco => self.eco,
            TemperatureMode::Hourly => self.schedule.get(slot),
        }
    }

    // ========== Alias ==========

    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Sets the alias.
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
    }

    // ========== Bulk updates ==========

    /// Applies a partial update.
    ///
    /// Fields absent from the patch are left unchanged. The PID triple is
    /// replaced as a whole or not at all.
    pub fn apply(&mut self, patch: &ValvePatch) {
        if let Some(comfort) = patch.comfort {
            self.comfort = comfort;
        }
        if let Some(eco) = patch.eco {
            self.eco = eco;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(heating_mode) = patch.heating_mode {
            self.heating_mode = heating_mode;
        }
        if let Some(band) = patch.hysteresis_band {
            self.hysteresis_band = band;
        }
        if let Some(pid) = patch.pid {
            self.pid = pid;
        }
    }
}

impl Default for ValveState {
    fn default() -> Self {
        Self::new()
    }
}
