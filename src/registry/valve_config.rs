// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve creation configuration.

use crate::state::ValveState;
use crate::types::{HeatingMode, TemperatureMode};

/// Initial configuration for a newly created valve.
///
/// All fields default to the factory values; builders override the ones a
/// deployment cares about. The weekly schedule starts in the banded
/// day/night pattern built from the configured setpoints.
///
/// # Examples
///
/// ```
/// use valvr_lib::registry::ValveConfig;
///
/// let config = ValveConfig::new()
///     .with_alias("living room")
///     .with_comfort(22.5)
///     .with_eco(16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValveConfig {
    comfort: f64,
    eco: f64,
    mode: TemperatureMode,
    heating_mode: HeatingMode,
    alias: Option<String>,
}

impl ValveConfig {
    /// Creates a configuration with factory defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comfort: ValveState::DEFAULT_COMFORT,
            eco: ValveState::DEFAULT_ECO,
            mode: TemperatureMode::default(),
            heating_mode: HeatingMode::default(),
            alias: None,
        }
    }

    /// Sets the initial comfort setpoint.
    #[must_use]
    pub fn with_comfort(mut self, celsius: f64) -> Self {
        self.comfort = celsius;
        self
    }

    /// Sets the initial eco setpoint.
    #[must_use]
    pub fn with_eco(mut self, celsius: f64) -> Self {
        self.eco = celsius;
        self
    }

    /// Sets the initial temperature mode.
    #[must_use]
    pub fn with_mode(mut self, mode: TemperatureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial heating mode.
    #[must_use]
    pub fn with_heating_mode(mut self, mode: HeatingMode) -> Self {
        self.heating_mode = mode;
        self
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Builds the initial state this configuration describes.
    #[must_use]
    pub fn build_state(&self) -> ValveState {
        let mut state = ValveState::with_setpoints(self.comfort, self.eco);
        state.set_mode(self.mode);
        state.set_heating_mode(self.heating_mode);
        if let Some(alias) = &self.alias {
            state.set_alias(alias.clone());
        }
        state
    }
}

impl Default for ValveConfig {
    fn default() -> Self {
        Self::new()
    }
}
