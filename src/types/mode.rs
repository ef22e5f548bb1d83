// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operating mode types for thermostatic valves.
//!
//! Two independent selectors exist on every valve: the *temperature mode*
//! decides which setpoint is in effect, and the *heating mode* names the
//! control algorithm whose parameters the valve stores.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Selects how the desired temperature is derived.
///
/// The wire protocol exposes modes as their numeric index; bulk update
/// payloads address them by lowercase name.
///
/// # Examples
///
/// ```
/// use valvr_lib::types::TemperatureMode;
///
/// assert_eq!(TemperatureMode::Eco.index(), 1);
/// assert_eq!(TemperatureMode::from_index(2).unwrap(), TemperatureMode::Hourly);
/// assert_eq!("comfort".parse::<TemperatureMode>().unwrap(), TemperatureMode::Comfort);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureMode {
    /// Desired temperature is the comfort setpoint.
    #[default]
    Comfort,
    /// Desired temperature is the eco setpoint.
    Eco,
    /// Desired temperature follows the weekly schedule.
    Hourly,
}

impl TemperatureMode {
    /// Returns the numeric index used on the wire.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Comfort => 0,
            Self::Eco => 1,
            Self::Hourly => 2,
        }
    }

    /// Returns the lowercase mode name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Comfort => "comfort",
            Self::Eco => "eco",
            Self::Hourly => "hourly",
        }
    }

    /// Creates a mode from its numeric index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidTemperatureMode` for indices above 2.
    pub fn from_index(index: u8) -> Result<Self, ValueError> {
        match index {
            0 => Ok(Self::Comfort),
            1 => Ok(Self::Eco),
            2 => Ok(Self::Hourly),
            other => Err(ValueError::InvalidTemperatureMode(other.to_string())),
        }
    }
}

impl fmt::Display for TemperatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TemperatureMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comfort" => Ok(Self::Comfort),
            "eco" => Ok(Self::Eco),
            "hourly" => Ok(Self::Hourly),
            _ => Err(ValueError::InvalidTemperatureMode(s.to_string())),
        }
    }
}

impl serde::Serialize for TemperatureMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

/// Names the heating algorithm whose parameters the valve stores.
///
/// The library stores hysteresis and PID parameters but never runs a control
/// loop; the selected mode tells the controller firmware which parameter set
/// applies.
///
/// # Examples
///
/// ```
/// use valvr_lib::types::HeatingMode;
///
/// assert_eq!(HeatingMode::Pid.index(), 1);
/// assert_eq!(HeatingMode::from_index(0).unwrap(), HeatingMode::Hysteresis);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeatingMode {
    /// Dead-band (two point) control.
    #[default]
    Hysteresis,
    /// Proportional-integral-derivative control.
    Pid,
}

impl HeatingMode {
    /// Returns the numeric index used on the wire.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Hysteresis => 0,
            Self::Pid => 1,
        }
    }

    /// Creates a heating mode from its numeric index.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHeatingMode` for indices above 1.
    pub fn from_index(index: u8) -> Result<Self, ValueError> {
        match index {
            0 => Ok(Self::Hysteresis),
            1 => Ok(Self::Pid),
            other => Err(ValueError::InvalidHeatingMode(other.to_string())),
        }
    }
}

impl fmt::Display for HeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hysteresis => "hysteresis",
            Self::Pid => "pid",
        };
        write!(f, "{name}")
    }
}

impl serde::Serialize for HeatingMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}
