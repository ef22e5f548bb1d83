// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed set of request kinds.

use std::fmt;

/// Every operation the fleet understands.
///
/// The transport layer resolves verb and route into one of these kinds
/// before anything else happens; there is no string-typed dispatch anywhere
/// downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Read the full info bundle.
    Info,
    /// Read the temperature bundle.
    Temperatures,
    /// Read the last reported temperature.
    CurrentTemperature,
    /// Read the setpoint currently in effect.
    DesiredTemperature,
    /// Read the eco setpoint.
    EcoTemperature,
    /// Read the comfort setpoint.
    ComfortTemperature,
    /// Read the scheduled setpoint at a (day, hour) slot.
    ScheduledTemperature,
    /// Read the temperature mode.
    TemperatureMode,
    /// Read the heating-algorithm bundle.
    HeatingMode,
    /// Read the alias.
    Alias,
    /// Read the measurement history.
    History,
    /// Apply a bulk partial update keyed by valve id.
    UpdateInfo,
    /// Report a measured temperature.
    SetCurrentTemperature,
    /// Replace the eco setpoint.
    SetEcoTemperature,
    /// Replace the comfort setpoint.
    SetComfortTemperature,
    /// Replace the scheduled setpoint at a (day, hour) slot.
    SetScheduledTemperature,
    /// Select the temperature mode.
    SetTemperatureMode,
    /// Select the heating mode.
    SetHeatingMode,
    /// Replace the alias.
    SetAlias,
}

impl RequestKind {
    /// Returns `true` for kinds that mutate valve state.
    ///
    /// Write kinds require a payload; dispatching one without a payload is
    /// a malformed request.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(
            self,
            Self::UpdateInfo
                | Self::SetCurrentTemperature
                | Self::SetEcoTemperature
                | Self::SetComfortTemperature
                | Self::SetScheduledTemperature
                | Self::SetTemperatureMode
                | Self::SetHeatingMode
                | Self::SetAlias
        )
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
