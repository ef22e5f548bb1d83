// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial-update payloads.
//!
//! A bulk info update carries one [`ValvePatch`] per addressed valve,
//! wrapped in a [`FleetPatch`] keyed by valve id. Every field is optional;
//! whatever the patch omits stays untouched.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::Error as _;

use crate::types::{HeatingMode, PidGains, TemperatureMode, ValveId};

/// A partial update for one valve's configuration.
///
/// Mirrors the wire payload of the bulk info update: temperature modes are
/// addressed by *name* ("comfort", "eco", "hourly"), heating modes by index,
/// and the PID coefficients as three separate keys that only take effect
/// when all three are present.
///
/// # Examples
///
/// ```
/// use valvr_lib::state::ValvePatch;
///
/// let patch: ValvePatch = serde_json::from_str(r#"{"eco": 19.0, "mode": "eco"}"#).unwrap();
/// assert_eq!(patch.eco, Some(19.0));
/// assert!(patch.comfort.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValvePatch {
    /// New comfort setpoint.
    pub comfort: Option<f64>,
    /// New eco setpoint.
    pub eco: Option<f64>,
    /// New temperature mode.
    pub mode: Option<TemperatureMode>,
    /// New heating mode.
    pub heating_mode: Option<HeatingMode>,
    /// New hysteresis dead-band width.
    pub hysteresis_band: Option<f64>,
    /// New PID coefficient triple.
    pub pid: Option<PidGains>,
}

impl ValvePatch {
    /// Returns `true` when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Wire shape of a single-valve patch.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPatch {
    comfort: Option<f64>,
    eco: Option<f64>,
    mode: Option<String>,
    heating_mode: Option<u8>,
    hysteresis_band: Option<f64>,
    kp: Option<f64>,
    ki: Option<f64>,
    kd: Option<f64>,
}

impl<'de> Deserialize<'de> for ValvePatch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPatch::deserialize(deserializer)?;

        let mode = raw
            .mode
            .map(|name| TemperatureMode::from_str(&name))
            .transpose()
            .map_err(D::Error::custom)?;
        let heating_mode = raw
            .heating_mode
            .map(HeatingMode::from_index)
            .transpose()
            .map_err(D::Error::custom)?;

        // The triple replaces as a whole; a partial triple is ignored.
        let pid = match (raw.kp, raw.ki, raw.kd) {
            (Some(kp), Some(ki), Some(kd)) => Some(PidGains::new(kp, ki, kd)),
            _ => None,
        };

        Ok(Self {
            comfort: raw.comfort,
            eco: raw.eco,
            mode,
            heating_mode,
            hysteresis_band: raw.hysteresis_band,
            pid,
        })
    }
}

/// A bulk update addressed by payload key rather than request id.
///
/// The wire payload maps decimal valve ids to patches, e.g.
/// `{"42": {"eco": 19.0}}`. A valve applies the entry under its own id and
/// ignores the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetPatch {
    patches: HashMap<ValveId, ValvePatch>,
}

impl FleetPatch {
    /// Creates a patch addressing a single valve.
    #[must_use]
    pub fn single(id: ValveId, patch: ValvePatch) -> Self {
        let mut patches = HashMap::new();
        patches.insert(id, patch);
        Self { patches }
    }

    /// Adds or replaces the patch for a valve.
    pub fn insert(&mut self, id: ValveId, patch: ValvePatch) {
        self.patches.insert(id, patch);
    }

    /// Returns the patch addressed to the given valve, if any.
    #[must_use]
    pub fn get(&self, id: ValveId) -> Option<&ValvePatch> {
        self.patches.get(&id)
    }

    /// Returns `true` when a patch addresses the given valve.
    #[must_use]
    pub fn contains(&self, id: ValveId) -> bool {
        self.patches.contains_key(&id)
    }

    /// Returns the number of addressed valves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Returns `true` when no valve is addressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl<'de> Deserialize<'de> for FleetPatch {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: HashMap<String, ValvePatch> = HashMap::deserialize(deserializer)?;

        let mut patches = HashMap::with_capacity(raw.len());
        for (key, patch) in raw {
            let id = ValveId::from_str(&key).map_err(D::Error::custom)?;
            patches.insert(id, patch);
        }
        Ok(Self { patches })
    }
}
