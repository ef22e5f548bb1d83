// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed requests.
//!
//! A [`Request`] is the validated form of one fleet operation: every
//! variant carries exactly the fields its operation needs, with schedule
//! positions already range-checked and payload values already decoded.
//! Transports build a [`RequestParts`] and let [`Request::from_parts`] do
//! the validation; in-process callers can construct variants directly.

mod kind;
mod parts;

pub use kind::RequestKind;
pub use parts::RequestParts;

use serde_json::Value;

use crate::error::RequestError;
use crate::state::FleetPatch;
use crate::types::{HeatingMode, ScheduleSlot, TemperatureMode, ValveId};

/// One validated fleet operation.
///
/// # Examples
///
/// ```
/// use valvr_lib::request::Request;
/// use valvr_lib::types::ValveId;
///
/// let request = Request::DesiredTemperature { id: ValveId::new(42) };
/// assert!(!request.kind().is_write());
/// assert_eq!(request.target(), Some(ValveId::new(42)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Read the full info bundle; includes the schedule entry when a slot
    /// is given.
    Info {
        /// Target valve.
        id: ValveId,
        /// Optional schedule position to include in the bundle.
        slot: Option<ScheduleSlot>,
    },
    /// Read the temperature bundle; includes the schedule entry when a
    /// slot is given.
    Temperatures {
        /// Target valve.
        id: ValveId,
        /// Optional schedule position to include in the bundle.
        slot: Option<ScheduleSlot>,
    },
    /// Read the last reported temperature.
    CurrentTemperature {
        /// Target valve.
        id: ValveId,
    },
    /// Read the setpoint currently in effect.
    DesiredTemperature {
        /// Target valve.
        id: ValveId,
    },
    /// Read the eco setpoint.
    EcoTemperature {
        /// Target valve.
        id: ValveId,
    },
    /// Read the comfort setpoint.
    ComfortTemperature {
        /// Target valve.
        id: ValveId,
    },
    /// Read the scheduled setpoint at a slot.
    ScheduledTemperature {
        /// Target valve.
        id: ValveId,
        /// Schedule position to read.
        slot: ScheduleSlot,
    },
    /// Read the temperature mode.
    TemperatureMode {
        /// Target valve.
        id: ValveId,
    },
    /// Read the heating-algorithm bundle.
    HeatingMode {
        /// Target valve.
        id: ValveId,
    },
    /// Read the alias.
    Alias {
        /// Target valve.
        id: ValveId,
    },
    /// Read the measurement history.
    History {
        /// Target valve.
        id: ValveId,
    },
    /// Apply a bulk partial update.
    ///
    /// The patch addresses valves by payload key; the optional `filter`
    /// additionally restricts delivery to one valve, mirroring a request
    /// that carried an explicit id.
    UpdateInfo {
        /// Optional request-level id filter.
        filter: Option<ValveId>,
        /// Per-valve partial updates.
        patch: FleetPatch,
    },
    /// Report a measured temperature.
    SetCurrentTemperature {
        /// Target valve.
        id: ValveId,
        /// Measured temperature in °C.
        celsius: f64,
    },
    /// Replace the eco setpoint.
    SetEcoTemperature {
        /// Target valve.
        id: ValveId,
        /// New setpoint in °C.
        celsius: f64,
    },
    /// Replace the comfort setpoint.
    SetComfortTemperature {
        /// Target valve.
        id: ValveId,
        /// New setpoint in °C.
        celsius: f64,
    },
    /// Replace the scheduled setpoint at a slot.
    SetScheduledTemperature {
        /// Target valve.
        id: ValveId,
        /// Schedule position to write.
        slot: ScheduleSlot,
        /// New setpoint in °C.
        celsius: f64,
    },
    /// Select the temperature mode (by index, as the wire sends it).
    SetTemperatureMode {
        /// Target valve.
        id: ValveId,
        /// New temperature mode.
        mode: TemperatureMode,
    },
    /// Select the heating mode (by index, as the wire sends it).
    SetHeatingMode {
        /// Target valve.
        id: ValveId,
        /// New heating mode.
        mode: HeatingMode,
    },
    /// Replace the alias.
    SetAlias {
        /// Target valve.
        id: ValveId,
        /// New alias.
        alias: String,
    },
}

impl Request {
    /// Validates transport-level parts into a typed request.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MissingPayload`] for a write kind without payload;
    /// - [`RequestError::InvalidPayload`] when the payload does not decode
    ///   into the kind's value;
    /// - [`RequestError::MissingId`] for a targeted kind without an id;
    /// - [`RequestError::MissingSlot`] for a schedule kind without both day
    ///   and hour;
    /// - [`RequestError::Value`] when day/hour fall outside the schedule
    ///   grid or a mode index is unknown.
    pub fn from_parts(parts: RequestParts) -> Result<Self, RequestError> {
        // A write without a payload is malformed no matter what else the
        // request says.
        if parts.kind.is_write() && parts.payload.is_none() {
            return Err(RequestError::MissingPayload);
        }

        match parts.kind {
            RequestKind::Info => Ok(Self::Info {
                id: require_id(&parts)?,
                slot: optional_slot(&parts)?,
            }),
            RequestKind::Temperatures => Ok(Self::Temperatures {
                id: require_id(&parts)?,
                slot: optional_slot(&parts)?,
            }),
            RequestKind::CurrentTemperature => Ok(Self::CurrentTemperature {
                id: require_id(&parts)?,
            }),
            RequestKind::DesiredTemperature => Ok(Self::DesiredTemperature {
                id: require_id(&parts)?,
            }),
            RequestKind::EcoTemperature => Ok(Self::EcoTemperature {
                id: require_id(&parts)?,
            }),
            RequestKind::ComfortTemperature => Ok(Self::ComfortTemperature {
                id: require_id(&parts)?,
            }),
            RequestKind::ScheduledTemperature => Ok(Self::ScheduledTemperature {
                id: require_id(&parts)?,
                slot: require_slot(&parts)?,
            }),
            RequestKind::TemperatureMode => Ok(Self::TemperatureMode {
                id: require_id(&parts)?,
            }),
            RequestKind::HeatingMode => Ok(Self::HeatingMode {
                id: require_id(&parts)?,
            }),
            RequestKind::Alias => Ok(Self::Alias {
                id: require_id(&parts)?,
            }),
            RequestKind::History => Ok(Self::History {
                id: require_id(&parts)?,
            }),
            RequestKind::UpdateInfo => Ok(Self::UpdateInfo {
                filter: parts.id,
                patch: decode_patch(&parts)?,
            }),
            RequestKind::SetCurrentTemperature => Ok(Self::SetCurrentTemperature {
                id: require_id(&parts)?,
                celsius: decode_f64(&parts)?,
            }),
            RequestKind::SetEcoTemperature => Ok(Self::SetEcoTemperature {
                id: require_id(&parts)?,
                celsius: decode_f64(&parts)?,
            }),
            RequestKind::SetComfortTemperature => Ok(Self::SetComfortTemperature {
                id: require_id(&parts)?,
                celsius: decode_f64(&parts)?,
            }),
            RequestKind::SetScheduledTemperature => Ok(Self::SetScheduledTemperature {
                id: require_id(&parts)?,
                slot: require_slot(&parts)?,
                celsius: decode_f64(&parts)?,
            }),
            RequestKind::SetTemperatureMode => Ok(Self::SetTemperatureMode {
                id: require_id(&parts)?,
                mode: TemperatureMode::from_index(decode_index(&parts)?)?,
            }),
            RequestKind::SetHeatingMode => Ok(Self::SetHeatingMode {
                id: require_id(&parts)?,
                mode: HeatingMode::from_index(decode_index(&parts)?)?,
            }),
            RequestKind::SetAlias => Ok(Self::SetAlias {
                id: require_id(&parts)?,
                alias: decode_string(&parts)?,
            }),
        }
    }

    /// Returns the kind of this request.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Info { .. } => RequestKind::Info,
            Self::Temperatures { .. } => RequestKind::Temperatures,
            Self::CurrentTemperature { .. } => RequestKind::CurrentTemperature,
            Self::DesiredTemperature { .. } => RequestKind::DesiredTemperature,
            Self::EcoTemperature { .. } => RequestKind::EcoTemperature,
            Self::ComfortTemperature { .. } => RequestKind::ComfortTemperature,
            Self::ScheduledTemperature { .. } => RequestKind::ScheduledTemperature,
            Self::TemperatureMode { .. } => RequestKind::TemperatureMode,
            Self::HeatingMode { .. } => RequestKind::HeatingMode,
            Self::Alias { .. } => RequestKind::Alias,
            Self::History { .. } => RequestKind::History,
            Self::UpdateInfo { .. } => RequestKind::UpdateInfo,
            Self::SetCurrentTemperature { .. } => RequestKind::SetCurrentTemperature,
            Self::SetEcoTemperature { .. } => RequestKind::SetEcoTemperature,
            Self::SetComfortTemperature { .. } => RequestKind::SetComfortTemperature,
            Self::SetScheduledTemperature { .. } => RequestKind::SetScheduledTemperature,
            Self::SetTemperatureMode { .. } => RequestKind::SetTemperatureMode,
            Self::SetHeatingMode { .. } => RequestKind::SetHeatingMode,
            Self::SetAlias { .. } => RequestKind::SetAlias,
        }
    }

    /// Returns the id this request targets, if it targets one.
    ///
    /// For a bulk update this is the optional request-level filter, not the
    /// payload keys.
    #[must_use]
    pub fn target(&self) -> Option<ValveId> {
        match self {
            Self::Info { id, .. }
            | Self::Temperatures { id, .. }
            | Self::CurrentTemperature { id }
            | Self::DesiredTemperature { id }
            | Self::EcoTemperature { id }
            | Self::ComfortTemperature { id }
            | Self::ScheduledTemperature { id, .. }
            | Self::TemperatureMode { id }
            | Self::HeatingMode { id }
            | Self::Alias { id }
            | Self::History { id }
            | Self::SetCurrentTemperature { id, .. }
            | Self::SetEcoTemperature { id, .. }
            | Self::SetComfortTemperature { id, .. }
            | Self::SetScheduledTemperature { id, .. }
            | Self::SetTemperatureMode { id, .. }
            | Self::SetHeatingMode { id, .. }
            | Self::SetAlias { id, .. } => Some(*id),
            Self::UpdateInfo { filter, .. } => *filter,
        }
    }
}

fn require_id(parts: &RequestParts) -> Result<ValveId, RequestError> {
    parts.id.ok_or(RequestError::MissingId)
}

/// Both day and hour present: a validated slot. Neither or only one: none.
fn optional_slot(parts: &RequestParts) -> Result<Option<ScheduleSlot>, RequestError> {
    match (parts.day, parts.hour) {
        (Some(day), Some(hour)) => Ok(Some(ScheduleSlot::new(day, hour)?)),
        _ => Ok(None),
    }
}

fn require_slot(parts: &RequestParts) -> Result<ScheduleSlot, RequestError> {
    match (parts.day, parts.hour) {
        (Some(day), Some(hour)) => Ok(ScheduleSlot::new(day, hour)?),
        _ => Err(RequestError::MissingSlot),
    }
}

fn payload(parts: &RequestParts) -> Result<&Value, RequestError> {
    parts.payload.as_ref().ok_or(RequestError::MissingPayload)
}

/// Decodes a temperature value; stringified numbers are tolerated because
/// some fleet clients send them.
fn decode_f64(parts: &RequestParts) -> Result<f64, RequestError> {
    let value = payload(parts)?;
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| RequestError::InvalidPayload(value.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| RequestError::InvalidPayload(s.clone())),
        other => Err(RequestError::InvalidPayload(other.to_string())),
    }
}

/// Decodes a small mode index.
fn decode_index(parts: &RequestParts) -> Result<u8, RequestError> {
    let value = payload(parts)?;
    let number = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    number
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| RequestError::InvalidPayload(value.to_string()))
}

fn decode_string(parts: &RequestParts) -> Result<String, RequestError> {
    match payload(parts)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(RequestError::InvalidPayload(other.to_string())),
    }
}

fn decode_patch(parts: &RequestParts) -> Result<FleetPatch, RequestError> {
    serde_json::from_value(payload(parts)?.clone())
        .map_err(|e| RequestError::InvalidPayload(e.to_string()))
}
