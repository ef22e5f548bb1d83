// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fleet event types.

use crate::types::ValveId;

/// Events emitted by the valve registry.
///
/// These events notify subscribers about valve lifecycle changes and
/// incoming measurements. Every event names the valve it concerns.
///
/// # Examples
///
/// ```
/// use valvr_lib::event::FleetEvent;
/// use valvr_lib::types::ValveId;
///
/// let event = FleetEvent::ValveCreated { valve_id: ValveId::new(42) };
/// assert_eq!(event.valve_id(), ValveId::new(42));
/// assert!(event.is_lifecycle());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FleetEvent {
    /// A valve was registered.
    ValveCreated {
        /// The id of the created valve.
        valve_id: ValveId,
    },

    /// A valve was removed and discarded.
    ValveRemoved {
        /// The id of the removed valve.
        valve_id: ValveId,
    },

    /// A valve recorded a reported temperature measurement.
    MeasurementRecorded {
        /// The id of the reporting valve.
        valve_id: ValveId,
        /// The measured temperature in °C.
        celsius: f64,
    },
}

impl FleetEvent {
    /// Returns the valve id associated with this event.
    #[must_use]
    pub fn valve_id(&self) -> ValveId {
        match self {
            Self::ValveCreated { valve_id }
            | Self::ValveRemoved { valve_id }
            | Self::MeasurementRecorded { valve_id, .. } => *valve_id,
        }
    }

    /// Returns `true` if this is a lifecycle event (created/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::ValveCreated { .. } | Self::ValveRemoved { .. }
        )
    }

    /// Creates a valve created event.
    #[must_use]
    pub fn created(valve_id: ValveId) -> Self {
        Self::ValveCreated { valve_id }
    }

    /// Creates a valve removed event.
    #[must_use]
    pub fn removed(valve_id: ValveId) -> Self {
        Self::ValveRemoved { valve_id }
    }

    /// Creates a measurement event.
    #[must_use]
    pub fn measurement(valve_id: ValveId, celsius: f64) -> Self {
        Self::MeasurementRecorded { valve_id, celsius }
    }
}
