// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fleet events and their broadcast bus.
//!
//! The registry publishes a [`FleetEvent`] whenever a valve is created or
//! removed and whenever a measurement is recorded. Subscribe through
//! [`ValveRegistry::subscribe`](crate::registry::ValveRegistry::subscribe).

mod event_bus;
mod fleet_event;

pub use event_bus::EventBus;
pub use fleet_event::FleetEvent;
