// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve state and partial updates.
//!
//! [`ValveState`] is the full mutable state of one valve; [`ValvePatch`] and
//! [`FleetPatch`] describe the partial updates a bulk info request applies
//! to it.

mod patch;
mod valve_state;

pub use patch::{FleetPatch, ValvePatch};
pub use valve_state::ValveState;
