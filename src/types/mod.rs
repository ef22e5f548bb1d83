// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for valve state and addressing.
//!
//! Each type validates its domain at construction time, so the rest of the
//! library never handles raw out-of-range values.
//!
//! # Types
//!
//! - [`ValveId`] - Caller-assigned fleet-unique identifier
//! - [`TemperatureMode`] - Setpoint selector (comfort / eco / hourly)
//! - [`HeatingMode`] - Stored control algorithm (hysteresis / PID)
//! - [`PidGains`] - The kp/ki/kd coefficient triple
//! - [`ScheduleSlot`] - Validated (day, hour) schedule position

mod mode;
mod pid;
mod slot;
mod valve_id;

pub use mode::{HeatingMode, TemperatureMode};
pub use pid::PidGains;
pub use slot::ScheduleSlot;
pub use valve_id::ValveId;
