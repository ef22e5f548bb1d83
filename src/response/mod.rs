// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types.
//!
//! Every dispatched request resolves into a [`Reply`]: a [`Status`] plus an
//! optional [`ReplyBody`]. Read requests answer with the typed snapshot
//! structs defined here; write requests answer with empty bodies.

mod reply;
mod reports;

pub use reply::{Reply, Status};
pub use reports::{HeatingReport, HistoryReport, TemperatureReport, ValveInfo};

use serde::Serialize;

use crate::types::{TemperatureMode, ValveId};

/// A response body, serialized untagged so each variant keeps its natural
/// wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyBody {
    /// Full info bundle.
    Info(ValveInfo),
    /// Temperature bundle.
    Temperatures(TemperatureReport),
    /// Heating-algorithm bundle.
    Heating(HeatingReport),
    /// Measurement history keyed by timestamp.
    History(HistoryReport),
    /// A temperature mode (as its index).
    Mode(TemperatureMode),
    /// The last reported temperature; `null` until first report.
    Current(Option<f64>),
    /// A single temperature value.
    Celsius(f64),
    /// A valve alias.
    Alias(String),
    /// A single valve id.
    Id(ValveId),
    /// The registered valve ids.
    Ids(Vec<ValveId>),
}
