// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ValvR` Lib - A Rust library to manage fleets of thermostatic radiator
//! valves.
//!
//! This library models independently addressable radiator-valve devices and
//! routes typed query/update requests to the right one. Each valve owns its
//! setpoints, weekly schedule, operating modes, stored heating-algorithm
//! parameters, and a bounded history of reported measurements; the registry
//! owns the valves and fans every request out to them.
//!
//! # Supported Features
//!
//! - **Fleet lifecycle**: idempotent creation by caller-assigned id, lookup,
//!   removal
//! - **Typed requests**: a closed set of ~20 query/update operations with
//!   validated fields
//! - **Setpoint handling**: comfort/eco setpoints, a 7×24 weekly schedule,
//!   and mode-dependent desired-temperature resolution
//! - **Measurements**: reported temperatures with a 40-sample sliding
//!   history
//! - **Events**: valve lifecycle and measurement broadcasts
//! - **HTTP adapter** (feature `http`): the fleet's REST surface served
//!   with actix-web
//!
//! # Quick Start
//!
//! ```
//! use valvr_lib::{Request, ValveId, ValveRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ValveRegistry::new();
//!     let id = ValveId::new(42);
//!
//!     // Register a valve and report a measurement
//!     registry.create(id).await;
//!     registry
//!         .dispatch(&Request::SetCurrentTemperature { id, celsius: 21.6 })
//!         .await;
//!
//!     // Query the setpoint currently in effect
//!     let reply = registry.dispatch(&Request::DesiredTemperature { id }).await;
//!     assert_eq!(reply.status.code(), 200);
//! }
//! ```
//!
//! # Event Subscription
//!
//! ```
//! use valvr_lib::{FleetEvent, ValveId, ValveRegistry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ValveRegistry::new();
//!     let mut events = registry.subscribe();
//!
//!     registry.create(ValveId::new(1)).await;
//!     assert_eq!(
//!         events.recv().await.unwrap(),
//!         FleetEvent::created(ValveId::new(1))
//!     );
//! }
//! ```
//!
//! # Serving the HTTP API
//!
//! ```no_run
//! use valvr_lib::ValveRegistry;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let registry = ValveRegistry::new();
//!     valvr_lib::http::serve(registry, ("0.0.0.0", 60000)).await
//! }
//! ```

pub mod error;
pub mod event;
pub mod history;
#[cfg(feature = "http")]
pub mod http;
pub mod registry;
pub mod request;
pub mod response;
pub mod schedule;
pub mod state;
pub mod types;
pub mod valve;

pub use error::{Error, RequestError, Result, ValueError};
pub use event::{EventBus, FleetEvent};
pub use registry::{ValveConfig, ValveRegistry};
pub use request::{Request, RequestKind, RequestParts};
pub use response::{
    HeatingReport, HistoryReport, Reply, ReplyBody, Status, TemperatureReport, ValveInfo,
};
pub use state::{FleetPatch, ValvePatch, ValveState};
pub use types::{HeatingMode, PidGains, ScheduleSlot, TemperatureMode, ValveId};
pub use valve::{Outcome, Valve};
