// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve registry: fleet membership and request routing.
//!
//! # Overview
//!
//! The [`ValveRegistry`] is the central component for applications that
//! manage a valve fleet. It provides:
//!
//! - **Ownership**: the registry is the sole owner of every valve; there is
//!   no global valve collection anywhere else
//! - **Lifecycle**: idempotent creation by caller-assigned id, lookup, and
//!   removal
//! - **Routing**: fan-out dispatch that lets exactly one valve claim a
//!   targeted request, with bulk updates delivered by payload key
//! - **Events**: lifecycle and measurement events via broadcast channels
//!
//! # Examples
//!
//! ```
//! use valvr_lib::registry::{ValveConfig, ValveRegistry};
//! use valvr_lib::request::Request;
//! use valvr_lib::types::ValveId;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ValveRegistry::new();
//!     let id = ValveId::new(42);
//!
//!     registry
//!         .create_with(id, ValveConfig::new().with_alias("living room"))
//!         .await;
//!
//!     let reply = registry
//!         .dispatch(&Request::SetCurrentTemperature { id, celsius: 21.6 })
//!         .await;
//!     assert_eq!(reply.status.code(), 200);
//! }
//! ```

mod valve_config;
mod valve_registry;

pub use valve_config::ValveConfig;
pub use valve_registry::ValveRegistry;
