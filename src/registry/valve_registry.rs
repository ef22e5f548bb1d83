// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve registry and request router.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use crate::event::{EventBus, FleetEvent};
use crate::request::{Request, RequestParts};
use crate::response::Reply;
use crate::state::ValveState;
use crate::types::ValveId;
use crate::valve::{Outcome, Valve};

use super::valve_config::ValveConfig;

/// The owner of every valve in the fleet, and the router that fans
/// requests out to them.
///
/// The registry is the only place valves live: creation registers a valve
/// here, removal discards it, and every query or update travels through
/// [`dispatch`](Self::dispatch). Valves themselves know nothing about the
/// fleet.
///
/// Membership changes take the map's write lock while dispatch fans out
/// under the read lock, so a valve can never disappear mid-broadcast, and
/// each valve serializes its own request handling internally.
///
/// # Examples
///
/// ```
/// use valvr_lib::registry::ValveRegistry;
/// use valvr_lib::request::Request;
/// use valvr_lib::response::Status;
/// use valvr_lib::types::ValveId;
///
/// #[tokio::main]
/// async fn main() {
///     let registry = ValveRegistry::new();
///     let id = ValveId::new(42);
///
///     assert!(registry.create(id).await);
///     assert!(registry.exists(id).await);
///
///     let reply = registry.dispatch(&Request::DesiredTemperature { id }).await;
///     assert_eq!(reply.status, Status::Ok);
/// }
/// ```
#[derive(Debug)]
pub struct ValveRegistry {
    /// Registered valves, keyed by id.
    valves: Arc<RwLock<HashMap<ValveId, Valve>>>,
    /// Event bus for broadcasting fleet events.
    event_bus: EventBus,
}

impl ValveRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            valves: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::new(),
        }
    }

    /// Creates an empty registry with custom event bus capacity.
    #[must_use]
    pub fn with_event_capacity(capacity: usize) -> Self {
        Self {
            valves: Arc::new(RwLock::new(HashMap::new())),
            event_bus: EventBus::with_capacity(capacity),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribes to fleet events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FleetEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Registers a valve with factory-default state.
    ///
    /// Creation is idempotent by id: if the id is already registered this
    /// is a no-op and returns `false`; otherwise the valve is created and
    /// `true` is returned.
    pub async fn create(&self, id: ValveId) -> bool {
        self.create_with(id, ValveConfig::default()).await
    }

    /// Registers a valve with configured initial state.
    ///
    /// Same idempotency as [`create`](Self::create).
    pub async fn create_with(&self, id: ValveId, config: ValveConfig) -> bool {
        {
            let mut valves = self.valves.write().await;
            if valves.contains_key(&id) {
                tracing::debug!(valve_id = %id, "valve already exists");
                return false;
            }
            valves.insert(id, Valve::with_state(id, config.build_state()));
        }

        tracing::info!(valve_id = %id, "valve created");
        self.event_bus.publish(FleetEvent::created(id));
        true
    }

    /// Removes a valve and discards its state.
    ///
    /// Returns `false` when no valve had that id.
    pub async fn remove(&self, id: ValveId) -> bool {
        let removed = self.valves.write().await.remove(&id).is_some();

        if removed {
            tracing::info!(valve_id = %id, "valve removed");
            self.event_bus.publish(FleetEvent::removed(id));
        } else {
            tracing::debug!(valve_id = %id, "remove: no such valve");
        }
        removed
    }

    /// Returns the registered valve ids, in no particular order.
    pub async fn ids(&self) -> Vec<ValveId> {
        self.valves.read().await.keys().copied().collect()
    }

    /// Returns `true` when a valve with the given id is registered.
    pub async fn exists(&self, id: ValveId) -> bool {
        self.valves.read().await.contains_key(&id)
    }

    /// Returns the number of registered valves.
    pub async fn count(&self) -> usize {
        self.valves.read().await.len()
    }

    /// Returns a copy of a valve's current state.
    pub async fn state_of(&self, id: ValveId) -> Option<ValveState> {
        self.valves.read().await.get(&id).map(Valve::snapshot)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Fans a request out to every valve and resolves the outcome.
    ///
    /// At most one valve can match a targeted request, so the broadcast
    /// short-circuits on the first `Matched` outcome. Bulk updates are
    /// different: delivery is decided per valve by payload key, so the
    /// broadcast runs to completion and answers generic success when at
    /// least one valve delivered. When nothing matched or delivered, the
    /// reply is not-found.
    pub async fn dispatch(&self, request: &Request) -> Reply {
        let valves = self.valves.read().await;

        let mut delivered = false;
        for valve in valves.values() {
            match valve.handle(request) {
                Outcome::NotMine => {}
                Outcome::Matched(body) => {
                    tracing::debug!(
                        kind = %request.kind(),
                        valve_id = %valve.id(),
                        "request matched"
                    );
                    self.publish_for(request);
                    return body.map_or_else(Reply::ok_empty, Reply::ok);
                }
                Outcome::Delivered => delivered = true,
            }
        }
        drop(valves);

        if delivered {
            tracing::debug!(kind = %request.kind(), "bulk update delivered");
            Reply::ok_empty()
        } else {
            tracing::debug!(kind = %request.kind(), "no valve matched");
            Reply::not_found()
        }
    }

    /// Decodes transport-level parts and dispatches the result.
    ///
    /// Decoding failures — a write without payload, an undecodable payload,
    /// a missing id, a day/hour outside the schedule grid — are resolved
    /// into a not-found reply without touching any valve; they never
    /// propagate as errors.
    pub async fn dispatch_parts(&self, parts: RequestParts) -> Reply {
        match Request::from_parts(parts) {
            Ok(request) => self.dispatch(&request).await,
            Err(e) => {
                tracing::debug!(error = %e, "request rejected");
                Reply::not_found()
            }
        }
    }

    /// Publishes the event a successfully matched request implies.
    fn publish_for(&self, request: &Request) {
        if let Request::SetCurrentTemperature { id, celsius } = request {
            self.event_bus.publish(FleetEvent::measurement(*id, *celsius));
        }
    }
}

impl Default for ValveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ValveRegistry {
    fn clone(&self) -> Self {
        Self {
            valves: Arc::clone(&self.valves),
            event_bus: self.event_bus.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{ReplyBody, Status};
    use crate::state::{FleetPatch, ValvePatch};
    use crate::types::TemperatureMode;

    fn id(n: u32) -> ValveId {
        ValveId::new(n)
    }

    #[tokio::test]
    async fn new_registry_is_empty() {
        let registry = ValveRegistry::new();
        assert_eq!(registry.count().await, 0);
        assert!(registry.ids().await.is_empty());
    }

    #[tokio::test]
    async fn create_then_exists() {
        let registry = ValveRegistry::new();
        assert!(registry.create(id(42)).await);
        assert!(registry.exists(id(42)).await);
        assert_eq!(registry.ids().await, vec![id(42)]);
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let registry = ValveRegistry::new();
        assert!(registry.create(id(42)).await);
        assert!(!registry.create(id(42)).await);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn second_create_does_not_reset_state() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;
        registry
            .dispatch(&Request::SetEcoTemperature {
                id: id(1),
                celsius: 19.0,
            })
            .await;

        registry.create(id(1)).await;
        assert_eq!(registry.state_of(id(1)).await.unwrap().eco(), 19.0);
    }

    #[tokio::test]
    async fn remove_then_exists_is_false() {
        let registry = ValveRegistry::new();
        registry.create(id(42)).await;

        assert!(registry.remove(id(42)).await);
        assert!(!registry.exists(id(42)).await);
        assert!(registry.ids().await.is_empty());
    }

    #[tokio::test]
    async fn remove_absent_id_is_a_no_op() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        assert!(!registry.remove(id(2)).await);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn create_with_config_applies_defaults() {
        let registry = ValveRegistry::new();
        registry
            .create_with(id(5), ValveConfig::new().with_alias("hall").with_eco(16.0))
            .await;

        let state = registry.state_of(id(5)).await.unwrap();
        assert_eq!(state.alias(), "hall");
        assert_eq!(state.eco(), 16.0);
    }

    #[tokio::test]
    async fn dispatch_routes_to_matching_valve_only() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;
        registry.create(id(2)).await;

        registry
            .dispatch(&Request::SetEcoTemperature {
                id: id(2),
                celsius: 19.5,
            })
            .await;

        assert_eq!(registry.state_of(id(1)).await.unwrap().eco(), 17.0);
        assert_eq!(registry.state_of(id(2)).await.unwrap().eco(), 19.5);
    }

    #[tokio::test]
    async fn dispatch_unknown_id_is_not_found() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        let reply = registry
            .dispatch(&Request::EcoTemperature { id: id(99) })
            .await;
        assert_eq!(reply, Reply::not_found());
    }

    #[tokio::test]
    async fn dispatch_read_returns_body() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        let reply = registry
            .dispatch(&Request::ComfortTemperature { id: id(1) })
            .await;
        assert_eq!(reply.status, Status::Ok);
        assert_eq!(reply.body, Some(ReplyBody::Celsius(21.0)));
    }

    #[tokio::test]
    async fn bulk_update_answers_success_without_body() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;
        registry.create(id(2)).await;

        let patch = FleetPatch::single(
            id(2),
            ValvePatch {
                mode: Some(TemperatureMode::Eco),
                ..ValvePatch::default()
            },
        );
        let reply = registry
            .dispatch(&Request::UpdateInfo {
                filter: None,
                patch,
            })
            .await;

        assert_eq!(reply, Reply::ok_empty());
        assert_eq!(
            registry.state_of(id(2)).await.unwrap().mode(),
            TemperatureMode::Eco
        );
        assert_eq!(
            registry.state_of(id(1)).await.unwrap().mode(),
            TemperatureMode::Comfort
        );
    }

    #[tokio::test]
    async fn bulk_update_for_unknown_ids_is_not_found() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        let patch = FleetPatch::single(id(9), ValvePatch::default());
        let reply = registry
            .dispatch(&Request::UpdateInfo {
                filter: None,
                patch,
            })
            .await;
        assert_eq!(reply, Reply::not_found());
    }

    #[tokio::test]
    async fn bulk_update_reaches_every_addressed_valve() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;
        registry.create(id(2)).await;

        let mut patch = FleetPatch::default();
        patch.insert(
            id(1),
            ValvePatch {
                comfort: Some(22.0),
                ..ValvePatch::default()
            },
        );
        patch.insert(
            id(2),
            ValvePatch {
                comfort: Some(23.0),
                ..ValvePatch::default()
            },
        );

        let reply = registry
            .dispatch(&Request::UpdateInfo {
                filter: None,
                patch,
            })
            .await;

        assert_eq!(reply, Reply::ok_empty());
        assert_eq!(registry.state_of(id(1)).await.unwrap().comfort(), 22.0);
        assert_eq!(registry.state_of(id(2)).await.unwrap().comfort(), 23.0);
    }

    #[tokio::test]
    async fn dispatch_parts_resolves_decode_failures() {
        use crate::request::{RequestKind, RequestParts};

        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        // Write without payload
        let reply = registry
            .dispatch_parts(RequestParts::new(RequestKind::SetEcoTemperature).with_id(id(1)))
            .await;
        assert_eq!(reply.status, Status::NotFound);

        // Day outside the schedule grid
        let reply = registry
            .dispatch_parts(
                RequestParts::new(RequestKind::ScheduledTemperature)
                    .with_id(id(1))
                    .with_slot(7, 0),
            )
            .await;
        assert_eq!(reply.status, Status::NotFound);

        // Neither touched the valve
        assert_eq!(registry.state_of(id(1)).await.unwrap().eco(), 17.0);
    }

    #[tokio::test]
    async fn lifecycle_events_are_published() {
        let registry = ValveRegistry::new();
        let mut events = registry.subscribe();

        registry.create(id(42)).await;
        registry.remove(id(42)).await;

        assert_eq!(
            events.recv().await.unwrap(),
            FleetEvent::created(id(42))
        );
        assert_eq!(
            events.recv().await.unwrap(),
            FleetEvent::removed(id(42))
        );
    }

    #[tokio::test]
    async fn idempotent_create_publishes_no_second_event() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        let mut events = registry.subscribe();
        registry.create(id(1)).await;
        registry.create(id(2)).await;

        // The only event is for the genuinely new valve.
        assert_eq!(events.recv().await.unwrap(), FleetEvent::created(id(2)));
    }

    #[tokio::test]
    async fn measurement_event_is_published_on_report() {
        let registry = ValveRegistry::new();
        registry.create(id(7)).await;
        let mut events = registry.subscribe();

        registry
            .dispatch(&Request::SetCurrentTemperature {
                id: id(7),
                celsius: 21.6,
            })
            .await;

        assert_eq!(
            events.recv().await.unwrap(),
            FleetEvent::measurement(id(7), 21.6)
        );
    }

    #[tokio::test]
    async fn clone_shares_the_fleet() {
        let registry = ValveRegistry::new();
        let clone = registry.clone();

        registry.create(id(1)).await;
        assert!(clone.exists(id(1)).await);
    }
}
