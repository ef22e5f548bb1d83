// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end dispatch tests against the public registry API.

use valvr_lib::request::{Request, RequestKind, RequestParts};
use valvr_lib::response::{Reply, ReplyBody, Status};
use valvr_lib::state::{FleetPatch, ValvePatch};
use valvr_lib::types::{ScheduleSlot, TemperatureMode, ValveId};
use valvr_lib::ValveRegistry;

fn id(n: u32) -> ValveId {
    ValveId::new(n)
}

// ============================================================================
// Lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn create_exists_remove() {
        let registry = ValveRegistry::new();

        for n in [1, 2, 3] {
            assert!(registry.create(id(n)).await);
            assert!(registry.exists(id(n)).await);
        }
        assert_eq!(registry.count().await, 3);

        assert!(registry.remove(id(2)).await);
        assert!(!registry.exists(id(2)).await);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn double_create_keeps_registry_size() {
        let registry = ValveRegistry::new();

        assert!(registry.create(id(42)).await);
        assert!(!registry.create(id(42)).await);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn remove_absent_reports_not_found() {
        let registry = ValveRegistry::new();
        assert!(!registry.remove(id(42)).await);
    }

    #[tokio::test]
    async fn removed_valve_is_unreachable() {
        let registry = ValveRegistry::new();
        registry.create(id(42)).await;
        registry.remove(id(42)).await;

        let reply = registry.dispatch(&Request::EcoTemperature { id: id(42) }).await;
        assert_eq!(reply.status, Status::NotFound);
    }
}

// ============================================================================
// Schedule round-trips
// ============================================================================

mod schedule {
    use super::*;

    #[tokio::test]
    async fn every_slot_round_trips() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        for day in 0..=6u8 {
            for hour in 0..=23u8 {
                let slot = ScheduleSlot::new(day, hour).unwrap();
                let value = f64::from(day) + f64::from(hour) / 100.0;

                let write = registry
                    .dispatch(&Request::SetScheduledTemperature {
                        id: id(1),
                        slot,
                        celsius: value,
                    })
                    .await;
                assert_eq!(write.status, Status::Ok);

                let read = registry
                    .dispatch(&Request::ScheduledTemperature { id: id(1), slot })
                    .await;
                assert_eq!(read.body, Some(ReplyBody::Celsius(value)));
            }
        }
    }

    #[tokio::test]
    async fn out_of_domain_slot_reports_instead_of_crashing() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        for (day, hour) in [(7u8, 0u8), (0, 24), (255, 255)] {
            let reply = registry
                .dispatch_parts(
                    RequestParts::new(RequestKind::ScheduledTemperature)
                        .with_id(id(1))
                        .with_slot(day, hour),
                )
                .await;
            assert_eq!(reply, Reply::not_found());
        }

        // The registry is still fully operational afterwards.
        let reply = registry
            .dispatch(&Request::ComfortTemperature { id: id(1) })
            .await;
        assert_eq!(reply.status, Status::Ok);
    }
}

// ============================================================================
// Measurement history
// ============================================================================

mod history {
    use super::*;

    async fn report(registry: &ValveRegistry, celsius: f64) {
        let reply = registry
            .dispatch(&Request::SetCurrentTemperature { id: id(1), celsius })
            .await;
        assert_eq!(reply.status, Status::Ok);
    }

    async fn entries(registry: &ValveRegistry) -> Vec<f64> {
        let reply = registry.dispatch(&Request::History { id: id(1) }).await;
        let Some(ReplyBody::History(report)) = reply.body else {
            panic!("expected a history body");
        };
        report.entries().iter().map(|(_, t)| *t).collect()
    }

    #[tokio::test]
    async fn forty_one_samples_keep_the_last_forty() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        for i in 0..41 {
            report(&registry, f64::from(i)).await;
        }

        let temps = entries(&registry).await;
        assert_eq!(temps.len(), 40);
        assert_eq!(temps.first(), Some(&1.0));
        assert_eq!(temps.last(), Some(&40.0));
    }

    #[tokio::test]
    async fn fewer_samples_are_all_kept_in_order() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        report(&registry, 21.6).await;
        report(&registry, 21.7).await;

        assert_eq!(entries(&registry).await, [21.6, 21.7]);
    }

    #[tokio::test]
    async fn latest_report_becomes_current() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        report(&registry, 20.1).await;
        report(&registry, 20.2).await;

        let reply = registry
            .dispatch(&Request::CurrentTemperature { id: id(1) })
            .await;
        assert_eq!(reply.body, Some(ReplyBody::Current(Some(20.2))));
    }
}

// ============================================================================
// Desired-temperature resolution
// ============================================================================

mod desired {
    use super::*;

    async fn set_mode(registry: &ValveRegistry, mode: TemperatureMode) {
        registry
            .dispatch(&Request::SetTemperatureMode { id: id(1), mode })
            .await;
    }

    async fn desired(registry: &ValveRegistry) -> f64 {
        let reply = registry
            .dispatch(&Request::DesiredTemperature { id: id(1) })
            .await;
        let Some(ReplyBody::Celsius(value)) = reply.body else {
            panic!("expected a temperature body");
        };
        value
    }

    #[tokio::test]
    async fn comfort_mode_ignores_eco_and_schedule() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        registry
            .dispatch(&Request::SetComfortTemperature {
                id: id(1),
                celsius: 25.0,
            })
            .await;
        registry
            .dispatch(&Request::SetEcoTemperature {
                id: id(1),
                celsius: 15.0,
            })
            .await;

        set_mode(&registry, TemperatureMode::Comfort).await;
        assert_eq!(desired(&registry).await, 25.0);
    }

    #[tokio::test]
    async fn eco_mode_returns_eco() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        registry
            .dispatch(&Request::SetEcoTemperature {
                id: id(1),
                celsius: 18.0,
            })
            .await;
        set_mode(&registry, TemperatureMode::Eco).await;
        assert_eq!(desired(&registry).await, 18.0);
    }

    #[tokio::test]
    async fn hourly_mode_follows_the_schedule() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        // Flatten the whole week so the assertion is clock-independent.
        for day in 0..=6u8 {
            for hour in 0..=23u8 {
                registry
                    .dispatch(&Request::SetScheduledTemperature {
                        id: id(1),
                        slot: ScheduleSlot::new(day, hour).unwrap(),
                        celsius: 19.25,
                    })
                    .await;
            }
        }

        set_mode(&registry, TemperatureMode::Hourly).await;
        assert_eq!(desired(&registry).await, 19.25);
    }
}

// ============================================================================
// Bulk updates
// ============================================================================

mod bulk_update {
    use super::*;

    #[tokio::test]
    async fn partial_update_leaves_other_fields() {
        let registry = ValveRegistry::new();
        registry.create(id(1)).await;

        let patch = FleetPatch::single(
            id(1),
            ValvePatch {
                eco: Some(19.0),
                ..ValvePatch::default()
            },
        );
        registry
            .dispatch(&Request::UpdateInfo {
                filter: None,
                patch,
            })
            .await;

        let state = registry.state_of(id(1)).await.unwrap();
        assert_eq!(state.eco(), 19.0);
        assert_eq!(state.comfort(), 21.0);
    }

    #[tokio::test]
    async fn update_decoded_from_wire_payload() {
        let registry = ValveRegistry::new();
        registry.create(id(42)).await;

        let payload = serde_json::json!({
            "42": {
                "comfort": 22.0,
                "eco": 19.0,
                "mode": "eco",
                "hysteresis_band": 0.3,
                "kp": 3.0,
                "ki": 0.1,
                "kd": 0.2
            }
        });
        let reply = registry
            .dispatch_parts(RequestParts::new(RequestKind::UpdateInfo).with_payload(payload))
            .await;
        assert_eq!(reply, Reply::ok_empty());

        let state = registry.state_of(id(42)).await.unwrap();
        assert_eq!(state.comfort(), 22.0);
        assert_eq!(state.eco(), 19.0);
        assert_eq!(state.mode(), TemperatureMode::Eco);
        assert_eq!(state.hysteresis_band(), 0.3);
        assert_eq!(state.pid().kp, 3.0);
    }
}

// ============================================================================
// Full scenario
// ============================================================================

#[tokio::test]
async fn create_update_measure_remove_scenario() {
    let registry = ValveRegistry::new();

    // Create valve 42 and see it listed.
    assert!(registry.create(id(42)).await);
    assert_eq!(registry.ids().await, vec![id(42)]);

    // Bulk-update setpoints and switch to eco mode.
    let payload = serde_json::json!({"42": {"comfort": 22.0, "eco": 19.0, "mode": "eco"}});
    let reply = registry
        .dispatch_parts(RequestParts::new(RequestKind::UpdateInfo).with_payload(payload))
        .await;
    assert_eq!(reply.status, Status::Ok);

    let reply = registry
        .dispatch(&Request::DesiredTemperature { id: id(42) })
        .await;
    assert_eq!(reply.body, Some(ReplyBody::Celsius(19.0)));

    // Report two measurements and read them back in order.
    for celsius in [21.6, 21.7] {
        registry
            .dispatch(&Request::SetCurrentTemperature {
                id: id(42),
                celsius,
            })
            .await;
    }
    let reply = registry.dispatch(&Request::History { id: id(42) }).await;
    let Some(ReplyBody::History(report)) = reply.body else {
        panic!("expected a history body");
    };
    let temps: Vec<f64> = report.entries().iter().map(|(_, t)| *t).collect();
    assert_eq!(temps, [21.6, 21.7]);

    // Remove the valve; every further query is not-found.
    assert!(registry.remove(id(42)).await);
    assert!(registry.ids().await.is_empty());

    let reply = registry.dispatch(&Request::Info { id: id(42), slot: None }).await;
    assert_eq!(reply.status, Status::NotFound);
}
