// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One thermostatic radiator valve.

use parking_lot::Mutex;

use crate::request::Request;
use crate::response::{HeatingReport, HistoryReport, ReplyBody, TemperatureReport, ValveInfo};
use crate::state::ValveState;
use crate::types::ValveId;

/// A valve's per-request outcome, consumed only by the registry.
///
/// `NotMine` is a routing signal, not a failure: during fan-out every valve
/// except the addressed one reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request targets another valve.
    NotMine,
    /// This valve answered the request. Reads carry a snapshot body;
    /// writes answer with no body.
    Matched(Option<ReplyBody>),
    /// A bulk update addressed to this valve by payload key was applied.
    Delivered,
}

/// One radiator valve: an identifier plus its locked state.
///
/// The valve holds no reference to the registry or any other valve; it only
/// ever acts on its own state, and only through [`handle`](Self::handle).
/// The internal lock makes every operation atomic — a reader can never
/// observe a partially applied update.
///
/// # Examples
///
/// ```
/// use valvr_lib::request::Request;
/// use valvr_lib::types::ValveId;
/// use valvr_lib::valve::{Outcome, Valve};
///
/// let valve = Valve::new(ValveId::new(42));
/// let request = Request::EcoTemperature { id: ValveId::new(42) };
/// assert!(matches!(valve.handle(&request), Outcome::Matched(Some(_))));
///
/// let other = Request::EcoTemperature { id: ValveId::new(7) };
/// assert_eq!(valve.handle(&other), Outcome::NotMine);
/// ```
#[derive(Debug)]
pub struct Valve {
    id: ValveId,
    state: Mutex<ValveState>,
}

impl Valve {
    /// Creates a valve with factory-default state.
    #[must_use]
    pub fn new(id: ValveId) -> Self {
        Self::with_state(id, ValveState::new())
    }

    /// Creates a valve with explicit initial state.
    #[must_use]
    pub fn with_state(id: ValveId, state: ValveState) -> Self {
        Self {
            id,
            state: Mutex::new(state),
        }
    }

    /// Returns the valve's identifier.
    #[must_use]
    pub fn id(&self) -> ValveId {
        self.id
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ValveState {
        self.state.lock().clone()
    }

    /// Executes a request against this valve's state.
    ///
    /// A request targeting a different id is ignored (`NotMine`). A bulk
    /// update is applied when its patch map carries an entry for this valve
    /// and its optional filter does not exclude it (`Delivered`). Everything
    /// else executes under the state lock and reports `Matched`.
    pub fn handle(&self, request: &Request) -> Outcome {
        if let Request::UpdateInfo { filter, patch } = request {
            if filter.is_some_and(|f| f != self.id) {
                return Outcome::NotMine;
            }
            let Some(patch) = patch.get(self.id) else {
                return Outcome::NotMine;
            };
            self.state.lock().apply(patch);
            tracing::debug!(valve_id = %self.id, "bulk update delivered");
            return Outcome::Delivered;
        }

        if request.target() != Some(self.id) {
            return Outcome::NotMine;
        }

        let mut state = self.state.lock();
        let body = match request {
            Request::Info { slot, .. } => Some(ReplyBody::Info(ValveInfo::snapshot(&state, *slot))),
            Request::Temperatures { slot, .. } => Some(ReplyBody::Temperatures(
                TemperatureReport::snapshot(&state, *slot),
            )),
            Request::CurrentTemperature { .. } => {
                Some(ReplyBody::Current(state.current_temperature()))
            }
            Request::DesiredTemperature { .. } => {
                Some(ReplyBody::Celsius(state.desired_temperature()))
            }
            Request::EcoTemperature { .. } => Some(ReplyBody::Celsius(state.eco())),
            Request::ComfortTemperature { .. } => Some(ReplyBody::Celsius(state.comfort())),
            Request::ScheduledTemperature { slot, .. } => {
                Some(ReplyBody::Celsius(state.scheduled(*slot)))
            }
            Request::TemperatureMode { .. } => Some(ReplyBody::Mode(state.mode())),
            Request::HeatingMode { .. } => {
                Some(ReplyBody::Heating(HeatingReport::snapshot(&state)))
            }
            Request::Alias { .. } => Some(ReplyBody::Alias(state.alias().to_string())),
            Request::History { .. } => {
                Some(ReplyBody::History(HistoryReport::snapshot(state.history())))
            }
            Request::SetCurrentTemperature { celsius, .. } => {
                state.record_current(*celsius);
                None
            }
            Request::SetEcoTemperature { celsius, .. } => {
                state.set_eco(*celsius);
                None
            }
            Request::SetComfortTemperature { celsius, .. } => {
                state.set_comfort(*celsius);
                None
            }
            Request::SetScheduledTemperature { slot, celsius, .. } => {
                state.set_scheduled(*slot, *celsius);
                None
            }
            Request::SetTemperatureMode { mode, .. } => {
                state.set_mode(*mode);
                None
            }
            Request::SetHeatingMode { mode, .. } => {
                state.set_heating_mode(*mode);
                None
            }
            Request::SetAlias { alias, .. } => {
                state.set_alias(alias.clone());
                None
            }
            // Bulk updates never reach this point.
            Request::UpdateInfo { .. } => unreachable!(),
        };
        Outcome::Matched(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FleetPatch, ValvePatch};
    use crate::types::{HeatingMode, ScheduleSlot, TemperatureMode};

    fn valve(n: u32) -> Valve {
        Valve::new(ValveId::new(n))
    }

    #[test]
    fn ignores_requests_for_other_ids() {
        let v = valve(1);
        for request in [
            Request::Info {
                id: ValveId::new(2),
                slot: None,
            },
            Request::SetEcoTemperature {
                id: ValveId::new(2),
                celsius: 19.0,
            },
            Request::History { id: ValveId::new(2) },
        ] {
            assert_eq!(v.handle(&request), Outcome::NotMine);
        }

        // And nothing changed.
        assert_eq!(v.snapshot().eco(), 17.0);
    }

    #[test]
    fn read_eco_and_comfort() {
        let v = valve(1);
        let eco = v.handle(&Request::EcoTemperature { id: v.id() });
        assert_eq!(eco, Outcome::Matched(Some(ReplyBody::Celsius(17.0))));

        let comfort = v.handle(&Request::ComfortTemperature { id: v.id() });
        assert_eq!(comfort, Outcome::Matched(Some(ReplyBody::Celsius(21.0))));
    }

    #[test]
    fn write_then_read_round_trips() {
        let v = valve(1);

        let write = v.handle(&Request::SetEcoTemperature {
            id: v.id(),
            celsius: 18.5,
        });
        assert_eq!(write, Outcome::Matched(None));

        let read = v.handle(&Request::EcoTemperature { id: v.id() });
        assert_eq!(read, Outcome::Matched(Some(ReplyBody::Celsius(18.5))));
    }

    #[test]
    fn scheduled_round_trip() {
        let v = valve(1);
        let slot = ScheduleSlot::new(5, 10).unwrap();

        v.handle(&Request::SetScheduledTemperature {
            id: v.id(),
            slot,
            celsius: 20.0,
        });
        let read = v.handle(&Request::ScheduledTemperature { id: v.id(), slot });
        assert_eq!(read, Outcome::Matched(Some(ReplyBody::Celsius(20.0))));
    }

    #[test]
    fn current_temperature_starts_unknown() {
        let v = valve(1);
        let read = v.handle(&Request::CurrentTemperature { id: v.id() });
        assert_eq!(read, Outcome::Matched(Some(ReplyBody::Current(None))));
    }

    #[test]
    fn measurements_accumulate_in_history() {
        let v = valve(1);
        v.handle(&Request::SetCurrentTemperature {
            id: v.id(),
            celsius: 21.6,
        });
        v.handle(&Request::SetCurrentTemperature {
            id: v.id(),
            celsius: 21.7,
        });

        let Outcome::Matched(Some(ReplyBody::History(report))) =
            v.handle(&Request::History { id: v.id() })
        else {
            panic!("expected a history body");
        };
        let temps: Vec<f64> = report.entries().iter().map(|(_, t)| *t).collect();
        assert_eq!(temps, [21.6, 21.7]);
    }

    #[test]
    fn mode_switch_changes_desired() {
        let v = valve(1);
        v.handle(&Request::SetTemperatureMode {
            id: v.id(),
            mode: TemperatureMode::Eco,
        });

        let desired = v.handle(&Request::DesiredTemperature { id: v.id() });
        assert_eq!(desired, Outcome::Matched(Some(ReplyBody::Celsius(17.0))));
    }

    #[test]
    fn heating_bundle_reflects_writes() {
        let v = valve(1);
        v.handle(&Request::SetHeatingMode {
            id: v.id(),
            mode: HeatingMode::Pid,
        });

        let Outcome::Matched(Some(ReplyBody::Heating(report))) =
            v.handle(&Request::HeatingMode { id: v.id() })
        else {
            panic!("expected a heating body");
        };
        assert_eq!(report.heating_mode, HeatingMode::Pid);
        assert_eq!(report.hysteresis_band, 0.1);
    }

    #[test]
    fn alias_round_trip() {
        let v = valve(1);
        v.handle(&Request::SetAlias {
            id: v.id(),
            alias: "room".to_string(),
        });
        let read = v.handle(&Request::Alias { id: v.id() });
        assert_eq!(
            read,
            Outcome::Matched(Some(ReplyBody::Alias("room".to_string())))
        );
    }

    #[test]
    fn bulk_update_delivers_by_payload_key() {
        let v = valve(42);
        let patch = FleetPatch::single(
            v.id(),
            ValvePatch {
                eco: Some(19.0),
                ..ValvePatch::default()
            },
        );

        let outcome = v.handle(&Request::UpdateInfo {
            filter: None,
            patch,
        });
        assert_eq!(outcome, Outcome::Delivered);
        assert_eq!(v.snapshot().eco(), 19.0);
        // Untouched fields keep their values.
        assert_eq!(v.snapshot().comfort(), 21.0);
    }

    #[test]
    fn bulk_update_without_entry_is_not_mine() {
        let v = valve(1);
        let patch = FleetPatch::single(ValveId::new(2), ValvePatch::default());

        let outcome = v.handle(&Request::UpdateInfo {
            filter: None,
            patch,
        });
        assert_eq!(outcome, Outcome::NotMine);
    }

    #[test]
    fn bulk_update_respects_filter() {
        let v = valve(1);
        let patch = FleetPatch::single(
            v.id(),
            ValvePatch {
                comfort: Some(25.0),
                ..ValvePatch::default()
            },
        );

        // Filter excludes this valve even though the payload addresses it.
        let outcome = v.handle(&Request::UpdateInfo {
            filter: Some(ValveId::new(9)),
            patch: patch.clone(),
        });
        assert_eq!(outcome, Outcome::NotMine);
        assert_eq!(v.snapshot().comfort(), 21.0);

        // Matching filter delivers.
        let outcome = v.handle(&Request::UpdateInfo {
            filter: Some(v.id()),
            patch,
        });
        assert_eq!(outcome, Outcome::Delivered);
        assert_eq!(v.snapshot().comfort(), 25.0);
    }

    #[test]
    fn info_bundle_carries_schedule_entry_when_asked() {
        let v = valve(1);
        let slot = ScheduleSlot::new(0, 3).unwrap();

        let Outcome::Matched(Some(ReplyBody::Info(info))) = v.handle(&Request::Info {
            id: v.id(),
            slot: Some(slot),
        }) else {
            panic!("expected an info body");
        };
        assert_eq!(info.hourly, Some(17.0));
        assert_eq!(info.desired, 21.0);
    }
}
