// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport-level request shape.

use serde_json::Value;

use crate::types::ValveId;

use super::RequestKind;

/// The raw ingredients of a request, as the transport layer hands them over.
///
/// A transport resolves its verb/route into a [`RequestKind`] and collects
/// the optional target id, the optional day/hour pair, and — for writes —
/// the payload with all wire-level JSON encoding already removed. The parts
/// are validated into a typed [`Request`](super::Request) by
/// [`Request::from_parts`](super::Request::from_parts).
///
/// # Examples
///
/// ```
/// use valvr_lib::request::{Request, RequestKind, RequestParts};
/// use valvr_lib::types::ValveId;
///
/// let parts = RequestParts::new(RequestKind::EcoTemperature).with_id(ValveId::new(42));
/// let request = Request::from_parts(parts).unwrap();
/// assert_eq!(request.kind(), RequestKind::EcoTemperature);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParts {
    /// The resolved operation.
    pub kind: RequestKind,
    /// Target valve id, when the caller supplied one.
    pub id: Option<ValveId>,
    /// Day-of-week (0 = Monday), when the caller supplied one.
    pub day: Option<u8>,
    /// Hour-of-day, when the caller supplied one.
    pub hour: Option<u8>,
    /// Decoded payload for write kinds.
    pub payload: Option<Value>,
}

impl RequestParts {
    /// Creates parts for a kind with nothing else set.
    #[must_use]
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            id: None,
            day: None,
            hour: None,
            payload: None,
        }
    }

    /// Sets the target valve id.
    #[must_use]
    pub fn with_id(mut self, id: ValveId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the day/hour pair.
    #[must_use]
    pub fn with_slot(mut self, day: u8, hour: u8) -> Self {
        self.day = Some(day);
        self.hour = Some(hour);
        self
    }

    /// Sets the decoded payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}
