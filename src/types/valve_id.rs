// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Unique identifier for a valve in the fleet.
///
/// Identifiers are assigned by the caller at creation time and are immutable
/// for the lifetime of the valve. The registry guarantees uniqueness: a
/// second creation request for an existing id is a no-op.
///
/// # Examples
///
/// ```
/// use valvr_lib::types::ValveId;
///
/// let id = ValveId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
///
/// // The wire sends ids as decimal strings
/// let parsed: ValveId = "42".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValveId(u32);

impl ValveId {
    /// Creates a valve identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ValveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValveId({})", self.0)
    }
}

impl fmt::Display for ValveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ValveId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ValueError::InvalidValveId(s.to_string()))
    }
}

impl From<u32> for ValveId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ValveId> for u32 {
    fn from(id: ValveId) -> Self {
        id.0
    }
}

impl serde::Serialize for ValveId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}
