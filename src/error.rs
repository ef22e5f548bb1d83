// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ValvR` library.
//!
//! Two focused error enums cover the failure surface: [`ValueError`] for
//! domain values that violate their constraints, and [`RequestError`] for
//! requests that cannot be decoded into a well-formed operation. Routing
//! failures (no valve matched, valve not found) are not errors — they are
//! resolved by the registry into a [`Status`](crate::response::Status).

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while decoding a request.
    #[error("request error: {0}")]
    Request(#[from] RequestError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("{field} {actual} is out of range [0, {max}]")]
    OutOfRange {
        /// Which field was out of range ("day" or "hour").
        field: &'static str,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: u8,
    },

    /// An unrecognized temperature mode name or index.
    #[error("invalid temperature mode: {0}")]
    InvalidTemperatureMode(String),

    /// An unrecognized heating mode index.
    #[error("invalid heating mode: {0}")]
    InvalidHeatingMode(String),

    /// A valve identifier that is not a decimal integer.
    #[error("invalid valve id: {0}")]
    InvalidValveId(String),
}

/// Errors raised while decoding [`RequestParts`](crate::request::RequestParts)
/// into a typed [`Request`](crate::request::Request).
///
/// The registry resolves every one of these into a response status; none of
/// them escapes a dispatch call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// A write request arrived without a payload.
    #[error("write request carries no payload")]
    MissingPayload,

    /// The payload could not be decoded into the expected value.
    #[error("payload could not be decoded: {0}")]
    InvalidPayload(String),

    /// The operation targets a single valve but no id was supplied.
    #[error("request needs a target valve id")]
    MissingId,

    /// The operation addresses a schedule entry but day or hour is missing.
    #[error("request needs both day and hour")]
    MissingSlot,

    /// A supplied value violated its domain constraints.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
