// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dispatch results.

use super::ReplyBody;

/// Outcome category of a dispatched request.
///
/// The variants map one-to-one onto the HTTP status codes the transport
/// layer serves. Client errors (missing or undecodable payloads,
/// out-of-range schedule positions) resolve to [`Status::NotFound`], which
/// is how the fleet protocol reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A new valve was registered.
    Created,
    /// The request was answered; the body may carry a snapshot.
    Ok,
    /// The request was understood but carried nothing to act on.
    NoContent,
    /// No valve matched, or the request could not be decoded.
    NotFound,
}

impl Status {
    /// Returns the HTTP status code for this outcome.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Created => 201,
            Self::Ok => 200,
            Self::NoContent => 204,
            Self::NotFound => 404,
        }
    }
}

/// The resolved result of one dispatched request.
///
/// Whatever happens inside the fleet — identifier mismatches, malformed
/// payloads, schedule positions outside the grid — callers only ever see a
/// status plus an optional body.
///
/// # Examples
///
/// ```
/// use valvr_lib::response::{Reply, ReplyBody, Status};
///
/// let reply = Reply::ok(ReplyBody::Celsius(21.5));
/// assert_eq!(reply.status, Status::Ok);
/// assert_eq!(reply.status.code(), 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Outcome category.
    pub status: Status,
    /// Response body, absent for empty-bodied outcomes.
    pub body: Option<ReplyBody>,
}

impl Reply {
    /// Success carrying a body.
    #[must_use]
    pub fn ok(body: ReplyBody) -> Self {
        Self {
            status: Status::Ok,
            body: Some(body),
        }
    }

    /// Success with an empty body.
    #[must_use]
    pub fn ok_empty() -> Self {
        Self {
            status: Status::Ok,
            body: None,
        }
    }

    /// A valve was created; the body carries its id.
    #[must_use]
    pub fn created(body: ReplyBody) -> Self {
        Self {
            status: Status::Created,
            body: Some(body),
        }
    }

    /// The request carried nothing to act on.
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
        }
    }

    /// No valve matched the request, or it could not be decoded.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(Status::Created.code(), 201);
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::NoContent.code(), 204);
        assert_eq!(Status::NotFound.code(), 404);
    }

    #[test]
    fn constructors_set_status_and_body() {
        assert_eq!(Reply::ok_empty().status, Status::Ok);
        assert!(Reply::ok_empty().body.is_none());

        let reply = Reply::ok(ReplyBody::Alias("room".to_string()));
        assert!(reply.body.is_some());

        assert_eq!(Reply::not_found().status, Status::NotFound);
        assert_eq!(Reply::no_content().status, Status::NoContent);
    }
}
