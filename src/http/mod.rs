// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP adapter for the valve fleet.
//!
//! Maps the fleet's REST surface onto the typed core: every route resolves
//! into a [`RequestKind`], query parameters become the optional id and
//! day/hour fields, and PUT bodies are decoded down to plain values before
//! the registry sees them.
//!
//! All routes live under `/device/radiator-valve`. For compatibility with
//! existing fleet clients, client errors — an unparsable id, a missing
//! payload, a day outside the schedule grid — are served as 404.
//!
//! # Examples
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

use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes, Data, Query};
use actix_web::{App, HttpResponse, HttpServer};
use serde::Deserialize;
use serde_json::Value;

use crate::registry::ValveRegistry;
use crate::request::{RequestKind, RequestParts};
use crate::response::{Reply, ReplyBody, Status};
use crate::types::ValveId;

/// Builds the actix scope serving the fleet API.
///
/// Mount it in an `App`; the registry travels inside as shared state.
pub fn new_scope(registry: ValveRegistry) -> actix_web::Scope {
    web::scope("/device/radiator-valve")
        .route("", web::get().to(get_info))
        .route("", web::post().to(post_valve))
        .route("", web::put().to(put_info))
        .route("", web::delete().to(delete_valve))
        .route("/temperature", web::get().to(get_temperatures))
        .route("/temperature/current", web::get().to(get_current))
        .route("/temperature/current", web::put().to(put_current))
        .route("/temperature/currents", web::get().to(get_history))
        .route("/temperature/desired", web::get().to(get_desired))
        .route("/temperature/eco", web::get().to(get_eco))
        .route("/temperature/eco", web::put().to(put_eco))
        .route("/temperature/comfort", web::get().to(get_comfort))
        .route("/temperature/comfort", web::put().to(put_comfort))
        .route("/temperature/hourly", web::get().to(get_scheduled))
        .route("/temperature/hourly", web::put().to(put_scheduled))
        .route("/mode/temperature", web::get().to(get_mode))
        .route("/mode/temperature", web::put().to(put_mode))
        .route("/mode/heating", web::get().to(get_heating))
        .route("/mode/heating", web::put().to(put_heating))
        .route("/alias", web::get().to(get_alias))
        .route("/alias", web::put().to(put_alias))
        .app_data(Data::new(registry))
}

/// Runs an HTTP server exposing the fleet API on the given address.
///
/// # Errors
///
/// Returns any bind or runtime error from the underlying server.
pub async fn serve(
    registry: ValveRegistry,
    addr: impl std::net::ToSocketAddrs,
) -> std::io::Result<()> {
    HttpServer::new(move || App::new().service(new_scope(registry.clone())))
        .bind(addr)?
        .run()
        .await
}

/// Query parameters shared by all fleet routes.
///
/// Everything arrives as a string and is parsed by hand so that malformed
/// values resolve to the same 404 as any other client error.
#[derive(Debug, Default, Deserialize)]
struct FleetQuery {
    id: Option<String>,
    day: Option<String>,
    hour: Option<String>,
}

impl FleetQuery {
    /// Parses the query into request parts for a kind.
    ///
    /// `None` means some parameter did not parse at all.
    fn into_parts(self, kind: RequestKind) -> Option<RequestParts> {
        let mut parts = RequestParts::new(kind);
        if let Some(raw) = &self.id {
            parts.id = Some(raw.parse::<ValveId>().ok()?);
        }
        if let Some(raw) = &self.day {
            parts.day = Some(raw.trim().parse::<u8>().ok()?);
        }
        if let Some(raw) = &self.hour {
            parts.hour = Some(raw.trim().parse::<u8>().ok()?);
        }
        Some(parts)
    }
}

/// Decodes a PUT body into the plain value the core expects.
///
/// Older fleet clients double-encode their payloads (a JSON document
/// serialized into a JSON string), so when the decoded body is itself a
/// string holding valid JSON, one more level is unwrapped.
fn decode_put_body(bytes: &Bytes) -> Option<Value> {
    let value: Value = serde_json::from_slice(bytes).ok()?;
    if let Value::String(inner) = &value
        && let Ok(nested) = serde_json::from_str::<Value>(inner)
    {
        return Some(nested);
    }
    Some(value)
}

fn http_status(status: Status) -> StatusCode {
    match status {
        Status::Created => StatusCode::CREATED,
        Status::Ok => StatusCode::OK,
        Status::NoContent => StatusCode::NO_CONTENT,
        Status::NotFound => StatusCode::NOT_FOUND,
    }
}

fn respond(reply: Reply) -> HttpResponse {
    let mut builder = HttpResponse::build(http_status(reply.status));
    match reply.body {
        Some(body) => builder.json(body),
        None => builder.finish(),
    }
}

fn not_found() -> HttpResponse {
    respond(Reply::not_found())
}

async fn dispatch_read(
    registry: &ValveRegistry,
    kind: RequestKind,
    query: FleetQuery,
) -> HttpResponse {
    match query.into_parts(kind) {
        Some(parts) => respond(registry.dispatch_parts(parts).await),
        None => not_found(),
    }
}

async fn dispatch_write(
    registry: &ValveRegistry,
    kind: RequestKind,
    query: FleetQuery,
    body: &Bytes,
) -> HttpResponse {
    let Some(mut parts) = query.into_parts(kind) else {
        return not_found();
    };
    parts.payload = decode_put_body(body);
    respond(registry.dispatch_parts(parts).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/`: the info bundle when an id is given, the id listing otherwise.
async fn get_info(registry: Data<ValveRegistry>, Query(query): Query<FleetQuery>) -> HttpResponse {
    if query.id.is_none() {
        let mut ids = registry.ids().await;
        ids.sort_unstable();
        return respond(Reply::ok(ReplyBody::Ids(ids)));
    }
    dispatch_read(&registry, RequestKind::Info, query).await
}

async fn get_temperatures(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::Temperatures, query).await
}

async fn get_current(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::CurrentTemperature, query).await
}

async fn get_history(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::History, query).await
}

async fn get_desired(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::DesiredTemperature, query).await
}

async fn get_eco(registry: Data<ValveRegistry>, Query(query): Query<FleetQuery>) -> HttpResponse {
    dispatch_read(&registry, RequestKind::EcoTemperature, query).await
}

async fn get_comfort(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::ComfortTemperature, query).await
}

async fn get_scheduled(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::ScheduledTemperature, query).await
}

async fn get_mode(registry: Data<ValveRegistry>, Query(query): Query<FleetQuery>) -> HttpResponse {
    dispatch_read(&registry, RequestKind::TemperatureMode, query).await
}

async fn get_heating(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    dispatch_read(&registry, RequestKind::HeatingMode, query).await
}

async fn get_alias(registry: Data<ValveRegistry>, Query(query): Query<FleetQuery>) -> HttpResponse {
    dispatch_read(&registry, RequestKind::Alias, query).await
}

/// POST `/`: idempotent creation with a caller-assigned id.
async fn post_valve(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    let Some(raw) = &query.id else {
        return respond(Reply::no_content());
    };
    let Ok(id) = raw.parse::<ValveId>() else {
        return not_found();
    };

    if registry.create(id).await {
        respond(Reply::created(ReplyBody::Id(id)))
    } else {
        respond(Reply::ok_empty())
    }
}

/// DELETE `/`: removes a valve.
async fn delete_valve(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
) -> HttpResponse {
    let Some(id) = query.id.as_ref().and_then(|raw| raw.parse::<ValveId>().ok()) else {
        return not_found();
    };

    if registry.remove(id).await {
        respond(Reply::ok_empty())
    } else {
        not_found()
    }
}

async fn put_info(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::UpdateInfo, query, &body).await
}

async fn put_current(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetCurrentTemperature, query, &body).await
}

async fn put_eco(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetEcoTemperature, query, &body).await
}

async fn put_comfort(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetComfortTemperature, query, &body).await
}

async fn put_scheduled(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetScheduledTemperature, query, &body).await
}

async fn put_mode(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetTemperatureMode, query, &body).await
}

async fn put_heating(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetHeatingMode, query, &body).await
}

async fn put_alias(
    registry: Data<ValveRegistry>,
    Query(query): Query<FleetQuery>,
    body: Bytes,
) -> HttpResponse {
    dispatch_write(&registry, RequestKind::SetAlias, query, &body).await
}
