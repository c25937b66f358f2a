//! Response relay.
//!
//! # Responsibilities
//! - Mirror the origin status code
//! - Copy only allow-listed headers (everything else is dropped)
//! - Pass the origin body through untouched
//! - Turn any dispatch failure into a plain-text 500
//!
//! Every handler result goes through [`relay`]; nothing else writes
//! origin data into the caller-facing response.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::client::OriginResponse;
use crate::error::ProxyResult;

/// Origin headers the caller is allowed to see.
pub const RELAYED_HEADERS: &[&str] = &["set-cookie", "content-type"];

/// Case-insensitive allow-list check.
pub fn is_relayed(name: &str) -> bool {
    RELAYED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Build the caller-facing response for a handler result.
pub fn relay(result: ProxyResult<OriginResponse>) -> Response {
    match result {
        Ok(origin) => relay_origin(origin),
        Err(err) => {
            tracing::warn!(error = %err, "Relay failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

fn relay_origin(origin: OriginResponse) -> Response {
    let mut response = Response::new(Body::from(origin.body));
    *response.status_mut() = origin.status;

    let headers = response.headers_mut();
    for (name, value) in origin.headers.iter() {
        if is_relayed(name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }

    response
}
