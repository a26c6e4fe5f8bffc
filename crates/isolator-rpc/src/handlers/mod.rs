//! HTTP handlers for the plugin protocol, split by receiver.
//!
//! Every handler follows the same envelope rules:
//! - undecodable body: `400` with a plain-text message, driver not called
//! - driver error: `500` with `{"Err": message}`
//! - success: `200` with the JSON result, `{}` when there is none
//! - result that fails to serialize: `500` with a plain-text message

pub(crate) mod ipam;
pub(crate) mod network;
pub(crate) mod plugin;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use isolator_core::{DriverError, EmptyResponse, ErrorResponse, ProtocolConfig};
use serde::{
    de::{DeserializeOwned, Unexpected},
    Serialize,
};
use serde_json::{Map, Value};
use std::future::Future;
use tracing::{error, warn};

/// Handlers return the rejection as the `Err` side so decoding can use `?`.
pub(crate) type HandlerResult = std::result::Result<Response, Response>;

// ============================================================================
// Decoding
// ============================================================================

/// Decode a request body, producing the `400` response on failure.
///
/// The body is parsed from raw bytes; the daemon's `Content-Type` is not
/// `application/json` and is not checked. Only a JSON object (or `null`, read
/// as an object with every field absent) can become a request.
pub(crate) fn decode<T: DeserializeOwned>(method: &str, body: &[u8]) -> Result<T, Response> {
    let decoded = serde_json::from_slice::<Value>(body).and_then(|value| match value {
        Value::Object(_) => serde_json::from_value(value),
        Value::Null => serde_json::from_value(Value::Object(Map::new())),
        other => Err(not_an_object(&other)),
    });
    decoded.map_err(|e| {
        warn!("{}: rejecting request body: {}", method, e);
        send_error(
            StatusCode::BAD_REQUEST,
            &format!("Unable to decode JSON payload: {}", e),
        )
    })
}

fn not_an_object(value: &Value) -> serde_json::Error {
    let unexpected = match value {
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Null | Value::Object(_) => Unexpected::Other("value"),
    };
    serde::de::Error::invalid_type(unexpected, &"a JSON object")
}

// ============================================================================
// Driver calls
// ============================================================================

/// Run a driver call on its own task and wait for it.
///
/// The call keeps running if the client disconnects and the handler future is
/// dropped. A panicking driver becomes a plain `500`.
pub(crate) async fn run_to_completion<T, F>(
    method: &str,
    call: F,
) -> Result<Result<T, DriverError>, Response>
where
    F: Future<Output = Result<T, DriverError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(call).await.map_err(|e| {
        error!("{} did not complete: {}", method, e);
        send_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })
}

// ============================================================================
// Encoding
// ============================================================================

/// Plain-text error outside the JSON envelope (transport-level failures).
pub(crate) fn send_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{}\n", message),
    )
        .into_response()
}

fn encode_with_status<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(mut body) => {
            body.push(b'\n');
            (
                status,
                [(header::CONTENT_TYPE, ProtocolConfig::CONTENT_TYPE)],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!("Could not JSON encode response: {}", e);
            send_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not JSON encode response",
            )
        }
    }
}

/// `200` with the JSON-encoded result.
pub(crate) fn object_response<T: Serialize>(value: &T) -> Response {
    encode_with_status(StatusCode::OK, value)
}

/// `200` with `{}`.
pub(crate) fn empty_response() -> Response {
    object_response(&EmptyResponse::default())
}

/// `500` with `{"Err": message}`.
pub(crate) fn error_response(message: &str) -> Response {
    encode_with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorResponse::new(message),
    )
}

pub(crate) fn object_or_error_response<T: Serialize>(
    method: &str,
    result: Result<T, DriverError>,
) -> Response {
    match result {
        Ok(value) => object_response(&value),
        Err(e) => {
            error!("{} failed: {}", method, e);
            error_response(&e.message)
        }
    }
}

pub(crate) fn empty_or_error_response(method: &str, result: Result<(), DriverError>) -> Response {
    object_or_error_response(method, result.map(|()| EmptyResponse::default()))
}

/// Fallback for paths that are not registered.
pub(crate) async fn not_found() -> Response {
    send_error(StatusCode::NOT_FOUND, "404 page not found")
}
