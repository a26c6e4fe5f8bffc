//! `Plugin.Activate` handshake.

use super::object_response;
use axum::{extract::State, response::Response};
use isolator_core::HandshakeResponse;
use std::sync::Arc;
use tracing::debug;

/// Announce the implemented capabilities. The answer is fixed when the router
/// is built, so repeated activation has no effect.
pub(crate) async fn activate(State(handshake): State<Arc<HandshakeResponse>>) -> Response {
    debug!("Plugin.Activate -> {:?}", handshake.implements);
    object_response(handshake.as_ref())
}
