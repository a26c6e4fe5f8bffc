//! `NetworkDriver.*` handlers.

use super::{
    decode, empty_or_error_response, object_or_error_response, run_to_completion, HandlerResult,
};
use axum::{body::Bytes, extract::State, routing::post, Router};
use isolator_core::api::{
    CreateEndpointRequest, CreateNetworkRequest, DeleteEndpointRequest, DeleteNetworkRequest,
    DiscoveryNotification, EndpointInfoRequest, JoinRequest, LeaveRequest,
};
use isolator_core::{method_path, NetworkDriver, ProtocolConfig};
use std::sync::Arc;
use tracing::debug;

type Driver = State<Arc<dyn NetworkDriver>>;

/// Routes for the network driver receiver, bound to `driver`.
pub(crate) fn routes(driver: Arc<dyn NetworkDriver>) -> Router {
    let path = |method: &str| method_path(ProtocolConfig::NETWORK_RECEIVER, method);

    Router::new()
        .route(&path("GetCapabilities"), post(get_capabilities))
        .route(&path("CreateNetwork"), post(create_network))
        .route(&path("DeleteNetwork"), post(delete_network))
        .route(&path("CreateEndpoint"), post(create_endpoint))
        .route(&path("DeleteEndpoint"), post(delete_endpoint))
        .route(&path("EndpointOperInfo"), post(endpoint_info))
        .route(&path("Join"), post(join))
        .route(&path("Leave"), post(leave))
        .route(&path("DiscoverNew"), post(discover_new))
        .route(&path("DiscoverDelete"), post(discover_delete))
        .with_state(driver)
}

async fn get_capabilities(State(driver): Driver) -> HandlerResult {
    debug!("NetworkDriver.GetCapabilities");
    let result =
        run_to_completion("GetCapabilities", async move { driver.get_capabilities().await })
            .await?;
    Ok(object_or_error_response("GetCapabilities", result))
}

async fn create_network(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: CreateNetworkRequest = decode("CreateNetwork", &body)?;
    debug!("NetworkDriver.CreateNetwork: {}", request.network_id);
    let result = run_to_completion("CreateNetwork", async move {
        driver.create_network(&request).await
    })
    .await?;
    Ok(empty_or_error_response("CreateNetwork", result))
}

async fn delete_network(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: DeleteNetworkRequest = decode("DeleteNetwork", &body)?;
    debug!("NetworkDriver.DeleteNetwork: {}", request.network_id);
    let result = run_to_completion("DeleteNetwork", async move {
        driver.delete_network(&request).await
    })
    .await?;
    Ok(empty_or_error_response("DeleteNetwork", result))
}

async fn create_endpoint(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: CreateEndpointRequest = decode("CreateEndpoint", &body)?;
    debug!(
        "NetworkDriver.CreateEndpoint: {}/{}",
        request.network_id, request.endpoint_id
    );
    let result = run_to_completion("CreateEndpoint", async move {
        driver.create_endpoint(&request).await
    })
    .await?;
    Ok(object_or_error_response("CreateEndpoint", result))
}

async fn delete_endpoint(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: DeleteEndpointRequest = decode("DeleteEndpoint", &body)?;
    debug!(
        "NetworkDriver.DeleteEndpoint: {}/{}",
        request.network_id, request.endpoint_id
    );
    let result = run_to_completion("DeleteEndpoint", async move {
        driver.delete_endpoint(&request).await
    })
    .await?;
    Ok(empty_or_error_response("DeleteEndpoint", result))
}

async fn endpoint_info(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: EndpointInfoRequest = decode("EndpointOperInfo", &body)?;
    let result = run_to_completion("EndpointOperInfo", async move {
        driver.endpoint_info(&request).await
    })
    .await?;
    Ok(object_or_error_response("EndpointOperInfo", result))
}

async fn join(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: JoinRequest = decode("Join", &body)?;
    debug!(
        "NetworkDriver.Join: {} -> {}",
        request.endpoint_id, request.sandbox_key
    );
    let result =
        run_to_completion("Join", async move { driver.join_endpoint(&request).await }).await?;
    Ok(object_or_error_response("Join", result))
}

async fn leave(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: LeaveRequest = decode("Leave", &body)?;
    debug!("NetworkDriver.Leave: {}", request.endpoint_id);
    let result =
        run_to_completion("Leave", async move { driver.leave_endpoint(&request).await }).await?;
    Ok(empty_or_error_response("Leave", result))
}

async fn discover_new(State(driver): Driver, body: Bytes) -> HandlerResult {
    let notification: DiscoveryNotification = decode("DiscoverNew", &body)?;
    debug!("NetworkDriver.DiscoverNew: type {}", notification.discovery_type);
    let result = run_to_completion("DiscoverNew", async move {
        driver.discover_new(&notification).await
    })
    .await?;
    Ok(empty_or_error_response("DiscoverNew", result))
}

async fn discover_delete(State(driver): Driver, body: Bytes) -> HandlerResult {
    let notification: DiscoveryNotification = decode("DiscoverDelete", &body)?;
    debug!(
        "NetworkDriver.DiscoverDelete: type {}",
        notification.discovery_type
    );
    let result = run_to_completion("DiscoverDelete", async move {
        driver.discover_delete(&notification).await
    })
    .await?;
    Ok(empty_or_error_response("DiscoverDelete", result))
}
