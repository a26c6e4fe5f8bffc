//! `IpamDriver.*` handlers.
//!
//! The IPAM trait takes positional arguments, so these handlers unpack the
//! request and rebuild the wire response from the driver's result.

use super::{
    decode, empty_or_error_response, object_or_error_response, run_to_completion, HandlerResult,
};
use axum::{body::Bytes, extract::State, routing::post, Router};
use isolator_core::api::{
    AddressSpacesResponse, IpamCapabilitiesResponse, ReleaseAddressRequest, ReleasePoolRequest,
    RequestAddressRequest, RequestAddressResponse, RequestPoolRequest, RequestPoolResponse,
};
use isolator_core::{method_path, parse_address, IpamDriver, ProtocolConfig};
use std::sync::Arc;
use tracing::debug;

type Driver = State<Arc<dyn IpamDriver>>;

/// Routes for the IPAM receiver, bound to `driver`.
pub(crate) fn routes(driver: Arc<dyn IpamDriver>) -> Router {
    let path = |method: &str| method_path(ProtocolConfig::IPAM_RECEIVER, method);

    Router::new()
        .route(&path("GetCapabilities"), post(get_capabilities))
        .route(&path("GetDefaultAddressSpaces"), post(get_default_address_spaces))
        .route(&path("RequestPool"), post(request_pool))
        .route(&path("ReleasePool"), post(release_pool))
        .route(&path("RequestAddress"), post(request_address))
        .route(&path("ReleaseAddress"), post(release_address))
        .with_state(driver)
}

async fn get_capabilities(State(driver): Driver) -> HandlerResult {
    debug!("IpamDriver.GetCapabilities");
    let result =
        run_to_completion("GetCapabilities", async move { driver.get_capabilities().await })
            .await?
            .map(|caps| IpamCapabilitiesResponse {
                requires_mac_address: caps.requires_mac_address,
            });
    Ok(object_or_error_response("GetCapabilities", result))
}

async fn get_default_address_spaces(State(driver): Driver) -> HandlerResult {
    debug!("IpamDriver.GetDefaultAddressSpaces");
    let result = run_to_completion("GetDefaultAddressSpaces", async move {
        driver.get_default_address_spaces().await
    })
    .await?
    .map(|spaces| AddressSpacesResponse {
        local_default_address_space: spaces.local,
        global_default_address_space: spaces.global,
    });
    Ok(object_or_error_response("GetDefaultAddressSpaces", result))
}

async fn request_pool(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: RequestPoolRequest = decode("RequestPool", &body)?;
    debug!(
        "IpamDriver.RequestPool: space={} pool={:?} sub_pool={:?} v6={}",
        request.address_space, request.pool, request.sub_pool, request.v6
    );
    let result = run_to_completion("RequestPool", async move {
        driver
            .request_pool(
                &request.address_space,
                &request.pool,
                &request.sub_pool,
                &request.options,
                request.v6,
            )
            .await
    })
    .await?
    .map(|allocation| RequestPoolResponse {
        pool_id: allocation.pool_id,
        pool: allocation.pool,
        data: allocation.data,
    });
    Ok(object_or_error_response("RequestPool", result))
}

async fn release_pool(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: ReleasePoolRequest = decode("ReleasePool", &body)?;
    debug!("IpamDriver.ReleasePool: {}", request.pool_id);
    let result = run_to_completion("ReleasePool", async move {
        driver.release_pool(&request.pool_id).await
    })
    .await?;
    Ok(empty_or_error_response("ReleasePool", result))
}

async fn request_address(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: RequestAddressRequest = decode("RequestAddress", &body)?;
    debug!(
        "IpamDriver.RequestAddress: pool={} address={:?}",
        request.pool_id, request.address
    );
    let result = run_to_completion("RequestAddress", async move {
        let address = parse_address(&request.address);
        driver
            .request_address(&request.pool_id, address, &request.options)
            .await
    })
    .await?
    .map(|allocation| RequestAddressResponse {
        address: allocation.address,
        data: allocation.data,
    });
    Ok(object_or_error_response("RequestAddress", result))
}

async fn release_address(State(driver): Driver, body: Bytes) -> HandlerResult {
    let request: ReleaseAddressRequest = decode("ReleaseAddress", &body)?;
    debug!(
        "IpamDriver.ReleaseAddress: pool={} address={}",
        request.pool_id, request.address
    );
    let result = run_to_completion("ReleaseAddress", async move {
        let address = parse_address(&request.address);
        driver.release_address(&request.pool_id, address).await
    })
    .await?;
    Ok(empty_or_error_response("ReleaseAddress", result))
}
