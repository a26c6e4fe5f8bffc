//! Protocol dispatcher: owns the driver handles and the route table.
//!
//! Which routes exist is decided once, here, from which drivers were
//! supplied. A receiver without a driver has no routes at all, so calls to it
//! fall through to the `404` fallback instead of producing an `Err` envelope.

use crate::handlers::{self, ipam, network, plugin};
use axum::{routing::post, Router};
use isolator_core::{HandshakeResponse, IpamDriver, NetworkDriver, ProtocolConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Dispatches plugin calls to an optional network driver and an optional
/// IPAM driver.
#[derive(Clone)]
pub struct Dispatcher {
    handshake: Arc<HandshakeResponse>,
    router: Router,
}

impl Dispatcher {
    /// Build a dispatcher and its route table. Either driver may be absent.
    pub fn new(
        network: Option<Arc<dyn NetworkDriver>>,
        ipam: Option<Arc<dyn IpamDriver>>,
    ) -> Self {
        let handshake = Arc::new(HandshakeResponse::for_capabilities(
            network.is_some(),
            ipam.is_some(),
        ));
        let router = build_router(network, ipam);
        Self { handshake, router }
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Capability names announced by `Plugin.Activate`.
    pub fn implements(&self) -> Vec<String> {
        self.handshake.implements.clone()
    }

    pub fn handshake(&self) -> HandshakeResponse {
        self.handshake.as_ref().clone()
    }

    /// The route table, ready to hand to a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Builder for [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    network: Option<Arc<dyn NetworkDriver>>,
    ipam: Option<Arc<dyn IpamDriver>>,
}

impl DispatcherBuilder {
    pub fn network(mut self, driver: Arc<dyn NetworkDriver>) -> Self {
        self.network = Some(driver);
        self
    }

    pub fn ipam(mut self, driver: Arc<dyn IpamDriver>) -> Self {
        self.ipam = Some(driver);
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher::new(self.network, self.ipam)
    }
}

/// Build the route table for the given drivers.
pub fn build_router(
    network: Option<Arc<dyn NetworkDriver>>,
    ipam: Option<Arc<dyn IpamDriver>>,
) -> Router {
    let handshake = Arc::new(HandshakeResponse::for_capabilities(
        network.is_some(),
        ipam.is_some(),
    ));
    info!("Plugin implements {:?}", handshake.implements);

    let mut router = Router::new()
        .route(ProtocolConfig::ACTIVATE_PATH, post(plugin::activate))
        .with_state(handshake);

    if let Some(driver) = network {
        router = router.merge(network::routes(driver));
    }
    if let Some(driver) = ipam {
        router = router.merge(ipam::routes(driver));
    }

    router
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
