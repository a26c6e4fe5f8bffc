//! Recording stub drivers and a request helper for router tests.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use isolator_core::api::{
    CapabilitiesResponse, CreateEndpointRequest, CreateEndpointResponse, CreateNetworkRequest,
    DeleteEndpointRequest, DeleteNetworkRequest, DiscoveryNotification, EndpointInfoRequest,
    EndpointInfoResponse, JoinRequest, JoinResponse, LeaveRequest, Scope,
};
use isolator_core::{
    AddressAllocation, AddressSpaces, DriverError, DriverResult, IpamCapabilities, IpamDriver,
    NetworkDriver, Options, PoolAllocation,
};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// POST `body` to `path` and collect status and body.
pub(crate) async fn call(router: &Router, path: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/vnd.docker.plugins.v1.2+json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Shared call log plus an optional failure message returned by every call.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
}

impl Recorder {
    fn record(&self, call: String) -> DriverResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(message) => Err(DriverError::new(message.clone())),
            None => Ok(()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub(crate) struct StubNetwork {
    pub(crate) recorder: Recorder,
}

impl StubNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            recorder: Recorder {
                failure: Some(message.to_string()),
                ..Recorder::default()
            },
        }
    }

    pub(crate) fn shared() -> Arc<dyn NetworkDriver> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl NetworkDriver for StubNetwork {
    async fn get_capabilities(&self) -> DriverResult<CapabilitiesResponse> {
        self.recorder.record("GetCapabilities".into())?;
        Ok(CapabilitiesResponse {
            scope: Scope::Local,
            connectivity_scope: None,
        })
    }

    async fn create_network(&self, request: &CreateNetworkRequest) -> DriverResult<()> {
        self.recorder
            .record(format!("CreateNetwork({})", request.network_id))
    }

    async fn delete_network(&self, request: &DeleteNetworkRequest) -> DriverResult<()> {
        self.recorder
            .record(format!("DeleteNetwork({})", request.network_id))
    }

    async fn create_endpoint(
        &self,
        request: &CreateEndpointRequest,
    ) -> DriverResult<CreateEndpointResponse> {
        self.recorder
            .record(format!("CreateEndpoint({})", request.endpoint_id))?;
        Ok(CreateEndpointResponse::default())
    }

    async fn delete_endpoint(&self, request: &DeleteEndpointRequest) -> DriverResult<()> {
        self.recorder
            .record(format!("DeleteEndpoint({})", request.endpoint_id))
    }

    async fn endpoint_info(
        &self,
        request: &EndpointInfoRequest,
    ) -> DriverResult<EndpointInfoResponse> {
        self.recorder
            .record(format!("EndpointOperInfo({})", request.endpoint_id))?;
        Ok(EndpointInfoResponse::default())
    }

    async fn join_endpoint(&self, request: &JoinRequest) -> DriverResult<JoinResponse> {
        self.recorder.record(format!("Join({})", request.endpoint_id))?;
        Ok(JoinResponse::default())
    }

    async fn leave_endpoint(&self, request: &LeaveRequest) -> DriverResult<()> {
        self.recorder.record(format!("Leave({})", request.endpoint_id))
    }

    async fn discover_new(&self, notification: &DiscoveryNotification) -> DriverResult<()> {
        self.recorder
            .record(format!("DiscoverNew({})", notification.discovery_type))
    }

    async fn discover_delete(&self, notification: &DiscoveryNotification) -> DriverResult<()> {
        self.recorder
            .record(format!("DiscoverDelete({})", notification.discovery_type))
    }
}

#[derive(Clone)]
pub(crate) struct StubIpam {
    pub(crate) recorder: Recorder,
    pool_id: String,
    pool: String,
}

impl StubIpam {
    pub(crate) fn new() -> Self {
        Self {
            recorder: Recorder::default(),
            pool_id: "p1".to_string(),
            pool: "10.2.3.0/24".to_string(),
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        let mut stub = Self::new();
        stub.recorder.failure = Some(message.to_string());
        stub
    }

    pub(crate) fn shared() -> Arc<dyn IpamDriver> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl IpamDriver for StubIpam {
    async fn get_capabilities(&self) -> DriverResult<IpamCapabilities> {
        self.recorder.record("GetCapabilities".into())?;
        Ok(IpamCapabilities::default())
    }

    async fn get_default_address_spaces(&self) -> DriverResult<AddressSpaces> {
        self.recorder.record("GetDefaultAddressSpaces".into())?;
        Ok(AddressSpaces {
            local: "mojaLocal".into(),
            global: "mojaGlobal".into(),
        })
    }

    async fn request_pool(
        &self,
        address_space: &str,
        _pool: &str,
        _sub_pool: &str,
        _options: &Options,
        v6: bool,
    ) -> DriverResult<PoolAllocation> {
        self.recorder
            .record(format!("RequestPool({}, v6={})", address_space, v6))?;
        Ok(PoolAllocation {
            pool_id: self.pool_id.clone(),
            pool: self.pool.clone(),
            data: Options::new(),
        })
    }

    async fn release_pool(&self, pool_id: &str) -> DriverResult<()> {
        self.recorder.record(format!("ReleasePool({})", pool_id))
    }

    async fn request_address(
        &self,
        pool_id: &str,
        address: Option<IpAddr>,
        _options: &Options,
    ) -> DriverResult<AddressAllocation> {
        self.recorder
            .record(format!("RequestAddress({}, {:?})", pool_id, address))?;
        let address = address
            .map(|ip| format!("{}/24", ip))
            .unwrap_or_else(|| "10.2.3.5/24".to_string());
        Ok(AddressAllocation {
            address,
            data: Options::new(),
        })
    }

    async fn release_address(&self, pool_id: &str, address: Option<IpAddr>) -> DriverResult<()> {
        self.recorder
            .record(format!("ReleaseAddress({}, {:?})", pool_id, address))
    }
}
