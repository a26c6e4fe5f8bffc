//! Capability traits a plugin backend implements.
//!
//! The dispatcher holds at most one [`NetworkDriver`] and one [`IpamDriver`]
//! and calls them concurrently from many requests; any locking they need is
//! their own business.

use crate::api::{
    CapabilitiesResponse, CreateEndpointRequest, CreateEndpointResponse, CreateNetworkRequest,
    DeleteEndpointRequest, DeleteNetworkRequest, DiscoveryNotification, EndpointInfoRequest,
    EndpointInfoResponse, JoinRequest, JoinResponse, LeaveRequest, Options,
};
use crate::error::DriverError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Result of a single driver call.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Remote network driver (`NetworkDriver.*`).
#[async_trait]
pub trait NetworkDriver: Send + Sync {
    async fn get_capabilities(&self) -> DriverResult<CapabilitiesResponse>;

    async fn create_network(&self, request: &CreateNetworkRequest) -> DriverResult<()>;

    async fn delete_network(&self, request: &DeleteNetworkRequest) -> DriverResult<()>;

    /// Create an endpoint. Return an interface only when the request left
    /// addresses for the driver to fill in.
    async fn create_endpoint(
        &self,
        request: &CreateEndpointRequest,
    ) -> DriverResult<CreateEndpointResponse>;

    async fn delete_endpoint(&self, request: &DeleteEndpointRequest) -> DriverResult<()>;

    /// Operational data for `docker inspect`.
    async fn endpoint_info(&self, request: &EndpointInfoRequest)
        -> DriverResult<EndpointInfoResponse>;

    async fn join_endpoint(&self, request: &JoinRequest) -> DriverResult<JoinResponse>;

    async fn leave_endpoint(&self, request: &LeaveRequest) -> DriverResult<()>;

    async fn discover_new(&self, notification: &DiscoveryNotification) -> DriverResult<()>;

    async fn discover_delete(&self, notification: &DiscoveryNotification) -> DriverResult<()>;
}

/// What an IPAM backend needs from the daemon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpamCapabilities {
    /// Whether the daemon must generate the MAC before requesting an address.
    pub requires_mac_address: bool,
}

/// Default local and global address space names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSpaces {
    pub local: String,
    pub global: String,
}

/// A pool registered with the IPAM backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolAllocation {
    pub pool_id: String,
    /// Pool in CIDR notation.
    pub pool: String,
    pub data: Options,
}

/// An address handed out from a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressAllocation {
    /// Address with prefix length, e.g. `10.2.3.5/24`.
    pub address: String,
    pub data: Options,
}

/// Remote IPAM driver (`IpamDriver.*`).
#[async_trait]
pub trait IpamDriver: Send + Sync {
    async fn get_capabilities(&self) -> DriverResult<IpamCapabilities> {
        Ok(IpamCapabilities::default())
    }

    async fn get_default_address_spaces(&self) -> DriverResult<AddressSpaces>;

    /// Register a pool. `pool` and `sub_pool` are empty when the driver should
    /// choose.
    async fn request_pool(
        &self,
        address_space: &str,
        pool: &str,
        sub_pool: &str,
        options: &Options,
        v6: bool,
    ) -> DriverResult<PoolAllocation>;

    async fn release_pool(&self, pool_id: &str) -> DriverResult<()>;

    /// Allocate an address. `address` is `None` when any free address will do.
    async fn request_address(
        &self,
        pool_id: &str,
        address: Option<IpAddr>,
        options: &Options,
    ) -> DriverResult<AddressAllocation>;

    async fn release_address(&self, pool_id: &str, address: Option<IpAddr>) -> DriverResult<()>;
}

/// Parse the address field of an IPAM request; empty or invalid becomes `None`.
///
/// Surrounding whitespace makes the address invalid.
pub fn parse_address(address: &str) -> Option<IpAddr> {
    address.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSpaces;

    #[async_trait]
    impl IpamDriver for FixedSpaces {
        async fn get_default_address_spaces(&self) -> DriverResult<AddressSpaces> {
            Ok(AddressSpaces {
                local: "l".into(),
                global: "g".into(),
            })
        }

        async fn request_pool(
            &self,
            _address_space: &str,
            _pool: &str,
            _sub_pool: &str,
            _options: &Options,
            _v6: bool,
        ) -> DriverResult<PoolAllocation> {
            Err(DriverError::new("no pools"))
        }

        async fn release_pool(&self, _pool_id: &str) -> DriverResult<()> {
            Ok(())
        }

        async fn request_address(
            &self,
            _pool_id: &str,
            _address: Option<IpAddr>,
            _options: &Options,
        ) -> DriverResult<AddressAllocation> {
            Err(DriverError::new("no addresses"))
        }

        async fn release_address(
            &self,
            _pool_id: &str,
            _address: Option<IpAddr>,
        ) -> DriverResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_default_ipam_capabilities() {
        let caps = FixedSpaces.get_capabilities().await.unwrap();
        assert!(!caps.requires_mac_address);
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address(""), None);
        assert_eq!(parse_address("not-an-ip"), None);
        assert_eq!(parse_address("10.2.3.5"), Some("10.2.3.5".parse().unwrap()));
        assert_eq!(parse_address("fd00::5"), Some("fd00::5".parse().unwrap()));
        assert_eq!(parse_address(" 10.2.3.5 "), None);
        assert_eq!(parse_address("10.2.3.5\n"), None);
    }
}
