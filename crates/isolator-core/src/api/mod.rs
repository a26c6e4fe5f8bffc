//! Wire types for the remote driver protocol.
//!
//! Field names follow the daemon's Go structs exactly (PascalCase, with the
//! odd `ID`/`IPv6` spellings). Requests are decoded leniently: absent fields
//! and `null` collections fall back to their zero value, since the daemon
//! marshals nil maps and slices as `null`.

pub mod ipam;
pub mod network;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub use ipam::{
    AddressSpacesResponse, IpamCapabilitiesResponse, ReleaseAddressRequest, ReleasePoolRequest,
    RequestAddressRequest, RequestAddressResponse, RequestPoolRequest, RequestPoolResponse,
};
pub use network::{
    CapabilitiesResponse, CreateEndpointRequest, CreateEndpointResponse, CreateNetworkRequest,
    DeleteEndpointRequest, DeleteNetworkRequest, DiscoveryNotification,
    EndpointInfoRequest, EndpointInfoResponse, EndpointInterface, InterfaceName, IpamData,
    JoinRequest, JoinResponse, LeaveRequest, RouteType, Scope, StaticRoute,
};

/// String-to-string option bag used by the IPAM calls (`com.docker.network.*` keys).
pub type Options = HashMap<String, String>;

/// Free-form option bag used by the network driver calls.
pub type GenericOptions = HashMap<String, serde_json::Value>;

/// Capability names announced during activation.
pub const NETWORK_DRIVER_CAPABILITY: &str = "NetworkDriver";
pub const IPAM_DRIVER_CAPABILITY: &str = "IpamDriver";

/// Answer to `Plugin.Activate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeResponse {
    #[serde(rename = "Implements")]
    pub implements: Vec<String>,
}

impl HandshakeResponse {
    /// Build the handshake from which capabilities are present.
    pub fn for_capabilities(network: bool, ipam: bool) -> Self {
        let mut implements = Vec::new();
        if network {
            implements.push(NETWORK_DRIVER_CAPABILITY.to_string());
        }
        if ipam {
            implements.push(IPAM_DRIVER_CAPABILITY.to_string());
        }
        Self { implements }
    }
}

/// Application failure envelope: `{"Err": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "Err")]
    pub err: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            err: message.into(),
        }
    }
}

/// Success body for calls that return nothing; encodes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handshake_lists_present_capabilities() {
        let both = HandshakeResponse::for_capabilities(true, true);
        assert_eq!(both.implements, vec!["NetworkDriver", "IpamDriver"]);

        let ipam_only = HandshakeResponse::for_capabilities(false, true);
        assert_eq!(
            serde_json::to_value(&ipam_only).unwrap(),
            json!({"Implements": ["IpamDriver"]})
        );

        let none = HandshakeResponse::for_capabilities(false, false);
        assert_eq!(serde_json::to_value(&none).unwrap(), json!({"Implements": []}));
    }

    #[test]
    fn test_envelopes() {
        assert_eq!(
            serde_json::to_string(&ErrorResponse::new("boom")).unwrap(),
            r#"{"Err":"boom"}"#
        );
        assert_eq!(serde_json::to_string(&EmptyResponse::default()).unwrap(), "{}");
    }
}
