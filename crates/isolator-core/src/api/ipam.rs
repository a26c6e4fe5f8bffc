//! `IpamDriver.*` request and response shapes.

use super::{null_as_default, Options};
use serde::{Deserialize, Serialize};

/// Answer to `IpamDriver.GetCapabilities`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpamCapabilitiesResponse {
    #[serde(rename = "RequiresMACAddress", default)]
    pub requires_mac_address: bool,
}

/// Answer to `IpamDriver.GetDefaultAddressSpaces`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSpacesResponse {
    #[serde(rename = "LocalDefaultAddressSpace")]
    pub local_default_address_space: String,
    #[serde(rename = "GlobalDefaultAddressSpace")]
    pub global_default_address_space: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestPoolRequest {
    #[serde(rename = "AddressSpace")]
    pub address_space: String,
    #[serde(rename = "Pool")]
    pub pool: String,
    #[serde(rename = "SubPool")]
    pub sub_pool: String,
    #[serde(rename = "Options", deserialize_with = "null_as_default")]
    pub options: Options,
    #[serde(rename = "V6")]
    pub v6: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPoolResponse {
    #[serde(rename = "PoolID")]
    pub pool_id: String,
    #[serde(rename = "Pool")]
    pub pool: String,
    #[serde(rename = "Data", default, deserialize_with = "null_as_default")]
    pub data: Options,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasePoolRequest {
    #[serde(rename = "PoolID")]
    pub pool_id: String,
}

/// `Address` is empty when the daemon lets the driver pick any free address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestAddressRequest {
    #[serde(rename = "PoolID")]
    pub pool_id: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Options", deserialize_with = "null_as_default")]
    pub options: Options,
}

/// Allocated address in CIDR form plus driver data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAddressResponse {
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Data", default, deserialize_with = "null_as_default")]
    pub data: Options,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseAddressRequest {
    #[serde(rename = "PoolID")]
    pub pool_id: String,
    #[serde(rename = "Address")]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_pool_from_daemon_payload() {
        let req: RequestPoolRequest = serde_json::from_value(json!({
            "AddressSpace": "mojaLocal",
            "Pool": "",
            "SubPool": "",
            "Options": null,
            "V6": false
        }))
        .unwrap();
        assert_eq!(req.address_space, "mojaLocal");
        assert!(req.options.is_empty());
        assert!(!req.v6);
    }

    #[test]
    fn test_request_pool_response_shape() {
        let resp = RequestPoolResponse {
            pool_id: "p1".into(),
            pool: "10.2.3.0/24".into(),
            data: Options::new(),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"PoolID": "p1", "Pool": "10.2.3.0/24", "Data": {}})
        );
    }

    #[test]
    fn test_options_must_be_string_map() {
        let result = serde_json::from_value::<RequestAddressRequest>(json!({
            "PoolID": "p1",
            "Options": {"com.docker.network.gateway": true}
        }));
        assert!(result.is_err());
    }
}
