//! Centralized configuration for the Isolator plugin.
//!
//! Protocol constants that must match what the Docker daemon expects, plus the
//! defaults used by the plugin binary.

/// Names and paths fixed by the remote driver protocol.
pub struct ProtocolConfig;

impl ProtocolConfig {
    pub const ACTIVATE_PATH: &'static str = "/Plugin.Activate";
    pub const NETWORK_RECEIVER: &'static str = "NetworkDriver";
    pub const IPAM_RECEIVER: &'static str = "IpamDriver";
    /// Media type the plugin helpers send back to the daemon.
    pub const CONTENT_TYPE: &'static str = "application/vnd.docker.plugins.v1+json";
}

/// Build the request path for `<receiver>.<method>`.
pub fn method_path(receiver: &str, method: &str) -> String {
    format!("/{}.{}", receiver, method)
}

/// Plugin discovery and listener defaults.
pub struct PluginConfig;

impl PluginConfig {
    /// Directory the daemon scans for plugin sockets.
    pub const SOCKET_DIR: &'static str = "/run/docker/plugins";
    pub const DEFAULT_NAME: &'static str = "test_isolator";
    pub const DEFAULT_TCP_ADDR: &'static str = "0.0.0.0:8080";
    pub const SOCKET_EXTENSION: &'static str = "sock";
}

/// Values handed out by the static IPAM driver.
pub struct IpamDefaults;

impl IpamDefaults {
    pub const LOCAL_ADDRESS_SPACE: &'static str = "mojaLocal";
    pub const GLOBAL_ADDRESS_SPACE: &'static str = "mojaGlobal";
    pub const POOL: &'static str = "10.2.3.0/24";
    pub const ADDRESS: &'static str = "10.2.3.5/24";
    pub const PREFIX_V4: u8 = 24;
    pub const PREFIX_V6: u8 = 64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_path() {
        assert_eq!(
            method_path(ProtocolConfig::IPAM_RECEIVER, "RequestPool"),
            "/IpamDriver.RequestPool"
        );
        assert_eq!(
            method_path(ProtocolConfig::NETWORK_RECEIVER, "Join"),
            "/NetworkDriver.Join"
        );
    }
}
