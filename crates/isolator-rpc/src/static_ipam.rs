//! IPAM driver with fixed answers, used by the `isolator-rpc` binary.
//!
//! It keeps no state: pools and addresses are echoed back (or defaulted) and
//! releases always succeed. Useful for wiring a daemon up to the plugin before
//! a real allocator exists.

use async_trait::async_trait;
use isolator_core::{
    AddressAllocation, AddressSpaces, DriverResult, IpamDefaults, IpamDriver, Options,
    PoolAllocation,
};
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct StaticIpamDriver {
    local_space: String,
    global_space: String,
}

impl StaticIpamDriver {
    pub fn new(local_space: impl Into<String>, global_space: impl Into<String>) -> Self {
        Self {
            local_space: local_space.into(),
            global_space: global_space.into(),
        }
    }
}

impl Default for StaticIpamDriver {
    fn default() -> Self {
        Self::new(
            IpamDefaults::LOCAL_ADDRESS_SPACE,
            IpamDefaults::GLOBAL_ADDRESS_SPACE,
        )
    }
}

#[async_trait]
impl IpamDriver for StaticIpamDriver {
    async fn get_default_address_spaces(&self) -> DriverResult<AddressSpaces> {
        Ok(AddressSpaces {
            local: self.local_space.clone(),
            global: self.global_space.clone(),
        })
    }

    async fn request_pool(
        &self,
        address_space: &str,
        pool: &str,
        sub_pool: &str,
        _options: &Options,
        _v6: bool,
    ) -> DriverResult<PoolAllocation> {
        let pool = if pool.is_empty() {
            IpamDefaults::POOL
        } else {
            pool
        };
        // Pool IDs only need to be unique per (space, pool, sub-pool).
        let pool_id = if sub_pool.is_empty() {
            format!("{}/{}", address_space, pool)
        } else {
            format!("{}/{}/{}", address_space, pool, sub_pool)
        };
        debug!("Static pool {} for {}", pool, pool_id);
        Ok(PoolAllocation {
            pool_id,
            pool: pool.to_string(),
            data: Options::new(),
        })
    }

    async fn release_pool(&self, _pool_id: &str) -> DriverResult<()> {
        Ok(())
    }

    async fn request_address(
        &self,
        _pool_id: &str,
        address: Option<IpAddr>,
        _options: &Options,
    ) -> DriverResult<AddressAllocation> {
        let address = match address {
            Some(ip @ IpAddr::V4(_)) => format!("{}/{}", ip, IpamDefaults::PREFIX_V4),
            Some(ip @ IpAddr::V6(_)) => format!("{}/{}", ip, IpamDefaults::PREFIX_V6),
            None => IpamDefaults::ADDRESS.to_string(),
        };
        Ok(AddressAllocation {
            address,
            data: Options::new(),
        })
    }

    async fn release_address(&self, _pool_id: &str, _address: Option<IpAddr>) -> DriverResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_address_spaces() {
        let spaces = StaticIpamDriver::default()
            .get_default_address_spaces()
            .await
            .unwrap();
        assert_eq!(spaces.local, "mojaLocal");
        assert_eq!(spaces.global, "mojaGlobal");
    }

    #[tokio::test]
    async fn test_request_pool_defaults_and_echoes() {
        let ipam = StaticIpamDriver::default();

        let chosen = ipam
            .request_pool("mojaLocal", "", "", &Options::new(), false)
            .await
            .unwrap();
        assert_eq!(chosen.pool, "10.2.3.0/24");
        assert_eq!(chosen.pool_id, "mojaLocal/10.2.3.0/24");

        let requested = ipam
            .request_pool("mojaLocal", "172.30.0.0/16", "172.30.1.0/24", &Options::new(), false)
            .await
            .unwrap();
        assert_eq!(requested.pool, "172.30.0.0/16");
        assert_eq!(requested.pool_id, "mojaLocal/172.30.0.0/16/172.30.1.0/24");
    }

    #[tokio::test]
    async fn test_request_address() {
        let ipam = StaticIpamDriver::default();
        let any = ipam
            .request_address("p", None, &Options::new())
            .await
            .unwrap();
        assert_eq!(any.address, "10.2.3.5/24");

        let v6 = ipam
            .request_address("p", "fd00::9".parse().ok(), &Options::new())
            .await
            .unwrap();
        assert_eq!(v6.address, "fd00::9/64");
    }
}
