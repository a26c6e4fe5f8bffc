//! Isolator Core - protocol types and driver traits for a Docker remote
//! network/IPAM plugin.
//!
//! This crate has no HTTP layer. It defines the JSON shapes the daemon sends
//! and expects back, the [`NetworkDriver`] and [`IpamDriver`] traits a backend
//! implements, and the error types shared with `isolator-rpc`.
//!
//! # Example
//!
//! ```rust,ignore
//! use isolator_core::{AddressSpaces, DriverResult, IpamDriver};
//!
//! struct MyIpam;
//!
//! #[async_trait::async_trait]
//! impl IpamDriver for MyIpam {
//!     async fn get_default_address_spaces(&self) -> DriverResult<AddressSpaces> {
//!         Ok(AddressSpaces { local: "local".into(), global: "global".into() })
//!     }
//!     // ...
//! }
//! ```

pub mod api;
pub mod config;
pub mod driver;
pub mod error;

pub use api::{EmptyResponse, ErrorResponse, GenericOptions, HandshakeResponse, Options};
pub use config::{method_path, IpamDefaults, PluginConfig, ProtocolConfig};
pub use driver::{
    parse_address, AddressAllocation, AddressSpaces, DriverResult, IpamCapabilities, IpamDriver,
    NetworkDriver, PoolAllocation,
};
pub use error::{DriverError, IsolatorError, Result};
