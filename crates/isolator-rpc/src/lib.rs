//! Isolator RPC - HTTP side of a Docker remote network/IPAM plugin.
//!
//! Build a [`Dispatcher`] from whichever drivers the plugin implements, then
//! hand it to a listener:
//!
//! ```rust,ignore
//! let dispatcher = Dispatcher::builder()
//!     .ipam(Arc::new(StaticIpamDriver::default()))
//!     .build();
//! let listener = server::bind_unix(&server::plugin_socket_path("test_isolator"))?;
//! server::serve_unix(listener, &dispatcher).await?;
//! ```

pub mod dispatcher;
mod handlers;
pub mod server;
pub mod static_ipam;

#[cfg(test)]
mod test_support;

pub use dispatcher::{build_router, Dispatcher, DispatcherBuilder};
pub use static_ipam::StaticIpamDriver;
