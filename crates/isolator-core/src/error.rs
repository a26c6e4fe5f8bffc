//! Error types for the Isolator plugin.
//!
//! Two layers exist: [`DriverError`] is what a capability implementation hands
//! back to the dispatcher (and what ends up in the `{"Err": ...}` envelope),
//! while [`IsolatorError`] covers the plumbing around it, mostly the plugin
//! socket.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a network or IPAM driver.
///
/// The message is forwarded to the daemon verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for DriverError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for DriverError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Main error type for the plugin plumbing.
#[derive(Debug, Error)]
pub enum IsolatorError {
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, IsolatorError>;

impl IsolatorError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        IsolatorError::Io {
            message: err.to_string(),
            path: path.into(),
            source: err,
        }
    }
}
