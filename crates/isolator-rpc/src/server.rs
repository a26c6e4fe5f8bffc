//! Listener glue: serve a [`Dispatcher`] over TCP or a unix socket.

use crate::dispatcher::Dispatcher;
use isolator_core::{IsolatorError, PluginConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Serve requests arriving on a bound TCP listener until the listener fails.
pub async fn serve(listener: TcpListener, dispatcher: &Dispatcher) -> std::io::Result<()> {
    axum::serve(listener, dispatcher.router()).await
}

/// Serve requests arriving on a bound unix socket.
#[cfg(unix)]
pub async fn serve_unix(
    listener: tokio::net::UnixListener,
    dispatcher: &Dispatcher,
) -> std::io::Result<()> {
    axum::serve(listener, dispatcher.router()).await
}

/// Start the plugin server on a TCP address in the background.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(dispatcher: Dispatcher, addr: &str) -> anyhow::Result<SocketAddr> {
    let addr: SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Plugin listening on {}", actual_addr);

    tokio::spawn(async move {
        if let Err(e) = serve(listener, &dispatcher).await {
            error!("Plugin server error: {}", e);
        }
    });

    Ok(actual_addr)
}

/// Socket path the daemon discovers a plugin by: `/run/docker/plugins/<name>.sock`.
pub fn plugin_socket_path(name: &str) -> PathBuf {
    Path::new(PluginConfig::SOCKET_DIR).join(format!(
        "{}.{}",
        name,
        PluginConfig::SOCKET_EXTENSION
    ))
}

/// Bind a unix socket, creating the parent directory and removing a stale
/// socket file left by a previous run.
#[cfg(unix)]
pub fn bind_unix(path: &Path) -> isolator_core::Result<tokio::net::UnixListener> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| IsolatorError::io_with_path(e, parent))?;
    }
    match std::fs::remove_file(path) {
        Ok(()) => info!("Removed stale socket {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(IsolatorError::io_with_path(e, path)),
    }
    tokio::net::UnixListener::bind(path).map_err(|e| IsolatorError::io_with_path(e, path))
}
