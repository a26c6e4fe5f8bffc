//! Isolator plugin server - remote IPAM plugin for the Docker daemon.
//!
//! Serves the plugin protocol on `/run/docker/plugins/<name>.sock` (or a TCP
//! address) and answers IPAM calls with the static driver.

use anyhow::Result;
use clap::Parser;
use isolator_core::{IpamDefaults, PluginConfig};
use isolator_rpc::{server, Dispatcher, StaticIpamDriver};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "isolator-rpc")]
#[command(about = "Remote IPAM plugin for the Docker daemon")]
struct Args {
    /// Plugin name; the socket is created as /run/docker/plugins/<name>.sock
    #[arg(short, long, default_value = PluginConfig::DEFAULT_NAME)]
    name: String,

    /// Explicit unix socket path (overrides --name)
    #[arg(long, conflicts_with = "addr")]
    socket: Option<PathBuf>,

    /// Serve over TCP on HOST:PORT instead of a unix socket (e.g. 0.0.0.0:8080)
    #[arg(long)]
    addr: Option<String>,

    /// Default local address space
    #[arg(long, default_value = IpamDefaults::LOCAL_ADDRESS_SPACE)]
    local_space: String,

    /// Default global address space
    #[arg(long, default_value = IpamDefaults::GLOBAL_ADDRESS_SPACE)]
    global_space: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting Isolator plugin '{}'", args.name);

    let ipam = StaticIpamDriver::new(args.local_space.clone(), args.global_space.clone());
    let dispatcher = Dispatcher::builder().ipam(Arc::new(ipam)).build();

    match args.addr.clone() {
        Some(addr) => {
            let addr = server::start_server(dispatcher, &addr).await?;

            // Print address for the launcher to read (intentional stdout)
            println!("PLUGIN_ADDR={}", addr);

            tokio::signal::ctrl_c().await?;
            info!("Shutdown signal received, exiting");
        }
        None => serve_socket(&args, &dispatcher).await?,
    }

    Ok(())
}

#[cfg(unix)]
async fn serve_socket(args: &Args, dispatcher: &Dispatcher) -> Result<()> {
    let path = args
        .socket
        .clone()
        .unwrap_or_else(|| server::plugin_socket_path(&args.name));
    let listener = server::bind_unix(&path)?;

    info!("Plugin listening on {}", path.display());
    println!("PLUGIN_ADDR=unix://{}", path.display());

    tokio::select! {
        result = server::serve_unix(listener, dispatcher) => {
            if let Err(e) = result {
                error!("Plugin server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, exiting");
        }
    }

    if let Err(e) = std::fs::remove_file(&path) {
        error!("Failed to remove socket {}: {}", path.display(), e);
    }
    Ok(())
}

#[cfg(not(unix))]
async fn serve_socket(_args: &Args, _dispatcher: &Dispatcher) -> Result<()> {
    anyhow::bail!(
        "unix sockets are not available on this platform; use --addr {}",
        PluginConfig::DEFAULT_TCP_ADDR
    )
}
