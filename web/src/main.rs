//! tcpoke - poke raw TCP endpoints from a browser.
//!
//! Serves a single-page operator UI plus a form endpoint that bridges
//! each browser action onto a one-shot TCP interaction: probe a target,
//! acknowledge a "disconnect", or send a text/hex payload and drain the
//! reply. The server keeps no connection state between requests; the
//! page's "connected" indicator is a display flag owned entirely by the
//! browser.
//!
//! # Usage
//!
//! ```bash
//! # Serve the operator page on the default port 8080
//! tcpoke
//!
//! # Custom bind and a snappier drain for scripted use
//! tcpoke --bind 0.0.0.0 --port 9000 --read-timeout 1
//! ```

mod handlers;

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tcpoke_core::bridge::{Bridge, Timeouts};

/// tcpoke web bridge
#[derive(Parser, Debug)]
#[command(name = "tcpoke")]
#[command(about = "Probe and exercise raw TCP endpoints from a browser")]
#[command(version)]
struct Args {
    /// HTTP server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Connect-test (probe) timeout in seconds
    #[arg(long, default_value = "2")]
    probe_timeout: u64,

    /// Send-transaction connect timeout in seconds
    #[arg(long, default_value = "10")]
    connect_timeout: u64,

    /// Per-read timeout while draining the response, in seconds
    #[arg(long, default_value = "2")]
    read_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn timeouts(&self) -> Timeouts {
        Timeouts {
            probe: Duration::from_secs(self.probe_timeout),
            connect: Duration::from_secs(self.connect_timeout),
            read: Duration::from_secs(self.read_timeout),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let bridge = Bridge::new(args.timeouts());
    let app = router(bridge);

    let addr = format!("{}:{}", args.bind, args.port);
    info!("tcpoke v{}", env!("CARGO_PKG_VERSION"));
    info!("Operator page: http://{}/", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(bridge: Bridge) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::operator_page).post(handlers::bridge_request),
        )
        .route("/health", get(handlers::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}
