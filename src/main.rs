//! Siege Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                 SIEGE PROXY                  │
//!   Client Request       │  ┌─────────┐    ┌──────────┐                 │
//!   ─────────────────────┼─▶│  http   │───▶│ handlers │──┐              │
//!                        │  │ server  │    └──────────┘  │              │
//!                        │  └─────────┘                  ▼              │
//!                        │                        ┌─────────────┐       │
//!                        │                        │  upstream   │◀──────┼──── Siege API
//!                        │                        │   client    │───────┼───▶
//!                        │                        └──────┬──────┘       │
//!                        │                               ▼              │
//!   Client Response      │                        ┌─────────────┐       │
//!   ◀────────────────────┼────────────────────────│ aggregator  │       │
//!                        │                        │ (fan-out +  │       │
//!                        │                        │  join all)  │       │
//!                        │                        └─────────────┘       │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use siege_proxy::cli::Args;
use siege_proxy::lifecycle;
use siege_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.resolve_config()?;

    logging::init_logging(&config.observability);

    tracing::info!("siege-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
