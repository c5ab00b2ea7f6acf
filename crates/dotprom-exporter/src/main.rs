//! dotprom exporter binary.
//!
//! Loads `dotprom.yaml` and opens the scrape endpoint through the start-once
//! bootstrap. Observations come from hosts embedding the library; the binary
//! exists for standalone runs and smoke testing.

use tracing_subscriber::{fmt, EnvFilter};

use dotprom_exporter::{app_state, config};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("dotprom.yaml").expect("config load failed");
    let state = app_state::AppState::bootstrap(cfg).expect("state build failed");

    tracing::info!(port = state.cfg().exporter.scrape_port, "dotprom-exporter running");
    tokio::signal::ctrl_c().await.expect("shutdown signal wait failed");
}
