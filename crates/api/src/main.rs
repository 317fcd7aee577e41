//! Flight Delay Pipeline - Server Entry Point

use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Flight Delay Pipeline v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Starting delay prediction service...");

    let config = ApiConfig::from_env();
    run_server(config).await
}
