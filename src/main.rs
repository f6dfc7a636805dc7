use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use slotwatch::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    match dotenv::dotenv() {
        Ok(path) => info!("📄 Loaded .env from {:?}", path),
        Err(e) => warn!("⚠️  Could not load .env file: {}", e),
    }

    let cli = Cli::parse();

    info!("🏥 Starting slotwatch - vaccination slot watcher");
    slotwatch::run(cli).await
}
