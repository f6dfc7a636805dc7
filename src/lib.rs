pub mod alert;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod notifier;
pub mod report;
pub mod watcher;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use cli::Cli;
use client::CalendarClient;
use config::AppConfig;
use notifier::{ConsoleNotifier, EmailNotifier, NotifierHub};
use watcher::SlotWatcher;

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env(cli)?;
    let client = CalendarClient::new(config.api_base.clone());

    let console = ConsoleNotifier::new();
    let email = EmailNotifier::maybe_from_config(&config);
    if email.is_some() {
        info!("📧 Email alerts enabled");
    } else {
        info!("📧 Email alerts disabled (no API key, or --no-email)");
    }
    let notifier = NotifierHub::new(console, email);

    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, shutting down");
            cancel.cancel();
        }
    });

    let app = SlotWatcher::new(config, client, notifier);
    app.run(loop_cancel).await
}
