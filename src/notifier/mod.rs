mod console;
mod email;

pub use console::ConsoleNotifier;
pub use email::EmailNotifier;

use anyhow::Result;
use tracing::warn;

use crate::domain::SlotAlert;

/// Fans one alert out to every configured channel. The console always gets
/// it; an email failure is logged but never stops the poll loop.
pub struct NotifierHub {
    console: ConsoleNotifier,
    email: Option<EmailNotifier>,
}

impl NotifierHub {
    pub fn new(console: ConsoleNotifier, email: Option<EmailNotifier>) -> Self {
        Self { console, email }
    }

    pub async fn send(&self, alert: &SlotAlert) -> Result<()> {
        self.console.send(alert).await?;

        if let Some(email) = &self.email {
            if let Err(e) = email.send(alert).await {
                warn!("Email notification failed: {}", e);
            }
        }

        Ok(())
    }
}
