use anyhow::Result;
use tracing::info;

use crate::domain::SlotAlert;

#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    pub async fn send(&self, alert: &SlotAlert) -> Result<()> {
        println!(
            "🔔 {} - see {}",
            alert.subject,
            alert.attachment.display()
        );
        info!("Alert sent to console for district {}", alert.district_id);
        Ok(())
    }
}
