use std::fs;

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::json;
use tracing::{info, warn};

use crate::config::{recipients_for, AppConfig};
use crate::domain::SlotAlert;

pub const SENDGRID_API_BASE: &str = "https://api.sendgrid.com";

/// Sends slot alerts through the SendGrid v3 mail API with the CSV attached.
/// The first subscriber is the visible recipient; the full list goes on BCC.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    api_base: String,
    api_key: String,
    from_email: String,
    from_name: String,
    client: reqwest::Client,
}

impl EmailNotifier {
    pub fn new(api_key: String, from_email: String, from_name: String) -> Self {
        Self::with_base(SENDGRID_API_BASE, api_key, from_email, from_name)
    }

    pub fn with_base(
        api_base: impl Into<String>,
        api_key: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key,
            from_email,
            from_name,
            client: reqwest::Client::new(),
        }
    }

    pub fn maybe_from_config(config: &AppConfig) -> Option<Self> {
        if !config.email_enabled {
            return None;
        }
        match &config.sendgrid_api_key {
            Some(key) if !key.is_empty() => Some(Self::new(
                key.clone(),
                config.mail_from.clone(),
                config.mail_from_name.clone(),
            )),
            _ => None,
        }
    }

    pub async fn send(&self, alert: &SlotAlert) -> Result<()> {
        let recipients = recipients_for(alert.district_id);
        let Some((first, rest)) = recipients.split_first() else {
            return Err(anyhow!("no value set in EMAIL_{}", alert.district_id));
        };

        let data = fs::read(&alert.attachment)?;
        let encoded = STANDARD.encode(data);
        let filename = alert
            .attachment
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("result.csv");

        let mut personalization = json!({ "to": [{ "email": first }] });
        if !rest.is_empty() {
            personalization["bcc"] = rest
                .iter()
                .map(|address| json!({ "email": address }))
                .collect::<Vec<_>>()
                .into();
        }

        let payload = json!({
            "personalizations": [personalization],
            "from": { "email": self.from_email, "name": self.from_name },
            "subject": alert.subject,
            "content": [{ "type": "text/html", "value": alert.html_body }],
            "attachments": [{
                "content": encoded,
                "type": "text/csv",
                "filename": filename,
            }],
        });

        let response = self
            .client
            .post(format!("{}/v3/mail/send", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            info!("Alert email sent for district {}", alert.district_id);
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(
                "SendGrid rejected alert for district {}: {} {}",
                alert.district_id, status, body
            );
            Err(anyhow!("SendGrid returned {status}"))
        }
    }
}
