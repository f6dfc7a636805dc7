use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::ValueEnum;

use crate::cli::Cli;

pub const DEFAULT_API_BASE: &str = "https://cdn-api.co-vin.in";

/// How matched rows are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// `{results_dir}/{district}/{age}/dose-{n}/{unix_ts}.csv` per bucket.
    Bucketed,
    /// Everything into one `result.csv`.
    Single,
}

/// Loop termination policy.
#[derive(Debug, Clone, Copy)]
pub enum PollMode {
    /// Poll until the budget elapses or the first nonempty result.
    Budgeted { budget: Duration },
    /// Poll every district until each holds a live alert entry.
    Continuous,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub districts: Vec<u32>,
    pub api_base: String,
    pub poll_interval: Duration,
    pub cooldown: Duration,
    pub mode: PollMode,
    pub output: OutputMode,
    pub results_dir: PathBuf,
    pub email_enabled: bool,
    pub sendgrid_api_key: Option<String>,
    pub mail_from: String,
    pub mail_from_name: String,
}

impl AppConfig {
    pub fn from_env(cli: Cli) -> Result<Self> {
        if cli.districts.is_empty() {
            return Err(anyhow!("pass one or more district id(s)"));
        }

        let api_base = env::var("COWIN_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let poll_interval = env_duration_secs("POLL_INTERVAL_SECS", 5);
        let cooldown = env_duration_secs("ALERT_COOLDOWN_SECS", 60);

        let mode = match cli.budget_secs {
            Some(secs) => PollMode::Budgeted {
                budget: Duration::from_secs(secs),
            },
            None => PollMode::Continuous,
        };

        // The bucketed tree goes under ./results; the single-file variant
        // drops result.csv in the working directory, matching the layouts
        // this replaces. RESULTS_DIR overrides either root.
        let results_dir = env::var("RESULTS_DIR").map(PathBuf::from).unwrap_or_else(|_| {
            match cli.output_mode {
                OutputMode::Bucketed => PathBuf::from("./results"),
                OutputMode::Single => PathBuf::from("."),
            }
        });

        let sendgrid_api_key = env::var("SENDGRID_API_KEY").ok();
        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "no-reply@slotwatch.in".to_string());
        let mail_from_name = env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "Slotwatch".to_string());

        Ok(Self {
            districts: cli.districts,
            api_base,
            poll_interval,
            cooldown,
            mode,
            output: cli.output_mode,
            results_dir,
            email_enabled: !cli.no_email,
            sendgrid_api_key,
            mail_from,
            mail_from_name,
        })
    }
}

fn env_duration_secs(key: &str, default: u64) -> Duration {
    let secs = env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default);
    Duration::from_secs(secs)
}

/// Splits an `EMAIL_<district_id>` value into addresses.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Subscriber addresses for a district, from `EMAIL_<district_id>`.
pub fn recipients_for(district_id: u32) -> Vec<String> {
    match env::var(format!("EMAIL_{district_id}")) {
        Ok(raw) => parse_recipients(&raw),
        Err(_) => Vec::new(),
    }
}
