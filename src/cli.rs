use clap::Parser;

/// Watch CoWIN vaccination slots by district and alert subscribers.
///
/// Bad or missing arguments are a usage error and exit nonzero.
#[derive(Debug, Parser)]
#[command(name = "slotwatch", version, about)]
pub struct Cli {
    /// District id(s) to watch.
    #[arg(required = true, value_name = "DISTRICT_ID")]
    pub districts: Vec<u32>,

    /// Stop after this many seconds or after the first match, whichever
    /// comes first. Without it, polling continues indefinitely.
    #[arg(long, value_name = "SECS")]
    pub budget_secs: Option<u64>,

    /// CSV layout: one file per (age, dose) bucket, or a single result.csv.
    #[arg(long, value_enum, default_value = "bucketed")]
    pub output_mode: crate::config::OutputMode,

    /// Disable email alerts even when SENDGRID_API_KEY is set.
    #[arg(long)]
    pub no_email: bool,
}
