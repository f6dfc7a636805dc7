use std::time::Instant;

use anyhow::Result;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::alert::AlertState;
use crate::client::CalendarClient;
use crate::config::{AppConfig, PollMode};
use crate::domain::{FilterResult, SlotAlert};
use crate::filter::collect_available;
use crate::notifier::NotifierHub;
use crate::report::write_results;

/// The poll loop: fetch, filter, write, alert, with per-district cooldown
/// suppression. One control-flow path; no two districts are ever in flight
/// at once.
pub struct SlotWatcher {
    config: AppConfig,
    client: CalendarClient,
    notifier: NotifierHub,
    state: AlertState,
}

impl SlotWatcher {
    pub fn new(config: AppConfig, client: CalendarClient, notifier: NotifierHub) -> Self {
        let state = AlertState::new(config.cooldown);
        Self {
            config,
            client,
            notifier,
            state,
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) -> Result<()> {
        let started = Instant::now();
        info!("👁️  Watching {} district(s)", self.config.districts.len());

        'outer: loop {
            if cancel.is_cancelled() {
                info!("Cancelled, stopping");
                break;
            }

            match self.config.mode {
                PollMode::Budgeted { budget } if started.elapsed() >= budget => {
                    info!("Time budget exhausted, stopping");
                    break;
                }
                PollMode::Continuous
                    if self.state.all_suppressed(&self.config.districts) =>
                {
                    // Entries expire after the cooldown, so with more than a
                    // couple of districts this condition rarely holds.
                    info!("Every district alerted within the cooldown window, stopping");
                    break;
                }
                _ => {}
            }

            let districts = self.config.districts.clone();
            for district_id in districts {
                if let PollMode::Budgeted { budget } = self.config.mode {
                    if started.elapsed() >= budget {
                        continue 'outer;
                    }
                }

                if !self.state.is_eligible(district_id) {
                    info!("Skipping alerts for district {district_id}");
                    continue;
                }

                info!(
                    "Sleeping {:?} before next call",
                    self.config.poll_interval
                );
                tokio::select! {
                    _ = cancel.cancelled() => continue 'outer,
                    _ = sleep(self.config.poll_interval) => {}
                }

                let Some(alert) = self.poll_district(district_id).await else {
                    continue;
                };

                info!("Found available slots for district {district_id}");
                self.state.record(district_id);

                if let Err(e) = self.notifier.send(&alert).await {
                    error!("Failed to dispatch alert for district {district_id}: {e}");
                }

                if matches!(self.config.mode, PollMode::Budgeted { .. }) {
                    info!("First result found, stopping");
                    break 'outer;
                }
            }
        }

        Ok(())
    }

    /// One fetch-filter-report pass over both weekly windows. Returns the
    /// alert to dispatch when slots were found and a CSV landed on disk.
    async fn poll_district(&self, district_id: u32) -> Option<SlotAlert> {
        info!("Checking for slots in district {district_id}");

        let (first_week, second_week) = match self.client.fetch_fortnight(district_id).await {
            Ok(pair) => pair,
            Err(e) => {
                error!("Calendar request for district {district_id} failed: {e}");
                return None;
            }
        };

        let mut result = FilterResult::default();
        collect_available(&first_week, &mut result);
        collect_available(&second_week, &mut result);

        if result.is_empty() {
            info!("No available slot found for district {district_id}");
            return None;
        }

        let written = write_results(
            &result,
            district_id,
            self.config.output,
            &self.config.results_dir,
        );
        // Every write failing is already logged; no file means no alert.
        let attachment = written.into_iter().next()?;
        Some(SlotAlert::new(district_id, attachment))
    }
}
