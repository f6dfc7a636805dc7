use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-district alert suppression. An entry means "alerted recently"; the
/// eligibility check removes entries older than the cooldown so the district
/// can alert again. An unexpired entry is therefore never older than the
/// cooldown.
#[derive(Debug)]
pub struct AlertState {
    cooldown: Duration,
    last_alert: HashMap<u32, Instant>,
}

impl AlertState {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_alert: HashMap::new(),
        }
    }

    /// Stamps an alert for the district at the current time.
    pub fn record(&mut self, district_id: u32) {
        self.record_at(district_id, Instant::now());
    }

    pub fn record_at(&mut self, district_id: u32, when: Instant) {
        self.last_alert.insert(district_id, when);
    }

    /// Whether the district may alert again. Expired entries are removed.
    pub fn is_eligible(&mut self, district_id: u32) -> bool {
        self.is_eligible_at(district_id, Instant::now())
    }

    pub fn is_eligible_at(&mut self, district_id: u32, now: Instant) -> bool {
        match self.last_alert.get(&district_id) {
            Some(&stamped) if now.duration_since(stamped) < self.cooldown => false,
            Some(_) => {
                self.last_alert.remove(&district_id);
                true
            }
            None => true,
        }
    }

    /// True when every given district holds a live, non-expired entry. Does
    /// not expire anything; the continuous loop uses this as its termination
    /// check.
    pub fn all_suppressed(&self, districts: &[u32]) -> bool {
        self.all_suppressed_at(districts, Instant::now())
    }

    pub fn all_suppressed_at(&self, districts: &[u32], now: Instant) -> bool {
        districts.iter().all(|id| {
            self.last_alert
                .get(id)
                .is_some_and(|&stamped| now.duration_since(stamped) < self.cooldown)
        })
    }
}
