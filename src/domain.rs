use std::path::PathBuf;

use serde::Deserialize;

/// One 7-day window of the calendarByDistrict endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarResponse {
    #[serde(default)]
    pub centers: Vec<Center>,
}

/// A vaccination center and its open sessions, as reported upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Center {
    #[serde(default)]
    pub center_id: u64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub state_name: String,
    #[serde(default)]
    pub district_name: String,
    #[serde(default)]
    pub block_name: String,
    #[serde(default)]
    pub pincode: u32,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub fee_type: String,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Capacity is reported per dose; the aggregate `available_capacity` is kept
/// for completeness but bucketing only looks at the per-dose fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    pub date: String,
    #[serde(default)]
    pub available_capacity: f64,
    pub min_age_limit: u32,
    pub vaccine: String,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(default)]
    pub available_capacity_dose1: f64,
    #[serde(default)]
    pub available_capacity_dose2: f64,
}

/// One matched session projected to a flat CSV row.
#[derive(Debug, Clone)]
pub struct SlotRow {
    pub centre_name: String,
    pub district_name: String,
    pub pincode: String,
    pub session_date: String,
    pub availability: f64,
    pub min_age_limit: u32,
    pub vaccine: String,
}

/// Matched rows bucketed by (dose, age bracket). Built fresh per poll cycle
/// and discarded once written out.
#[derive(Debug, Clone, Default)]
pub struct FilterResult {
    pub dose1_age18: Vec<SlotRow>,
    pub dose2_age18: Vec<SlotRow>,
    pub dose1_age45: Vec<SlotRow>,
    pub dose2_age45: Vec<SlotRow>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.dose1_age18.is_empty()
            && self.dose2_age18.is_empty()
            && self.dose1_age45.is_empty()
            && self.dose2_age45.is_empty()
    }

    /// Buckets as (dose, age, rows), in the order reports are written and the
    /// first alert attachment is picked.
    pub fn buckets(&self) -> [(u8, u32, &[SlotRow]); 4] {
        [
            (1, 18, self.dose1_age18.as_slice()),
            (2, 18, self.dose2_age18.as_slice()),
            (1, 45, self.dose1_age45.as_slice()),
            (2, 45, self.dose2_age45.as_slice()),
        ]
    }
}

/// A slots-found notification for one district, carrying the CSV to attach.
#[derive(Debug, Clone)]
pub struct SlotAlert {
    pub district_id: u32,
    pub subject: String,
    pub html_body: String,
    pub attachment: PathBuf,
}

impl SlotAlert {
    pub fn new(district_id: u32, attachment: PathBuf) -> Self {
        Self {
            district_id,
            subject: format!("Vaccination slots open in district {district_id}"),
            html_body: format!(
                "Hey,<br><br>Vaccination slots just opened up in district \
                 {district_id}, which you are subscribed to. The attached CSV \
                 lists the open sessions.<br>Stay safe, get vaccinated.\
                 <br><br>slotwatch"
            ),
            attachment,
        }
    }
}
