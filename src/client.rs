use chrono::{Duration as ChronoDuration, Utc};
use chrono_tz::Asia::Kolkata;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::CalendarResponse;
use crate::error::ClientError;

pub const CALENDAR_BY_DISTRICT_PATH: &str =
    "api/v2/appointment/sessions/public/calendarByDistrict";

// The CDN drops requests that don't look like a browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.93 Safari/537.36";

pub struct CalendarClient {
    base_url: String,
    client: reqwest::Client,
}

impl CalendarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// One 7-day calendar window for a district. `date` is DD-MM-YYYY in IST.
    pub async fn fetch(
        &self,
        district_id: u32,
        date: &str,
    ) -> Result<CalendarResponse, ClientError> {
        let url = format!(
            "{}/{}?district_id={}&date={}",
            self.base_url, CALENDAR_BY_DISTRICT_PATH, district_id, date
        );
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .headers(browser_headers())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Upstream(status));
        }

        let body = response.text().await?;
        let calendar = serde_json::from_str(&body)?;
        Ok(calendar)
    }

    /// Two consecutive windows starting today in IST: the API caps each query
    /// at 7 days, so two calls give a 14-day lookahead.
    pub async fn fetch_fortnight(
        &self,
        district_id: u32,
    ) -> Result<(CalendarResponse, CalendarResponse), ClientError> {
        let today = Utc::now().with_timezone(&Kolkata);
        let next_week = today + ChronoDuration::days(7);

        let first = self.fetch(district_id, &today.format("%d-%m-%Y").to_string()).await?;
        let second = self
            .fetch(district_id, &next_week.format("%d-%m-%Y").to_string())
            .await?;
        Ok((first, second))
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("pragma", HeaderValue::from_static("no-cache"));
    headers.insert("cache-control", HeaderValue::from_static("no-cache"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\" Not A;Brand\";v=\"99\", \"Chromium\";v=\"90\", \"Google Chrome\";v=\"90\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers.insert("user-agent", HeaderValue::from_static(BROWSER_USER_AGENT));
    headers
}
