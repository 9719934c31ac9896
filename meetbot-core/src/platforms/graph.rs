//! Microsoft Graph `getSchedule` client: one batched free/busy POST for
//! every room address at once. Any error - transport, HTTP status, or a
//! body-level error object - fails the whole query; there is no partial
//! result.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use meetbot_common::error::Error;
use meetbot_common::models::{AvailabilityWindow, BusySlot, RoomSchedule};
use meetbot_common::traits::AvailabilityProvider;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Granularity of the availability view in minutes.
const AVAILABILITY_VIEW_INTERVAL: u32 = 30;

pub struct GraphScheduleClient {
    client: reqwest::Client,
    base_url: String,
}

impl GraphScheduleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleBatchResponse {
    #[serde(default)]
    value: Vec<ScheduleEntry>,
    #[serde(default)]
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleEntry {
    schedule_id: String,
    #[serde(default)]
    schedule_items: Vec<ScheduleItem>,
    #[serde(default)]
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleItem {
    #[serde(default)]
    status: Option<String>,
    start: GraphDateTime,
    end: GraphDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphDateTime {
    date_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphError {
    #[serde(default)]
    message: Option<String>,
}

/// Graph hands times back as naive strings in the requested zone; we always
/// request UTC.
fn parse_graph_datetime(raw: &str) -> Result<chrono::DateTime<chrono::Utc>, Error> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::Parse(format!("bad Graph datetime '{}': {}", raw, e)))
}

impl ScheduleItem {
    fn into_busy_slot(self) -> Result<BusySlot, Error> {
        Ok(BusySlot {
            status: self.status.unwrap_or_else(|| "busy".to_string()),
            start_utc: parse_graph_datetime(&self.start.date_time)?,
            end_utc: parse_graph_datetime(&self.end.date_time)?,
        })
    }
}

#[async_trait]
impl AvailabilityProvider for GraphScheduleClient {
    async fn rooms_schedule(
        &self,
        window: &AvailabilityWindow,
        room_emails: &[String],
        token: &str,
    ) -> Result<Vec<RoomSchedule>, Error> {
        let body = json!({
            "schedules": room_emails,
            "startTime": {
                "dateTime": window.start_utc.to_rfc3339(),
                "timeZone": "UTC",
            },
            "endTime": {
                "dateTime": window.end_utc.to_rfc3339(),
                "timeZone": "UTC",
            },
            "availabilityViewInterval": AVAILABILITY_VIEW_INTERVAL,
        });

        debug!("getSchedule for {} rooms", room_emails.len());
        let response = self
            .client
            .post(format!("{}/me/calendar/getSchedule", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::AvailabilityQueryFailed(format!(
                "getSchedule returned {}",
                response.status()
            )));
        }

        let parsed: ScheduleBatchResponse = response.json().await?;
        if let Some(err) = parsed.error {
            return Err(Error::AvailabilityQueryFailed(
                err.message.unwrap_or_else(|| "unknown Graph error".to_string()),
            ));
        }

        let mut schedules = Vec::with_capacity(parsed.value.len());
        for entry in parsed.value {
            if let Some(err) = entry.error {
                return Err(Error::AvailabilityQueryFailed(format!(
                    "schedule '{}': {}",
                    entry.schedule_id,
                    err.message.unwrap_or_else(|| "unknown Graph error".to_string())
                )));
            }
            let mut busy_slots = Vec::with_capacity(entry.schedule_items.len());
            for item in entry.schedule_items {
                busy_slots.push(item.into_busy_slot()?);
            }
            schedules.push(RoomSchedule {
                schedule_id: entry.schedule_id,
                display_name: None,
                building_name: None,
                busy_slots,
            });
        }
        Ok(schedules)
    }
}
