use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// UTC window the availability query runs against. Derived from
/// "now + lead gap" through "+ default duration"; both offsets come from
/// configuration, never from call sites. Timezone conversion happens at
/// render time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl AvailabilityWindow {
    pub fn from_now(lead_gap: Duration, default_duration: Duration) -> Self {
        let start_utc = Utc::now() + lead_gap;
        Self {
            start_utc,
            end_utc: start_utc + default_duration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusySlot {
    pub status: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

/// One room's slice of the batched free/busy response. `display_name` and
/// `building_name` start out empty and are copied on from the matching
/// [`FavoriteRoom`](crate::models::FavoriteRoom) during the merge step; a
/// schedule with no matching favorite keeps them `None` and must still
/// render without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSchedule {
    pub schedule_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub busy_slots: Vec<BusySlot>,
}
