// src/config.rs

use chrono::Duration;
use meetbot_common::models::AvailabilityWindow;

/// Minutes between "now" and the start of the availability window.
pub const DEFAULT_LEAD_GAP_MINUTES: i64 = 10;

/// Length of the availability window in minutes.
pub const DEFAULT_MEETING_DURATION_MINUTES: i64 = 30;

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Bot application id handed to the channel when resuming.
    pub app_id: String,
    pub lead_gap_minutes: i64,
    pub default_duration_minutes: i64,
}

impl NotifyConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            lead_gap_minutes: DEFAULT_LEAD_GAP_MINUTES,
            default_duration_minutes: DEFAULT_MEETING_DURATION_MINUTES,
        }
    }

    pub fn lead_gap(&self) -> Duration {
        Duration::minutes(self.lead_gap_minutes)
    }

    pub fn default_duration(&self) -> Duration {
        Duration::minutes(self.default_duration_minutes)
    }

    /// The window for the next query, anchored at "now".
    pub fn window(&self) -> AvailabilityWindow {
        AvailabilityWindow::from_now(self.lead_gap(), self.default_duration())
    }
}
