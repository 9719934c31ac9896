use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Intent token carried by a task-module submit when a booking just
/// completed. Matched case-insensitively; any other value (including an
/// empty one) refreshes the favorites-availability card instead.
pub const MEETING_FROM_TASK_MODULE: &str = "meeting from task module";

/// Payload posted back when the user submits the booking task module.
/// `reply_to` is the correlation id tying this submit to the card that
/// opened the task module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSubmit {
    pub user_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub room_email: Option<String>,
    #[serde(default)]
    pub start_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_utc: Option<DateTime<Utc>>,
}

impl MeetingSubmit {
    /// Correlation id if present and non-empty.
    pub fn correlation_id(&self) -> Option<&str> {
        self.reply_to.as_deref().filter(|s| !s.is_empty())
    }
}
