use serde::{Deserialize, Serialize};

/// Per-user preferences, read-only to the notification subsystem.
///
/// `iana_timezone` drives every conversion; the legacy Windows form is kept
/// only as a display label on rendered cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: String,
    pub iana_timezone: String,
    pub windows_timezone: String,
}
