use serde::{Deserialize, Serialize};

/// Reusable handle for pushing a message to a user outside the normal
/// request/response cycle.
///
/// Process lifetime only: the registry holding these is never persisted,
/// so every reference is lost on restart and comes back only through a
/// fresh inbound message from the user. Accepted limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub conversation_id: String,
    pub service_url: String,
    pub bot_id: String,
}
