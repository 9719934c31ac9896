//! Minimal Bot Framework wire shapes: just the fields the connector client
//! and the inbound registration path actually touch.

use serde::{Deserialize, Serialize};

use crate::models::ConversationReference;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
}

impl Activity {
    pub fn message_text(text: impl Into<String>) -> Self {
        Self {
            activity_type: "message".into(),
            id: None,
            text: Some(text.into()),
            attachments: Vec::new(),
            from: None,
            recipient: None,
            conversation: None,
            service_url: None,
        }
    }

    pub fn message_attachment(attachment: Attachment) -> Self {
        Self {
            activity_type: "message".into(),
            id: None,
            text: None,
            attachments: vec![attachment],
            from: None,
            recipient: None,
            conversation: None,
            service_url: None,
        }
    }

    /// Extracts the proactive-messaging handle from an inbound activity,
    /// if the activity carries enough to build one.
    pub fn conversation_reference(&self) -> Option<ConversationReference> {
        let from = self.from.as_ref()?;
        let conversation = self.conversation.as_ref()?;
        let service_url = self.service_url.as_ref()?;
        let bot = self.recipient.as_ref()?;
        Some(ConversationReference {
            user_id: from.id.clone(),
            user_name: from.name.clone(),
            conversation_id: conversation.id.clone(),
            service_url: service_url.clone(),
            bot_id: bot.id.clone(),
        })
    }
}

/// What the channel hands back after a send or update. The id in here is
/// authoritative: an update may reassign the message id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: String,
}
