use async_trait::async_trait;

use crate::error::Error;
use crate::models::{
    Attachment, AvailabilityWindow, ConversationReference, FavoriteRoom, RoomSchedule,
};

/// Batched free/busy lookup against the scheduling service.
#[async_trait]
pub trait AvailabilityProvider: Send + Sync {
    /// One query carrying every address at once. A service-side error
    /// surfaces as [`Error::AvailabilityQueryFailed`]; there is no partial
    /// result and the caller must not retry.
    async fn rooms_schedule(
        &self,
        window: &AvailabilityWindow,
        room_emails: &[String],
        token: &str,
    ) -> Result<Vec<RoomSchedule>, Error>;
}

/// Removes favorites the caller's current access token can no longer read.
/// This subsystem only passes the token through.
#[async_trait]
pub trait RoomFilter: Send + Sync {
    async fn filter_rooms(
        &self,
        token: &str,
        rooms: Vec<FavoriteRoom>,
    ) -> Result<Vec<FavoriteRoom>, Error>;
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn user_token(&self, user_id: &str) -> Result<String, Error>;
}

/// Outbound side of a conversation: resume a reference out-of-band, then
/// push text or cards through it. Send and update both return the message
/// id as the channel knows it *after* the call; an update may reassign the
/// id, and callers must track the returned one.
#[async_trait]
pub trait ConversationChannel: Send + Sync {
    /// Validates that the reference can be driven at all. Failure is
    /// terminal for the trigger ([`Error::ChannelResumeFailed`], no retry).
    async fn resume(
        &self,
        app_id: &str,
        reference: &ConversationReference,
    ) -> Result<(), Error>;

    async fn send_text(
        &self,
        reference: &ConversationReference,
        text: &str,
    ) -> Result<String, Error>;

    async fn send_card(
        &self,
        reference: &ConversationReference,
        attachment: Attachment,
    ) -> Result<String, Error>;

    async fn update_card(
        &self,
        reference: &ConversationReference,
        activity_id: &str,
        attachment: Attachment,
    ) -> Result<String, Error>;
}
