use async_trait::async_trait;

use crate::error::Error;
use crate::models::{ActivityRecord, FavoriteRoom, UserSettings};

#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, Error>;
    async fn upsert(&self, settings: &UserSettings) -> Result<(), Error>;
}

#[async_trait]
pub trait FavoriteRoomRepository: Send + Sync {
    /// All favorites for the user, in insertion order. Possibly empty;
    /// empty is a valid state, not an error.
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRoom>, Error>;
    async fn add(&self, room: &FavoriteRoom) -> Result<(), Error>;
}

/// Per-user, per-correlation-id mapping from a logical card to the channel
/// message id it currently lives under.
#[async_trait]
pub trait ActivityMappingRepository: Send + Sync {
    async fn get(
        &self,
        user_id: &str,
        correlation_id: &str,
    ) -> Result<Option<ActivityRecord>, Error>;

    /// Last-write-wins: superseding an existing record for the same
    /// (user, correlation id) is the normal refresh path, not an error.
    async fn put(&self, record: &ActivityRecord) -> Result<(), Error>;
}
