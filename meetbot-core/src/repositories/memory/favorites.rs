use async_trait::async_trait;
use dashmap::DashMap;

use meetbot_common::error::Error;
use meetbot_common::models::FavoriteRoom;
use meetbot_common::traits::FavoriteRoomRepository;

/// Favorites per user, kept in insertion order so `list` is stable.
#[derive(Default)]
pub struct InMemoryFavoriteRoomRepository {
    rooms: DashMap<String, Vec<FavoriteRoom>>,
}

impl InMemoryFavoriteRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }
}

#[async_trait]
impl FavoriteRoomRepository for InMemoryFavoriteRoomRepository {
    async fn list(&self, user_id: &str) -> Result<Vec<FavoriteRoom>, Error> {
        Ok(self
            .rooms
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    async fn add(&self, room: &FavoriteRoom) -> Result<(), Error> {
        let mut entry = self.rooms.entry(room.user_id.clone()).or_default();
        // room_id is the unique key within a user's partition.
        if let Some(existing) = entry.iter_mut().find(|r| r.room_id == room.room_id) {
            *existing = room.clone();
        } else {
            entry.push(room.clone());
        }
        Ok(())
    }
}
