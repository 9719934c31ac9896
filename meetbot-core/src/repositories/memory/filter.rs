use async_trait::async_trait;

use meetbot_common::error::Error;
use meetbot_common::models::FavoriteRoom;
use meetbot_common::traits::RoomFilter;

/// Keeps every room as-is. Stands in until a directory-backed filter that
/// checks the token's read access per room is wired up.
pub struct PassthroughRoomFilter;

#[async_trait]
impl RoomFilter for PassthroughRoomFilter {
    async fn filter_rooms(
        &self,
        _token: &str,
        rooms: Vec<FavoriteRoom>,
    ) -> Result<Vec<FavoriteRoom>, Error> {
        Ok(rooms)
    }
}
