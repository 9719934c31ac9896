use serde::{Deserialize, Serialize};

/// A meeting room the user marked as a favorite. Owned by the favorites
/// feature; this subsystem only reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteRoom {
    /// Partition key.
    pub user_id: String,
    /// Unique key within the user's partition.
    pub room_id: String,
    pub display_name: String,
    pub building_name: String,
    /// Contact address the scheduling service is queried with.
    pub room_email: String,
}
