use serde::{Deserialize, Serialize};

/// Maps a logical card (user + correlation id) to the channel message id of
/// the card as it currently exists in the conversation. At most one live
/// record per key; writing again for the same key supersedes the old record
/// (last-write-wins, no versioning).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Partition key.
    pub user_id: String,
    /// Key within the partition.
    pub correlation_id: String,
    /// Channel message id of the live card. Updated after every in-place
    /// refresh because the channel may reassign the id on update.
    pub activity_id: String,
}
