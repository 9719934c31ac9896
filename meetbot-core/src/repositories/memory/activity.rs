use async_trait::async_trait;
use dashmap::DashMap;

use meetbot_common::error::Error;
use meetbot_common::models::ActivityRecord;
use meetbot_common::traits::ActivityMappingRepository;

/// Keyed by (user id, correlation id); `put` supersedes silently, which is
/// exactly the invariant the idempotent refresh path relies on.
#[derive(Default)]
pub struct InMemoryActivityMappingRepository {
    records: DashMap<(String, String), ActivityRecord>,
}

impl InMemoryActivityMappingRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Number of live records, across all users.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ActivityMappingRepository for InMemoryActivityMappingRepository {
    async fn get(
        &self,
        user_id: &str,
        correlation_id: &str,
    ) -> Result<Option<ActivityRecord>, Error> {
        let key = (user_id.to_string(), correlation_id.to_string());
        Ok(self.records.get(&key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, record: &ActivityRecord) -> Result<(), Error> {
        let key = (record.user_id.clone(), record.correlation_id.clone());
        self.records.insert(key, record.clone());
        Ok(())
    }
}
