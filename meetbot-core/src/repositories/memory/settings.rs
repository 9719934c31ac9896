use async_trait::async_trait;
use dashmap::DashMap;

use meetbot_common::error::Error;
use meetbot_common::models::UserSettings;
use meetbot_common::traits::UserSettingsRepository;

#[derive(Default)]
pub struct InMemoryUserSettingsRepository {
    settings: DashMap<String, UserSettings>,
}

impl InMemoryUserSettingsRepository {
    pub fn new() -> Self {
        Self {
            settings: DashMap::new(),
        }
    }
}

#[async_trait]
impl UserSettingsRepository for InMemoryUserSettingsRepository {
    async fn get(&self, user_id: &str) -> Result<Option<UserSettings>, Error> {
        Ok(self.settings.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, settings: &UserSettings) -> Result<(), Error> {
        self.settings
            .insert(settings.user_id.clone(), settings.clone());
        Ok(())
    }
}
