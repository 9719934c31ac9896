use async_trait::async_trait;
use dashmap::DashMap;

use meetbot_common::error::Error;
use meetbot_common::traits::TokenProvider;

/// Token cache fed by whatever acquires tokens upstream. Token acquisition
/// itself is outside this subsystem; a missing token is terminal for the
/// current trigger.
#[derive(Default)]
pub struct InMemoryTokenProvider {
    tokens: DashMap<String, String>,
}

impl InMemoryTokenProvider {
    pub fn new() -> Self {
        Self {
            tokens: DashMap::new(),
        }
    }

    pub fn set_token(&self, user_id: &str, token: &str) {
        self.tokens.insert(user_id.to_string(), token.to_string());
    }
}

#[async_trait]
impl TokenProvider for InMemoryTokenProvider {
    async fn user_token(&self, user_id: &str) -> Result<String, Error> {
        self.tokens
            .get(user_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::Auth(format!("no token for user '{}'", user_id)))
    }
}
