// src/registry.rs

use dashmap::DashMap;
use meetbot_common::models::ConversationReference;
use tracing::debug;

/// Process-wide map from user id to that user's conversation reference,
/// shared by every concurrently running trigger task. Lookups never block
/// on writes for unrelated keys, and no ordering is guaranteed across keys.
///
/// Volatile by design: nothing here survives a restart, and a reference
/// only comes back when the user sends a fresh inbound message.
#[derive(Default)]
pub struct ConversationRegistry {
    references: DashMap<String, ConversationReference>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self {
            references: DashMap::new(),
        }
    }

    /// Overwrites any earlier reference for the same user. Called on every
    /// inbound contact, so the map always holds the latest handle.
    pub fn register(&self, reference: ConversationReference) {
        debug!("registering conversation reference for user {}", reference.user_id);
        self.references.insert(reference.user_id.clone(), reference);
    }

    pub fn get(&self, user_id: &str) -> Option<ConversationReference> {
        self.references.get(user_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}
