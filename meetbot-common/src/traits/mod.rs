// File: meetbot-common/src/traits/mod.rs
pub mod provider_traits;
pub mod repository_traits;

pub use provider_traits::{
    AvailabilityProvider, ConversationChannel, RoomFilter, TokenProvider,
};
pub use repository_traits::{
    ActivityMappingRepository, FavoriteRoomRepository, UserSettingsRepository,
};
