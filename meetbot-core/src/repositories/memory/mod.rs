//! In-memory repository implementations.
//!
//! Persistent storage of settings, favorites and activity mappings belongs
//! to their owning features; this subsystem only consumes them through the
//! traits in `meetbot_common::traits`. These DashMap-backed implementations
//! are the process default and the substrate the tests run against.

pub mod activity;
pub mod favorites;
pub mod filter;
pub mod settings;
pub mod tokens;

pub use activity::InMemoryActivityMappingRepository;
pub use favorites::InMemoryFavoriteRoomRepository;
pub use filter::PassthroughRoomFilter;
pub use settings::InMemoryUserSettingsRepository;
pub use tokens::InMemoryTokenProvider;
