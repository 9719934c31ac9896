// meetbot-core/src/lib.rs

pub mod cards;
pub mod config;
pub mod platforms;
pub mod registry;
pub mod repositories;
pub mod services;

pub use meetbot_common::error::Error;
pub use registry::ConversationRegistry;
