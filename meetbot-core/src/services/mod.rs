// File: meetbot-core/src/services/mod.rs
pub mod card_state;
pub mod notify_service;

pub use card_state::{CardEvent, CardState};
pub use notify_service::NotifyService;
