// File: meetbot-core/src/platforms/mod.rs
pub mod bot_connector;
pub mod graph;

pub use bot_connector::BotConnectorChannel;
pub use graph::{GraphScheduleClient, DEFAULT_GRAPH_BASE_URL};
