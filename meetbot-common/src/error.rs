// meetbot-common/src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// No conversation reference is registered for the user. The caller
    /// must re-establish the channel through a fresh inbound interaction;
    /// this is never retried here.
    #[error("No conversation registered for user '{0}'")]
    ChannelUnavailable(String),

    #[error("Could not resume conversation: {0}")]
    ChannelResumeFailed(String),

    #[error("User settings missing for '{0}'")]
    SettingsMissing(String),

    #[error("Availability query failed: {0}")]
    AvailabilityQueryFailed(String),

    /// The update mapping for a card was lost. Non-fatal: the flow sends
    /// a notice and stops, it never re-sends the card.
    #[error("No activity record for correlation id '{0}'")]
    ActivityRecordMissing(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
