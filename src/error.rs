use thiserror::Error;

/// Errors that can occur while talking to the recipe provider
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Request could not complete (connection failure, timeout)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected shape
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or endpoint could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BrowserError {
    /// True for failures of the request itself, as opposed to local setup problems.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            BrowserError::Network(_) | BrowserError::Status { .. } | BrowserError::Decode(_)
        )
    }
}
