pub mod client;
pub mod messages;
pub mod session;
pub mod speech;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ParleyError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Retryable server error: {0}")]
    RetryableServer(String),

    #[error("Speech recognition error: {0}")]
    Recognition(String),

    #[error("Audio playback error: {0}")]
    Audio(String),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ParleyError {
    fn from(e: reqwest::Error) -> Self {
        ParleyError::Transport(e.to_string())
    }
}

impl ParleyError {
    /// Check whether this failure qualifies for the single automatic retry
    /// (HTTP 500 from the grammar analysis endpoint only)
    pub fn is_retryable(&self) -> bool {
        matches!(self, ParleyError::RetryableServer(_))
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            ParleyError::Transport(_) => {
                "A network error occurred. Please try again.".to_string()
            }
            ParleyError::Validation(_) => {
                "The service returned an unexpected response. Please try again.".to_string()
            }
            ParleyError::RetryableServer(_) => {
                "The service is having trouble. Please try again shortly.".to_string()
            }
            ParleyError::Recognition(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            ParleyError::Audio(_) => {
                "Audio playback failed. The reply will be shown as text.".to_string()
            }
            ParleyError::Channel(_) => {
                "Internal communication error. Please restart the session.".to_string()
            }
            ParleyError::Config(_) => {
                "Configuration error. Please check settings.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;
