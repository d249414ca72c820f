//! Configuration for a conversation session

use std::time::Duration;

/// Configuration owned by one session instance
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Whether auto-mic starts out enabled
    pub auto_mic: bool,

    /// Delay before restarting recognition after an engine fault
    pub speech_retry_delay: Duration,

    /// Delay before the single analysis retry after an HTTP 500
    pub analysis_retry_delay: Duration,

    /// Capacity of the command channel
    pub channel_capacity: usize,

    /// Fixed reply bubble text rendered when a dialogue turn fails
    pub transport_error_reply: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_mic: false,
            speech_retry_delay: Duration::from_millis(1000),
            analysis_retry_delay: Duration::from_millis(1000),
            channel_capacity: 100,
            transport_error_reply: "A network error occurred. Please try again.".to_string(),
        }
    }
}

impl SessionConfig {
    /// Start the session with auto-mic enabled
    pub fn with_auto_mic(mut self) -> Self {
        self.auto_mic = true;
        self
    }

    /// Override the fixed error reply text
    pub fn with_transport_error_reply(mut self, text: impl Into<String>) -> Self {
        self.transport_error_reply = text.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_capacity == 0 {
            return Err("Channel capacity must be non-zero".to_string());
        }
        if self.transport_error_reply.is_empty() {
            return Err("Transport error reply text is required".to_string());
        }
        Ok(())
    }
}
