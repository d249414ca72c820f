//! Voice input state machine
//!
//! Wraps a platform speech-recognition capability. The engine delivers
//! events into the session loop; this component decides which finalized
//! transcripts actually become submissions, deduplicating against the last
//! processed text so a transcript is never sent twice.

use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Platform speech-recognition capability
pub trait SpeechRecognizer: Send + Sync {
    fn start(&self) -> Result<()>;
    fn stop(&self);
}

/// Events emitted by the recognition engine
#[derive(Debug, Clone)]
pub enum SpeechEvent {
    /// Finalized transcript segments accumulated since the last result event
    Result { finalized: Vec<String> },

    /// The engine stopped, whether by explicit stop or platform timeout
    Ended,

    /// Engine fault
    Error(String),
}

/// States: Idle -> Listening -> Idle, with a finalizing sub-step on each
/// result event.
pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
    listening: bool,
    draft: String,
    last_processed: String,
}

impl VoiceInput {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer,
            listening: false,
            draft: String::new(),
            last_processed: String::new(),
        }
    }

    /// Start recognition. No-op when already listening. Callers must not
    /// start while audio playback is active.
    pub fn start(&mut self) -> Result<()> {
        if self.listening {
            return Ok(());
        }
        self.recognizer.start()?;
        self.listening = true;
        info!("Speech recognition started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.listening {
            self.recognizer.stop();
            self.listening = false;
            info!("Speech recognition stopped");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Handle a result event. Returns the finalized draft when it differs
    /// from the last text processed by this component.
    pub fn on_result(&mut self, finalized: &[String]) -> Option<String> {
        let draft = finalized.join(" ").trim().to_string();
        self.draft = draft.clone();

        if draft.is_empty() || draft == self.last_processed {
            return None;
        }

        debug!("Finalized transcript: {}", draft);
        self.last_processed = draft.clone();
        Some(draft)
    }

    /// Handle an end event. Flushes a non-empty draft that was never
    /// submitted, then leaves the listening state. Whether to restart is the
    /// session's call.
    pub fn on_ended(&mut self) -> Option<String> {
        self.listening = false;

        let draft = std::mem::take(&mut self.draft);
        if !draft.is_empty() && draft != self.last_processed {
            debug!("Flushing transcript on recognition end: {}", draft);
            self.last_processed = draft.clone();
            return Some(draft);
        }
        None
    }

    /// Handle an engine fault: force a stop. The retry schedule lives in the
    /// session loop.
    pub fn on_error(&mut self, code: &str) {
        debug!("Speech recognition error: {}", code);
        self.stop();
    }
}
