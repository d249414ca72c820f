//! Pending message gate
//!
//! A submission made while a turn is in flight is not queued. It lands in a
//! single overwrite slot, and once the active turn fully completes the user
//! gets one confirm-or-discard decision for whatever text is still in the
//! slot.

use async_trait::async_trait;
use tracing::debug;

/// External confirm/discard collaborator, presented once per turn
/// completion when a pending text exists
#[async_trait]
pub trait PendingDecider: Send + Sync {
    async fn confirm(&self, text: &str) -> bool;
}

/// Overwrite buffer for messages submitted while busy
#[derive(Debug, Default)]
pub struct PendingGate {
    slot: Option<String>,
}

impl PendingGate {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Capture a submission, overwriting any prior uncommitted text.
    /// Returns the text that was displaced, if any.
    pub fn capture(&mut self, text: impl Into<String>) -> Option<String> {
        let text = text.into();
        let displaced = self.slot.replace(text);
        if let Some(ref old) = displaced {
            debug!("Pending message overwritten: {}", old);
        }
        displaced
    }

    /// Take the pending text for resolution, clearing the slot
    pub fn take(&mut self) -> Option<String> {
        self.slot.take()
    }

    pub fn is_set(&self) -> bool {
        self.slot.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_overwrites() {
        let mut gate = PendingGate::new();
        assert!(gate.capture("m1").is_none());
        assert_eq!(gate.capture("m2").as_deref(), Some("m1"));
        assert_eq!(gate.capture("m3").as_deref(), Some("m2"));

        // Only the last submission survives
        assert_eq!(gate.take().as_deref(), Some("m3"));
        assert!(!gate.is_set());
    }

    #[test]
    fn test_take_clears_slot() {
        let mut gate = PendingGate::new();
        gate.capture("hello");
        assert!(gate.is_set());
        assert_eq!(gate.take().as_deref(), Some("hello"));
        assert!(gate.take().is_none());
    }
}
