//! Mutable state of the active session
//!
//! Owned by one orchestrator instance; never global. The core invariant is
//! that the session never listens and speaks (or processes) at the same
//! time.

/// Per-session state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlags {
    /// Speech recognition is active
    pub listening: bool,

    /// A turn is in flight or a reply is being spoken
    pub busy: bool,

    /// A spoken reply is playing
    pub speaking: bool,

    /// A translation fetch is in flight
    pub translating: bool,

    /// A grammar analysis fetch is in flight
    pub analyzing: bool,

    /// Auto-mic policy enabled
    pub auto_mic: bool,
}

impl SessionFlags {
    pub fn new(auto_mic: bool) -> Self {
        Self {
            listening: false,
            busy: false,
            speaking: false,
            translating: false,
            analyzing: false,
            auto_mic,
        }
    }

    /// Neither processing a turn nor speaking
    pub fn idle(&self) -> bool {
        !self.busy && !self.speaking
    }

    /// listening implies neither busy nor speaking
    pub fn check_invariant(&self) {
        debug_assert!(
            !self.listening || self.idle(),
            "invariant violated: listening while busy or speaking ({:?})",
            self
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let flags = SessionFlags::new(false);
        assert!(flags.idle());
        assert!(!flags.listening);
        flags.check_invariant();
    }

    #[test]
    fn test_idle_tracks_busy_and_speaking() {
        let mut flags = SessionFlags::new(true);
        flags.busy = true;
        assert!(!flags.idle());

        flags.busy = false;
        flags.speaking = true;
        assert!(!flags.idle());

        flags.speaking = false;
        assert!(flags.idle());
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    #[cfg(debug_assertions)]
    fn test_invariant_catches_listening_while_busy() {
        let mut flags = SessionFlags::new(false);
        flags.listening = true;
        flags.busy = true;
        flags.check_invariant();
    }
}
