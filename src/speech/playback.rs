//! Spoken-reply playback guard
//!
//! Owns at most one active playback at a time. Completion is reported back
//! into the session loop by the adapter as a `PlaybackFinished` command; the
//! guard itself only tracks whether a handle is live and can cancel it.

use crate::messages::AudioClip;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Platform audio-output capability. `play` must begin playback of the clip
/// and arrange for a completion signal to reach the session; `stop` must
/// discard the current handle immediately regardless of progress.
pub trait AudioOutput: Send + Sync {
    fn play(&self, clip: &AudioClip) -> Result<()>;
    fn stop(&self);
}

/// How a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    Failed,
}

pub struct Playback {
    output: Arc<dyn AudioOutput>,
    active: bool,
}

impl Playback {
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        Self {
            output,
            active: false,
        }
    }

    /// Start playing a clip. Upstream busy serialization guarantees no
    /// handle is live when this is called.
    pub fn play(&mut self, clip: &AudioClip) -> Result<()> {
        debug_assert!(!self.active, "overlapping play() calls");
        self.output.play(clip)?;
        self.active = true;
        debug!("Playback started ({} bytes)", clip.bytes.len());
        Ok(())
    }

    /// Mark the active playback as finished (natural end or failure)
    pub fn finish(&mut self) {
        self.active = false;
    }

    /// Pause and discard the current handle immediately, regardless of
    /// playback progress
    pub fn cancel(&mut self) {
        if self.active {
            self.output.stop();
            self.active = false;
            info!("Playback cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingOutput {
        plays: AtomicUsize,
        stops: AtomicUsize,
    }

    impl AudioOutput for CountingOutput {
        fn play(&self, _clip: &AudioClip) -> Result<()> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn clip() -> AudioClip {
        AudioClip::new(vec![1, 2, 3], "audio/mp3")
    }

    #[test]
    fn test_play_then_finish() {
        let output = Arc::new(CountingOutput::default());
        let mut playback = Playback::new(output.clone());

        playback.play(&clip()).unwrap();
        assert!(playback.is_active());

        playback.finish();
        assert!(!playback.is_active());
        assert_eq!(output.stops.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_stops_output() {
        let output = Arc::new(CountingOutput::default());
        let mut playback = Playback::new(output.clone());

        playback.play(&clip()).unwrap();
        playback.cancel();
        assert!(!playback.is_active());
        assert_eq!(output.stops.load(Ordering::SeqCst), 1);

        // Cancel with no live handle is a no-op
        playback.cancel();
        assert_eq!(output.stops.load(Ordering::SeqCst), 1);
    }
}
