//! Speech capability seams
//!
//! The session never touches a microphone or a speaker directly. It drives a
//! [`SpeechRecognizer`] and an [`AudioOutput`] implementation provided by the
//! embedding adapter, and consumes their events through the session command
//! channel.

pub mod input;
pub mod playback;

pub use input::{SpeechEvent, SpeechRecognizer, VoiceInput};
pub use playback::{AudioOutput, Playback, PlaybackOutcome};
