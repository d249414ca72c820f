//! Session interaction orchestrator
//!
//! Serializes voice input, dialogue round-trips, spoken-reply playback and
//! enrichment requests into one consistent session: mutual exclusion between
//! listening and speaking, overwrite semantics for messages submitted while
//! busy, and auto-resumption of listening under the auto-mic policy.

pub mod config;
pub mod flags;
pub mod orchestrator;
pub mod pending;

pub use config::SessionConfig;
pub use flags::SessionFlags;
pub use orchestrator::{
    Session, SessionCommand, SessionHandle, SessionIntent, SessionServices,
};
pub use pending::{PendingDecider, PendingGate};
