//! JSON-over-HTTP clients for the remote dialogue service
//!
//! Every request is a synchronous POST consumed as a black box: the
//! orchestrator never streams and never retries on its own, except for the
//! single documented analysis retry which it drives itself.

pub mod analysis;
pub mod dialogue;
pub mod translate;

use crate::messages::{AudioClip, GrammarAnalysis};
use crate::Result;
use async_trait::async_trait;

pub use analysis::AnalysisClient;
pub use dialogue::DialogueClient;
pub use translate::TranslateClient;

/// One agent reply to an outbound user message
#[derive(Debug, Clone)]
pub struct DialogueReply {
    /// Reply text
    pub text: String,

    /// Spoken form of the reply, when the service produced one
    pub audio: Option<AudioClip>,
}

/// The dialogue turn endpoint
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn send_turn(&self, message: &str) -> Result<DialogueReply>;
}

/// The translation enrichment endpoint
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// The grammar analysis enrichment endpoint
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<GrammarAnalysis>;
}
