pub mod storage;
pub mod types;

pub use storage::MessageStorage;
pub use types::{
    AudioClip, Author, Enrichment, EnrichmentKind, GrammarAnalysis, GrammarError, Message,
};
