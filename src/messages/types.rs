use crate::{ParleyError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Agent,
}

/// Opaque spoken-reply audio, decoded from the dialogue endpoint's
/// base64 payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    pub fn from_base64(encoded: &str, mime: impl Into<String>) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded)
            .map_err(|e| ParleyError::Validation(format!("Invalid audio payload: {}", e)))?;
        Ok(Self::new(bytes, mime))
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarError {
    #[serde(rename = "type")]
    pub kind: String,
    pub incorrect: String,
    pub improved: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarAnalysis {
    pub errors: Vec<GrammarError>,
    pub final_revised: String,
    pub overall_comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentKind {
    Translation,
    Analysis,
}

/// Enrichment attached to a message by the translator or the grammar
/// analyzer. Attached at most once; afterwards only its visibility is
/// toggled, the content is never refetched.
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    Translation { text: String, visible: bool },
    Analysis { analysis: GrammarAnalysis, visible: bool },
}

impl Enrichment {
    pub fn translation(text: impl Into<String>) -> Self {
        Enrichment::Translation {
            text: text.into(),
            visible: true,
        }
    }

    pub fn analysis(analysis: GrammarAnalysis) -> Self {
        Enrichment::Analysis {
            analysis,
            visible: true,
        }
    }

    pub fn kind(&self) -> EnrichmentKind {
        match self {
            Enrichment::Translation { .. } => EnrichmentKind::Translation,
            Enrichment::Analysis { .. } => EnrichmentKind::Analysis,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Enrichment::Translation { visible, .. } => *visible,
            Enrichment::Analysis { visible, .. } => *visible,
        }
    }

    /// Flip visibility and return the new state
    pub fn toggle(&mut self) -> bool {
        match self {
            Enrichment::Translation { visible, .. } => {
                *visible = !*visible;
                *visible
            }
            Enrichment::Analysis { visible, .. } => {
                *visible = !*visible;
                *visible
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub audio: Option<AudioClip>,
    pub enrichment: Option<Enrichment>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            text: text.into(),
            timestamp: Utc::now(),
            audio: None,
            enrichment: None,
        }
    }

    pub fn with_audio(mut self, audio: AudioClip) -> Self {
        self.audio = Some(audio);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_clip_from_base64() {
        let clip = AudioClip::from_base64("QQ==", "audio/mp3").unwrap();
        assert_eq!(clip.bytes, b"A");
        assert_eq!(clip.mime, "audio/mp3");
    }

    #[test]
    fn test_audio_clip_rejects_garbage() {
        let result = AudioClip::from_base64("not base64!!!", "audio/mp3");
        assert!(matches!(result, Err(crate::ParleyError::Validation(_))));
    }

    #[test]
    fn test_enrichment_toggle_round_trip() {
        let mut enrichment = Enrichment::translation("hello");
        assert!(enrichment.is_visible());
        assert!(!enrichment.toggle());
        assert!(enrichment.toggle());
        assert!(enrichment.is_visible());
    }

    #[test]
    fn test_grammar_error_wire_field_name() {
        let raw = r#"{"type":"particle","incorrect":"을","improved":"를","explanation":"object marker"}"#;
        let parsed: GrammarError = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.kind, "particle");
    }

    #[test]
    fn test_message_creation() {
        let msg = Message::new(Author::User, "안녕");
        assert_eq!(msg.author, Author::User);
        assert_eq!(msg.text, "안녕");
        assert!(msg.audio.is_none());
        assert!(msg.enrichment.is_none());
    }
}
