use super::{DialogueReply, DialogueService};
use crate::messages::AudioClip;
use crate::{ParleyError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TURN_PATH: &str = "/chat";
const AUDIO_MIME: &str = "audio/mp3";

#[derive(Debug, Serialize)]
struct TurnRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct TurnResponse {
    success: bool,
    message: Option<String>,
    audio: Option<String>,
}

/// Client for the dialogue turn endpoint
#[derive(Debug, Clone)]
pub struct DialogueClient {
    http: reqwest::Client,
    base_url: String,
}

impl DialogueClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DialogueService for DialogueClient {
    async fn send_turn(&self, message: &str) -> Result<DialogueReply> {
        let url = format!("{}{}", self.base_url, TURN_PATH);
        debug!("Sending dialogue turn ({} chars)", message.len());

        let response = self
            .http
            .post(&url)
            .json(&TurnRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParleyError::Transport(format!(
                "Dialogue endpoint returned {}",
                status
            )));
        }

        let body: TurnResponse = response
            .json()
            .await
            .map_err(|e| ParleyError::Validation(format!("Malformed dialogue reply: {}", e)))?;

        if !body.success {
            return Err(ParleyError::Validation(
                "Dialogue service reported failure".to_string(),
            ));
        }

        let text = body.message.ok_or_else(|| {
            ParleyError::Validation("Dialogue reply missing message field".to_string())
        })?;

        let audio = body
            .audio
            .filter(|encoded| !encoded.is_empty())
            .map(|encoded| AudioClip::from_base64(&encoded, AUDIO_MIME))
            .transpose()?;

        Ok(DialogueReply { text, audio })
    }
}
