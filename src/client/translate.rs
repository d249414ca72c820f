use super::TranslationService;
use crate::{ParleyError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TRANSLATE_PATH: &str = "/translate";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translation: Option<String>,
}

/// Client for the translation endpoint
#[derive(Debug, Clone)]
pub struct TranslateClient {
    http: reqwest::Client,
    base_url: String,
}

impl TranslateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranslationService for TranslateClient {
    async fn translate(&self, text: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, TRANSLATE_PATH);
        debug!("Requesting translation ({} chars)", text.len());

        let response = self
            .http
            .post(&url)
            .json(&TranslateRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParleyError::Transport(format!(
                "Translate endpoint returned {}",
                status
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ParleyError::Validation(format!("Malformed translation reply: {}", e)))?;

        body.translation.ok_or_else(|| {
            ParleyError::Validation("Translation reply missing translation field".to_string())
        })
    }
}
