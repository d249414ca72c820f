use super::AnalysisService;
use crate::messages::{GrammarAnalysis, GrammarError};
use crate::{ParleyError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deployments that expose the analyzer under a language-specific route
/// (e.g. `/analyze_korean`) must map it to this path.
const ANALYZE_PATH: &str = "/analyze";

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

/// The analysis endpoint returns either the structured analysis or an
/// `{error}` body; both arrive with well-formed JSON.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    error: Option<String>,
    #[serde(default)]
    errors: Vec<GrammarError>,
    final_revised: Option<String>,
    overall_comment: Option<String>,
}

/// Client for the grammar analysis endpoint
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, text: &str) -> Result<GrammarAnalysis> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        debug!("Requesting grammar analysis ({} chars)", text.len());

        let response = self
            .http
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(ParleyError::RetryableServer(
                "Analysis endpoint returned 500".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(ParleyError::Transport(format!(
                "Analysis endpoint returned {}",
                status
            )));
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ParleyError::Validation(format!("Malformed analysis reply: {}", e)))?;

        if let Some(error) = body.error {
            return Err(ParleyError::Validation(format!(
                "Analysis service reported failure: {}",
                error
            )));
        }

        match (body.final_revised, body.overall_comment) {
            (Some(final_revised), Some(overall_comment)) => Ok(GrammarAnalysis {
                errors: body.errors,
                final_revised,
                overall_comment,
            }),
            _ => Err(ParleyError::Validation(
                "Analysis reply missing expected fields".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_response_parsing() {
        let raw = r#"{
            "errors": [
                {"type": "particle", "incorrect": "밥이 먹다", "improved": "밥을 먹다", "explanation": "object marker"}
            ],
            "final_revised": "밥을 먹다",
            "overall_comment": "Nearly correct."
        }"#;
        let parsed: AnalyzeResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.error.is_none());
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.final_revised.as_deref(), Some("밥을 먹다"));
    }

    #[test]
    fn test_analyze_response_error_body() {
        let raw = r#"{"error": "Analysis failed"}"#;
        let parsed: AnalyzeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("Analysis failed"));
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_analyze_response_no_errors_is_valid() {
        let raw = r#"{"errors": [], "final_revised": "좋아요", "overall_comment": "Perfect."}"#;
        let parsed: AnalyzeResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.errors.is_empty());
        assert!(parsed.final_revised.is_some());
    }
}
