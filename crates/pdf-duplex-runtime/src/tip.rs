//! Best-effort advisory text for the configure step.
//!
//! Whatever goes wrong here (no service configured, network down, quota
//! exhausted, malformed response), the caller gets the static fallback and
//! the split pipeline is never affected.

use thiserror::Error;

/// Shown whenever the tip service cannot be reached
pub const FALLBACK_TIP: &str = "Print both sides and save a tree today.";

/// Endpoint and credential for the tip service
#[derive(Debug, Clone)]
pub struct TipConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct TipClient {
    client: reqwest::Client,
    config: Option<TipConfig>,
}

#[derive(Error, Debug)]
enum TipError {
    #[error("no tip service configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("tip service returned status {0}")]
    Status(u16),
    #[error("tip service returned an empty response")]
    Empty,
}

impl TipClient {
    /// A client with no config always answers with the fallback
    pub fn new(config: Option<TipConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch a short tip for a document of the given size. Never fails.
    pub async fn advisory_tip(&self, page_count: usize) -> String {
        match self.request_tip(page_count).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("advisory tip unavailable: {e}");
                FALLBACK_TIP.to_string()
            }
        }
    }

    async fn request_tip(&self, page_count: usize) -> Result<String, TipError> {
        let config = self.config.as_ref().ok_or(TipError::NotConfigured)?;

        let body = serde_json::json!({
            "prompt": format!(
                "I have a PDF with {page_count} pages. Give me a one-sentence, \
                 energetic tip for manual double-sided printing. Max 12 words."
            ),
        });

        let response = self
            .client
            .post(&config.endpoint)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TipError::Status(response.status().as_u16()));
        }

        let payload: serde_json::Value = response.json().await?;
        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(TipError::Empty)?;

        Ok(text.to_string())
    }
}
