//! Generative model transport
//!
//! `ModelTransport` is the seam between the analysis adapter and the network.
//! `GeminiClient` implements it against the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::model::ModelConfig;
use crate::service::analysis::ExternalCallError;

/// Raw outcome of one model call: status and body, untouched
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends composed text to a generative model
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Issue a single call. Transport failures are errors; non-2xx statuses are not.
    async fn generate(&self, text: &str) -> Result<TransportResponse, ExternalCallError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from resolved model settings.
    ///
    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &ModelConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;

        Some(Self {
            client: Client::new(),
            api_key,
            model: config.name.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ModelTransport for GeminiClient {
    async fn generate(&self, text: &str) -> Result<TransportResponse, ExternalCallError> {
        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": text }]
                }
            ]
        });

        tracing::debug!(model = %self.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
