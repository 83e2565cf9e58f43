//! Model-assisted prompt analysis
//!
//! Sends the prompt, wrapped in the instruction template, to the generative
//! model and recovers the JSON verdict from whatever comes back. Recovery
//! goes envelope → candidate text → raw body; the model is only asked, not
//! guaranteed, to answer in clean JSON.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::model::Prompt;
use crate::service::extraction::{JsonObject, extract_json};
use crate::service::llm::ModelTransport;

pub mod envelope;
pub mod error;
pub mod prompts;

pub use error::ExternalCallError;
pub use prompts::InstructionTemplate;

/// Client-side half of the model contract
pub struct ExternalAnalysisAdapter {
    transport: Arc<dyn ModelTransport>,
    template: InstructionTemplate,
}

impl ExternalAnalysisAdapter {
    pub fn new(transport: Arc<dyn ModelTransport>, template: InstructionTemplate) -> Self {
        tracing::info!(
            model = %transport.model_name(),
            "External analysis adapter initialized"
        );

        Self {
            transport,
            template,
        }
    }

    /// Ask the model for `{weaknesses, improvedPrompts, highlights}`.
    ///
    /// Makes exactly one call. The returned object is whatever JSON could be
    /// recovered; its fields are validated by the assembler.
    pub async fn request_analysis(&self, prompt: &Prompt) -> Result<JsonObject, ExternalCallError> {
        let start_time = Instant::now();
        let composed = self.template.compose(prompt);

        tracing::debug!(
            model = %self.transport.model_name(),
            prompt_length = prompt.as_str().len(),
            "Initiating model call for prompt analysis"
        );

        let response = self.transport.generate(&composed).await?;
        let elapsed = start_time.elapsed();

        if !response.is_success() {
            tracing::error!(
                model = %self.transport.model_name(),
                status = response.status,
                elapsed_ms = elapsed.as_millis(),
                "Model call returned non-success status"
            );
            return Err(ExternalCallError::Status {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!(
            model = %self.transport.model_name(),
            elapsed_ms = elapsed.as_millis(),
            response_length = response.body.len(),
            "Model call for prompt analysis completed"
        );

        recover_verdict(&response.body)
    }
}

/// Recover the verdict object from a successful response body
pub fn recover_verdict(raw_body: &str) -> Result<JsonObject, ExternalCallError> {
    let envelope: Value = match serde_json::from_str(raw_body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::debug!(error = %e, "Response body is not a JSON envelope, scanning raw text");
            return extract_json(raw_body).ok_or(ExternalCallError::UnextractableResponse);
        }
    };

    match envelope::candidate_text(&envelope) {
        Some(text) => extract_json(&text)
            .or_else(|| {
                tracing::debug!("Candidate text held no JSON, retrying against raw body");
                extract_json(raw_body)
            })
            .ok_or(ExternalCallError::UnextractableResponse),
        None => {
            tracing::debug!("No candidate text in envelope, scanning serialized envelope");
            extract_json(&envelope.to_string()).ok_or(ExternalCallError::NoUsableText)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{StubTransport, gemini_envelope};
    use super::*;
    use serde_json::json;

    fn adapter(transport: Arc<StubTransport>) -> ExternalAnalysisAdapter {
        ExternalAnalysisAdapter::new(transport, InstructionTemplate::new("INSTRUCTION"))
    }

    #[tokio::test]
    async fn test_verdict_from_gemini_envelope() {
        let verdict = r#"Here you go: {"weaknesses": [], "highlights": {"missingOutputSpec": true,},}"#;
        let transport = Arc::new(StubTransport::ok(&gemini_envelope(verdict)));
        let prompt = Prompt::new("write something").unwrap();

        let result = adapter(Arc::clone(&transport))
            .request_analysis(&prompt)
            .await
            .unwrap();

        assert_eq!(result["weaknesses"], json!([]));
        assert_eq!(result["highlights"]["missingOutputSpec"], json!(true));

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("INSTRUCTION"));
        assert!(sent[0].ends_with("\"\"\"write something\"\"\""));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let transport = Arc::new(StubTransport::respond(429, "quota exceeded"));
        let prompt = Prompt::new("write something").unwrap();

        let err = adapter(transport).request_analysis(&prompt).await.unwrap_err();
        match err {
            ExternalCallError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota exceeded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let transport = Arc::new(StubTransport::failing(ExternalCallError::NoUsableText));
        let prompt = Prompt::new("write something").unwrap();

        let err = adapter(transport).request_analysis(&prompt).await.unwrap_err();
        assert!(matches!(err, ExternalCallError::NoUsableText));
    }

    #[test]
    fn test_body_not_an_envelope() {
        let verdict = recover_verdict("model says: {\"weaknesses\": [\"vague\"]} thanks").unwrap();
        assert_eq!(verdict["weaknesses"], json!(["vague"]));

        let err = recover_verdict("plain refusal").unwrap_err();
        assert!(matches!(err, ExternalCallError::UnextractableResponse));
    }

    #[test]
    fn test_candidate_without_json_falls_back_to_raw_body() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "I cannot comply."}]}}]
        })
        .to_string();

        // The raw body is itself a JSON object, so the raw-body retry succeeds
        let verdict = recover_verdict(&body).unwrap();
        assert!(verdict.contains_key("candidates"));
    }

    #[test]
    fn test_envelope_without_text_uses_serialized_envelope() {
        let verdict = recover_verdict(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(verdict.contains_key("candidates"));

        let err = recover_verdict("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExternalCallError::NoUsableText));
    }

    #[test]
    fn test_top_level_string_envelope() {
        let body = serde_json::to_string("{\"weaknesses\": []}").unwrap();
        let verdict = recover_verdict(&body).unwrap();
        assert_eq!(verdict["weaknesses"], json!([]));
    }
}
