//! Error types for the external model analysis

use thiserror::Error;

/// Failure to obtain a usable verdict from the generative model.
///
/// Always recovered by the assembler with fallback content; never shown to callers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExternalCallError {
    #[error("Generative model not configured (missing GEMINI_API_KEY)")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model error: {status} {body}")]
    Status { status: u16, body: String },

    #[error("Model returned no usable text content")]
    NoUsableText,

    #[error("Could not extract JSON from model response")]
    UnextractableResponse,
}
