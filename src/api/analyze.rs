//! Prompt analysis endpoint

use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{AnalysisResult, Prompt};
use crate::service::AnalysisService;

pub const ANALYZE_PATH: &str = "/api/analyze";

/// Request body for prompt analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Prompt text; must be non-empty after trimming
    #[schema(example = "Explain recursion to a beginner as a numbered list.")]
    pub prompt: String,
}

/// Analyze a prompt
///
/// Scores the prompt locally and asks the generative model for weaknesses and
/// rewrites. Model failures are absorbed: the response always has the full
/// result shape, with fallback content where the model gave nothing usable.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalysisResult),
        (status = 400, description = "Missing, non-string or blank prompt", body = ErrorResponse),
        (status = 405, description = "Method other than POST", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let prompt = Prompt::from_request_body(&body)?;

    let result = service.analyze(&prompt).await;

    let payload = serde_json::to_string(&result)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize analysis: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(payload))
}

async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(ANALYZE_PATH)
            .route(web::post().to(analyze))
            .default_service(web::to(method_not_allowed)),
    );
}
