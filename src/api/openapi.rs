//! OpenAPI specification endpoints

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::{analyze, health};
use crate::model::{AnalysisResult, Highlights, ImprovedPrompts, Subscores, Weakness};

#[derive(OpenApi)]
#[openapi(
    paths(analyze::analyze, health::liveness, health::readiness),
    components(schemas(
        analyze::AnalyzeRequest,
        AnalysisResult,
        Weakness,
        ImprovedPrompts,
        Highlights,
        Subscores,
        ErrorResponse,
        health::HealthStatus,
        health::ReadinessStatus,
        health::DependencyHealth
    )),
    tags(
        (name = "analysis", description = "Prompt clarity analysis"),
        (name = "health", description = "Liveness and readiness probes")
    ),
    info(title = "PromptSmith API")
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
