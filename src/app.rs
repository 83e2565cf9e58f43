//! Application state and service initialization
//!
//! This module centralizes service initialization and dependency injection.

use std::path::Path;
use std::sync::Arc;

use crate::model::{Config, ModelConfig};
use crate::service::{AnalysisService, ExternalAnalysisAdapter, GeminiClient, InstructionTemplate};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Prompt analysis service shared by every worker
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// A missing API key is not an error: the service runs on local scoring
    /// and fallback content alone.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let adapter = Self::build_adapter(&config.model)?;

        Ok(Self {
            analysis_service: Arc::new(AnalysisService::new(adapter)),
        })
    }

    /// Same as [`AppState::new`] but never contacts the model
    pub fn offline() -> Self {
        Self {
            analysis_service: Arc::new(AnalysisService::new(None)),
        }
    }

    fn build_adapter(model: &ModelConfig) -> Result<Option<ExternalAnalysisAdapter>, AppError> {
        let Some(client) = GeminiClient::from_config(model) else {
            tracing::info!("GEMINI_API_KEY not set, model calls disabled");
            return Ok(None);
        };

        let template = match &model.instruction_path {
            Some(path) => Self::load_instruction(path)?,
            None => InstructionTemplate::default(),
        };

        tracing::info!(model = %model.name, base_url = %model.base_url, "Generative model enabled");

        Ok(Some(ExternalAnalysisAdapter::new(Arc::new(client), template)))
    }

    fn load_instruction(path: &Path) -> Result<InstructionTemplate, AppError> {
        InstructionTemplate::from_file(path).map_err(|e| AppError::InstructionLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Instruction template could not be read
    #[error("Failed to load instruction template from {path}: {reason}")]
    InstructionLoad { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_without_api_key_model_is_disabled() {
        let state = AppState::new(&Config::default()).unwrap();
        assert!(!state.analysis_service.is_model_enabled());
    }

    #[test]
    fn test_with_api_key_model_is_enabled() {
        let mut config = Config::default();
        config.model.api_key = Some("test-key".to_string());

        let state = AppState::new(&config).unwrap();
        assert!(state.analysis_service.is_model_enabled());
    }

    #[test]
    fn test_missing_instruction_file_is_error() {
        let mut config = Config::default();
        config.model.api_key = Some("test-key".to_string());
        config.model.instruction_path = Some(PathBuf::from("/nonexistent/instruction.txt"));

        let err = AppState::new(&config).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/instruction.txt"));
    }
}
