use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "PROMPTSMITH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1alpha";

/// Generative model settings from the `model:` section of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelFileConfig {
    /// Model name, e.g. `gemini-2.5-flash`
    #[serde(default)]
    pub name: Option<String>,
    /// API base URL without the `/models/...` suffix
    #[serde(default)]
    pub base_url: Option<String>,
    /// File holding a replacement instruction template
    #[serde(default)]
    pub instruction_path: Option<PathBuf>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub model: ModelFileConfig,
}

/// Resolved generative model settings
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// `None` disables the model; every request then uses the local fallback
    pub api_key: Option<String>,
    pub name: String,
    pub base_url: String,
    pub instruction_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            instruction_path: None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file.
    ///
    /// Environment variables win over the file, the file wins over defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let model = Self::resolve_model(
            file.model,
            std::env::var(ENV_GEMINI_API_KEY).ok(),
            std::env::var(ENV_GEMINI_MODEL).ok(),
            std::env::var(ENV_GEMINI_BASE_URL).ok(),
        );

        Self { model, port, host }
    }

    fn resolve_model(
        file: ModelFileConfig,
        api_key: Option<String>,
        name: Option<String>,
        base_url: Option<String>,
    ) -> ModelConfig {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        ModelConfig {
            api_key: non_empty(api_key),
            name: non_empty(name)
                .or(non_empty(file.name))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty(base_url)
                .or(non_empty(file.base_url))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            instruction_path: file.instruction_path,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config_file(path, &contents),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config_file(path: &Path, contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
