//! Configuration for the service and the command line.
//!
//! Loaded from, in increasing precedence:
//! - Built-in defaults
//! - An optional TOML file (`brand-context.toml` in the working directory, or
//!   an explicit path)
//! - Environment variables prefixed with `APP__`, e.g. `APP__SERVER__PORT=8080`.
//!   `APP__DOCUMENT__CANDIDATES` takes a comma-separated list.
//!
//! The model API key is read from `OPENAI_API_KEY` and never stored here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::selection::DEFAULT_MAX_CHARS;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    pub selection: SelectionConfig,
    pub llm: LlmConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// Explicit path to the extracted text. Skips candidate resolution.
    pub path: Option<PathBuf>,

    /// Locations probed in order when `path` is unset.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Character budget of a context window.
    pub max_chars: usize,

    /// JSON anchor table replacing the built-in rules.
    pub anchors_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub min_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Filter directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: None,
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("data").join("pdf_text.txt"),
        PathBuf::from("pdf_text.txt"),
    ]
}

impl AppConfig {
    /// Load configuration. `file` overrides the default optional
    /// `brand-context.toml`, and must exist when given.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name("brand-context").required(false),
        };

        let builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("selection.max_chars", DEFAULT_MAX_CHARS as u64)?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.temperature", 0.0)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("llm.max_attempts", 3)?
            .set_default("llm.min_backoff_ms", 1_000)?
            .set_default("llm.max_backoff_ms", 10_000)?
            .set_default("log.format", "pretty")?
            .set_default("log.filter", "brand_context=info,tower_http=info")?
            .add_source(file_source)
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("document.candidates")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.max_chars == 0 {
            return Err(ConfigError::Message(
                "selection.max_chars must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn openai_api_key() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
