//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! The first two tiers arrive together as [`ConfigOverrides`] (the binary
//! declares them with clap). A missing default TOML file is not an error;
//! an explicitly requested file that cannot be read or parsed is.

use crate::policy::{PracticePolicy, DEFAULT_SIMILAR_THRESHOLD};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_LLM_MODEL: &str = "gemini-pro";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Contents of the TOML config file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    /// Single origin allowed to call the API from a browser
    #[serde(default)]
    pub frontend_origin: Option<String>,
    /// JSON corpus file; the built-in corpus is used when unset
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
    #[serde(default)]
    pub similar_threshold: Option<u8>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    #[serde(default)]
    pub level: Option<String>,
}

/// `[llm]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        let config = Self::parse(&content)?;
        info!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Default config file location: `<user config dir>/lingo/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lingo").join("config.toml"))
}

/// Load the TOML tier
///
/// An explicit path must exist and parse. Without one, the default location
/// is tried and silently skipped when absent.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return TomlConfig::load(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => TomlConfig::load(&path),
        Some(path) => {
            debug!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
        None => Ok(TomlConfig::default()),
    }
}

/// Settings supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub frontend_origin: Option<String>,
    pub corpus_path: Option<PathBuf>,
    pub similar_threshold: Option<u8>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub log_level: Option<String>,
}

/// Generative-model provider settings
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    /// None when no usable key is configured
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_origin: String,
    pub corpus_path: Option<PathBuf>,
    pub policy: PracticePolicy,
    pub llm: LlmSettings,
    pub log_level: String,
}

impl ServerConfig {
    /// Merge overrides over the TOML tier over compiled defaults, then validate
    pub fn resolve(overrides: ConfigOverrides, toml: TomlConfig) -> Result<Self> {
        let similar_threshold = overrides
            .similar_threshold
            .or(toml.similar_threshold)
            .unwrap_or(DEFAULT_SIMILAR_THRESHOLD);
        if similar_threshold > 100 {
            return Err(Error::Config(format!(
                "similar_threshold must be between 0 and 100, got {}",
                similar_threshold
            )));
        }

        let frontend_origin = overrides
            .frontend_origin
            .or(toml.frontend_origin)
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string());
        validate_origin(&frontend_origin)?;

        let log_level = overrides
            .log_level
            .or(toml.logging.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(Error::Config(format!(
                "Unknown log level '{}' (expected one of {})",
                log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        let api_key = overrides
            .api_key
            .filter(|key| is_valid_key(key))
            .or(toml.llm.api_key.filter(|key| is_valid_key(key)));

        Ok(Self {
            host: overrides
                .host
                .or(toml.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            frontend_origin,
            corpus_path: overrides.corpus_path.or(toml.corpus_path),
            policy: PracticePolicy::new(similar_threshold),
            llm: LlmSettings {
                api_key,
                model: overrides
                    .model
                    .or(toml.llm.model)
                    .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                base_url: toml
                    .llm
                    .base_url
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            },
            log_level,
        })
    }

    /// `host:port` string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

fn validate_origin(origin: &str) -> Result<()> {
    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    if !has_scheme || origin.trim() != origin || origin.ends_with('/') {
        return Err(Error::Config(format!(
            "frontend_origin must look like http(s)://host[:port] without a trailing slash, got '{}'",
            origin
        )));
    }
    Ok(())
}
