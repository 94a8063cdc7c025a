use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the subtitle being aligned (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language the translator produces (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Final subtitle output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Punctuation restoration service settings
    #[serde(default)]
    pub punctuation: PunctuationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Which lines each rendered cue block carries
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    // @mode: translated line followed by source line
    #[default]
    Bilingual,
    // @mode: translated line only
    Translated,
    // @mode: source line only
    Source,
}

impl OutputMode {
    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Bilingual => "bilingual".to_string(),
            Self::Translated => "translated".to_string(),
            Self::Source => "source".to_string(),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bilingual" => Ok(Self::Bilingual),
            "translated" => Ok(Self::Translated),
            "source" => Ok(Self::Source),
            _ => Err(anyhow!("Invalid output mode: {}", s)),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Lines rendered per cue block
    #[serde(default)]
    pub mode: OutputMode,

    /// Overwrite existing output files
    #[serde(default)]
    pub force_overwrite: bool,
}

/// Punctuation restoration service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PunctuationConfig {
    /// Service endpoint URL
    #[serde(default = "default_punctuation_endpoint")]
    pub endpoint: String,

    /// Name of the form field carrying the text
    #[serde(default = "default_form_field")]
    pub form_field: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_punctuation_endpoint(),
            form_field: default_form_field(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "zh".to_string()
}

fn default_punctuation_endpoint() -> String {
    "http://bark.phon.ioc.ee/punctuator".to_string()
}

fn default_form_field() -> String {
    "text".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        let endpoint = Url::parse(&self.punctuation.endpoint)
            .map_err(|e| anyhow!("Invalid punctuation endpoint '{}': {}", self.punctuation.endpoint, e))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("Punctuation endpoint must use http or https: {}", endpoint));
        }

        if self.punctuation.form_field.trim().is_empty() {
            return Err(anyhow!("Punctuation form field must not be empty"));
        }

        if self.punctuation.timeout_secs == 0 {
            return Err(anyhow!("Punctuation timeout must be at least one second"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            output: OutputConfig::default(),
            punctuation: PunctuationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
