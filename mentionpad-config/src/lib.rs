//! Shared configuration loader for the mentionpad toolchain.
//!
//! `defaults/mentionpad.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`MentionpadConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mentionpad_babel::formats::{MentionText, ParseOptions, QuoteType};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mentionpad.default.toml");

/// Top-level configuration consumed by mentionpad applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionpadConfig {
    pub convert: ConvertConfig,
    pub log: LogConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub quote_type: QuoteTypeConfig,
    pub mention_text: MentionTextConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum QuoteTypeConfig {
    #[serde(rename = "block-quote")]
    BlockQuote,
    #[serde(rename = "quote")]
    Quote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MentionTextConfig {
    #[serde(rename = "concat")]
    Concat,
    #[serde(rename = "comma-joined")]
    CommaJoined,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// A `tracing` filter directive such as `info` or `mentionpad_babel=debug`.
    pub level: String,
}

impl From<QuoteTypeConfig> for QuoteType {
    fn from(config: QuoteTypeConfig) -> Self {
        match config {
            QuoteTypeConfig::BlockQuote => QuoteType::BlockQuote,
            QuoteTypeConfig::Quote => QuoteType::Legacy,
        }
    }
}

impl From<MentionTextConfig> for MentionText {
    fn from(config: MentionTextConfig) -> Self {
        match config {
            MentionTextConfig::Concat => MentionText::Concat,
            MentionTextConfig::CommaJoined => MentionText::CommaJoined,
        }
    }
}

impl From<&HtmlConfig> for ParseOptions {
    fn from(config: &HtmlConfig) -> Self {
        ParseOptions::new(config.quote_type.into(), config.mention_text.into())
    }
}

impl From<HtmlConfig> for ParseOptions {
    fn from(config: HtmlConfig) -> Self {
        ParseOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MentionpadConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MentionpadConfig, ConfigError> {
    Loader::new().build()
}
