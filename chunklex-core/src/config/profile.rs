//! TOML tokenizer profiles
//!
//! ```toml
//! pattern = '(?m)(^\s*)(\w+)'
//! token = "word"
//! separator = true
//! leave_behind = 1
//! source = "notes.md"
//! ```
//!
//! Templates accept a boolean or a string key; custom templates are only
//! available through [`TokenizerConfig::builder`](super::TokenizerConfig::builder).

use crate::config::{defaults, BufferHints, GroupRef, Template, TokenizerConfig};
use crate::engine::Tokenizer;
use crate::error::{Result, TokenizerError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Tokenizer settings loaded from a TOML document
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizerProfile {
    /// Regular expression to match tokens with
    pub pattern: String,
    /// Token template: `true`, `false` or a key name
    #[serde(default)]
    pub token: Option<toml::Value>,
    /// Separator template: `true`, `false` or a key name
    #[serde(default)]
    pub separator: Option<toml::Value>,
    /// Leave-behind group: an index or a group name
    #[serde(default)]
    pub leave_behind: Option<toml::Value>,
    /// Drop zero-byte units
    #[serde(default = "default_exclude_zero_byte_strings")]
    pub exclude_zero_byte_strings: bool,
    /// Split separators after each line terminator
    #[serde(default)]
    pub line_separators: bool,
    /// Tag attached to structured units
    #[serde(default)]
    pub source: Option<String>,
    /// Reader chunk size in bytes
    #[serde(default = "default_read_size")]
    pub read_size: usize,
    /// Output queue capacity
    #[serde(default = "default_high_water_mark")]
    pub high_water_mark: usize,
}

fn default_exclude_zero_byte_strings() -> bool {
    defaults::EXCLUDE_ZERO_BYTE_STRINGS
}

fn default_read_size() -> usize {
    defaults::READ_SIZE
}

fn default_high_water_mark() -> usize {
    defaults::HIGH_WATER_MARK
}

impl TokenizerProfile {
    /// Parse a profile from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a profile file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Resolve the profile into a configuration
    pub fn config(&self) -> Result<TokenizerConfig> {
        let mut config = TokenizerConfig {
            exclude_zero_byte_strings: self.exclude_zero_byte_strings,
            line_separators: self.line_separators,
            source: self.source.clone(),
            hints: BufferHints {
                read_size: self.read_size,
                high_water_mark: self.high_water_mark,
            },
            ..TokenizerConfig::default()
        };

        if let Some(value) = &self.token {
            config.token = template_from_value("token", value)?;
        }
        if let Some(value) = &self.separator {
            config.separator = template_from_value("separator", value)?;
        }
        if let Some(value) = &self.leave_behind {
            config.leave_behind = Some(group_from_value(value)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Compile the pattern and build a tokenizer
    pub fn build(&self) -> Result<Tokenizer<Regex>> {
        let pattern = Regex::new(&self.pattern)
            .map_err(|e| TokenizerError::Configuration(format!("invalid pattern: {e}")))?;
        Tokenizer::with_config(self.config()?, pattern)
    }
}

fn template_from_value(name: &str, value: &toml::Value) -> Result<Template> {
    match value {
        toml::Value::Boolean(enabled) => Ok(Template::from(*enabled)),
        toml::Value::String(key) => Ok(Template::Keyed(key.clone())),
        other => Err(TokenizerError::Configuration(format!(
            "{name} template must be a boolean or a string, found {}",
            other.type_str()
        ))),
    }
}

fn group_from_value(value: &toml::Value) -> Result<GroupRef> {
    match value {
        toml::Value::Integer(index) if *index >= 0 => Ok(GroupRef::Index(*index as usize)),
        toml::Value::String(name) => Ok(GroupRef::Name(name.clone())),
        other => Err(TokenizerError::Configuration(format!(
            "leave_behind must be a group index or name, found {other}"
        ))),
    }
}
