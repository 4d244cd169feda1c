//! Tokenizer configuration
//!
//! A [`TokenizerConfig`] is resolved once per tokenizer and never mutated
//! afterwards. Build one with [`TokenizerConfig::builder`], or load a
//! [`TokenizerProfile`] from TOML.

mod profile;
mod template;

pub use profile::TokenizerProfile;
pub use template::{CustomFn, GroupRef, Template};

use crate::error::{Result, TokenizerError};

/// Default configuration constants
pub mod defaults {
    /// Bytes requested from a reader per chunk (8KB)
    pub const READ_SIZE: usize = 8 * 1024;

    /// Emitted units a transport may queue before applying backpressure
    pub const HIGH_WATER_MARK: usize = 16;

    /// Drop units whose text is empty
    pub const EXCLUDE_ZERO_BYTE_STRINGS: bool = true;
}

/// Buffering hints for stream adapters; the tokenizer itself ignores them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferHints {
    /// Bytes to read per chunk
    pub read_size: usize,
    /// Capacity of the output queue
    pub high_water_mark: usize,
}

impl Default for BufferHints {
    fn default() -> Self {
        Self {
            read_size: defaults::READ_SIZE,
            high_water_mark: defaults::HIGH_WATER_MARK,
        }
    }
}

/// Resolved tokenizer configuration
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub(crate) token: Template,
    pub(crate) separator: Template,
    pub(crate) leave_behind: Option<GroupRef>,
    pub(crate) exclude_zero_byte_strings: bool,
    pub(crate) line_separators: bool,
    pub(crate) source: Option<String>,
    pub(crate) hints: BufferHints,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            token: Template::Verbatim,
            separator: Template::Suppressed,
            leave_behind: None,
            exclude_zero_byte_strings: defaults::EXCLUDE_ZERO_BYTE_STRINGS,
            line_separators: false,
            source: None,
            hints: BufferHints::default(),
        }
    }
}

impl TokenizerConfig {
    /// Create a configuration builder
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::default()
    }

    /// Template applied to matches
    pub fn token(&self) -> &Template {
        &self.token
    }

    /// Template applied to text between matches
    pub fn separator(&self) -> &Template {
        &self.separator
    }

    /// Group reported separately ahead of each token
    pub fn leave_behind(&self) -> Option<&GroupRef> {
        self.leave_behind.as_ref()
    }

    /// Whether zero-byte units are dropped
    pub fn exclude_zero_byte_strings(&self) -> bool {
        self.exclude_zero_byte_strings
    }

    /// Whether separators are split after each line terminator
    pub fn line_separators(&self) -> bool {
        self.line_separators
    }

    /// Tag attached to structured units
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Transport buffering hints
    pub fn hints(&self) -> BufferHints {
        self.hints
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, template) in [("token", &self.token), ("separator", &self.separator)] {
            if let Template::Keyed(key) = template {
                if key.is_empty() {
                    return Err(TokenizerError::Configuration(format!(
                        "{name} key must not be empty"
                    )));
                }
            }
        }

        if self.hints.read_size == 0 {
            return Err(TokenizerError::Configuration(
                "read_size must be greater than 0".into(),
            ));
        }

        if self.hints.high_water_mark == 0 {
            return Err(TokenizerError::Configuration(
                "high_water_mark must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`TokenizerConfig`]
#[derive(Debug, Default)]
pub struct TokenizerConfigBuilder {
    config: TokenizerConfig,
}

impl TokenizerConfigBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token template
    pub fn token(mut self, template: impl Into<Template>) -> Self {
        self.config.token = template.into();
        self
    }

    /// Set the separator template
    pub fn separator(mut self, template: impl Into<Template>) -> Self {
        self.config.separator = template.into();
        self
    }

    /// Report this capture group as a separator ahead of each token
    pub fn leave_behind(mut self, group: impl Into<GroupRef>) -> Self {
        self.config.leave_behind = Some(group.into());
        self
    }

    /// Keep or drop zero-byte units
    pub fn exclude_zero_byte_strings(mut self, exclude: bool) -> Self {
        self.config.exclude_zero_byte_strings = exclude;
        self
    }

    /// Split separators after every line terminator
    pub fn line_separators(mut self, enabled: bool) -> Self {
        self.config.line_separators = enabled;
        self
    }

    /// Tag structured units with a source name
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config.source = Some(source.into());
        self
    }

    /// Set the reader chunk size
    pub fn read_size(mut self, bytes: usize) -> Self {
        self.config.hints.read_size = bytes;
        self
    }

    /// Set the output queue capacity
    pub fn high_water_mark(mut self, units: usize) -> Self {
        self.config.hints.high_water_mark = units;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TokenizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TokenizerConfig::default();
        assert!(matches!(config.token(), Template::Verbatim));
        assert!(config.separator().is_suppressed());
        assert!(config.leave_behind().is_none());
        assert!(config.exclude_zero_byte_strings());
        assert!(!config.line_separators());
        assert_eq!(config.source(), None);
        assert_eq!(config.hints(), BufferHints::default());
    }

    #[test]
    fn test_builder() {
        let config = TokenizerConfig::builder()
            .token("token")
            .separator(true)
            .leave_behind(1)
            .exclude_zero_byte_strings(false)
            .source("notes.md")
            .read_size(3)
            .build()
            .unwrap();

        assert!(matches!(config.token(), Template::Keyed(key) if key == "token"));
        assert!(matches!(config.separator(), Template::Verbatim));
        assert_eq!(config.leave_behind(), Some(&GroupRef::Index(1)));
        assert!(!config.exclude_zero_byte_strings());
        assert_eq!(config.source(), Some("notes.md"));
        assert_eq!(config.hints().read_size, 3);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            TokenizerConfig::builder().read_size(0).build(),
            Err(TokenizerError::Configuration(_))
        ));
        assert!(matches!(
            TokenizerConfig::builder().high_water_mark(0).build(),
            Err(TokenizerError::Configuration(_))
        ));
        assert!(matches!(
            TokenizerConfig::builder().separator("").build(),
            Err(TokenizerError::Configuration(_))
        ));
    }
}
