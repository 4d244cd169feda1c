//! Emission templates and leave-behind group references

use crate::config::TokenizerConfig;
use crate::pattern::Match;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a custom template
pub type CustomFn = dyn Fn(&Match<'_>, &TokenizerConfig) -> Value + Send + Sync;

/// How a token or separator becomes an [`Emission`](crate::Emission)
#[derive(Clone)]
pub enum Template {
    /// Emit the raw text unchanged
    Verbatim,
    /// Emit `{key: text}` stamped with position
    Keyed(String),
    /// Emit whatever the function returns; objects are stamped with position
    Custom(Arc<CustomFn>),
    /// Emit nothing
    Suppressed,
}

impl Template {
    /// Wrap a closure as a custom template
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Match<'_>, &TokenizerConfig) -> Value + Send + Sync + 'static,
    {
        Template::Custom(Arc::new(f))
    }

    /// Whether this template never produces output
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Template::Suppressed)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Verbatim => f.write_str("Verbatim"),
            Template::Keyed(key) => f.debug_tuple("Keyed").field(key).finish(),
            Template::Custom(_) => f.write_str("Custom(..)"),
            Template::Suppressed => f.write_str("Suppressed"),
        }
    }
}

impl From<bool> for Template {
    fn from(enabled: bool) -> Self {
        if enabled {
            Template::Verbatim
        } else {
            Template::Suppressed
        }
    }
}

impl From<&str> for Template {
    fn from(key: &str) -> Self {
        Template::Keyed(key.to_string())
    }
}

impl From<String> for Template {
    fn from(key: String) -> Self {
        Template::Keyed(key)
    }
}

/// Capture group holding the leave-behind prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    /// Group by position; 0 is the whole match
    Index(usize),
    /// Named group
    Name(String),
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Index(index) => write!(f, "{index}"),
            GroupRef::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<usize> for GroupRef {
    fn from(index: usize) -> Self {
        GroupRef::Index(index)
    }
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        GroupRef::Name(name.to_string())
    }
}
