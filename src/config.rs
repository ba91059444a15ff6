//! Policy choices the document format leaves open.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// What to do when an optional top-level section is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPolicy {
    #[default]
    Ignore,
    Warn,
}

/// How to treat a property name that repeats within one object.
/// The first occurrence is used either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKeyPolicy {
    #[default]
    FirstWins,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// A missing `nouns` section: silently accepted or `NoNounsFound`.
    pub missing_nouns: SectionPolicy,
    pub duplicate_keys: DuplicateKeyPolicy,
    /// Report nouns whose key is also used by a phrase.
    pub check_phrase_noun_collisions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            missing_nouns: SectionPolicy::Ignore,
            duplicate_keys: DuplicateKeyPolicy::FirstWins,
            check_phrase_noun_collisions: true,
        }
    }
}

impl ParseOptions {
    /// # Errors
    /// Returns a `ConfigError` if the text is not a valid options object.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    /// Returns a `ConfigError` if the text is not a valid options mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
