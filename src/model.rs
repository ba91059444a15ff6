use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Project metadata from the `metadata` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    /// Valid, normalized language codes in declaration order. Duplicates are kept.
    pub languages: Vec<String>,
    /// Empty when the version is missing or blank.
    pub version: String,
}

impl MetaData {
    pub fn supports(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

/// A translatable sentence, keyed by the identifier synthesized from its
/// English text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub key: String,
    /// Language code to text. Always holds `en`, the phrase's source text.
    pub translations: BTreeMap<String, String>,
    /// Placeholder names of the English text, in order.
    pub arguments: Vec<String>,
}

/// A word with singular and plural forms per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noun {
    pub key: String,
    pub singular: BTreeMap<String, String>,
    pub plural: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LingoData {
    pub metadata: MetaData,
    pub phrases: Vec<Phrase>,
    pub nouns: Vec<Noun>,
}

impl LingoData {
    pub fn phrase(&self, key: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.key == key)
    }

    pub fn noun(&self, key: &str) -> Option<&Noun> {
        self.nouns.iter().find(|n| n.key == key)
    }
}
