use crate::ast::JsonValue;
use crate::config::{DuplicateKeyPolicy, ParseOptions, SectionPolicy};
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity};
use crate::error::LingoError;
use crate::metadata::validate_metadata;
use crate::model::LingoData;
use crate::nouns::validate_noun;
use crate::parser::Parser;
use crate::phrases::validate_phrase;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// The outcome of parsing one `lingo.json` document: everything that could
/// be validated, plus every problem found along the way, in the order it
/// was found.
///
/// A result depends only on the text and file id it was built from, so two
/// results from identical input compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub data: LingoData,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Serializes the result into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the result into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Parses and validates a `lingo.json` document with the default options.
///
/// This is the primary entry point. It never fails: malformed text and
/// schema violations come back as diagnostics in the result.
///
/// # Arguments
///
/// * `text` - The document text.
/// * `file_id` - Identifies the document in diagnostics; never opened.
#[must_use]
pub fn parse(text: &str, file_id: &str) -> ParseResult {
    parse_with_options(text, file_id, &ParseOptions::default())
}

#[must_use]
pub fn parse_with_options(text: &str, file_id: &str, options: &ParseOptions) -> ParseResult {
    run(text, file_id, options, None).0
}

/// Like [`parse_with_options`], but checks `cancel` before each phrase and
/// noun entry.
///
/// # Errors
///
/// Returns `LingoError::Cancelled` if the flag was set before all entries
/// were validated. No partial result is returned.
pub fn parse_with_cancellation(
    text: &str,
    file_id: &str,
    options: &ParseOptions,
    cancel: &AtomicBool,
) -> Result<ParseResult, LingoError> {
    match run(text, file_id, options, Some(cancel)) {
        (_, true) => Err(LingoError::Cancelled),
        (result, false) => Ok(result),
    }
}

/// Runs the stages in order. The flag is `true` if the run was cancelled.
fn run(
    text: &str,
    file_id: &str,
    options: &ParseOptions,
    cancel: Option<&AtomicBool>,
) -> (ParseResult, bool) {
    let mut sink = DiagnosticSink::new(text, file_id);
    let is_cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

    let root = match Parser::new_with_name(text, file_id.to_string()).parse_document() {
        Ok(root) => root,
        Err(err) => {
            debug!("{file_id}: structural parse failed: {}", err.detail());
            sink.report(err.span(), DiagnosticKind::JsonException { detail: err.detail() });
            return (diagnostics_only(sink), false);
        }
    };
    debug!("{file_id}: structural parse ok");

    if options.duplicate_keys == DuplicateKeyPolicy::Reject {
        report_duplicate_keys(&root, &mut sink);
    }

    let Some(metadata) = validate_metadata(&root, &mut sink) else {
        debug!("{file_id}: metadata unusable, skipping phrases and nouns");
        return (diagnostics_only(sink), false);
    };
    debug!("{file_id}: metadata ok, languages {:?}", metadata.languages);

    let mut data = LingoData {
        metadata,
        ..LingoData::default()
    };

    match section(&root, "phrases") {
        Some(phrases) => {
            for entry in phrases.properties() {
                if is_cancelled() {
                    warn!("{file_id}: cancelled while scanning phrases");
                    return (diagnostics_only(sink), true);
                }
                match validate_phrase(entry, &data.metadata, &mut sink) {
                    Some(phrase) => data.phrases.push(phrase),
                    None => trace!("{file_id}: dropped phrase {:?}", entry.key),
                }
            }
        }
        None => sink.report_value(root.get("phrases").unwrap_or(&root), DiagnosticKind::NoPhrasesFound),
    }

    match section(&root, "nouns") {
        Some(nouns) => {
            for entry in nouns.properties() {
                if is_cancelled() {
                    warn!("{file_id}: cancelled while scanning nouns");
                    return (diagnostics_only(sink), true);
                }
                let Some(noun) = validate_noun(entry, &data.metadata, &mut sink) else {
                    trace!("{file_id}: dropped noun {:?}", entry.key);
                    continue;
                };
                if options.check_phrase_noun_collisions {
                    if let Some(phrase) = data.phrase(&noun.key) {
                        let phrase = phrase.translations.get("en").cloned().unwrap_or_default();
                        sink.report_key(
                            entry,
                            DiagnosticKind::PhraseNounDuplicate {
                                key: noun.key.clone(),
                                phrase,
                            },
                        );
                    }
                }
                data.nouns.push(noun);
            }
        }
        None if options.missing_nouns == SectionPolicy::Warn => {
            sink.report_value(root.get("nouns").unwrap_or(&root), DiagnosticKind::NoNounsFound);
        }
        None => {}
    }

    debug!(
        "{file_id}: done, {} phrases, {} nouns, {} diagnostics",
        data.phrases.len(),
        data.nouns.len(),
        sink.len()
    );
    let result = ParseResult {
        data,
        diagnostics: sink.into_diagnostics(),
    };
    (result, false)
}

/// A top-level section, if present and an object.
fn section<'a>(root: &'a JsonValue, name: &str) -> Option<&'a JsonValue> {
    root.get(name).filter(|value| value.as_object().is_some())
}

/// A fatal stage ends the document with an empty model.
fn diagnostics_only(sink: DiagnosticSink) -> ParseResult {
    ParseResult {
        data: LingoData::default(),
        diagnostics: sink.into_diagnostics(),
    }
}

/// Recursion is bounded by the reader's `MAX_DEPTH`.
fn report_duplicate_keys(value: &JsonValue, sink: &mut DiagnosticSink) {
    if let Some(members) = value.as_object() {
        for member in members {
            if member.duplicate {
                sink.report_key(
                    member,
                    DiagnosticKind::DuplicateKey {
                        key: member.key.clone(),
                    },
                );
            }
            report_duplicate_keys(&member.value, sink);
        }
    } else if let Some(values) = value.as_array() {
        for element in values {
            report_duplicate_keys(element, sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;

    const SAMPLE: &str = r#"{
  "metadata": { "version": "1.0", "languages": ["en", "nl"] },
  "phrases": {
    "Hello {name}": { "nl": "Hallo {name}" },
    "Goodbye": { "nl": "Tot ziens" }
  },
  "nouns": {
    "Apple": { "en": ["apple", "apples"], "nl": ["appel", "appels"] }
  }
}"#;

    #[test]
    fn test_parse_sample() {
        let result = parse(SAMPLE, "lingo.json");
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.data.metadata.version, "1.0");
        let keys: Vec<_> = result.data.phrases.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["Hello_", "Goodbye"]);
        assert_eq!(result.data.nouns.len(), 1);
    }

    #[test]
    fn test_result_to_json() {
        let result = parse(SAMPLE, "lingo.json");
        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["data"]["phrases"][0]["translations"]["nl"], "Hallo {name}");
        assert_eq!(json["data"]["nouns"][0]["plural"]["en"], "apples");
        assert_eq!(json["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn test_result_to_yaml() {
        let result = parse(SAMPLE, "lingo.json");
        let yaml = result.to_yaml().unwrap();
        assert!(yaml.contains("key: Goodbye"), "{yaml}");
        let back: ParseResult = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_duplicate_key_policy() {
        let source = r#"{
  "metadata": { "version": "1.0", "languages": ["en"], "languages": ["nl"] },
  "phrases": {}
}"#;
        let lenient = parse(source, "lingo.json");
        assert!(lenient.diagnostics.is_empty());
        assert_eq!(lenient.data.metadata.languages, vec!["en"]);

        let options = ParseOptions {
            duplicate_keys: DuplicateKeyPolicy::Reject,
            ..ParseOptions::default()
        };
        let strict = parse_with_options(source, "lingo.json", &options);
        let codes: Vec<_> = strict.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::DuplicateKey]);
        assert_eq!((strict.diagnostics[0].line, strict.diagnostics[0].column), (1, 55));
        assert_eq!(strict.data.metadata.languages, vec!["en"]);
    }

    #[test]
    fn test_missing_nouns_policy() {
        let source = r#"{ "metadata": { "version": "1", "languages": ["en"] }, "phrases": {} }"#;
        assert!(parse(source, "lingo.json").diagnostics.is_empty());

        let options = ParseOptions {
            missing_nouns: SectionPolicy::Warn,
            ..ParseOptions::default()
        };
        let result = parse_with_options(source, "lingo.json", &options);
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::NoNounsFound]);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_phrase_noun_collision() {
        let source = r#"{
  "metadata": { "version": "1", "languages": ["en"] },
  "phrases": { "Apple": {} },
  "nouns": { "Apple": { "en": ["apple", "apples"] } }
}"#;
        let result = parse(source, "lingo.json");
        let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::PhraseNounDuplicate]);
        assert_eq!(result.diagnostics[0].message, "Noun 'Apple' has a value for the phrase 'Apple'");
        assert_eq!(result.data.nouns.len(), 1);

        let options = ParseOptions {
            check_phrase_noun_collisions: false,
            ..ParseOptions::default()
        };
        assert!(parse_with_options(source, "lingo.json", &options).diagnostics.is_empty());
    }

    #[test]
    fn test_cancellation() {
        let cancel = AtomicBool::new(true);
        let result = parse_with_cancellation(SAMPLE, "lingo.json", &ParseOptions::default(), &cancel);
        assert!(matches!(result, Err(LingoError::Cancelled)));

        let cancel = AtomicBool::new(false);
        let result = parse_with_cancellation(SAMPLE, "lingo.json", &ParseOptions::default(), &cancel);
        assert_eq!(result.unwrap(), parse(SAMPLE, "lingo.json"));
    }

    #[test]
    fn test_cancellation_is_not_checked_before_entries() {
        // Documents that stop before the entry scans finish normally.
        let cancel = AtomicBool::new(true);
        let result = parse_with_cancellation("{ }", "lingo.json", &ParseOptions::default(), &cancel);
        assert_eq!(result.unwrap().diagnostics.len(), 1);
    }
}
