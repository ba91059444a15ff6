use crate::ast::{JsonValue, Member};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::key::synthesize_key;
use crate::language::{self, ENGLISH};
use crate::model::{MetaData, Phrase};
use crate::placeholder::extract_placeholders;
use log::trace;
use std::collections::{BTreeMap, HashSet};

/// One `"<lang>": <value>` pair of an entry, with its language normalized.
pub(crate) struct Translation<'a, T> {
    pub language: String,
    pub node: &'a JsonValue,
    pub value: T,
}

/// Reads an entry's value as a language → `T` mapping. On the first
/// property whose value `read` rejects, reports `JsonException` at it and
/// returns `None`. Properties whose language repeats after normalization
/// are skipped; the first one wins.
pub(crate) fn read_translations<'a, T>(
    entry: &'a Member,
    expected: &str,
    read: impl Fn(&'a JsonValue) -> Option<T>,
    sink: &mut DiagnosticSink,
) -> Option<Vec<Translation<'a, T>>> {
    if entry.value.as_object().is_none() {
        let detail = format!(
            "Expected an object of translations for '{}', found {}",
            entry.key,
            entry.value.type_name()
        );
        sink.report_value(&entry.value, DiagnosticKind::JsonException { detail });
        return None;
    }

    let mut seen = HashSet::new();
    let mut translations = Vec::new();
    for property in entry.value.properties() {
        let Some(value) = read(&property.value) else {
            let detail = format!(
                "Translation '{}' of '{}' must be {expected}, found {}",
                property.key,
                entry.key,
                property.value.type_name()
            );
            sink.report_value(&property.value, DiagnosticKind::JsonException { detail });
            return None;
        };

        let language = language::normalize(&property.key);
        if seen.insert(language.clone()) {
            translations.push(Translation {
                language,
                node: &property.value,
                value,
            });
        }
    }
    Some(translations)
}

/// Synthesizes the identifier for an entry, reporting a leading digit or an
/// unusable key.
pub(crate) fn entry_key(entry: &Member, sink: &mut DiagnosticSink) -> Option<String> {
    match synthesize_key(&entry.key) {
        Ok(synthesized) => {
            if synthesized.digit_prefixed {
                sink.report_key(
                    entry,
                    DiagnosticKind::KeyStartsWithDigit {
                        text: entry.key.clone(),
                    },
                );
            }
            Some(synthesized.key)
        }
        Err(err) => {
            sink.report_key(
                entry,
                DiagnosticKind::InvalidJsonFormat {
                    detail: err.to_string(),
                },
            );
            None
        }
    }
}

/// Reports every declared language that has no translation, once each, in
/// declaration order.
pub(crate) fn report_missing_languages<'l, T>(
    entry: &Member,
    key: &str,
    required: impl IntoIterator<Item = &'l String>,
    translations: &[Translation<'_, T>],
    sink: &mut DiagnosticSink,
) {
    let mut reported = HashSet::new();
    for language in required {
        let present = translations.iter().any(|t| &t.language == language);
        if !present && reported.insert(language) {
            sink.report_value(
                &entry.value,
                DiagnosticKind::MissingTranslation {
                    key: key.to_string(),
                    language: language.clone(),
                },
            );
        }
    }
}

/// Validates one property of the `phrases` section.
///
/// The property name is the English text of the phrase and defines its
/// canonical arguments. A translation using an argument the English text
/// does not have drops the whole phrase.
pub fn validate_phrase(entry: &Member, metadata: &MetaData, sink: &mut DiagnosticSink) -> Option<Phrase> {
    let translations = read_translations(entry, "a string", JsonValue::as_str, sink)?;
    let key = entry_key(entry, sink)?;

    // English is the source text itself and is never missing or extra.
    let required = metadata.languages.iter().filter(|l| *l != ENGLISH);
    report_missing_languages(entry, &key, required, &translations, sink);

    for translation in &translations {
        if translation.language != ENGLISH && !metadata.supports(&translation.language) {
            sink.report_value(
                translation.node,
                DiagnosticKind::ExtraTranslation {
                    key: key.clone(),
                    language: translation.language.clone(),
                },
            );
        }
    }

    let arguments = extract_placeholders(&entry.key);
    let canonical: HashSet<&str> = arguments.iter().map(String::as_str).collect();

    // The English text is the key itself, so it always matches.
    let mut has_extra_argument = false;
    for translation in translations.iter().filter(|t| t.language != ENGLISH) {
        let used = extract_placeholders(translation.value);
        let used: Vec<&str> = distinct(used.iter().map(String::as_str));

        for argument in used.iter().filter(|a| !canonical.contains(*a)) {
            has_extra_argument = true;
            sink.report_value(
                translation.node,
                DiagnosticKind::ExtraPhraseArgument {
                    key: key.clone(),
                    argument: argument.to_string(),
                    language: translation.language.clone(),
                },
            );
        }

        for argument in distinct(arguments.iter().map(String::as_str)) {
            if !used.contains(&argument) {
                sink.report_value(
                    translation.node,
                    DiagnosticKind::MissingPhraseArgument {
                        key: key.clone(),
                        argument: argument.to_string(),
                        language: translation.language.clone(),
                    },
                );
            }
        }
    }

    if has_extra_argument {
        trace!("dropping phrase {key}: a translation uses an unknown argument");
        return None;
    }

    let mut map: BTreeMap<String, String> = translations
        .into_iter()
        .map(|t| (t.language, t.value.to_string()))
        .collect();
    map.insert(ENGLISH.to_string(), entry.key.clone());

    Some(Phrase {
        key,
        translations: map,
        arguments,
    })
}

/// Keeps the first occurrence of each item, preserving order.
fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).collect()
}
