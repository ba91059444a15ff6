use crate::ast::{JsonValue, Member};
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::language::ENGLISH;
use crate::model::{MetaData, Noun};
use crate::phrases::{entry_key, read_translations, report_missing_languages};
use std::collections::BTreeMap;

/// Reads `["singular", "plural", ...]`. Any non-string element rejects the array.
fn string_forms(value: &JsonValue) -> Option<Vec<&str>> {
    value.as_array()?.iter().map(JsonValue::as_str).collect()
}

/// Validates one property of the `nouns` section.
///
/// Each language maps to an array whose first two elements are the
/// singular and plural forms. English is always required. A language with
/// fewer than two forms is reported and left out of the noun.
pub fn validate_noun(entry: &Member, metadata: &MetaData, sink: &mut DiagnosticSink) -> Option<Noun> {
    let translations = read_translations(entry, "an array of strings", string_forms, sink)?;
    let key = entry_key(entry, sink)?;

    let mut required: Vec<String> = metadata.languages.clone();
    if !metadata.supports(ENGLISH) {
        required.push(ENGLISH.to_string());
    }
    report_missing_languages(entry, &key, &required, &translations, sink);

    for translation in &translations {
        if !required.contains(&translation.language) {
            sink.report_value(
                translation.node,
                DiagnosticKind::ExtraTranslation {
                    key: key.clone(),
                    language: translation.language.clone(),
                },
            );
        }
    }

    let mut singular = BTreeMap::new();
    let mut plural = BTreeMap::new();
    for translation in translations {
        let [one, many, ..] = translation.value.as_slice() else {
            sink.report_value(
                translation.node,
                DiagnosticKind::NounIsIncomplete {
                    key: key.clone(),
                    language: translation.language,
                },
            );
            continue;
        };
        singular.insert(translation.language.clone(), one.to_string());
        plural.insert(translation.language, many.to_string());
    }

    Some(Noun {
        key,
        singular,
        plural,
    })
}
