use lingo_core::key::synthesize_key;
use lingo_core::placeholder::extract_placeholders;
use lingo_core::{parse, DiagnosticCode, ParseResult, Severity};
use std::collections::HashSet;
use std::thread;

const FILE: &str = "lingo.json";

fn codes(result: &ParseResult) -> Vec<DiagnosticCode> {
    result.diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn test_empty_object_has_no_metadata() {
    let result = parse("{ }", FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::NoMetaData]);
    assert_eq!(result.data, Default::default());
}

#[test]
fn test_metadata_without_languages() {
    let result = parse(r#"{"metadata":{"version":"1.0"}}"#, FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::NoLanguagesFound]);
    assert!(result.data.phrases.is_empty());
}

#[test]
fn test_metadata_without_phrases() {
    let result = parse(r#"{"metadata":{"version":"1.0","languages":["en","nl"]}}"#, FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::NoPhrasesFound]);
    assert_eq!(result.diagnostics[0].severity, Severity::Warning);
    assert!(result.data.phrases.is_empty());
    assert!(result.data.nouns.is_empty());
    assert_eq!(result.data.metadata.languages, vec!["en", "nl"]);
}

#[test]
fn test_single_phrase_with_argument() {
    let source = r#"{"metadata":{"version":"1.0","languages":["en"]},"phrases":{"Select a(n) {item}":{"en":"Select a(n) {item}"}}}"#;
    let result = parse(source, FILE);
    assert!(!result.has_errors(), "{:?}", result.diagnostics);
    assert_eq!(result.data.phrases.len(), 1);
    assert_eq!(result.data.phrases[0].arguments, vec!["item"]);
}

#[test]
fn test_extra_argument_drops_phrase() {
    let source = r#"{
  "metadata": { "version": "1.0", "languages": ["en", "nl"] },
  "phrases": {
    "Hello": { "nl": "Hallo {name}" },
    "Bye": { "nl": "Doei" }
  }
}"#;
    let result = parse(source, FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::ExtraPhraseArgument]);
    assert_eq!(result.diagnostics[0].severity, Severity::Error);
    assert!(result.data.phrase("Hello").is_none());
    assert!(result.data.phrase("Bye").is_some());
}

#[test]
fn test_invalid_json_yields_one_diagnostic() {
    let result = parse("{ invalid json }", FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::JsonException]);
    assert_eq!(result.data, Default::default());
    assert_eq!(result.diagnostics[0].offset, 10);
}

#[test]
fn test_missing_phrases_still_reads_nouns() {
    let source = r#"{
  "metadata": { "version": "1.0", "languages": ["en"] },
  "nouns": { "Tree": { "en": ["tree", "trees"] } }
}"#;
    let result = parse(source, FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::NoPhrasesFound]);
    assert_eq!(result.data.nouns.len(), 1);
}

const MESSY: &str = r#"{
  "metadata": { "version": "2", "languages": ["en", "nl", "fr", "zz"] },
  "phrases": {
    "Welcome {user}, you have {count} messages": {
      "nl": "Welkom {user}, je hebt {count} berichten",
      "fr": "Bienvenue {user}"
    },
    "{count} files were deleted by {user}": { "nl": "{user} heeft {count} bestanden verwijderd", "fr": "{count} fichiers" },
    "Oops {x}": { "nl": "Oeps {y}" },
    "42 is the answer": { "nl": "42 is het antwoord", "de": "42 ist die Antwort" },
    "???": { "nl": "???" }
  },
  "nouns": {
    "Message": { "en": ["message", "messages"], "nl": ["bericht"], "fr": ["message", "messages"] },
    "Dog": { "en": ["dog", "dogs"], "nl": ["hond", "honden"] }
  }
}"#;

#[test]
fn test_parsing_is_idempotent() {
    assert_eq!(parse(MESSY, FILE), parse(MESSY, FILE));
}

#[test]
fn test_translation_arguments_are_canonical() {
    let result = parse(MESSY, FILE);
    assert!(!result.data.phrases.is_empty());
    for phrase in &result.data.phrases {
        let canonical: HashSet<String> = phrase.arguments.iter().cloned().collect();
        for translation in phrase.translations.values() {
            for argument in extract_placeholders(translation) {
                assert!(canonical.contains(&argument), "{} uses {argument}", phrase.key);
            }
        }
    }
    assert!(result.data.phrase("Oops_").is_none());
}

#[test]
fn test_model_keys_are_identifiers() {
    let result = parse(MESSY, FILE);
    let keys = result
        .data
        .phrases
        .iter()
        .map(|p| &p.key)
        .chain(result.data.nouns.iter().map(|n| &n.key));
    for key in keys {
        assert!(!key.is_empty());
        assert!(!key.starts_with(|c: char| c.is_ascii_digit()), "{key}");
        assert!(key.chars().all(|c| c.is_alphanumeric() || c == '_'), "{key}");
    }
    assert!(result.data.phrase("d42IsTheAnswer").is_some());
    assert!(codes(&result).contains(&DiagnosticCode::InvalidJsonFormat));
}

#[test]
fn test_key_synthesis_matches_model() {
    let result = parse(MESSY, FILE);
    for phrase in &result.data.phrases {
        let synthesized = synthesize_key(&phrase.translations["en"]).unwrap();
        assert_eq!(synthesized.key, phrase.key);
    }
}

#[test]
fn test_parallel_documents_match_sequential() {
    let expected = parse(MESSY, FILE);
    let handles: Vec<_> = (0..4).map(|_| thread::spawn(|| parse(MESSY, FILE))).collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }

    thread::scope(|scope| {
        let a = scope.spawn(|| parse(MESSY, FILE));
        let b = scope.spawn(|| parse("{ }", FILE));
        assert_eq!(a.join().unwrap(), expected);
        assert_eq!(b.join().unwrap().diagnostics.len(), 1);
    });
}

#[test]
fn test_result_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseResult>();
}

#[test]
fn test_positions_are_zero_based_characters() {
    let source = "{\n  \"metadata\": { \"version\": \"1\", \"languages\": [\"ü\", \"xx\"] },\n  \"phrases\": {}\n}";
    let result = parse(source, FILE);
    assert_eq!(codes(&result), vec![DiagnosticCode::InvalidLanguage; 2]);
    let second = &result.diagnostics[1];
    assert_eq!((second.line, second.column, second.length), (1, 51, 4));
}
