use crate::ast::JsonValue;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::language;
use crate::model::MetaData;
use log::trace;

/// Validates the `metadata` section of the document root.
///
/// Returns `None` when the document cannot be processed further: the
/// section is missing, or it declares no `languages` array. Problems with
/// the version or with individual languages are reported and skipped.
pub fn validate_metadata(root: &JsonValue, sink: &mut DiagnosticSink) -> Option<MetaData> {
    let Some(metadata) = root.get("metadata").filter(|m| m.as_object().is_some()) else {
        sink.report_value(root.get("metadata").unwrap_or(root), DiagnosticKind::NoMetaData);
        return None;
    };

    let version = match metadata.get("version") {
        Some(node) => match node.as_str() {
            Some(version) if !version.trim().is_empty() => version.to_string(),
            _ => {
                sink.report_value(node, DiagnosticKind::NoVersionFound);
                String::new()
            }
        },
        None => {
            sink.report_value(metadata, DiagnosticKind::NoVersionFound);
            String::new()
        }
    };

    let Some(elements) = metadata.get("languages").and_then(JsonValue::as_array) else {
        let at = metadata.get("languages").unwrap_or(metadata);
        sink.report_value(at, DiagnosticKind::NoLanguagesFound);
        return None;
    };

    let mut languages = Vec::with_capacity(elements.len());
    for element in elements {
        let Some(code) = element.as_str() else {
            let reason = format!("'{}' is not a string", sink.text_of(element));
            sink.report_value(element, DiagnosticKind::InvalidLanguage { reason });
            continue;
        };

        match language::validate(code) {
            Ok(code) => languages.push(code),
            Err(err) => {
                trace!("rejected language {code:?}: {err}");
                sink.report_value(element, DiagnosticKind::InvalidLanguage { reason: err.to_string() });
            }
        }
    }

    Some(MetaData { languages, version })
}
