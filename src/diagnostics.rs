//! Positioned diagnostics and the append-only sink that collects them.
//!
//! Every validation step reports through a [`DiagnosticSink`] owned by a
//! single parse. The sink resolves byte spans to 0-based line/column pairs
//! and never removes or rewrites what it has already collected.

use crate::ast::{JsonValue, Member};
use crate::utils::LineIndex;
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, Report, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        }
    }
}

/// Stable diagnostic codes. The numeric ids never change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    NoJson,
    InvalidLanguage,
    KeyStartsWithDigit,
    JsonException,
    NoMetaData,
    NoVersionFound,
    NoLanguagesFound,
    NoPhrasesFound,
    InvalidJsonFormat,
    ExtraPhraseArgument,
    MissingPhraseArgument,
    ExtraTranslation,
    MissingTranslation,
    PhraseNounDuplicate,
    NounIsIncomplete,
    NoNounsFound,
    DuplicateKey,
}

impl DiagnosticCode {
    pub const ALL: [DiagnosticCode; 17] = [
        DiagnosticCode::NoJson,
        DiagnosticCode::InvalidLanguage,
        DiagnosticCode::KeyStartsWithDigit,
        DiagnosticCode::JsonException,
        DiagnosticCode::NoMetaData,
        DiagnosticCode::NoVersionFound,
        DiagnosticCode::NoLanguagesFound,
        DiagnosticCode::NoPhrasesFound,
        DiagnosticCode::InvalidJsonFormat,
        DiagnosticCode::ExtraPhraseArgument,
        DiagnosticCode::MissingPhraseArgument,
        DiagnosticCode::ExtraTranslation,
        DiagnosticCode::MissingTranslation,
        DiagnosticCode::PhraseNounDuplicate,
        DiagnosticCode::NounIsIncomplete,
        DiagnosticCode::NoNounsFound,
        DiagnosticCode::DuplicateKey,
    ];

    /// The published id, e.g. `LINGO1012`.
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticCode::NoJson => "LINGO1000",
            DiagnosticCode::InvalidLanguage => "LINGO1001",
            DiagnosticCode::KeyStartsWithDigit => "LINGO1002",
            DiagnosticCode::JsonException => "LINGO1003",
            DiagnosticCode::NoMetaData => "LINGO1004",
            DiagnosticCode::NoVersionFound => "LINGO1005",
            DiagnosticCode::NoLanguagesFound => "LINGO1006",
            DiagnosticCode::NoPhrasesFound => "LINGO1007",
            DiagnosticCode::InvalidJsonFormat => "LINGO1008",
            DiagnosticCode::ExtraPhraseArgument => "LINGO1009",
            DiagnosticCode::MissingPhraseArgument => "LINGO1010",
            DiagnosticCode::ExtraTranslation => "LINGO1011",
            DiagnosticCode::MissingTranslation => "LINGO1012",
            DiagnosticCode::PhraseNounDuplicate => "LINGO1013",
            DiagnosticCode::NounIsIncomplete => "LINGO1014",
            DiagnosticCode::NoNounsFound => "LINGO1015",
            DiagnosticCode::DuplicateKey => "LINGO1016",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::NoJson
            | DiagnosticCode::KeyStartsWithDigit
            | DiagnosticCode::NoVersionFound
            | DiagnosticCode::NoPhrasesFound
            | DiagnosticCode::MissingPhraseArgument
            | DiagnosticCode::ExtraTranslation
            | DiagnosticCode::NoNounsFound => Severity::Warning,
            DiagnosticCode::InvalidLanguage
            | DiagnosticCode::JsonException
            | DiagnosticCode::NoMetaData
            | DiagnosticCode::NoLanguagesFound
            | DiagnosticCode::InvalidJsonFormat
            | DiagnosticCode::ExtraPhraseArgument
            | DiagnosticCode::MissingTranslation
            | DiagnosticCode::PhraseNounDuplicate
            | DiagnosticCode::NounIsIncomplete
            | DiagnosticCode::DuplicateKey => Severity::Error,
        }
    }

    /// Short human title, used as the label of a rendered report.
    pub fn title(self) -> &'static str {
        match self {
            DiagnosticCode::NoJson => "No lingo.json file found",
            DiagnosticCode::InvalidLanguage => "Invalid language",
            DiagnosticCode::KeyStartsWithDigit => "Key starts with a number",
            DiagnosticCode::JsonException => "Json exception",
            DiagnosticCode::NoMetaData => "No metadata found",
            DiagnosticCode::NoVersionFound => "Version not specified",
            DiagnosticCode::NoLanguagesFound => "Supported languages not specified",
            DiagnosticCode::NoPhrasesFound => "No phrases found",
            DiagnosticCode::InvalidJsonFormat => "Invalid JSON format",
            DiagnosticCode::ExtraPhraseArgument => "Extra argument",
            DiagnosticCode::MissingPhraseArgument => "Missing argument",
            DiagnosticCode::ExtraTranslation => "Extra translation",
            DiagnosticCode::MissingTranslation => "Missing translation",
            DiagnosticCode::PhraseNounDuplicate => "There already exists a noun for this phrase",
            DiagnosticCode::NounIsIncomplete => "Noun is incomplete",
            DiagnosticCode::NoNounsFound => "No nouns found",
            DiagnosticCode::DuplicateKey => "Duplicate property",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCode::NoJson => "NoJson",
            DiagnosticCode::InvalidLanguage => "InvalidLanguage",
            DiagnosticCode::KeyStartsWithDigit => "KeyStartsWithDigit",
            DiagnosticCode::JsonException => "JsonException",
            DiagnosticCode::NoMetaData => "NoMetaData",
            DiagnosticCode::NoVersionFound => "NoVersionFound",
            DiagnosticCode::NoLanguagesFound => "NoLanguagesFound",
            DiagnosticCode::NoPhrasesFound => "NoPhrasesFound",
            DiagnosticCode::InvalidJsonFormat => "InvalidJsonFormat",
            DiagnosticCode::ExtraPhraseArgument => "ExtraPhraseArgument",
            DiagnosticCode::MissingPhraseArgument => "MissingPhraseArgument",
            DiagnosticCode::ExtraTranslation => "ExtraTranslation",
            DiagnosticCode::MissingTranslation => "MissingTranslation",
            DiagnosticCode::PhraseNounDuplicate => "PhraseNounDuplicate",
            DiagnosticCode::NounIsIncomplete => "NounIsIncomplete",
            DiagnosticCode::NoNounsFound => "NoNounsFound",
            DiagnosticCode::DuplicateKey => "DuplicateKey",
        }
    }
}

impl Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What went wrong, with the data its message needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("No lingo.json file found")]
    NoJson,

    #[error("Invalid language: {reason}")]
    InvalidLanguage { reason: String },

    #[error("The key '{text}' starts with a digit, prefixing with 'd'")]
    KeyStartsWithDigit { text: String },

    #[error("Json exception: {detail}")]
    JsonException { detail: String },

    #[error("No metadata found in lingo.json")]
    NoMetaData,

    #[error("lingo.json version is not specified")]
    NoVersionFound,

    #[error("There are no supported languages specified in lingo.json")]
    NoLanguagesFound,

    #[error("No phrases found in lingo.json")]
    NoPhrasesFound,

    #[error("Invalid JSON format: {detail}")]
    InvalidJsonFormat { detail: String },

    #[error("Phrase '{key}' has an extra argument '{argument}' in '{language}'")]
    ExtraPhraseArgument {
        key: String,
        argument: String,
        language: String,
    },

    #[error("Phrase '{key}' is missing an argument for '{argument}' in '{language}'")]
    MissingPhraseArgument {
        key: String,
        argument: String,
        language: String,
    },

    #[error("'{key}' has an extra translation for '{language}'")]
    ExtraTranslation { key: String, language: String },

    #[error("'{key}' is missing a translation for '{language}'")]
    MissingTranslation { key: String, language: String },

    #[error("Noun '{key}' has a value for the phrase '{phrase}'")]
    PhraseNounDuplicate { key: String, phrase: String },

    #[error("Noun '{key}' is incomplete for '{language}'")]
    NounIsIncomplete { key: String, language: String },

    #[error("No nouns found in lingo.json")]
    NoNounsFound,

    #[error("Duplicate property '{key}', the first occurrence is used")]
    DuplicateKey { key: String },
}

impl DiagnosticKind {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            DiagnosticKind::NoJson => DiagnosticCode::NoJson,
            DiagnosticKind::InvalidLanguage { .. } => DiagnosticCode::InvalidLanguage,
            DiagnosticKind::KeyStartsWithDigit { .. } => DiagnosticCode::KeyStartsWithDigit,
            DiagnosticKind::JsonException { .. } => DiagnosticCode::JsonException,
            DiagnosticKind::NoMetaData => DiagnosticCode::NoMetaData,
            DiagnosticKind::NoVersionFound => DiagnosticCode::NoVersionFound,
            DiagnosticKind::NoLanguagesFound => DiagnosticCode::NoLanguagesFound,
            DiagnosticKind::NoPhrasesFound => DiagnosticCode::NoPhrasesFound,
            DiagnosticKind::InvalidJsonFormat { .. } => DiagnosticCode::InvalidJsonFormat,
            DiagnosticKind::ExtraPhraseArgument { .. } => DiagnosticCode::ExtraPhraseArgument,
            DiagnosticKind::MissingPhraseArgument { .. } => DiagnosticCode::MissingPhraseArgument,
            DiagnosticKind::ExtraTranslation { .. } => DiagnosticCode::ExtraTranslation,
            DiagnosticKind::MissingTranslation { .. } => DiagnosticCode::MissingTranslation,
            DiagnosticKind::PhraseNounDuplicate { .. } => DiagnosticCode::PhraseNounDuplicate,
            DiagnosticKind::NounIsIncomplete { .. } => DiagnosticCode::NounIsIncomplete,
            DiagnosticKind::NoNounsFound => DiagnosticCode::NoNounsFound,
            DiagnosticKind::DuplicateKey { .. } => DiagnosticCode::DuplicateKey,
        }
    }
}

/// A diagnostic resolved against its document.
///
/// `line` and `column` are 0-based, `column` and `length` count characters.
/// `offset` and `byte_length` locate the same text in bytes, for rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("{message}")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub file_id: String,
    pub line: usize,
    pub column: usize,
    pub length: usize,
    pub offset: usize,
    pub byte_length: usize,
}

impl Diagnostic {
    /// The warning a caller reports when a project has no resource document.
    /// It has no position.
    pub fn no_json(file_id: impl Into<String>) -> Self {
        let kind = DiagnosticKind::NoJson;
        Self {
            code: kind.code(),
            severity: kind.code().severity(),
            message: kind.to_string(),
            file_id: file_id.into(),
            line: 0,
            column: 0,
            length: 0,
            offset: 0,
            byte_length: 0,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn span(&self) -> SourceSpan {
        (self.offset, self.byte_length).into()
    }

    /// Renders the diagnostic as a miette report against the text it was
    /// produced from.
    pub fn render(&self, source: &str) -> Result<String, fmt::Error> {
        let report = Report::new(self.clone())
            .with_source_code(NamedSource::new(self.file_id.clone(), source.to_string()));
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
        let mut buffer = String::new();
        handler.render_report(&mut buffer, &*report)?;
        Ok(buffer)
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code.id()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity.into())
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some(self.code.title().to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Append-only collector for the diagnostics of one document.
#[derive(Debug)]
pub struct DiagnosticSink<'a> {
    file_id: &'a str,
    index: LineIndex<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DiagnosticSink<'a> {
    pub fn new(source: &'a str, file_id: &'a str) -> Self {
        Self {
            file_id,
            index: LineIndex::new(source),
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, span: SourceSpan, kind: DiagnosticKind) {
        let (line, column) = self.index.line_col(span.offset());
        let code = kind.code();
        self.diagnostics.push(Diagnostic {
            code,
            severity: code.severity(),
            message: kind.to_string(),
            file_id: self.file_id.to_string(),
            line,
            column,
            length: self.index.char_len(span.offset(), span.len()),
            offset: span.offset(),
            byte_length: span.len(),
        });
    }

    /// Reports at the full extent of a value.
    pub fn report_value(&mut self, value: &JsonValue, kind: DiagnosticKind) {
        self.report(value.get_source_span(), kind);
    }

    /// Reports at the property name of a member.
    pub fn report_key(&mut self, member: &Member, kind: DiagnosticKind) {
        self.report(member.key_span(), kind);
    }

    /// The source text a value was parsed from.
    pub fn text_of(&self, value: &JsonValue) -> &'a str {
        let span = value.get_source_span();
        self.index.slice(span.offset(), span.len())
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
