use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LingoError {
    #[error("Parsing was cancelled before all entries were validated")]
    #[diagnostic(code(lingo::cancelled))]
    Cancelled,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Structural failures of the JSON reader. Each one is fatal for the
/// document and is surfaced to callers as a single `JsonException`
/// diagnostic.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParserError {
    #[error("Unexpected token")]
    #[diagnostic(
        code(parser::unexpected_token),
        help("The reader found a token it did not expect in this position.")
    )]
    UnexpectedToken {
        #[source_code]
        src: NamedSource<String>,
        #[label("Expected {expected}, but found this")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unexpected end of file")]
    #[diagnostic(
        code(parser::unexpected_eof),
        help("The file ended unexpectedly. The reader expected {expected}.")
    )]
    UnexpectedEof {
        #[source_code]
        src: NamedSource<String>,
        #[label("File ended unexpectedly here")]
        span: SourceSpan,
        expected: String,
    },

    #[error("Unterminated string")]
    #[diagnostic(
        code(parser::unterminated_string),
        help("Add the closing quote to the string literal.")
    )]
    UnterminatedString {
        #[source_code]
        src: NamedSource<String>,
        #[label("This string is never closed")]
        span: SourceSpan,
    },

    #[error("Unterminated comment")]
    #[diagnostic(
        code(parser::unterminated_comment),
        help("Block comments must be closed with `*/`.")
    )]
    UnterminatedComment {
        #[source_code]
        src: NamedSource<String>,
        #[label("This comment is never closed")]
        span: SourceSpan,
    },

    #[error("Invalid escape sequence `{sequence}`")]
    #[diagnostic(
        code(parser::invalid_escape),
        help("Valid escapes are \\\" \\\\ \\/ \\b \\f \\n \\r \\t and \\uXXXX.")
    )]
    InvalidEscape {
        #[source_code]
        src: NamedSource<String>,
        #[label("Inside this string")]
        span: SourceSpan,
        sequence: String,
    },

    #[error("Nesting is deeper than {limit} levels")]
    #[diagnostic(
        code(parser::nesting_too_deep),
        help("Objects and arrays in lingo.json may nest at most {limit} levels deep.")
    )]
    NestingTooDeep {
        #[source_code]
        src: NamedSource<String>,
        #[label("This opens one level too many")]
        span: SourceSpan,
        limit: usize,
    },
}

impl ParserError {
    /// The location of the failure in the source text.
    pub fn span(&self) -> SourceSpan {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::UnterminatedString { span, .. }
            | ParserError::UnterminatedComment { span, .. }
            | ParserError::InvalidEscape { span, .. }
            | ParserError::NestingTooDeep { span, .. } => *span,
        }
    }

    /// A one-line description of the failure, suitable for a diagnostic message.
    pub fn detail(&self) -> String {
        match self {
            ParserError::UnexpectedToken { expected, .. } => {
                format!("Unexpected token, expected {expected}")
            }
            ParserError::UnexpectedEof { expected, .. } => {
                format!("Unexpected end of file, expected {expected}")
            }
            other => other.to_string(),
        }
    }
}

/// Failures while loading [`crate::config::ParseOptions`].
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid JSON parse options")]
    #[diagnostic(code(config::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML parse options")]
    #[diagnostic(code(config::yaml))]
    Yaml(#[from] serde_yaml::Error),
}
