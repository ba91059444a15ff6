pub mod api;
pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod key;
pub mod language;
pub mod lexer;
pub mod metadata;
pub mod model;
pub mod nouns;
pub mod parser;
pub mod phrases;
pub mod placeholder;
pub mod utils;

pub use api::{parse, parse_with_cancellation, parse_with_options, ParseResult};
pub use config::{DuplicateKeyPolicy, ParseOptions, SectionPolicy};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use error::LingoError;
pub use model::{LingoData, MetaData, Noun, Phrase};
