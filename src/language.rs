//! Embedded ISO-639-1 language table.
//!
//! Validation never consults the host locale database, so a document
//! validates the same way on every machine.

use thiserror::Error;

/// Revision of the embedded table. Bump when codes are added or retired.
pub const ISO_639_1_TABLE_VERSION: &str = "2023-01";

/// English is implied by every phrase key and required for every noun.
pub const ENGLISH: &str = "en";

/// All two-letter ISO-639-1 codes, sorted for binary search.
const ISO_639_1: [&str; 183] = [
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bi",
    "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da", "de",
    "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr", "fy",
    "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz", "ia",
    "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja", "jv", "ka", "kg", "ki", "kj", "kk",
    "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg", "li", "ln", "lo",
    "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "na", "nb", "nd",
    "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl",
    "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl",
    "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk",
    "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa",
    "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("Language is empty")]
    Empty,

    #[error("'{0}' is not a valid TwoLetterISOLanguageName")]
    Unknown(String),
}

/// Trims and lowercases a code so that lookups and map keys agree.
pub fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Returns `true` if `code` is already normalized and in the table.
pub fn is_iso_639_1(code: &str) -> bool {
    ISO_639_1.binary_search(&code).is_ok()
}

/// Normalizes a declared language and checks it against the table.
pub fn validate(code: &str) -> Result<String, LanguageError> {
    let normalized = normalize(code);
    if normalized.is_empty() {
        return Err(LanguageError::Empty);
    }
    if !is_iso_639_1(&normalized) {
        return Err(LanguageError::Unknown(code.to_string()));
    }
    Ok(normalized)
}
