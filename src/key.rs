//! Turns free text into a code identifier.
//!
//! `"Select a(n) {item}"` becomes `SelectAn_`: words are joined with the
//! first letter after a space capitalized, each `}` leaves an underscore, and
//! everything else that is not a letter or digit is dropped. Only the space
//! character separates words; tabs and newlines are dropped like punctuation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedKey {
    pub key: String,
    /// The identifier would have started with a digit and was prefixed with `d`.
    pub digit_prefixed: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key is empty or invalid")]
    Blank,

    #[error("Key '{0}' contains no letters or digits")]
    NoIdentifierCharacters(String),
}

pub fn synthesize_key(text: &str) -> Result<SynthesizedKey, KeyError> {
    if text.trim().is_empty() {
        return Err(KeyError::Blank);
    }

    let mut key = String::with_capacity(text.len());
    let mut next_is_upper = false;
    let mut in_braces = false;

    for c in text.chars() {
        match c {
            '{' => in_braces = true,
            '}' => {
                key.push('_');
                in_braces = false;
                next_is_upper = true;
            }
            ' ' => next_is_upper = true,
            c if c.is_alphanumeric() && !in_braces => {
                if next_is_upper {
                    key.extend(c.to_uppercase());
                } else {
                    key.push(c);
                }
                next_is_upper = false;
            }
            _ => {}
        }
    }

    if key.is_empty() {
        return Err(KeyError::NoIdentifierCharacters(text.to_string()));
    }

    let digit_prefixed = key.starts_with(|c: char| c.is_numeric());
    if digit_prefixed {
        key.insert(0, 'd');
    }

    Ok(SynthesizedKey {
        key,
        digit_prefixed,
    })
}
