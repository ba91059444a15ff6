use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Lexer, Token, TokenType};
use miette::NamedSource;
use std::collections::HashSet;

/// Objects and arrays may nest this deep, the document root included.
pub const MAX_DEPTH: usize = 64;

/// A recursive descent reader for the lenient JSON dialect of `lingo.json`.
///
/// The grammar:
///
/// ```text
/// Document  ::= Object EOF
/// Object    ::= "{" [ Member { "," Member } [ "," ] ] "}"
/// Member    ::= ( String | Identifier ) ":" Value
/// Array     ::= "[" [ Value { "," Value } [ "," ] ] "]"
/// Value     ::= Object | Array | String | Number | "true" | "false" | "null"
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    source: NamedSource<String>,
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    source_text: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "lingo.json".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        let source = NamedSource::new(name, source_text.to_string());
        let mut lexer = Lexer::new(source_text);
        let tokens: Vec<Token> = lexer.lex().into_iter().filter(|t| !t.is_trivia()).collect();

        Self {
            source,
            tokens,
            position: 0,
            depth: 0,
            source_text,
        }
    }

    // === Main Parsing Methods ===

    /// Document ::= Object EOF
    pub fn parse_document(&mut self) -> Result<JsonValue, ParserError> {
        if !self.check(TokenType::LBrace) {
            return self.err_unexpected("an object");
        }
        let root = self.parse_object()?;
        self.expect(TokenType::Eof, "end of file")?;
        Ok(root)
    }

    /// Object ::= "{" [ MemberList ] "}"
    /// MemberList ::= Member { "," Member } [ "," ]
    fn parse_object(&mut self) -> Result<JsonValue, ParserError> {
        let start_token = self.current_token()?.clone();
        self.enter_nested(&start_token)?;
        self.expect(TokenType::LBrace, "'{'")?;
        let mut members = Vec::new();
        let mut seen = HashSet::new();
        if !self.check(TokenType::RBrace) {
            members.push(self.parse_member(&mut seen)?);
            while self.match_token(TokenType::Comma) {
                // A comma followed by a brace is a trailing comma
                if self.check(TokenType::RBrace) {
                    break;
                }
                members.push(self.parse_member(&mut seen)?);
            }
        }
        let end_token = self.current_token()?.clone();
        self.expect(TokenType::RBrace, "',' or '}'")?;
        self.depth -= 1;
        Ok(JsonValue {
            kind: JsonValueKind::Object(members),
            pos_start: start_token.pos_start,
            pos_end: end_token.pos_end,
        })
    }

    /// Array ::= "[" [ ValueList ] "]"
    /// ValueList ::= Value { "," Value } [ "," ]
    fn parse_array(&mut self) -> Result<JsonValue, ParserError> {
        let start_token = self.current_token()?.clone();
        self.enter_nested(&start_token)?;
        self.expect(TokenType::LBracket, "'['")?;
        let mut values = Vec::new();
        if !self.check(TokenType::RBracket) {
            loop {
                values.push(self.parse_value()?);

                if !self.match_token(TokenType::Comma) {
                    break;
                }
                if self.check(TokenType::RBracket) {
                    break; // Allow trailing comma
                }
            }
        }
        let end_token = self.current_token()?.clone();
        self.expect(TokenType::RBracket, "',' or ']'")?;
        self.depth -= 1;
        Ok(JsonValue {
            kind: JsonValueKind::Array(values),
            pos_start: start_token.pos_start,
            pos_end: end_token.pos_end,
        })
    }

    /// Value ::= Object | Array | Literal
    fn parse_value(&mut self) -> Result<JsonValue, ParserError> {
        let start_token = self.current_token()?.clone();

        let kind = match &start_token.ttype {
            TokenType::LBrace => return self.parse_object(),
            TokenType::LBracket => return self.parse_array(),
            TokenType::String(s) => JsonValueKind::String(s.clone()),
            TokenType::Number(n) => JsonValueKind::Number(*n),
            TokenType::True => JsonValueKind::Boolean(true),
            TokenType::False => JsonValueKind::Boolean(false),
            TokenType::Null => JsonValueKind::Null,
            _ => return self.err_unexpected("a value"),
        };
        self.advance();

        Ok(JsonValue {
            kind,
            pos_start: start_token.pos_start,
            pos_end: start_token.pos_end,
        })
    }

    /// Member ::= Key ":" Value
    /// Key ::= String | Identifier
    fn parse_member(&mut self, seen: &mut HashSet<String>) -> Result<Member, ParserError> {
        let key_token = self.current_token()?.clone();
        let key = match &key_token.ttype {
            TokenType::String(s) | TokenType::Identifier(s) => s.clone(),
            _ => return self.err_unexpected("a property name"),
        };
        self.advance();

        self.expect(TokenType::Colon, "':' after the property name")?;
        let value = self.parse_value()?;

        let duplicate = !seen.insert(key.clone());
        Ok(Member {
            key,
            key_start: key_token.pos_start,
            key_end: key_token.pos_end,
            value,
            duplicate,
        })
    }

    /// Paired with the decrement on the success paths of `parse_object` and
    /// `parse_array`. An error ends the parse.
    fn enter_nested(&mut self, start_token: &Token) -> Result<(), ParserError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParserError::NestingTooDeep {
                src: self.source.clone(),
                span: (start_token.pos_start, start_token.pos_end - start_token.pos_start).into(),
                limit: MAX_DEPTH,
            });
        }
        Ok(())
    }

    // === Tokenizer Helper Methods ===

    fn current_token(&self) -> Result<&Token, ParserError> {
        self.tokens
            .get(self.position)
            .ok_or_else(|| self.eof_error("more input"))
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn expect(&mut self, expected: TokenType, description: &str) -> Result<(), ParserError> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            self.err_unexpected(description)
        }
    }

    fn match_token(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, ttype: TokenType) -> bool {
        if let Ok(token) = self.current_token() {
            std::mem::discriminant(&token.ttype) == std::mem::discriminant(&ttype)
        } else {
            false
        }
    }

    fn eof_error(&self, expected: &str) -> ParserError {
        ParserError::UnexpectedEof {
            src: self.source.clone(),
            span: (self.source_text.len(), 0).into(),
            expected: expected.to_string(),
        }
    }

    /// Builds the error for the current token. Lexer error tokens are turned
    /// into their dedicated variants so the message names the real problem.
    fn err_unexpected<T>(&self, expected: &str) -> Result<T, ParserError> {
        let token = self.current_token()?;
        let span = (token.pos_start, token.pos_end - token.pos_start).into();
        let src = self.source.clone();
        Err(match &token.ttype {
            TokenType::Eof => self.eof_error(expected),
            TokenType::UnterminatedString => ParserError::UnterminatedString { src, span },
            TokenType::UnterminatedComment => ParserError::UnterminatedComment { src, span },
            TokenType::InvalidEscape(sequence) => ParserError::InvalidEscape {
                src,
                span,
                sequence: sequence.clone(),
            },
            _ => ParserError::UnexpectedToken {
                src,
                span,
                expected: expected.to_string(),
            },
        })
    }
}
