/// Represents the different kinds of tokens that the lexer can produce.
/// Each token is a meaningful unit of the lenient JSON dialect that
/// `lingo.json` files are written in.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // == Special Tokens ==
    /// Represents the end of the input file.
    Eof,
    /// Represents a sequence of one or more whitespace characters (spaces, tabs, newlines).
    Whitespace,
    /// Represents a `//` line comment or a `/* */` block comment.
    /// The associated `String` contains the trimmed content of the comment.
    Comment(String),
    /// Represents a token that could not be recognized by the lexer.
    Unknown,
    /// A string literal that reached the end of input before its closing quote.
    UnterminatedString,
    /// A block comment that reached the end of input before `*/`.
    UnterminatedComment,
    /// A string literal containing an escape sequence that is not valid JSON.
    /// The associated `String` holds the offending sequence, backslash included.
    InvalidEscape(String),

    // == Literals ==
    /// An unquoted identifier. Only valid as a property name.
    /// Examples: `metadata`, `version`.
    Identifier(String),
    /// A string literal, enclosed in double or single quotes.
    /// The associated `String` holds the unescaped content of the string.
    String(String),
    /// A number literal, which can be an integer or a floating-point value.
    Number(f64),

    // == Keywords ==
    /// The boolean `true` value.
    True,
    /// The boolean `false` value.
    False,
    /// The `null` keyword, representing an empty or absent value.
    Null,

    // == Punctuation ==
    /// Left Brace: `{`
    LBrace,
    /// Right Brace: `}`
    RBrace,
    /// Left Bracket: `[`
    LBracket,
    /// Right Bracket: `]`
    RBracket,
    /// Comma: `,`
    Comma,
    /// Colon: `:`
    Colon,
}

/// A token with its type and byte position
#[derive(Debug, Clone)]
pub struct Token {
    pub ttype: TokenType,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl Token {
    pub fn new(ttype: TokenType, pos_start: usize, pos_end: usize) -> Token {
        Token {
            ttype,
            pos_start,
            pos_end,
        }
    }

    /// Returns `true` for tokens the parser never looks at.
    pub fn is_trivia(&self) -> bool {
        matches!(self.ttype, TokenType::Whitespace | TokenType::Comment(_))
    }
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.ttype == TokenType::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    pub fn next_token(&mut self) -> Token {
        let start_pos = self.position;

        let ttype = if let Some(char) = self.advance() {
            match char {
                '{' => TokenType::LBrace,
                '}' => TokenType::RBrace,
                '[' => TokenType::LBracket,
                ']' => TokenType::RBracket,
                ',' => TokenType::Comma,
                ':' => TokenType::Colon,
                '/' => match self.peek() {
                    Some('/') => self.read_line_comment(),
                    Some('*') => self.read_block_comment(),
                    _ => TokenType::Unknown,
                },
                '"' | '\'' => self.read_string(char),
                c if c.is_whitespace() => self.read_whitespace(),
                c if c.is_alphabetic() || c == '_' || c == '$' => self.read_identifier(c),
                c if c.is_ascii_digit()
                    || (c == '-' && self.peek().is_some_and(|c| c.is_ascii_digit())) =>
                {
                    self.read_number(c)
                }

                _ => TokenType::Unknown,
            }
        } else {
            TokenType::Eof
        };

        Token::new(ttype, start_pos, self.position)
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
        }
        char
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consumes the next char only if it satisfies `pred`.
    fn advance_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if pred(c) => self.advance(),
            _ => None,
        }
    }

    fn read_whitespace(&mut self) -> TokenType {
        while self.advance_if(char::is_whitespace).is_some() {}
        TokenType::Whitespace
    }

    fn read_line_comment(&mut self) -> TokenType {
        self.advance(); // Consume the second '/'
        let mut comment_text = String::new();
        while let Some(c) = self.advance_if(|c| c != '\n') {
            comment_text.push(c);
        }
        TokenType::Comment(comment_text.trim().to_string())
    }

    fn read_block_comment(&mut self) -> TokenType {
        self.advance(); // Consume the '*'
        let mut comment_text = String::new();
        while let Some(c) = self.advance() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                return TokenType::Comment(comment_text.trim().to_string());
            }
            comment_text.push(c);
        }
        TokenType::UnterminatedComment
    }

    fn read_string(&mut self, quote: char) -> TokenType {
        let mut value = String::new();
        while let Some(c) = self.advance() {
            if c == quote {
                return TokenType::String(value);
            }

            if c != '\\' {
                value.push(c);
                continue;
            }

            let Some(escaped_char) = self.advance() else {
                return TokenType::UnterminatedString;
            };
            match escaped_char {
                '"' => value.push('"'),
                '\'' => value.push('\''),
                '\\' => value.push('\\'),
                '/' => value.push('/'),
                'b' => value.push('\u{8}'),
                'f' => value.push('\u{c}'),
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                'u' => match self.read_unicode_escape() {
                    Ok(ch) => value.push(ch),
                    Err(sequence) => return TokenType::InvalidEscape(sequence),
                },
                other => return TokenType::InvalidEscape(format!("\\{other}")),
            }
        }
        TokenType::UnterminatedString
    }

    /// Reads the `XXXX` of a `\uXXXX` escape, pairing UTF-16 surrogates.
    fn read_unicode_escape(&mut self) -> Result<char, String> {
        let high = self.read_hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| format!("\\u{high:04X}"));
        }

        // A high surrogate must be followed by `\u` and a low surrogate.
        if self.advance_if(|c| c == '\\').is_none() || self.advance_if(|c| c == 'u').is_none() {
            return Err(format!("\\u{high:04X}"));
        }
        let low = self.read_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(format!("\\u{high:04X}\\u{low:04X}"));
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(combined).ok_or_else(|| format!("\\u{high:04X}\\u{low:04X}"))
    }

    fn read_hex4(&mut self) -> Result<u32, String> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.advance_if(|c| c.is_ascii_hexdigit()) {
                Some(c) => digits.push(c),
                None => return Err(format!("\\u{digits}")),
            }
        }
        u32::from_str_radix(&digits, 16).map_err(|_| format!("\\u{digits}"))
    }

    fn read_identifier(&mut self, first_char: char) -> TokenType {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(c) = self.advance_if(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            ident.push(c);
        }

        match ident.as_str() {
            "true" => TokenType::True,
            "false" => TokenType::False,
            "null" => TokenType::Null,
            _ => TokenType::Identifier(ident),
        }
    }

    fn read_number(&mut self, first_char: char) -> TokenType {
        let mut number_str = String::new();
        number_str.push(first_char);
        let mut has_dot = false;
        let mut has_exponent = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
                number_str.push(c);
            } else if c == '.' && !has_dot && !has_exponent {
                has_dot = true;
                self.advance();
                number_str.push(c);
            } else if (c == 'e' || c == 'E') && !has_exponent {
                has_exponent = true;
                self.advance();
                number_str.push(c);
                // Optional sign after 'e' or 'E'
                if let Some(sign_char) = self.advance_if(|c| c == '+' || c == '-') {
                    number_str.push(sign_char);
                }
            } else {
                break;
            }
        }

        match number_str.parse::<f64>() {
            Ok(num) => TokenType::Number(num),
            Err(_) => TokenType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tokens(input: &str, expected: Vec<TokenType>) {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.lex();

        // Filter out whitespace and comments for most tests
        let filtered_tokens: Vec<TokenType> = tokens
            .into_iter()
            .filter(|t| !t.is_trivia())
            .map(|t| t.ttype)
            .collect();

        assert_eq!(filtered_tokens, expected);
    }

    #[test]
    fn test_eof() {
        assert_tokens("", vec![TokenType::Eof]);
    }

    #[test]
    fn test_punctuation() {
        let input = "{}[],:";
        let expected = vec![
            TokenType::LBrace,
            TokenType::RBrace,
            TokenType::LBracket,
            TokenType::RBracket,
            TokenType::Comma,
            TokenType::Colon,
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let input = "true false null version _x";
        let expected = vec![
            TokenType::True,
            TokenType::False,
            TokenType::Null,
            TokenType::Identifier("version".to_string()),
            TokenType::Identifier("_x".to_string()),
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }

    #[test]
    fn test_numbers() {
        let input = "123 45.67 -10 0.5 1e3 2.5E-1";
        let expected = vec![
            TokenType::Number(123.0),
            TokenType::Number(45.67),
            TokenType::Number(-10.0),
            TokenType::Number(0.5),
            TokenType::Number(1000.0),
            TokenType::Number(0.25),
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }

    #[test]
    fn test_strings_both_quotes() {
        let input = r#""hello world" '' 'it''s'"#;
        let expected = vec![
            TokenType::String("hello world".to_string()),
            TokenType::String(String::new()),
            TokenType::String("it".to_string()),
            TokenType::String("s".to_string()),
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }

    #[test]
    fn test_strings_with_escapes() {
        let input = r#""say \"hi\"\n\t\/ é 😀""#;
        let expected = vec![
            TokenType::String("say \"hi\"\n\t/ é 😀".to_string()),
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }

    #[test]
    fn test_invalid_escape() {
        let mut lexer = Lexer::new(r#""bad \q escape""#);
        let token = lexer.next_token();
        assert_eq!(token.ttype, TokenType::InvalidEscape("\\q".to_string()));
    }

    #[test]
    fn test_lone_surrogate_is_invalid() {
        let mut lexer = Lexer::new(r#""\ud83d""#);
        let token = lexer.next_token();
        assert!(matches!(token.ttype, TokenType::InvalidEscape(_)));
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new(r#""never closed"#);
        let token = lexer.next_token();
        assert_eq!(token.ttype, TokenType::UnterminatedString);
        assert_eq!(token.pos_start, 0);
    }

    #[test]
    fn test_comments_and_whitespace() {
        let input = " // line comment\n key: /* block */ 1";
        let mut lexer = Lexer::new(input);
        let token_types: Vec<TokenType> = lexer.lex().into_iter().map(|t| t.ttype).collect();

        let expected = vec![
            TokenType::Whitespace,
            TokenType::Comment("line comment".to_string()),
            TokenType::Whitespace,
            TokenType::Identifier("key".to_string()),
            TokenType::Colon,
            TokenType::Whitespace,
            TokenType::Comment("block".to_string()),
            TokenType::Whitespace,
            TokenType::Number(1.0),
            TokenType::Eof,
        ];

        assert_eq!(token_types, expected);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_tokens("/* open", vec![TokenType::UnterminatedComment, TokenType::Eof]);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let mut lexer = Lexer::new("\"é\" :");
        let tokens = lexer.lex();
        assert_eq!(tokens[0].pos_start, 0);
        assert_eq!(tokens[0].pos_end, 4);
        assert_eq!(tokens[2].ttype, TokenType::Colon);
        assert_eq!(tokens[2].pos_start, 5);
    }

    #[test]
    fn test_lingo_document() {
        let input = r#"
{
    "metadata": { "version": "1.0", "languages": ["en", "nl"] },
    "phrases": { "Hello {name}": { "nl": "Hallo {name}" } }
}
            "#;
        let expected = vec![
            TokenType::LBrace,
            TokenType::String("metadata".to_string()),
            TokenType::Colon,
            TokenType::LBrace,
            TokenType::String("version".to_string()),
            TokenType::Colon,
            TokenType::String("1.0".to_string()),
            TokenType::Comma,
            TokenType::String("languages".to_string()),
            TokenType::Colon,
            TokenType::LBracket,
            TokenType::String("en".to_string()),
            TokenType::Comma,
            TokenType::String("nl".to_string()),
            TokenType::RBracket,
            TokenType::RBrace,
            TokenType::Comma,
            TokenType::String("phrases".to_string()),
            TokenType::Colon,
            TokenType::LBrace,
            TokenType::String("Hello {name}".to_string()),
            TokenType::Colon,
            TokenType::LBrace,
            TokenType::String("nl".to_string()),
            TokenType::Colon,
            TokenType::String("Hallo {name}".to_string()),
            TokenType::RBrace,
            TokenType::RBrace,
            TokenType::RBrace,
            TokenType::Eof,
        ];
        assert_tokens(input, expected);
    }
}
