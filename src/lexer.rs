use crate::ast::{Position, Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// What the lexer ran into when it gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char(ch) => write!(f, "'{}'", ch.escape_debug()),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Unrecognized character, unterminated string, empty digit run or
    /// unbalanced array/object literal
    #[error("Unexpected {found} at {position}")]
    IllegalToken { position: Position, found: Found },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::IllegalToken { position, .. } => *position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
    // Unmatched '(' seen so far. Inside an argument list '[' and '{' open
    // array/object literals instead of being punctuators.
    paren_depth: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
            paren_depth: 0,
            finished: false,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn here(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Error for whatever sits under the cursor right now.
    fn illegal(&self) -> LexError {
        LexError::IllegalToken {
            position: self.here(),
            found: self.current_char().map_or(Found::EndOfInput, Found::Char),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}' | ' ') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if is_identifier_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }
        self.text_from(start)
    }

    /// One or more ASCII digits.
    fn read_digits(&mut self) -> Result<(), LexError> {
        if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.illegal());
        }
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        Ok(())
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let start_pos = self.here();

        if self.current_char() == Some('-') {
            self.advance();
        }
        self.read_digits()?;

        if self.current_char() == Some('.') {
            self.advance();
            self.read_digits()?;
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.current_char(), Some('+' | '-')) {
                self.advance();
            }
            self.read_digits()?;
        }

        let text = self.text_from(start);

        // The digit runs are already checked, so this only rejects what JSON
        // forbids on top of them (leading zeros, out of range exponents).
        if serde_json::from_str::<serde_json::Number>(&text).is_err() {
            return Err(LexError::IllegalToken {
                position: start_pos,
                found: Found::Char(self.input[start]),
            });
        }

        Ok(Token::new(TokenKind::Number, text, start_pos))
    }

    /// Scan a string literal, keeping the quotes and escapes as written.
    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        self.advance(); // Consume opening quote

        loop {
            match self.current_char() {
                None => return Err(self.illegal()),
                Some('"') => {
                    self.advance();
                    return Ok(self.text_from(start));
                }
                Some('\\') => {
                    self.advance(); // Consume backslash
                    if self.current_char().is_none() {
                        return Err(self.illegal());
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Scan a balanced `[...]` or `{...}` literal as a single token.
    fn read_composite(&mut self) -> Result<Token, LexError> {
        let start = self.position;
        let start_pos = self.here();
        let kind = if self.current_char() == Some('[') {
            TokenKind::Array
        } else {
            TokenKind::Object
        };

        let mut closers: Vec<char> = Vec::new();

        loop {
            match self.current_char() {
                None => return Err(self.illegal()),
                Some('"') => {
                    self.read_string()?;
                }
                Some('[') => {
                    closers.push(']');
                    self.advance();
                }
                Some('{') => {
                    closers.push('}');
                    self.advance();
                }
                Some(ch @ (']' | '}')) => {
                    if closers.last() != Some(&ch) {
                        return Err(self.illegal());
                    }
                    closers.pop();
                    self.advance();
                    if closers.is_empty() {
                        break;
                    }
                }
                Some(_) => self.advance(),
            }
        }

        Ok(Token::new(kind, self.text_from(start), start_pos))
    }

    fn punctuator(&mut self, kind: TokenKind) -> Token {
        let start = self.position;
        let start_pos = self.here();
        self.advance();
        Token::new(kind, self.text_from(start), start_pos)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::new(TokenKind::End, "", self.here()),
            Some('{') | Some('[') if self.paren_depth > 0 => self.read_composite()?,
            Some('{') => self.punctuator(TokenKind::LBrace),
            Some('}') => self.punctuator(TokenKind::RBrace),
            Some('[') => self.punctuator(TokenKind::LBracket),
            Some(']') => self.punctuator(TokenKind::RBracket),
            Some('(') => {
                self.paren_depth += 1;
                self.punctuator(TokenKind::LParen)
            }
            Some(')') => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.punctuator(TokenKind::RParen)
            }
            Some('<') => self.punctuator(TokenKind::Lt),
            Some('>') => self.punctuator(TokenKind::Gt),
            Some(':') => self.punctuator(TokenKind::Colon),
            Some(',') => self.punctuator(TokenKind::Comma),
            Some('.') => self.punctuator(TokenKind::Period),
            Some('&') => self.punctuator(TokenKind::Amp),
            Some('"') => {
                let start_pos = self.here();
                let text = self.read_string()?;
                Token::new(TokenKind::String, text, start_pos)
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.read_number()?,
            Some(ch) if is_identifier_start(ch) => {
                let start_pos = self.here();
                let ident = self.read_identifier();

                let kind = match ident.as_str() {
                    "null" => TokenKind::Null,
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    _ => TokenKind::Identifier,
                };
                Token::new(kind, ident, start_pos)
            }
            Some(_) => return Err(self.illegal()),
        };

        log::trace!(
            "scanned {} {:?} at {}",
            token.kind,
            token.text,
            token.position
        );
        Ok(token)
    }
}

/// Yields every token up to and including the first `End`, or the first
/// error, then stops.
impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if !matches!(&result, Ok(token) if !token.is_end()) {
            self.finished = true;
        }
        Some(result)
    }
}

/// Scan a whole source string.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("null true false nullable");
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Null);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::True);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::False);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::End);
}

#[test]
fn test_call_expression() {
    let kinds: Vec<TokenKind> = tokenize("viewer.avatar(<size>) {}")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Period,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Lt,
            TokenKind::Identifier,
            TokenKind::Gt,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::End,
        ]
    );
}
