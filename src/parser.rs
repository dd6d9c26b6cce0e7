use crate::{
    ast::{Argument, CallExpression, Field, Literal, Position, Query, Token, TokenKind},
    lexer::{LexError, Lexer},
};
use std::mem;
use thiserror::Error;

/// Nesting depth allowed when no limit is configured explicitly.
pub const DEFAULT_MAX_DEPTH: u32 = 256;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Unexpected {found} at {position}")]
    UnexpectedToken { position: Position, found: TokenKind },

    /// A literal token whose text is not valid JSON
    #[error("Invalid literal {raw} at {position}: {source}")]
    LiteralDecode {
        position: Position,
        raw: String,
        source: serde_json::Error,
    },

    /// `&` followed by a number that is not a usable index
    #[error("Invalid positional reference &{raw} at {position}")]
    InvalidPositional { position: Position, raw: String },

    #[error("Fields nested deeper than {limit} at {position}")]
    RecursionLimit { position: Position, limit: u32 },
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalToken,
    UnexpectedToken,
    LiteralDecodeFailure,
    RecursionLimit,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lex(LexError::IllegalToken { .. }) => ErrorKind::IllegalToken,
            ParseError::UnexpectedToken { .. } | ParseError::InvalidPositional { .. } => {
                ErrorKind::UnexpectedToken
            }
            ParseError::LiteralDecode { .. } => ErrorKind::LiteralDecodeFailure,
            ParseError::RecursionLimit { .. } => ErrorKind::RecursionLimit,
        }
    }

    /// Where parsing stopped.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::LiteralDecode { position, .. }
            | ParseError::InvalidPositional { position, .. }
            | ParseError::RecursionLimit { position, .. } => *position,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    depth: u32,
    max_depth: Option<u32>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        })
    }

    /// Limit how deeply fields may nest. `None` removes the limit.
    pub fn with_max_depth(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> Result<Option<Token>, ParseError> {
        if self.check(kind) {
            self.advance().map(Some)
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.eat(kind)? {
            Some(token) => Ok(token),
            None => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            position: self.current_token.position,
            found: self.current_token.kind,
        }
    }

    /// Parse a complete query: one root field followed by end of input.
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let field = self.parse_field()?;
        self.expect(TokenKind::End)?;

        log::debug!(
            "parsed query `{}` with {} call(s) and {} sub-selection(s)",
            field.name,
            field.calls.len(),
            field.fields.len()
        );
        Ok(Query { field })
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Identifier)?.text)
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        if let Some(limit) = self.max_depth.filter(|&limit| self.depth >= limit) {
            return Err(ParseError::RecursionLimit {
                position: self.current_token.position,
                limit,
            });
        }

        self.depth += 1;
        let name = self.parse_identifier()?;
        let arguments = if self.check(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            vec![]
        };
        let calls = self.parse_call_expressions()?;
        let fields = self.parse_field_body()?;
        self.depth -= 1;

        Ok(Field {
            name,
            arguments,
            calls,
            fields,
        })
    }

    fn parse_call_expressions(&mut self) -> Result<Vec<CallExpression>, ParseError> {
        let mut calls = vec![];

        while self.check(TokenKind::Period) {
            calls.push(self.parse_call_expression()?);
        }

        Ok(calls)
    }

    fn parse_call_expression(&mut self) -> Result<CallExpression, ParseError> {
        self.expect(TokenKind::Period)?;

        let callee = self.parse_identifier()?;
        let arguments = self.parse_arguments()?;

        Ok(CallExpression { callee, arguments })
    }

    fn parse_arguments(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut arguments = vec![];

        self.expect(TokenKind::LParen)?;

        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.parse_argument()?);
                // A comma commits to another argument, so `(1,)` fails at ')'
                if self.eat(TokenKind::Comma)?.is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;

        Ok(arguments)
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        match self.current_token.kind {
            kind if kind.is_literal() => self.parse_literal(),
            TokenKind::Lt => self.parse_parameter(),
            TokenKind::Amp => self.parse_positional(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_literal(&mut self) -> Result<Argument, ParseError> {
        let token = self.advance()?;

        Literal::from_raw(token.text.as_str())
            .map(Argument::Literal)
            .map_err(|source| ParseError::LiteralDecode {
                position: token.position,
                raw: token.text,
                source,
            })
    }

    fn parse_parameter(&mut self) -> Result<Argument, ParseError> {
        self.expect(TokenKind::Lt)?;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::Gt)?;

        Ok(Argument::Parameter { name })
    }

    fn parse_positional(&mut self) -> Result<Argument, ParseError> {
        self.expect(TokenKind::Amp)?;
        let token = self.expect(TokenKind::Number)?;

        // Only plain non-negative integers are indices: no sign, fraction or exponent
        let index = if token.text.bytes().all(|b| b.is_ascii_digit()) {
            token.text.parse::<usize>().ok()
        } else {
            None
        };

        match index {
            Some(index) => Ok(Argument::Positional { index }),
            None => Err(ParseError::InvalidPositional {
                position: token.position,
                raw: token.text,
            }),
        }
    }

    fn parse_field_body(&mut self) -> Result<Vec<Field>, ParseError> {
        let mut fields = vec![];

        self.expect(TokenKind::LBrace)?;

        while self.eat(TokenKind::RBrace)?.is_none() {
            fields.push(self.parse_field()?);
            if !self.check(TokenKind::RBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }

        Ok(fields)
    }
}

/// Parse a query source string.
///
/// # Examples
/// ```
/// use graphql_tag::parse;
///
/// let query = parse("viewer { id {}, name {} }").unwrap();
/// assert_eq!(query.field.name, "viewer");
/// assert_eq!(query.field.fields.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<Query, ParseError> {
    Parser::new(Lexer::new(source))?.parse_query()
}
