use std::fmt;

/// Location of a token or diagnostic in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with columns
/// counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Returned again on every call past the end.
    End,

    // Punctuators
    /// Opens a field body
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// Opens an argument list
    LParen,
    RParen,

    /// Opens a named parameter
    ///
    /// # Examples
    /// ```text
    /// <size>
    /// ```
    Lt,
    Gt,
    Colon,
    Comma,

    /// Introduces a call expression
    ///
    /// # Examples
    /// ```text
    /// viewer.avatar(64) {}
    /// ```
    Period,

    /// Positional reference marker emitted by the template assembler
    ///
    /// # Examples
    /// ```text
    /// &0
    /// &12
    /// ```
    Amp,

    // Literals
    /// JSON number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1.5
    /// 6.02e23
    /// ```
    Number,

    /// Double-quoted JSON string
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "say \"hi\""
    /// ```
    String,

    /// Bracketed JSON array, only inside an argument list
    ///
    /// # Examples
    /// ```text
    /// [1, 2, "three"]
    /// ```
    Array,

    /// Braced JSON object, only inside an argument list
    ///
    /// # Examples
    /// ```text
    /// {"first": 10, "after": "abc"}
    /// ```
    Object,

    /// Field, callee or parameter name
    ///
    /// Starts with a letter, `_` or `$`, followed by letters, digits, `_` or `$`.
    Identifier,

    // Keywords
    Null,
    True,
    False,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::End => "<end>",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Period => "'.'",
            TokenKind::Amp => "'&'",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Array => "array",
            TokenKind::Object => "object",
            TokenKind::Identifier => "identifier",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
        }
    }

    /// Kinds that the parser turns into `Argument::Literal`.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Array
                | TokenKind::Object
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single scanned token.
///
/// `text` is the raw source slice, so literal tokens keep their exact
/// spelling (`"a\"b"`, `1e3`) for later decoding. It is empty for `End`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
