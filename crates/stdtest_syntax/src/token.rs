//! Token types for stdtest files.
//!
//! Tokens are the output of the tokenizer and input to the parser. Both
//! stages share the single [`TokenType`] enumeration defined here.

use std::fmt;

/// The closed set of token types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    /// Command name like `echo` or `list-files`
    Identifier,
    /// Quoted string like `"hi"` or `'hi'`
    String,
    /// Numeric literal like `42` or `3.5`
    Number,
    /// `->`
    Assert,
    /// Line feed, a statement separator
    Newline,
    /// End of input
    Eof,
}

impl TokenType {
    /// Returns the display name of this token type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Assert => "ASSERT",
            Self::Newline => "NEWLINE",
            Self::Eof => "EOF",
        }
    }

    /// Returns true for token types that carry a decoded literal.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::String | Self::Number)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded value of a token.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// No decoded value (identifiers, separators).
    #[default]
    None,
    /// Unquoted string body.
    Str(String),
    /// Parsed numeral.
    Num(f64),
}

impl Literal {
    /// Returns the string body, if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric literal.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if there is no decoded value.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The type of this token.
    pub token_type: TokenType,
    /// Exact source text this token covers.
    pub lexeme: String,
    /// Decoded value for strings and numbers.
    pub literal: Literal,
    /// 0-based character offset of the first character.
    pub position: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        token_type: TokenType,
        lexeme: impl Into<String>,
        literal: Literal,
        position: usize,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal,
            position,
        }
    }

    /// Creates the end-of-input token.
    #[must_use]
    pub fn eof(position: usize) -> Self {
        Self::new(TokenType::Eof, "", Literal::None, position)
    }

    /// Returns true if this token is of the given type.
    #[must_use]
    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {:?} :at {}}}",
            self.token_type, self.lexeme, self.position
        )
    }
}
