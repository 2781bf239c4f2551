//! Error types for stdtest.
//!
//! Uses `thiserror` for ergonomic error definition. Each stage has its own
//! typed error ([`ScanError`], [`ParseError`]); [`Error`] wraps either one
//! together with the plumbing failures of the outer layers.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::expr::ExprType;
use crate::token::TokenType;

/// Errors produced by the tokenizer.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A quoted string reached end of input before its closing quote.
    #[error("unterminated string starting at {position}: missing closing {quote}")]
    UnterminatedString {
        /// The opening quote character.
        quote: char,
        /// Position of the opening quote.
        position: usize,
    },

    /// A digit run did not form a valid numeral.
    #[error("invalid number `{lexeme}` at {position}")]
    InvalidNumber {
        /// The offending digit run.
        lexeme: String,
        /// Position of the first digit.
        position: usize,
    },

    /// A character that cannot start any token.
    #[error("unexpected character {character:?} at {position}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Position of the character.
        position: usize,
    },

    /// A `-` not followed by `>`.
    #[error("invalid token `-` at {position}: expected `->`, found {}", describe_found(.found))]
    InvalidToken {
        /// The character after the `-`, or `None` at end of input.
        found: Option<char>,
        /// Position of the `-`.
        position: usize,
    },

    /// The character source failed.
    #[error("failed to read source: {0}")]
    Source(#[from] io::Error),
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_string(),
    }
}

impl ScanError {
    /// Returns the source position this error refers to, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString { position, .. }
            | Self::InvalidNumber { position, .. }
            | Self::UnexpectedCharacter { position, .. }
            | Self::InvalidToken { position, .. } => Some(*position),
            Self::Source(_) => None,
        }
    }
}

/// Errors produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `->` with nothing on its left-hand side.
    #[error("`->` at {position} has no command call on its left-hand side")]
    EmptyStack {
        /// Position of the `->`.
        position: usize,
    },

    /// The pending expression has the wrong type.
    #[error("expected {expected} expression at {position}, found {found}")]
    ExpectedExpression {
        /// The expected expression type.
        expected: ExprType,
        /// The expression type actually found.
        found: ExprType,
        /// Position of the token that required the expression.
        position: usize,
    },

    /// The token after `->` cannot be an expected value.
    #[error("unexpected {found} `{lexeme}` at {position} on the right-hand side of `->`")]
    UnexpectedRhs {
        /// Type of the offending token.
        found: TokenType,
        /// Text of the offending token.
        lexeme: String,
        /// Position of the offending token.
        position: usize,
    },

    /// A token that cannot start a statement.
    #[error("unexpected {found} `{lexeme}` at {position}")]
    UnexpectedToken {
        /// Type of the offending token.
        found: TokenType,
        /// Text of the offending token.
        lexeme: String,
        /// Position of the offending token.
        position: usize,
    },

    /// A command call never followed by `->`.
    #[error("command call `{command}` at {position} is not followed by `->`")]
    UnterminatedStatement {
        /// Name of the dangling command.
        command: String,
        /// Position of the command identifier.
        position: usize,
    },
}

impl ParseError {
    /// Returns the source position this error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::EmptyStack { position }
            | Self::ExpectedExpression { position, .. }
            | Self::UnexpectedRhs { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnterminatedStatement { position, .. } => *position,
        }
    }
}

/// The main error type for stdtest operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoError(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the source position this error refers to, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match &self.kind {
            ErrorKind::Scan(e) => e.position(),
            ErrorKind::Parse(e) => Some(e.position()),
            ErrorKind::IoError(_) | ErrorKind::SerializationError(_) | ErrorKind::Internal(_) => {
                None
            }
        }
    }
}

impl From<ScanError> for Error {
    fn from(e: ScanError) -> Self {
        Self::new(ErrorKind::Scan(e))
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::new(ErrorKind::Parse(e))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Tokenizer failure.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Parser failure.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// File system failure.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Suite (de)serialization failure.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file path or other origin label.
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<u32>,
    /// Column number in source (1-indexed).
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source origin.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub const fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for stdtest operations.
pub type Result<T> = std::result::Result<T, Error>;
