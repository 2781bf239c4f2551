//! Tokenizer for stdtest files.
//!
//! The tokenizer makes a single forward pass over a [`CharSource`] with one
//! character of pushback and produces the full token list, always terminated
//! by exactly one [`TokenType::Eof`] token.

use tracing::{debug, trace};

use crate::error::ScanError;
use crate::source::{CharSource, StrSource};
use crate::token::{Literal, Token, TokenType};

/// Tokenizer over a character source.
///
/// A tokenizer is one-shot: [`scan_tokens`](Self::scan_tokens) consumes it.
pub struct Tokenizer<S> {
    /// Source being tokenized.
    source: S,
    /// Number of characters consumed so far.
    position: usize,
    /// Tokens scanned so far.
    tokens: Vec<Token>,
}

impl<S: CharSource> Tokenizer<S> {
    /// Creates a new tokenizer for the given source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            position: 0,
            tokens: Vec::with_capacity(32),
        }
    }

    /// Scans the whole source into a token list ending in `Eof`.
    ///
    /// # Errors
    /// Returns the first scan error; no partial token list is returned.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScanError> {
        loop {
            let start = self.position;
            let Some(c) = self.read_next()? else {
                self.tokens.push(Token::eof(start));
                debug!(tokens = self.tokens.len(), "scan complete");
                return Ok(self.tokens);
            };

            let token = match c {
                ' ' | '\t' => continue,
                '\r' => {
                    self.skip_carriage_return(start)?;
                    continue;
                }
                '\n' => Token::new(TokenType::Newline, "\n", Literal::None, start),
                '\'' | '"' => self.scan_string(c, start)?,
                '-' => self.scan_assert(start)?,
                c if c.is_ascii_digit() => self.scan_number(c, start)?,
                c if is_identifier_start(c) => self.scan_identifier(c, start)?,
                character => {
                    return Err(ScanError::UnexpectedCharacter {
                        character,
                        position: start,
                    });
                }
            };

            trace!(position = token.position, kind = %token.token_type, lexeme = %token.lexeme, "token");
            self.tokens.push(token);
        }
    }

    /// Reads the next character, advancing the position.
    fn read_next(&mut self) -> Result<Option<char>, ScanError> {
        let next = self.source.read_char()?;
        if next.is_some() {
            self.position += 1;
        }
        Ok(next)
    }

    /// Pushes back the last character read, rewinding the position.
    fn unread(&mut self) -> Result<(), ScanError> {
        self.source.unread_char()?;
        self.position -= 1;
        Ok(())
    }

    /// Appends characters to `lexeme` while `accept` holds.
    ///
    /// The first rejected character is pushed back so it starts the next token.
    fn read_while(
        &mut self,
        lexeme: &mut String,
        accept: impl Fn(char) -> bool,
    ) -> Result<(), ScanError> {
        while let Some(c) = self.read_next()? {
            if !accept(c) {
                self.unread()?;
                break;
            }
            lexeme.push(c);
        }
        Ok(())
    }

    /// Skips a `\r` that is part of a `\r\n` line ending.
    fn skip_carriage_return(&mut self, start: usize) -> Result<(), ScanError> {
        match self.read_next()? {
            Some('\n') => self.unread(),
            _ => Err(ScanError::UnexpectedCharacter {
                character: '\r',
                position: start,
            }),
        }
    }

    /// Scans a quoted string. The opening quote has been consumed.
    fn scan_string(&mut self, quote: char, start: usize) -> Result<Token, ScanError> {
        let mut body = String::new();
        loop {
            match self.read_next()? {
                Some(c) if c == quote => break,
                Some(c) => body.push(c),
                None => {
                    return Err(ScanError::UnterminatedString {
                        quote,
                        position: start,
                    });
                }
            }
        }

        let lexeme = format!("{quote}{body}{quote}");
        Ok(Token::new(
            TokenType::String,
            lexeme,
            Literal::Str(body),
            start,
        ))
    }

    /// Scans a number. The first digit has been consumed.
    fn scan_number(&mut self, first: char, start: usize) -> Result<Token, ScanError> {
        let mut lexeme = String::from(first);
        self.read_while(&mut lexeme, |c| c.is_ascii_digit() || c == '.')?;

        // Digit runs too long for f64 overflow to infinity
        match lexeme.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                Ok(Token::new(TokenType::Number, lexeme, Literal::Num(n), start))
            }
            _ => Err(ScanError::InvalidNumber {
                lexeme,
                position: start,
            }),
        }
    }

    /// Scans an identifier. The first character has been consumed.
    fn scan_identifier(&mut self, first: char, start: usize) -> Result<Token, ScanError> {
        let mut lexeme = String::from(first);
        self.read_while(&mut lexeme, is_identifier_char)?;
        Ok(Token::new(TokenType::Identifier, lexeme, Literal::None, start))
    }

    /// Scans `->`. The `-` has been consumed.
    fn scan_assert(&mut self, start: usize) -> Result<Token, ScanError> {
        match self.read_next()? {
            Some('>') => Ok(Token::new(TokenType::Assert, "->", Literal::None, start)),
            found => Err(ScanError::InvalidToken {
                found,
                position: start,
            }),
        }
    }
}

/// Tokenizes an in-memory string.
///
/// # Errors
/// Returns the first scan error in the source.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    Tokenizer::new(StrSource::new(source)).scan_tokens()
}

/// Returns true if `c` can start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
