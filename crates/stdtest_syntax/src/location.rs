//! Line/column lookup for diagnostics.
//!
//! Tokens and errors carry a 0-based character offset. When the source text
//! is at hand, [`Location::of`] turns that offset into a 1-based line and
//! column for error reporting.

use std::fmt;

/// A 1-based line and column in source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, counted in characters.
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Locates a character offset in `source`.
    ///
    /// Offsets past the end map to the position just after the last character.
    #[must_use]
    pub fn of(source: &str, position: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for c in source.chars().take(position) {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns the line of `source` containing the character offset `position`,
/// without its line terminator.
#[must_use]
pub fn context_line(source: &str, position: usize) -> &str {
    let start = source
        .char_indices()
        .nth(position)
        .map_or(source.len(), |(i, _)| i);
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);

    source[line_start..line_end].trim_end_matches('\r')
}
