//! Syntax highlighting for the REPL.

use std::borrow::Cow;

const RESET: &str = "\x1b[0m";
const COMMAND: &str = "\x1b[1;34m"; // bold blue
const STRING: &str = "\x1b[33m"; // yellow
const NUMBER: &str = "\x1b[35m"; // magenta
const ASSERT: &str = "\x1b[1;36m"; // bold cyan

/// Highlighter for stdtest statements.
///
/// Works on partial input, so it walks characters instead of running the
/// tokenizer, which rejects incomplete lines.
pub struct StdtestHighlighter;

impl StdtestHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '"' | '\'' => {
                    result.push_str(STRING);
                    result.push(c);
                    for next in chars.by_ref() {
                        result.push(next);
                        if next == c {
                            break;
                        }
                    }
                    result.push_str(RESET);
                }
                '-' if chars.peek() == Some(&'>') => {
                    chars.next();
                    result.push_str(ASSERT);
                    result.push_str("->");
                    result.push_str(RESET);
                }
                c if c.is_ascii_digit() => {
                    result.push_str(NUMBER);
                    result.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() || next == '.' {
                            result.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    result.push_str(RESET);
                }
                c if c.is_alphabetic() || c == '_' => {
                    result.push_str(COMMAND);
                    result.push(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_alphanumeric() || next == '-' || next == '_' {
                            result.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    result.push_str(RESET);
                }
                c => result.push(c),
            }
        }

        Cow::Owned(result)
    }
}

impl Default for StdtestHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
