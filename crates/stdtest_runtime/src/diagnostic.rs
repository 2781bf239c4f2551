//! Rendering errors for humans.
//!
//! A [`Diagnostic`] prints the error message, the origin with line and
//! column, and, when the source text is available, the offending line with a
//! caret under the failing character:
//!
//! ```text
//! error: parse error: unexpected ASSERT `->` at 14 on the right-hand side of `->`
//!   --> cases.stdtest:2:8
//!    |
//!  2 | bad -> -> x
//!    |        ^
//! ```

use std::fmt;

use stdtest_syntax::{Error, Location, context_line};

/// An error prepared for display.
pub struct Diagnostic<'a> {
    error: &'a Error,
    source: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Creates a diagnostic for the given error.
    #[must_use]
    pub const fn new(error: &'a Error) -> Self {
        Self {
            error,
            source: None,
        }
    }

    /// Attaches the source text the error was found in.
    #[must_use]
    pub const fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    /// Renders the diagnostic to a string.
    #[must_use]
    pub fn render(error: &Error, source: Option<&str>) -> String {
        let diagnostic = Diagnostic { error, source };
        diagnostic.to_string()
    }

    /// Returns the location of the error, from its context or the source text.
    fn location(&self) -> Option<Location> {
        let context = self.error.context.as_ref();
        if let Some((line, column)) = context.and_then(|c| c.line.zip(c.column)) {
            return Some(Location::new(line, column));
        }
        let position = self.error.position()?;
        self.source.map(|source| Location::of(source, position))
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.error)?;

        let origin = self
            .error
            .context
            .as_ref()
            .and_then(|c| c.source.as_deref());
        let location = self.location();

        match (origin, location) {
            (Some(origin), Some(location)) => write!(f, "\n  --> {origin}:{location}")?,
            (Some(origin), None) => write!(f, "\n  --> {origin}")?,
            (None, Some(location)) => write!(f, "\n  --> {location}")?,
            (None, None) => return Ok(()),
        }

        let (Some(source), Some(position), Some(location)) =
            (self.source, self.error.position(), location)
        else {
            return Ok(());
        };

        let line = context_line(source, position);
        let number = location.line.to_string();
        let gutter = " ".repeat(number.len());
        // Tabs are kept so the caret lines up with the source line.
        let padding: String = line
            .chars()
            .take(location.column.saturating_sub(1) as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();

        write!(f, "\n {gutter} |")?;
        write!(f, "\n {number} | {line}")?;
        write!(f, "\n {gutter} | {padding}^")
    }
}
