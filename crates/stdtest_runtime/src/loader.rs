//! Loading stdtest suites from files, readers, and strings.
//!
//! Loading runs the whole front end: text is tokenized, the tokens are
//! parsed, and both are kept in a [`Suite`]. Errors carry an
//! [`ErrorContext`] naming the origin and the line and column of the
//! failure.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stdtest_syntax::{
    Error, ErrorContext, LineTracker, Location, ReaderSource, Result, TestCase, Token, Tokenizer,
    parse_tokens, tokenize,
};
use tracing::{debug, info};

/// File loaded when no path is given.
pub const DEFAULT_FILE: &str = ".stdtest";

/// Conventional extension of stdtest files.
pub const EXTENSION: &str = "stdtest";

/// Origin label used for standard input.
pub const STDIN_ORIGIN: &str = "<stdin>";

/// A tokenized and parsed stdtest source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// File path or other label the source came from.
    pub origin: String,
    /// Full token list, ending in `Eof`.
    pub tokens: Vec<Token>,
    /// Test cases in source order.
    pub cases: Vec<TestCase>,
}

impl Suite {
    /// Returns the number of test cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if the suite holds no test cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Loads a suite from in-memory text.
///
/// # Errors
///
/// Returns the first scan or parse error, located by line and column.
pub fn load_str(origin: impl Into<String>, text: &str) -> Result<Suite> {
    let origin = origin.into();
    let tokens = tokenize(text).map_err(|e| locate(e.into(), &origin, text))?;
    let cases = parse_tokens(tokens.clone()).map_err(|e| locate(e.into(), &origin, text))?;

    info!(origin = %origin, tokens = tokens.len(), cases = cases.len(), "loaded suite");
    Ok(Suite {
        origin,
        tokens,
        cases,
    })
}

/// Reads a source file into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading source");
    fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}: {e}", path.display())))
}

/// Loads a suite from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or the first scan or parse
/// error in it.
pub fn load_file(path: &Path) -> Result<Suite> {
    let text = read_source(path)?;
    load_str(path.display().to_string(), &text)
}

/// Loads a suite by streaming characters from a reader.
///
/// The text is never held in memory. Line starts are recorded as the
/// characters stream past, so errors are located like those of
/// [`load_str`].
///
/// # Errors
///
/// Returns the first read, scan, or parse error.
pub fn load_reader(origin: impl Into<String>, reader: impl BufRead) -> Result<Suite> {
    let origin = origin.into();
    let mut tracker = LineTracker::new(ReaderSource::new(reader));
    let locate = |error: Error, tracker: &LineTracker<_>| {
        let mut context = ErrorContext::new().with_source(origin.clone());
        if let Some(position) = error.position() {
            let location = tracker.location(position);
            context = context.with_position(location.line, location.column);
        }
        error.with_context(context)
    };

    let tokens = Tokenizer::new(&mut tracker)
        .scan_tokens()
        .map_err(|e| locate(e.into(), &tracker))?;
    let cases = parse_tokens(tokens.clone()).map_err(|e| locate(e.into(), &tracker))?;

    info!(origin = %origin, tokens = tokens.len(), cases = cases.len(), "loaded suite");
    Ok(Suite {
        origin,
        tokens,
        cases,
    })
}

/// Returns true if the path has the stdtest extension.
#[must_use]
pub fn has_stdtest_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION))
        || path.file_name().is_some_and(|name| name == DEFAULT_FILE)
}

fn locate(error: Error, origin: &str, text: &str) -> Error {
    let mut context = ErrorContext::new().with_source(origin);
    if let Some(position) = error.position() {
        let location = Location::of(text, position);
        context = context.with_position(location.line, location.column);
    }
    error.with_context(context)
}
