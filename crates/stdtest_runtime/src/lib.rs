//! File loading, diagnostics, serialization, and the interactive front end
//! for stdtest.
//!
//! This crate provides:
//! - [`loader`] - Reading `.stdtest` sources into a [`Suite`]
//! - [`Diagnostic`] - Rendering errors with source context
//! - [`serialize`] - `MessagePack` interchange of parsed suites
//! - [`Repl`] - Interactive read-parse-print loop
//! - [`cli`] - Command-line configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod diagnostic;
pub mod editor;
pub mod highlight;
pub mod loader;
pub mod repl;
pub mod serialize;
pub mod session;

pub use cli::{CliConfig, CliError, Input, OutputMode, parse_args};
pub use diagnostic::Diagnostic;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::StdtestHighlighter;
pub use loader::{Suite, load_file, load_reader, load_str};
pub use repl::{Repl, is_complete};
pub use session::Session;
