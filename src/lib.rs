//! stdtest - Tokenizer and parser for the stdtest command-behavior test language
//!
//! This crate re-exports both layers of the stdtest system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: stdtest_runtime  - File loading, diagnostics, serialization, REPL, CLI
//! Layer 0: stdtest_syntax   - Tokens, tokenizer, parser, errors
//! ```

pub use stdtest_runtime as runtime;
pub use stdtest_syntax as syntax;
