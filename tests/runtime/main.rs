//! Integration tests for the runtime layer
//!
//! Tests for loading, diagnostics, serialization, and argument parsing.

mod cli;
mod diagnostic;
mod loader;
mod serialize;
