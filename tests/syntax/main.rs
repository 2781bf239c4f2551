//! Integration tests for the syntax layer
//!
//! Tests for the tokenizer, the parser, and end-to-end scenarios.

mod parser;
mod tokenizer;
