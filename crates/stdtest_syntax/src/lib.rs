//! Tokenizer and parser for stdtest command-behavior test files.
//!
//! A stdtest file holds statements of the form `command arg1 arg2 -> expected`,
//! where `expected` is a literal or another command call. This crate provides:
//! - [`Tokenizer`] - Turns a [`CharSource`] into a flat [`Token`] list
//! - [`Parser`] - Turns a token list into [`TestCase`] records
//! - [`Error`] - Typed scan and parse errors with positions
//! - [`Location`] - Line/column lookup for diagnostics
//!
//! ```
//! let cases = stdtest_syntax::parse("add 2 3 -> sum 5").unwrap();
//! assert_eq!(cases[0].cmd.command, "add");
//! assert_eq!(cases[0].to_string(), "(add 2 3) -> (sum 5)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod expr;
pub mod location;
pub mod parser;
pub mod source;
pub mod token;
pub mod tokenizer;


pub use error::{Error, ErrorContext, ErrorKind, ParseError, Result, ScanError};
pub use expr::{CommandCallExpr, Expr, ExprType, TestCase};
pub use location::{Location, context_line};
pub use parser::{Operand, OperandStack, Parser, parse, parse_tokens};
pub use source::{CharSource, LineTracker, ReaderSource, StrSource};
pub use token::{Literal, Token, TokenType};
pub use tokenizer::{Tokenizer, tokenize};
