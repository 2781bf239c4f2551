//! Parser for stdtest files.
//!
//! The parser consumes a token list ending in `Eof` and produces one
//! [`TestCase`] per `command-call -> expected` statement:
//!
//! ```text
//! program     := (line)* EOF
//! line        := NEWLINE | commandCall ASSERT rhs
//! commandCall := IDENTIFIER (STRING | NUMBER)*
//! rhs         := commandCall | STRING | NUMBER
//! ```
//!
//! A command call waits on the [`OperandStack`] until the following `->`
//! resolves it into a test case.

use std::iter::Peekable;
use std::vec::IntoIter;

use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::expr::{CommandCallExpr, Expr, ExprType, TestCase};
use crate::token::{Literal, Token, TokenType};
use crate::tokenizer::tokenize;

/// An expression on the operand stack with the position it started at.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    /// The pending expression.
    pub expr: Expr,
    /// Position of the token that started it.
    pub position: usize,
}

/// Operand stack of the parser.
///
/// The grammar never leaves more than one pending command call, so the
/// depth stays at most 1 during a successful parse.
#[derive(Clone, Debug, Default)]
pub struct OperandStack {
    items: Vec<Operand>,
}

impl OperandStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Pushes an expression that started at `position`.
    pub fn push(&mut self, expr: Expr, position: usize) {
        self.items.push(Operand { expr, position });
    }

    /// Pops the top expression, which must have the `expected` tag.
    ///
    /// # Errors
    /// Returns `EmptyStack` if nothing is pending, or `ExpectedExpression`
    /// if the top has another tag. `at` is the position reported in both.
    pub fn pop_expecting(
        &mut self,
        expected: ExprType,
        at: usize,
    ) -> std::result::Result<Operand, ParseError> {
        let top = self
            .items
            .pop()
            .ok_or(ParseError::EmptyStack { position: at })?;

        let found = top.expr.expr_type();
        if found == expected {
            Ok(top)
        } else {
            Err(ParseError::ExpectedExpression {
                expected,
                found,
                position: at,
            })
        }
    }

    /// Pops the top expression, if any.
    pub fn pop(&mut self) -> Option<Operand> {
        self.items.pop()
    }

    /// Returns the top expression without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Operand> {
        self.items.last()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of pending expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Parser over a token list.
///
/// A parser is one-shot: [`parse`](Self::parse) consumes it.
pub struct Parser {
    /// Remaining tokens.
    tokens: Peekable<IntoIter<Token>>,
    /// Position reported when the token list runs out.
    eof_position: usize,
    /// Pending command calls.
    stack: OperandStack,
    /// Test cases parsed so far.
    test_cases: Vec<TestCase>,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    ///
    /// The list is expected to end in `Eof`, as produced by the tokenizer.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_position = tokens.last().map_or(0, |t| t.position);
        Self {
            tokens: tokens.into_iter().peekable(),
            eof_position,
            stack: OperandStack::new(),
            test_cases: Vec::new(),
        }
    }

    /// Parses all statements into test cases, in source order.
    ///
    /// # Errors
    /// Returns the first parse error; no partial result is returned.
    pub fn parse(mut self) -> std::result::Result<Vec<TestCase>, ParseError> {
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::Newline => {}
                TokenType::Identifier => {
                    if let Some(pending) = self.stack.pop() {
                        return Err(unterminated(pending));
                    }
                    let call = self.command_call(token.lexeme);
                    self.stack.push(Expr::CommandCall(call), token.position);
                }
                TokenType::Assert => {
                    let case = self.assert(token.position)?;
                    trace!(position = case.position, case = %case, "test case");
                    self.test_cases.push(case);
                }
                TokenType::String | TokenType::Number => {
                    return Err(ParseError::UnexpectedToken {
                        found: token.token_type,
                        lexeme: token.lexeme,
                        position: token.position,
                    });
                }
                TokenType::Eof => {
                    if let Some(pending) = self.stack.pop() {
                        return Err(unterminated(pending));
                    }
                    debug!(cases = self.test_cases.len(), "parse complete");
                    return Ok(self.test_cases);
                }
            }
        }
    }

    /// Collects the arguments following a command identifier.
    fn command_call(&mut self, command: String) -> CommandCallExpr {
        let mut args = Vec::new();
        while let Some(arg) = self.tokens.next_if(|t| t.token_type.is_literal()) {
            args.push(arg);
        }
        CommandCallExpr::new(command, args)
    }

    /// Resolves the pending command call against the right-hand side.
    fn assert(&mut self, position: usize) -> std::result::Result<TestCase, ParseError> {
        let operand = self.stack.pop_expecting(ExprType::CommandCall, position)?;
        let cmd = match operand.expr {
            Expr::CommandCall(call) => call,
            other => {
                return Err(ParseError::ExpectedExpression {
                    expected: ExprType::CommandCall,
                    found: other.expr_type(),
                    position,
                });
            }
        };

        let expected = self.rhs()?;
        Ok(TestCase {
            cmd,
            expected,
            position: operand.position,
        })
    }

    /// Parses the expected value after `->`.
    fn rhs(&mut self) -> std::result::Result<Expr, ParseError> {
        let token = self.advance();
        match (token.token_type, token.literal) {
            (TokenType::Identifier, _) => Ok(Expr::CommandCall(self.command_call(token.lexeme))),
            (TokenType::String, Literal::Str(s)) => Ok(Expr::String(s)),
            (TokenType::Number, Literal::Num(n)) => Ok(Expr::Number(n)),
            (found, _) => Err(ParseError::UnexpectedRhs {
                found,
                lexeme: token.lexeme,
                position: token.position,
            }),
        }
    }

    /// Takes the next token; a missing `Eof` is synthesized.
    fn advance(&mut self) -> Token {
        self.tokens
            .next()
            .unwrap_or_else(|| Token::eof(self.eof_position))
    }
}

fn unterminated(pending: Operand) -> ParseError {
    let command = match pending.expr {
        Expr::CommandCall(call) => call.command,
        other => other.to_string(),
    };
    ParseError::UnterminatedStatement {
        command,
        position: pending.position,
    }
}

/// Parses a token list into test cases.
///
/// # Errors
/// Returns the first parse error.
pub fn parse_tokens(tokens: Vec<Token>) -> std::result::Result<Vec<TestCase>, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses source text into test cases.
///
/// # Errors
/// Returns the first scan or parse error.
pub fn parse(source: &str) -> Result<Vec<TestCase>> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(tokens)?)
}
