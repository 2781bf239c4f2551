//! Parser data model: expressions, command calls, and test cases.

use std::fmt;

use crate::token::Token;

/// Expression tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprType {
    /// A command invocation.
    CommandCall,
    /// The `->` separator.
    Assert,
    /// A string literal.
    String,
    /// A numeric literal.
    Number,
}

impl ExprType {
    /// Returns a human-readable name for this expression type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CommandCall => "CommandCall",
            Self::Assert => "Assert",
            Self::String => "String",
            Self::Number => "Number",
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single invocation like `echo "hi" 3`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandCallExpr {
    /// The command identifier.
    pub command: String,
    /// String and number arguments in source order.
    pub args: Vec<Token>,
}

impl CommandCallExpr {
    /// Creates a new command call.
    #[must_use]
    pub fn new(command: impl Into<String>, args: Vec<Token>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl fmt::Display for CommandCallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg.lexeme)?;
        }
        f.write_str(")")
    }
}

/// Tagged parser expression.
///
/// Lives on the parser's operand stack and as the expected side of a
/// [`TestCase`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A command invocation.
    CommandCall(CommandCallExpr),
    /// A `->` marker. The parser never produces one as an expected value.
    Assert {
        /// Position of the `->`.
        position: usize,
    },
    /// A decoded string literal.
    String(String),
    /// A decoded numeric literal.
    Number(f64),
}

impl Expr {
    /// Returns the tag of this expression.
    #[must_use]
    pub const fn expr_type(&self) -> ExprType {
        match self {
            Self::CommandCall(_) => ExprType::CommandCall,
            Self::Assert { .. } => ExprType::Assert,
            Self::String(_) => ExprType::String,
            Self::Number(_) => ExprType::Number,
        }
    }

    /// Returns the command call, if this is one.
    #[must_use]
    pub const fn as_command_call(&self) -> Option<&CommandCallExpr> {
        match self {
            Self::CommandCall(call) => Some(call),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number literal.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandCall(call) => write!(f, "{call}"),
            Self::Assert { .. } => f.write_str("->"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One complete `command-call -> expected` statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestCase {
    /// The invocation under test.
    pub cmd: CommandCallExpr,
    /// The expected result: a nested command call or a literal.
    pub expected: Expr,
    /// Position of the command identifier.
    pub position: usize,
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.cmd, self.expected)
    }
}
