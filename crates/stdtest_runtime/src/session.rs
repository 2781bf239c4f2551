//! Session state for the REPL.
//!
//! The session accumulates the test cases entered or loaded so far and the
//! command names seen in them.

use std::collections::BTreeSet;

use stdtest_syntax::{Expr, TestCase};

use crate::loader::Suite;

/// Session state for an interactive REPL session.
#[derive(Debug, Default)]
pub struct Session {
    /// Test cases in the order they were entered.
    cases: Vec<TestCase>,

    /// Command names seen on either side of `->`.
    commands: BTreeSet<String>,

    /// Whether to print tokens for each input.
    echo_tokens: bool,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds test cases, recording their command names.
    pub fn add_cases(&mut self, cases: impl IntoIterator<Item = TestCase>) {
        for case in cases {
            self.commands.insert(case.cmd.command.clone());
            if let Expr::CommandCall(call) = &case.expected {
                self.commands.insert(call.command.clone());
            }
            self.cases.push(case);
        }
    }

    /// Adds every test case of a loaded suite.
    pub fn add_suite(&mut self, suite: Suite) {
        self.add_cases(suite.cases);
    }

    /// Returns the accumulated test cases.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Returns the command names seen so far, sorted.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    /// Removes all test cases and command names.
    pub fn clear(&mut self) {
        self.cases.clear();
        self.commands.clear();
    }

    /// Returns whether tokens are echoed.
    #[must_use]
    pub const fn echo_tokens(&self) -> bool {
        self.echo_tokens
    }

    /// Toggles token echo, returning the new setting.
    pub fn toggle_echo_tokens(&mut self) -> bool {
        self.echo_tokens = !self.echo_tokens;
        self.echo_tokens
    }

    /// Packs the session's test cases into a suite.
    #[must_use]
    pub fn to_suite(&self, origin: impl Into<String>) -> Suite {
        Suite {
            origin: origin.into(),
            tokens: Vec::new(),
            cases: self.cases.clone(),
        }
    }
}
