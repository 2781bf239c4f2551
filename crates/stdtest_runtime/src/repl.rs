//! The interactive REPL.
//!
//! Each input is tokenized and parsed as stdtest source; the resulting test
//! cases are printed and added to the [`Session`]. Lines starting with `:`
//! are meta commands.

use crate::diagnostic::Diagnostic;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::loader::{self, EXTENSION, Suite};
use crate::serialize;
use crate::session::Session;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use stdtest_syntax::{Error, Result, ScanError, TokenType, tokenize};
use tracing::debug;

/// Origin label for input typed at the prompt.
const REPL_ORIGIN: &str = "<repl>";

/// Meta commands understood by the REPL.
pub const META_COMMANDS: &[&str] = &[
    ":help", ":tokens", ":cases", ":clear", ":load", ":save", ":quit",
];

/// Returns true if the input forms complete statements.
///
/// Input is incomplete while a quote is open or while the last token is
/// `->`. Any other error is left for evaluation to report.
#[must_use]
pub fn is_complete(input: &str) -> bool {
    if input.trim_start().starts_with(':') {
        return true;
    }
    match tokenize(input) {
        Ok(tokens) => tokens
            .iter()
            .rev()
            .find(|t| !matches!(t.token_type, TokenType::Newline | TokenType::Eof))
            .is_none_or(|t| !t.is(TokenType::Assert)),
        Err(ScanError::UnterminatedString { .. }) => false,
        Err(_) => true,
    }
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Accumulated test cases.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "stdtest> ".to_string(),
            continuation_prompt: "     ..> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until `:quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e, None),
            }
            let keywords = self.session.commands().map(String::from).collect();
            self.editor.set_keywords(keywords);
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false);
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        if trimmed.starts_with(':') {
            return self.meta(trimmed);
        }

        match self.eval(&input) {
            Ok(suite) => {
                if self.session.echo_tokens() {
                    for token in &suite.tokens {
                        println!("  {token}");
                    }
                }
                for case in &suite.cases {
                    println!("\x1b[1m{case}\x1b[0m");
                }
            }
            Err(e) => print_error(&e, Some(&input)),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let read = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match read {
                ReadResult::Line(line) => {
                    if first_line {
                        input = line;
                    } else {
                        input.push('\n');
                        input.push_str(&line);
                    }

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::internal("unexpected EOF in multi-line input"));
                }
            }
        }
    }

    /// Parses input and adds its test cases to the session.
    ///
    /// # Errors
    ///
    /// Returns the first scan or parse error in the input.
    pub fn eval(&mut self, input: &str) -> Result<Suite> {
        let suite = loader::load_str(REPL_ORIGIN, input)?;
        self.session.add_cases(suite.cases.iter().cloned());
        Ok(suite)
    }

    /// Loads a file into the session, returning the number of test cases.
    ///
    /// A path without the stdtest extension that does not exist is retried
    /// with the extension added.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be found, read, or parsed.
    pub fn load_file(&mut self, path: &str) -> Result<usize> {
        let path = resolve(path)?;
        let suite = loader::load_file(&path)?;
        let count = suite.len();
        self.session.add_suite(suite);
        Ok(count)
    }

    /// Saves the session's test cases to a `MessagePack` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_file(&self, path: &str) -> Result<usize> {
        let suite = self.session.to_suite(path);
        serialize::save_to_file(&suite, path)?;
        Ok(suite.len())
    }

    /// Handles a meta command.
    ///
    /// Returns `Ok(false)` when the REPL should exit.
    fn meta(&mut self, line: &str) -> Result<bool> {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        debug!(command, arg, "meta command");

        match command {
            ":help" => print_help(),
            ":tokens" => {
                let on = self.session.toggle_echo_tokens();
                println!("token echo {}", if on { "on" } else { "off" });
            }
            ":cases" => {
                if self.session.cases().is_empty() {
                    println!("no test cases");
                }
                for (i, case) in self.session.cases().iter().enumerate() {
                    println!("{:>4}. {case}", i + 1);
                }
            }
            ":clear" => {
                self.session.clear();
                println!("session cleared");
            }
            ":load" => {
                let path = required(arg, ":load <path>")?;
                let count = self.load_file(path)?;
                println!("loaded {count} test case(s) from {path}");
            }
            ":save" => {
                let path = required(arg, ":save <path>")?;
                let count = self.save_file(path)?;
                println!("saved {count} test case(s) to {path}");
            }
            ":quit" => return Ok(false),
            other => {
                return Err(Error::internal(format!(
                    "unknown command `{other}`; try :help"
                )));
            }
        }

        Ok(true)
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mstdtest\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Type `command args -> expected` statements. :help for commands, Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

fn required<'a>(arg: &'a str, usage: &str) -> Result<&'a str> {
    if arg.is_empty() {
        Err(Error::internal(format!("usage: {usage}")))
    } else {
        Ok(arg)
    }
}

fn resolve(path: &str) -> Result<PathBuf> {
    let given = Path::new(path);
    if given.exists() {
        return Ok(given.to_path_buf());
    }
    if !loader::has_stdtest_extension(given) {
        let with_ext = given.with_extension(EXTENSION);
        if with_ext.exists() {
            return Ok(with_ext);
        }
    }
    Err(Error::io(format!("file not found: {path}")))
}

/// Prints an error to stderr, with source context when available.
fn print_error(error: &Error, source: Option<&str>) {
    eprintln!("\x1b[31m{}\x1b[0m", Diagnostic::render(error, source));
}

fn print_help() {
    println!("Statements:");
    println!("  command arg... -> expected     add a test case");
    println!();
    println!("Commands:");
    println!("  :help            show this help");
    println!("  :tokens          toggle printing tokens for each input");
    println!("  :cases           list the test cases entered so far");
    println!("  :clear           forget all test cases");
    println!("  :load <path>     load test cases from a file");
    println!("  :save <path>     save test cases as MessagePack");
    println!("  :quit            exit");
}
