//! Line input for the REPL.
//!
//! A statement that ends in `->` or leaves a quote open keeps reading on the
//! next line. Tab completes command names seen earlier in the session, meta
//! commands, and file paths after `:load` and `:save`.

use crate::highlight::StdtestHighlighter;
use crate::repl::{META_COMMANDS, is_complete};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator as RLValidator};
use std::borrow::Cow;
use stdtest_syntax::{Error, Result};

/// Outcome of prompting for one line.
#[derive(Debug)]
pub enum ReadResult {
    /// The text entered.
    Line(String),
    /// Ctrl+C; the pending statement is dropped.
    Interrupted,
    /// Ctrl+D or end of piped input; the REPL exits.
    Eof,
}

/// Source of REPL input lines.
///
/// [`RustylineEditor`] reads the terminal; tests feed scripted lines.
pub trait LineEditor {
    /// Prompts for the first line of a statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Prompts for the next line of a statement still waiting for its
    /// right-hand side or closing quote.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Records a finished statement or meta command in history.
    fn add_history(&mut self, line: &str);

    /// Replaces the command names offered by tab completion.
    fn set_keywords(&mut self, keywords: Vec<String>);
}

/// Rustyline helper wiring stdtest completion, highlighting, and continuation.
#[derive(Helper, Completer, Hinter, RLValidator)]
struct StdtestHelper {
    #[rustyline(Completer)]
    completer: CommandCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    #[rustyline(Validator)]
    validator: StatementValidator,
    highlighter: StdtestHighlighter,
}

impl Highlighter for StdtestHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') {
            return Cow::Borrowed(line);
        }
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completer for command names, meta commands, and file paths.
struct CommandCompleter {
    file_completer: FilenameCompleter,
    keywords: Vec<String>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            keywords: Vec::new(),
        }
    }

    /// Completes the word ending at `pos` against meta commands or seen
    /// command names. Quoted arguments get no candidates.
    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let word = &line[start..pos];

        if line[..pos].chars().filter(|&c| c == '"' || c == '\'').count() % 2 == 1 {
            return (start, Vec::new());
        }

        let pair = |name: &str| Pair {
            display: name.to_string(),
            replacement: name.to_string(),
        };
        let candidates = if word.starts_with(':') {
            META_COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(word))
                .map(|cmd| pair(cmd))
                .collect()
        } else {
            self.keywords
                .iter()
                .filter(|kw| kw.starts_with(word))
                .map(|kw| pair(kw))
                .collect()
        };

        (start, candidates)
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // `:load` and `:save` take a path
        if line.starts_with(":load ") || line.starts_with(":save ") {
            return self.file_completer.complete(line, pos, ctx);
        }

        Ok(self.candidates(line, pos))
    }
}

/// Validator that keeps reading while a statement is unfinished.
#[derive(Default)]
struct StatementValidator;

impl Validator for StatementValidator {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        if is_complete(ctx.input()) {
            Ok(ValidationResult::Valid(None))
        } else {
            Ok(ValidationResult::Incomplete)
        }
    }
}

/// Terminal input through rustyline, with history hints.
pub struct RustylineEditor {
    editor: Editor<StdtestHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates an editor with up to 1000 history entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(|e| Error::internal(e.to_string()))?
            .build();

        let helper = StdtestHelper {
            completer: CommandCompleter::new(),
            hinter: HistoryHinter::new(),
            validator: StatementValidator,
            highlighter: StdtestHighlighter::new(),
        };

        let mut editor =
            Editor::with_config(config).map_err(|e| Error::internal(e.to_string()))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::internal(e.to_string())),
        }
    }

    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_keywords(&mut self, keywords: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.keywords = keywords;
        }
    }
}
