//! stdtest CLI entry point.

use std::env;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use stdtest_runtime::loader::{self, STDIN_ORIGIN};
use stdtest_runtime::{CliConfig, Diagnostic, Input, OutputMode, Repl, Suite, parse_args, serialize};
use stdtest_syntax::Error;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Runs the CLI, returning whether every input loaded cleanly.
fn run(args: &[String]) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("stdtest {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(io::stderr)
        .init();
    debug!(?config, "starting");

    let mut suites = Vec::new();
    let mut all_ok = true;

    for input in &config.inputs {
        match load(input) {
            Ok(suite) => {
                print_suite(&suite, config.mode)?;
                suites.push(suite);
            }
            Err((error, source)) => {
                warn!(input = ?input, "input failed");
                eprintln!("\x1b[31m{}\x1b[0m", Diagnostic::render(&error, source.as_deref()));
                all_ok = false;
            }
        }
    }

    if let (Some(path), Some(suite)) = (&config.emit, suites.first()) {
        serialize::save_to_file(suite, path)?;
    }

    if config.interactive {
        run_repl(&config, suites)?;
    }

    Ok(all_ok)
}

/// Loads one input. On failure, returns the error and the source text if it
/// was read into memory.
fn load(input: &Input) -> Result<Suite, (Error, Option<String>)> {
    match input {
        Input::Stdin => loader::load_reader(STDIN_ORIGIN, io::stdin().lock()).map_err(|e| (e, None)),
        Input::File(path) => {
            let text = loader::read_source(path).map_err(|e| (e, None))?;
            loader::load_str(path.display().to_string(), &text).map_err(|e| (e, Some(text)))
        }
    }
}

fn print_suite(suite: &Suite, mode: OutputMode) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    match mode {
        OutputMode::Tokens => {
            for token in &suite.tokens {
                writeln!(out, "{token}")?;
            }
        }
        OutputMode::Cases => {
            for case in &suite.cases {
                writeln!(out, "{case}")?;
            }
        }
    }
    out.flush()
}

fn run_repl(config: &CliConfig, suites: Vec<Suite>) -> Result<(), Box<dyn std::error::Error>> {
    let mut repl = Repl::new()?;

    // Loaded inputs establish context, so skip the banner
    if !config.inputs.is_empty() {
        repl = repl.without_banner();
    }
    for suite in suites {
        repl.session_mut().add_suite(suite);
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mstdtest\x1b[0m - Tokenizer and parser for stdtest command-behavior tests

\x1b[1mUSAGE:\x1b[0m
    stdtest [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Files to load; `-` reads standard input (default: .stdtest)

\x1b[1mOPTIONS:\x1b[0m
    -f, --file PATH      Load PATH (repeatable)
    -t, --tokens         Print one line per token (default)
    -c, --cases          Print one line per test case
        --emit PATH      Write the parsed suite to PATH as MessagePack
    -i, --interactive    Start the REPL after loading
    -v, --verbose        Raise log verbosity (repeatable)
    -h, --help           Print help information
    -V, --version        Print version information

\x1b[1mEXAMPLES:\x1b[0m
    stdtest                          Print the tokens of .stdtest
    stdtest -c cases.stdtest         Print the test cases in cases.stdtest
    cat cases.stdtest | stdtest -    Read from standard input
    stdtest --emit out.mp cases      Save parsed cases for a runner
    stdtest -i cases.stdtest         Load cases.stdtest, then start the REPL

\x1b[1mREPL COMMANDS:\x1b[0m
    :help :tokens :cases :clear :load <path> :save <path> :quit
    Ctrl+D               Exit REPL
    Ctrl+C               Cancel current input"
    );
}
