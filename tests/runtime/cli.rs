//! Integration tests for command-line parsing

use std::path::PathBuf;

use stdtest_runtime::{CliError, Input, OutputMode, parse_args};

#[test]
fn typical_invocation() {
    let config = parse_args(&["stdtest", "-c", "-v", "a.stdtest", "-"]).unwrap();
    assert_eq!(config.mode, OutputMode::Cases);
    assert_eq!(config.verbosity, 1);
    assert_eq!(
        config.inputs,
        vec![Input::File(PathBuf::from("a.stdtest")), Input::Stdin]
    );
    assert!(!config.interactive);
}

#[test]
fn help_and_version() {
    let config = parse_args(&["stdtest", "-h", "--version"]).unwrap();
    assert!(config.show_help);
    assert!(config.show_version);
}

#[test]
fn emit_with_default_file() {
    let config = parse_args(&["stdtest", "--emit", "out.mp"]).unwrap();
    assert_eq!(config.emit, Some(PathBuf::from("out.mp")));
    assert_eq!(config.inputs, vec![Input::File(PathBuf::from(".stdtest"))]);
}

#[test]
fn errors_render() {
    let err = parse_args(&["stdtest", "-x"]).unwrap_err();
    assert_eq!(err, CliError::UnknownOption("-x".into()));
    assert_eq!(err.to_string(), "unknown option: -x");
}
