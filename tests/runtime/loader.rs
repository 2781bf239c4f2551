//! Integration tests for loading suites

use std::fs;
use std::path::PathBuf;

use stdtest_runtime::loader::{self, DEFAULT_FILE, STDIN_ORIGIN};
use stdtest_runtime::{load_file, load_reader, load_str};
use stdtest_syntax::{ErrorKind, Expr, ParseError, ScanError, TokenType};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("stdtest-it-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn load_file_reads_suite() {
    let path = temp_file("ok.stdtest", "echo 'hi' -> 'hi'\nadd 2 3 -> sum 5\n");
    let suite = load_file(&path);
    let _ = fs::remove_file(&path);

    let suite = suite.unwrap();
    assert_eq!(suite.origin, path.display().to_string());
    assert_eq!(suite.len(), 2);
    assert_eq!(suite.cases[0].expected, Expr::String("hi".into()));
    assert!(suite.tokens.last().unwrap().is(TokenType::Eof));
}

#[test]
fn load_file_locates_scan_errors() {
    let path = temp_file("bad.stdtest", "a -> 1\n\n  b -> 'open\n");
    let err = load_file(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(
        err.kind,
        ErrorKind::Scan(ScanError::UnterminatedString { position: 15, .. })
    ));
    let context = err.context.unwrap();
    assert_eq!(context.line, Some(3));
    assert_eq!(context.column, Some(8));
}

#[test]
fn load_file_accepts_crlf() {
    let path = temp_file("crlf.stdtest", "a -> 1\r\nb -> 2\r\n");
    let suite = load_file(&path);
    let _ = fs::remove_file(&path);
    assert_eq!(suite.unwrap().len(), 2);
}

#[test]
fn empty_source_is_an_empty_suite() {
    let suite = load_str("empty", "").unwrap();
    assert!(suite.is_empty());
    assert_eq!(suite.tokens.len(), 1);
}

#[test]
fn reader_and_string_agree_on_errors() {
    let text = "x -> 1\ny 2";
    let from_str = load_str(STDIN_ORIGIN, text).unwrap_err();
    let from_reader = load_reader(STDIN_ORIGIN, text.as_bytes()).unwrap_err();

    assert_eq!(from_str.kind.to_string(), from_reader.kind.to_string());
    assert_eq!(from_str.context, from_reader.context);
    assert!(matches!(
        from_reader.kind,
        ErrorKind::Parse(ParseError::UnterminatedStatement { position: 7, .. })
    ));
}

#[test]
fn read_source_reports_path() {
    let err = loader::read_source(std::path::Path::new("/nonexistent/x.stdtest")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/x.stdtest"));
}

#[test]
fn default_file_name() {
    assert_eq!(DEFAULT_FILE, ".stdtest");
    assert!(loader::has_stdtest_extension(std::path::Path::new(DEFAULT_FILE)));
}
