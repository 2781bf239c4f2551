//! Integration tests for suite serialization

use stdtest_runtime::load_str;
use stdtest_runtime::serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
use stdtest_syntax::{ErrorKind, Expr};

#[test]
fn suite_survives_messagepack() {
    let suite = load_str(
        "suite.stdtest",
        "concat 'a' 'b' -> 'ab'\nadd 1.5 2 -> sum 3.5\npwd -> home\n",
    )
    .unwrap();

    let restored = from_bytes(&to_bytes(&suite).unwrap()).unwrap();
    assert_eq!(restored, suite);
    assert!(matches!(restored.cases[2].expected, Expr::CommandCall(_)));
}

#[test]
fn named_fields_are_written() {
    let suite = load_str("s", "a -> 1").unwrap();
    let bytes = to_bytes(&suite).unwrap();
    let needle = b"expected";
    assert!(bytes.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn save_and_load_file() {
    let suite = load_str("s", "echo 'x' -> 'x'").unwrap();
    let path = std::env::temp_dir().join(format!("stdtest-it-{}.msgpack", std::process::id()));

    save_to_file(&suite, &path).unwrap();
    let restored = load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(restored.unwrap(), suite);
}

#[test]
fn truncated_bytes_fail() {
    let suite = load_str("s", "a -> 1").unwrap();
    let bytes = to_bytes(&suite).unwrap();
    let err = from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
}
