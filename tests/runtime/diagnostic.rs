//! Integration tests for rendered diagnostics

use stdtest_runtime::{Diagnostic, load_str};

fn render(origin: &str, source: &str) -> String {
    let err = load_str(origin, source).unwrap_err();
    Diagnostic::new(&err).with_source(source).to_string()
}

#[test]
fn unexpected_rhs() {
    let rendered = render("c.stdtest", "bad -> -> x");
    assert_eq!(
        rendered,
        "error: parse error: unexpected ASSERT `->` at 7 on the right-hand side of `->`\n  \
         --> c.stdtest:1:8\n   |\n 1 | bad -> -> x\n   |        ^"
    );
}

#[test]
fn unterminated_string_points_at_quote() {
    let rendered = render("d.stdtest", "ok -> 1\nsay \"hi -> \"hi\"");
    assert!(rendered.starts_with("error: scan error: unterminated string"));
    assert!(rendered.contains("  --> d.stdtest:2:15"));
    assert!(rendered.ends_with(" 2 | say \"hi -> \"hi\"\n   |               ^"));
}

#[test]
fn wide_gutter_for_late_lines() {
    let mut source = "a -> 1\n".repeat(11);
    source.push_str("@");
    let rendered = render("e", &source);
    assert!(rendered.contains("  --> e:12:1"));
    assert!(rendered.ends_with("\n 12 | @\n    | ^"));
}
