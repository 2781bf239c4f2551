//! Integration tests for the tokenizer
//!
//! Tests tokenization of stdtest source text.

use std::io::Cursor;

use stdtest_syntax::{
    Literal, ReaderSource, ScanError, StrSource, Token, TokenType, Tokenizer, tokenize,
};

fn types(source: &str) -> Vec<TokenType> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.token_type)
        .collect()
}

// =============================================================================
// Token Classes
// =============================================================================

#[test]
fn tokenize_empty() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0], Token::eof(0));
}

#[test]
fn tokenize_statement() {
    use TokenType::{Assert, Eof, Identifier, Number, String};
    assert_eq!(
        types(r#"echo "hi" 3 -> "hi""#),
        vec![Identifier, String, Number, Assert, String, Eof]
    );
}

#[test]
fn tokenize_kebab_case_identifiers() {
    let tokens = tokenize("list-files _private x2 a_b-c").unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["list-files", "_private", "x2", "a_b-c", ""]);
    assert!(tokens[..4].iter().all(|t| t.literal == Literal::None));
}

#[test]
fn tokenize_unicode_identifier() {
    let tokens = tokenize("grüße -> 1").unwrap();
    assert_eq!(tokens[0].lexeme, "grüße");
    // Positions count characters
    assert_eq!(tokens[1].position, 6);
}

#[test]
fn tokenize_numbers() {
    let tokens = tokenize("7 0.5 12.25").unwrap();
    assert_eq!(tokens[0].literal, Literal::Num(7.0));
    assert_eq!(tokens[1].literal, Literal::Num(0.5));
    assert_eq!(tokens[2].literal, Literal::Num(12.25));
    assert_eq!(tokens[2].lexeme, "12.25");
}

#[test]
fn tokenize_number_stops_at_letter() {
    let tokens = tokenize("42abc").unwrap();
    assert_eq!(tokens[0].lexeme, "42");
    assert_eq!(tokens[1].lexeme, "abc");
    assert_eq!(tokens[1].position, 2);
}

#[test]
fn tokenize_strings_verbatim() {
    let tokens = tokenize(r#"'say "hi"' "it's" '\t'"#).unwrap();
    assert_eq!(tokens[0].literal.as_str(), Some(r#"say "hi""#));
    assert_eq!(tokens[1].literal.as_str(), Some("it's"));
    assert_eq!(tokens[2].literal.as_str(), Some(r"\t"));
    assert_eq!(tokens[2].lexeme, r"'\t'");
}

#[test]
fn tokenize_empty_string() {
    let tokens = tokenize("''").unwrap();
    assert_eq!(tokens[0].literal, Literal::Str(String::new()));
    assert_eq!(tokens[1].position, 2);
}

#[test]
fn tokenize_newlines() {
    let tokens = tokenize("a\n\nb").unwrap();
    assert_eq!(tokens[1].token_type, TokenType::Newline);
    assert_eq!(tokens[1].position, 1);
    assert_eq!(tokens[2].position, 2);
    assert_eq!(tokens[3].position, 3);
}

#[test]
fn tokenize_crlf() {
    use TokenType::{Eof, Identifier, Newline};
    assert_eq!(types("a\r\nb\r\n"), vec![Identifier, Newline, Identifier, Newline, Eof]);
}

#[test]
fn tokenize_assert_without_spaces() {
    use TokenType::{Assert, Eof, Number};
    assert_eq!(types("1->2"), vec![Number, Assert, Number, Eof]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn error_unterminated_string() {
    let err = tokenize("echo \"abc").unwrap_err();
    assert!(matches!(
        err,
        ScanError::UnterminatedString {
            quote: '"',
            position: 5
        }
    ));
}

#[test]
fn error_mismatched_quotes() {
    let err = tokenize(r#"echo 'abc""#).unwrap_err();
    assert!(matches!(err, ScanError::UnterminatedString { quote: '\'', .. }));
}

#[test]
fn error_invalid_number() {
    let err = tokenize("v 1.2.3 -> 1").unwrap_err();
    match err {
        ScanError::InvalidNumber { lexeme, position } => {
            assert_eq!(lexeme, "1.2.3");
            assert_eq!(position, 2);
        }
        other => panic!("expected InvalidNumber, got {other}"),
    }
}

#[test]
fn error_lone_dash() {
    let err = tokenize("a - b").unwrap_err();
    assert!(matches!(
        err,
        ScanError::InvalidToken {
            found: Some(' '),
            position: 2
        }
    ));

    let err = tokenize("a -").unwrap_err();
    assert!(matches!(err, ScanError::InvalidToken { found: None, .. }));
}

#[test]
fn error_negative_number() {
    let err = tokenize("abs -5 -> 5").unwrap_err();
    assert!(matches!(
        err,
        ScanError::InvalidToken {
            found: Some('5'),
            position: 4
        }
    ));
}

#[test]
fn error_unexpected_character() {
    let err = tokenize("echo # comment").unwrap_err();
    assert!(matches!(
        err,
        ScanError::UnexpectedCharacter {
            character: '#',
            position: 5
        }
    ));
    assert_eq!(err.position(), Some(5));
}

#[test]
fn error_message_names_character() {
    let err = tokenize("x = 1").unwrap_err();
    let message = err.to_string();
    assert!(message.contains('='), "{message}");
    assert!(message.contains('2'), "{message}");
}

// =============================================================================
// Character Sources
// =============================================================================

#[test]
fn reader_source_matches_str_source() {
    let source = "add 2 3 -> sum 5\necho 'héllo' -> 'héllo'\n";
    let from_str = Tokenizer::new(StrSource::new(source)).scan_tokens().unwrap();
    let from_reader = Tokenizer::new(ReaderSource::new(Cursor::new(source.as_bytes())))
        .scan_tokens()
        .unwrap();
    assert_eq!(from_str, from_reader);
}

#[test]
fn reader_source_rejects_invalid_utf8() {
    let bytes: &[u8] = &[b'a', b' ', 0xFF, b'\n'];
    let err = Tokenizer::new(ReaderSource::new(bytes))
        .scan_tokens()
        .unwrap_err();
    assert!(matches!(err, ScanError::Source(_)));
    assert_eq!(err.position(), None);
}
