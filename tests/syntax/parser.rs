//! Integration tests for the parser
//!
//! Tests parsing of token lists into test cases.

use stdtest_syntax::{
    Error, ErrorKind, Expr, ExprType, Literal, ParseError, Parser, Token, TokenType, parse,
    parse_tokens, tokenize,
};

fn parse_err(source: &str) -> ParseError {
    match parse(source).unwrap_err() {
        Error {
            kind: ErrorKind::Parse(e),
            ..
        } => e,
        other => panic!("expected parse error, got {other}"),
    }
}

fn token(token_type: TokenType, lexeme: &str, literal: Literal, position: usize) -> Token {
    Token::new(token_type, lexeme, literal, position)
}

// =============================================================================
// Statements
// =============================================================================

#[test]
fn parse_statements_in_source_order() {
    let cases = parse("b 1 -> 1\na 2 -> 2\nc 3 -> 3").unwrap();
    let commands: Vec<&str> = cases.iter().map(|c| c.cmd.command.as_str()).collect();
    assert_eq!(commands, vec!["b", "a", "c"]);
}

#[test]
fn parse_without_separating_newlines() {
    let cases = parse("a -> 1 b -> 2").unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[1].cmd.command, "b");
}

#[test]
fn parse_args_keep_tokens() {
    let cases = parse("run 'x' 2.5 \"y\" -> ok").unwrap();
    let args = &cases[0].cmd.args;
    assert_eq!(args.len(), 3);
    assert_eq!(args[0].lexeme, "'x'");
    assert_eq!(args[1].literal, Literal::Num(2.5));
    assert_eq!(args[2].position, 12);
}

#[test]
fn parse_nested_call_args() {
    let cases = parse("concat 'a' 'b' -> join 'a' 'b' 'c'").unwrap();
    let expected = cases[0].expected.as_command_call().unwrap();
    assert_eq!(expected.command, "join");
    let args: Vec<&str> = expected.args.iter().filter_map(|t| t.literal.as_str()).collect();
    assert_eq!(args, vec!["a", "b", "c"]);
}

#[test]
fn parse_test_case_position() {
    let cases = parse("\n\n  echo 1 -> 1").unwrap();
    assert_eq!(cases[0].position, 4);
}

#[test]
fn parse_handcrafted_tokens() {
    let tokens = vec![
        token(TokenType::Identifier, "pwd", Literal::None, 0),
        token(TokenType::Assert, "->", Literal::None, 4),
        token(TokenType::String, "'/'", Literal::Str("/".into()), 7),
        Token::eof(10),
    ];
    let cases = parse_tokens(tokens).unwrap();
    assert_eq!(cases[0].expected, Expr::String("/".into()));
}

#[test]
fn parse_tokens_without_eof() {
    let tokens = vec![
        token(TokenType::Identifier, "x", Literal::None, 0),
        token(TokenType::Assert, "->", Literal::None, 2),
    ];
    let err = parse_tokens(tokens).unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedRhs {
            found: TokenType::Eof,
            ..
        }
    ));
}

#[test]
fn parser_is_one_shot() {
    let tokens = tokenize("a -> 1").unwrap();
    let cases = Parser::new(tokens).parse().unwrap();
    assert_eq!(cases.len(), 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn error_assert_first() {
    assert_eq!(parse_err("-> 1"), ParseError::EmptyStack { position: 0 });
}

#[test]
fn error_two_asserts_on_a_line() {
    // The first statement completes, leaving the second `->` with nothing.
    assert_eq!(
        parse_err("a -> 1 -> 2"),
        ParseError::EmptyStack { position: 7 }
    );
}

#[test]
fn error_literal_at_statement_start() {
    assert_eq!(
        parse_err("\n42 -> 42"),
        ParseError::UnexpectedToken {
            found: TokenType::Number,
            lexeme: "42".into(),
            position: 1
        }
    );
}

#[test]
fn error_missing_rhs_before_newline() {
    let err = parse_err("a ->\nb -> 1");
    assert!(matches!(
        err,
        ParseError::UnexpectedRhs {
            found: TokenType::Newline,
            position: 4,
            ..
        }
    ));
}

#[test]
fn error_second_call_while_pending() {
    assert_eq!(
        parse_err("first 1\nsecond -> 2"),
        ParseError::UnterminatedStatement {
            command: "first".into(),
            position: 0
        }
    );
}

#[test]
fn error_dangling_call() {
    assert_eq!(
        parse_err("a -> 1\nb 'x'"),
        ParseError::UnterminatedStatement {
            command: "b".into(),
            position: 7
        }
    );
}

#[test]
fn error_positions_are_reported() {
    let err = parse("a -> 1\nb 'x'").unwrap_err();
    assert_eq!(err.position(), Some(7));
}

#[test]
fn error_expected_expression_type() {
    let err = ParseError::ExpectedExpression {
        expected: ExprType::CommandCall,
        found: ExprType::Number,
        position: 3,
    };
    assert_eq!(err.position(), 3);
    assert!(err.to_string().contains("CommandCall"));
}
