//! Tests for parser error cases and diagnostics.

mod common;
use common::*;

use oxide_ddl::parser::{Cursor, Parser, ParserColumnDeclaration};
use oxide_ddl::{Lexer, ParseError, ParseOptions, parse_create_query_with};

#[test]
fn error_empty_input() {
    let err = parse_err("");
    assert_eq!(err.position(), 0);
    assert!(err.expected().contains(&"CREATE TABLE or ATTACH TABLE query"));
}

#[test]
fn error_missing_engine_equals() {
    let err = parse_err("CREATE TABLE t (a UInt8) ENGINE Log");
    let ParseError::Syntax {
        position,
        near,
        expected,
    } = err
    else {
        panic!("Expected syntax error");
    };
    assert_eq!(position, 32);
    assert_eq!(near, "Log");
    assert!(expected.contains(&"'='"));
}

#[test]
fn error_unclosed_column_list() {
    let err = parse_err("CREATE TABLE t (a UInt8 ENGINE = Log");
    assert_eq!(err.position(), 24);
    assert!(err.expected().contains(&"')'"));
}

#[test]
fn error_near_is_truncated() {
    let tail = "x".repeat(100);
    let err = parse_err(&format!("CREATE TABLE t (a UInt8) ENGINE = Log {tail}"));
    let ParseError::Syntax { near, .. } = err else {
        panic!("Expected syntax error");
    };
    assert_eq!(near.len(), 32);
}

#[test]
fn error_lexer() {
    let err = parse_err("CREATE TABLE t (a UInt8 DEFAULT 1 ! 2) ENGINE = Log");
    assert!(matches!(err, ParseError::Lexer { .. }));
    let _ = parse_err("CREATE TABLE t (a UInt8) /* open comment");
}

#[test]
fn error_too_deep() {
    let sql = format!(
        "CREATE TABLE t (x UInt8 DEFAULT {}1{}) ENGINE = Log",
        "(".repeat(40),
        ")".repeat(40)
    );
    let options = ParseOptions::default().with_max_depth(32);
    let err = parse_create_query_with(&sql, options).expect_err("too deep");
    assert!(matches!(err, ParseError::TooDeep { limit: 32, .. }));
    assert!(err.to_string().contains("Maximum parse depth (32)"));

    let options = ParseOptions::default().with_max_depth(256);
    assert!(parse_create_query_with(&sql, options).is_ok());
}

#[test]
fn failed_rule_restores_position_and_records_labels() {
    let tokens = Lexer::new("x").tokenize();
    let mut cursor = Cursor::new(&tokens, 64);
    assert!(ParserColumnDeclaration::default().parse(&mut cursor).is_none());
    assert_eq!(cursor.pos(), 0);

    let expected = cursor.expected();
    assert_eq!(expected.max_parsed_pos, 1);
    for label in ["DEFAULT", "MATERIALIZED", "ALIAS"] {
        assert!(expected.variants.contains(&label), "missing {label}");
    }
}
