//! # oxide-ddl
//!
//! A backtracking parser and AST for ClickHouse-style DDL statements:
//! `CREATE`/`ATTACH` of tables, databases and views.
//!
//! This crate provides:
//! - A lexer that keeps whitespace and comments as tokens, so grammar rules
//!   decide where a separator is mandatory
//! - Combinator-style grammar rules that backtrack across ambiguous prefixes
//!   and report the furthest position any alternative reached
//! - An AST whose nodes deep-copy with `clone` and print back to SQL
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_ddl::{DefaultSpecifier, Node, parse_create_query};
//!
//! let query = parse_create_query(
//!     "CREATE TABLE hits (EventDate Date, CounterID UInt32 DEFAULT 0) \
//!      ENGINE = MergeTree(EventDate, (CounterID, EventDate), 8192)",
//! )
//! .unwrap();
//!
//! let columns = query.column_list().unwrap();
//! let Node::ColumnDeclaration(counter) = &columns.items[1] else {
//!     panic!("not a column");
//! };
//! assert_eq!(counter.default_specifier(), Some(DefaultSpecifier::Default));
//! ```
//!
//! ## Formatting
//!
//! ```rust
//! use oxide_ddl::{FormatSettings, Node, parse_create_query};
//!
//! let query = parse_create_query("create table t (x UInt8 default 1) engine = Log").unwrap();
//! assert_eq!(
//!     query.to_string(),
//!     "CREATE TABLE t (x UInt8 DEFAULT 1) ENGINE = Log"
//! );
//! let pretty = Node::from(query).to_sql(&FormatSettings::pretty());
//! assert!(pretty.contains("\n(\n    x UInt8 DEFAULT 1\n)"));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{
    ColumnDeclaration, CreateKind, CreateQuery, DefaultSpecifier, FormatSettings, Node,
};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{
    ParseError, ParseOptions, Parser, parse_create_queries, parse_create_queries_with,
    parse_create_query, parse_create_query_with,
};
