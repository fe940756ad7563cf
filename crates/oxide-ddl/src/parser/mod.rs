//! DDL Parser
//!
//! A backtracking recursive-descent parser. Every grammar rule implements
//! [`Parser`] and runs against a shared [`Cursor`]; a rule that does not
//! match returns `None` and puts the cursor back, so alternatives can be
//! tried in sequence without lookahead. When nothing matches, the furthest
//! position any rule reached and the rules attempted there become the
//! [`ParseError`].

mod base;
mod column;
mod common;
mod create;
mod cursor;
mod error;
mod expression;
mod identifier;
mod pratt;
mod select;
mod types;

pub use base::Parser;
pub use column::{
    CODEC_FUNCTION, ParserColumnDeclaration, ParserColumnDeclarationList,
    ParserColumnDeclarationWith, ParserCompoundColumnDeclaration,
};
pub use common::{
    ParserKeyword, ParserStringLiteral, ParserToken, ParserWhitespaceOrComments,
    parse_comma_list, parse_keywords, parse_token,
};
pub use create::{ParserCreateQuery, ParserEngine};
pub use cursor::{Cursor, DEFAULT_MAX_DEPTH, Expected};
pub use error::ParseError;
pub use expression::{
    ParserExpressionElement, ParserExpressionList, ParserFunction,
    ParserTernaryOperatorExpression,
};
pub use identifier::{ParserCompoundIdentifier, ParserIdentifier};
pub use select::ParserSelectQuery;
pub use types::{
    NESTED_TYPE_NAME, ParserCompoundNameTypePair, ParserIdentifierWithOptionalParameters,
    ParserIdentifierWithParameters, ParserNameTypePair, ParserNameTypePairList,
    ParserNameTypePairWith, ParserNestedTable, ParserTypeInCastExpression,
};

use crate::ast::CreateQuery;
use crate::lexer::{Lexer, Token, TokenKind};

/// Characters of input quoted in a syntax error.
const NEAR_LEN: usize = 32;

/// Driver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Nesting limit for rule invocations.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parses exactly one `CREATE`/`ATTACH` statement, optionally followed by
/// `;`.
///
/// # Errors
///
/// Returns [`ParseError`] if the input does not lex, does not match the
/// grammar, has anything after the statement, or nests too deeply.
pub fn parse_create_query(sql: &str) -> Result<CreateQuery, ParseError> {
    parse_create_query_with(sql, ParseOptions::default())
}

/// [`parse_create_query`] with explicit options.
///
/// # Errors
///
/// See [`parse_create_query`].
pub fn parse_create_query_with(sql: &str, options: ParseOptions) -> Result<CreateQuery, ParseError> {
    let tokens = tokenize(sql)?;
    let mut cursor = Cursor::new(&tokens, options.max_depth);
    let result = cursor.attempt(|c| {
        c.skip_trivia();
        let query = ParserCreateQuery.parse(c)?;
        c.skip_trivia();
        ParserToken(TokenKind::Semicolon).ignore(c);
        c.skip_trivia();
        ParserToken(TokenKind::Eof).parse(c)?;
        Some(query)
    });
    finish(sql, &cursor, result)
}

/// Parses a `;`-separated sequence of statements. Empty input yields no
/// statements.
///
/// # Errors
///
/// Returns the error for the first statement that fails.
pub fn parse_create_queries(sql: &str) -> Result<Vec<CreateQuery>, ParseError> {
    parse_create_queries_with(sql, ParseOptions::default())
}

/// [`parse_create_queries`] with explicit options.
///
/// # Errors
///
/// See [`parse_create_queries`].
pub fn parse_create_queries_with(
    sql: &str,
    options: ParseOptions,
) -> Result<Vec<CreateQuery>, ParseError> {
    let tokens = tokenize(sql)?;
    let mut cursor = Cursor::new(&tokens, options.max_depth);
    let mut queries = Vec::new();
    loop {
        cursor.skip_trivia();
        if cursor.is_at_end() {
            break;
        }
        let result = cursor.attempt(|c| {
            let query = ParserCreateQuery.parse(c)?;
            c.skip_trivia();
            if !ParserToken(TokenKind::Semicolon).ignore(c) {
                ParserToken(TokenKind::Eof).parse(c)?;
            }
            Some(query)
        });
        queries.push(finish(sql, &cursor, result)?);
    }
    Ok(queries)
}

fn tokenize(sql: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = Lexer::new(sql).tokenize();
    let bad = tokens.iter().find_map(|t| match &t.kind {
        TokenKind::Error(message) => Some((message, t.span)),
        _ => None,
    });
    if let Some((message, span)) = bad {
        tracing::debug!(position = span.start, %message, "rejected input");
        return Err(ParseError::Lexer {
            message: message.clone(),
            span,
        });
    }
    Ok(tokens)
}

fn finish(
    sql: &str,
    cursor: &Cursor<'_>,
    result: Option<CreateQuery>,
) -> Result<CreateQuery, ParseError> {
    if let Some(query) = result {
        tracing::debug!(
            kind = query.kind.as_str(),
            name = %query.qualified_name(),
            "parsed statement"
        );
        return Ok(query);
    }

    let expected = cursor.expected();
    let mut at = expected.max_parsed_pos;
    while cursor.token_at(at).is_trivia() {
        at += 1;
    }
    let position = cursor.token_at(at).span.start;
    let error = if cursor.too_deep() {
        ParseError::TooDeep {
            limit: cursor.max_depth(),
            position,
        }
    } else {
        ParseError::Syntax {
            position,
            near: sql.get(position..).unwrap_or("").chars().take(NEAR_LEN).collect(),
            expected: expected.variants.clone(),
        }
    };
    tracing::debug!(error = %error, "rejected statement");
    Err(error)
}
