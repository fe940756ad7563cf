//! `ENGINE` clauses and `CREATE`/`ATTACH` queries.

use super::base::Parser;
use super::column::ParserColumnDeclarationList;
use super::common::{ParserKeyword, parse_keywords, parse_token};
use super::cursor::Cursor;
use super::identifier::{ParserIdentifier, parse_qualified_name};
use super::select::ParserSelectQuery;
use super::types::ParserIdentifierWithOptionalParameters;
use crate::ast::{CreateKind, CreateQuery, Engine, Node};
use crate::lexer::{Keyword, TokenKind};

/// `ENGINE = name[(arguments)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserEngine;

impl Parser for ParserEngine {
    type Output = Engine;

    fn name(&self) -> &'static str {
        "ENGINE"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Engine> {
        let begin = cursor.pos();
        ParserKeyword::new(Keyword::Engine).parse(cursor)?;
        parse_token(cursor, TokenKind::Eq)?;
        cursor.skip_trivia();
        let engine = ParserIdentifierWithOptionalParameters.parse(cursor)?;
        Some(Engine {
            engine: Box::new(engine.into()),
            span: cursor.span_from(begin),
        })
    }
}

/// A `CREATE` or `ATTACH` query:
///
/// ```text
/// CREATE|ATTACH DATABASE [IF NOT EXISTS] db [ENGINE = engine]
/// CREATE|ATTACH TABLE [IF NOT EXISTS] [db.]name (name1 type1, ...) ENGINE = engine
/// CREATE|ATTACH TABLE [IF NOT EXISTS] [db.]name AS ENGINE = engine SELECT ...
/// CREATE|ATTACH TABLE [IF NOT EXISTS] [db.]name [ENGINE = engine] AS SELECT ...
/// CREATE|ATTACH TABLE [IF NOT EXISTS] [db.]name AS [db2.]name2 [ENGINE = engine]
/// CREATE|ATTACH [MATERIALIZED] VIEW [IF NOT EXISTS] [db.]name [(columns)]
///     [ENGINE = engine] [POPULATE] AS SELECT ...
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserCreateQuery;

impl Parser for ParserCreateQuery {
    type Output = CreateQuery;

    fn name(&self) -> &'static str {
        "CREATE TABLE or ATTACH TABLE query"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<CreateQuery> {
        let begin = cursor.pos();

        let attach = if ParserKeyword::new(Keyword::Create).ignore(cursor) {
            false
        } else if ParserKeyword::new(Keyword::Attach).ignore(cursor) {
            true
        } else {
            return None;
        };

        let materialized = parse_keywords(cursor, &[Keyword::Materialized]);
        let kind = if parse_keywords(cursor, &[Keyword::Table]) {
            CreateKind::Table
        } else if parse_keywords(cursor, &[Keyword::Database]) {
            CreateKind::Database
        } else if parse_keywords(cursor, &[Keyword::View]) {
            CreateKind::View
        } else {
            return None;
        };
        if materialized && kind != CreateKind::View {
            return None;
        }

        let if_not_exists = parse_keywords(cursor, &[Keyword::If, Keyword::Not, Keyword::Exists]);
        cursor.skip_trivia();

        let mut query = CreateQuery {
            attach,
            kind,
            materialized,
            populate: false,
            if_not_exists,
            database: None,
            name: String::new(),
            columns: None,
            engine: None,
            as_database: None,
            as_table: None,
            select: None,
            span: cursor.span_from(begin),
        };

        match kind {
            CreateKind::Database => {
                query.name = ParserIdentifier.parse(cursor)?.name();
                query.engine = parse_optional_engine(cursor);
            }
            CreateKind::Table => {
                let (database, name) = parse_qualified_name(cursor)?;
                query.database = database;
                query.name = name;
                parse_table_tail(cursor, &mut query)?;
            }
            CreateKind::View => {
                let (database, name) = parse_qualified_name(cursor)?;
                query.database = database;
                query.name = name;
                parse_view_tail(cursor, &mut query)?;
            }
        }

        query.span = cursor.span_from(begin);
        Some(query)
    }
}

/// `[ENGINE = engine]`, leaving the cursor in place when absent.
fn parse_optional_engine(cursor: &mut Cursor<'_>) -> Option<Box<Node>> {
    cursor
        .attempt(|c| {
            c.skip_trivia();
            ParserEngine.parse(c)
        })
        .map(|engine| Box::new(engine.into()))
}

fn parse_engine(cursor: &mut Cursor<'_>) -> Option<Box<Node>> {
    cursor.skip_trivia();
    Some(Box::new(ParserEngine.parse(cursor)?.into()))
}

fn parse_as_select(cursor: &mut Cursor<'_>) -> Option<Box<Node>> {
    cursor.skip_trivia();
    Some(Box::new(ParserSelectQuery.parse(cursor)?.into()))
}

/// `(columns)`.
fn parse_columns(cursor: &mut Cursor<'_>) -> Option<Box<Node>> {
    parse_token(cursor, TokenKind::LeftParen)?;
    cursor.skip_trivia();
    let columns = ParserColumnDeclarationList.parse(cursor)?;
    parse_token(cursor, TokenKind::RightParen)?;
    Some(Box::new(columns.into()))
}

/// Everything after a table's name. Each form is a separate alternative
/// tried from the same position; the first one that matches wins.
fn parse_table_tail(cursor: &mut Cursor<'_>, query: &mut CreateQuery) -> Option<()> {
    // (columns) ENGINE = engine
    if let Some((columns, engine)) = cursor.attempt(|c| {
        let columns = parse_columns(c)?;
        let engine = parse_engine(c)?;
        Some((columns, engine))
    }) {
        query.columns = Some(columns);
        query.engine = Some(engine);
        return Some(());
    }

    // AS ENGINE = engine SELECT ...
    if let Some((engine, select)) = cursor.attempt(|c| {
        if !parse_keywords(c, &[Keyword::As]) {
            return None;
        }
        let engine = parse_engine(c)?;
        let select = parse_as_select(c)?;
        Some((engine, select))
    }) {
        query.engine = Some(engine);
        query.select = Some(select);
        return Some(());
    }

    // [ENGINE = engine] AS SELECT ...
    if let Some((engine, select)) = cursor.attempt(|c| {
        let engine = parse_optional_engine(c);
        if !parse_keywords(c, &[Keyword::As]) {
            return None;
        }
        let select = parse_as_select(c)?;
        Some((engine, select))
    }) {
        query.engine = engine;
        query.select = Some(select);
        return Some(());
    }

    // AS [db.]table [ENGINE = engine]
    let (as_database, as_table, engine) = cursor.attempt(|c| {
        if !parse_keywords(c, &[Keyword::As]) {
            return None;
        }
        c.skip_trivia();
        let (as_database, as_table) = parse_qualified_name(c)?;
        let engine = parse_optional_engine(c);
        Some((as_database, as_table, engine))
    })?;
    query.as_database = as_database;
    query.as_table = Some(as_table);
    query.engine = engine;
    Some(())
}

/// `[(columns)] [ENGINE = engine] [POPULATE] AS SELECT ...`
fn parse_view_tail(cursor: &mut Cursor<'_>, query: &mut CreateQuery) -> Option<()> {
    query.columns = cursor.attempt(parse_columns);
    query.engine = parse_optional_engine(cursor);
    query.populate = parse_keywords(cursor, &[Keyword::Populate]);
    if !parse_keywords(cursor, &[Keyword::As]) {
        return None;
    }
    query.select = Some(parse_as_select(cursor)?);
    Some(())
}
