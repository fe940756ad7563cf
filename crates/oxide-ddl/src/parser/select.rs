//! The `SELECT` subset used by `AS SELECT` forms.

use super::base::Parser;
use super::common::{ParserToken, parse_comma_list, parse_keywords};
use super::cursor::Cursor;
use super::expression::{ParserExpressionList, ParserTernaryOperatorExpression};
use super::identifier::{ParserCompoundIdentifier, ParserIdentifier};
use crate::ast::{Alias, Node, OrderByElement, OrderDirection, SelectQuery};
use crate::lexer::{Keyword, TokenKind};

/// `SELECT [DISTINCT] list [FROM t] [WHERE e] [GROUP BY list]
/// [ORDER BY e [ASC|DESC], ...] [LIMIT e]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserSelectQuery;

impl Parser for ParserSelectQuery {
    type Output = SelectQuery;

    fn name(&self) -> &'static str {
        "SELECT query"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<SelectQuery> {
        let begin = cursor.pos();
        if !parse_keywords(cursor, &[Keyword::Select]) {
            return None;
        }
        let distinct = parse_keywords(cursor, &[Keyword::Distinct]);
        cursor.skip_trivia();
        let columns = parse_comma_list(cursor, &SelectItem)?;

        let mut from: Option<Box<Node>> = None;
        if parse_keywords(cursor, &[Keyword::From]) {
            cursor.skip_trivia();
            from = Some(Box::new(ParserCompoundIdentifier.parse(cursor)?.into()));
        }

        let mut where_expr: Option<Box<Node>> = None;
        if parse_keywords(cursor, &[Keyword::Where]) {
            cursor.skip_trivia();
            where_expr = Some(Box::new(ParserTernaryOperatorExpression.parse(cursor)?));
        }

        let mut group_by: Option<Box<Node>> = None;
        if parse_keywords(cursor, &[Keyword::Group, Keyword::By]) {
            cursor.skip_trivia();
            group_by = Some(Box::new(ParserExpressionList.parse(cursor)?.into()));
        }

        let mut order_by: Option<Box<Node>> = None;
        if parse_keywords(cursor, &[Keyword::Order, Keyword::By]) {
            cursor.skip_trivia();
            order_by = Some(Box::new(
                parse_comma_list(cursor, &ParserOrderByElement)?.into(),
            ));
        }

        let mut limit: Option<Box<Node>> = None;
        if parse_keywords(cursor, &[Keyword::Limit]) {
            cursor.skip_trivia();
            limit = Some(Box::new(ParserTernaryOperatorExpression.parse(cursor)?));
        }

        Some(SelectQuery {
            distinct,
            columns: Box::new(columns.into()),
            from,
            where_expr,
            group_by,
            order_by,
            limit,
            span: cursor.span_from(begin),
        })
    }
}

/// `*` or `expr [AS name]`.
struct SelectItem;

impl Parser for SelectItem {
    type Output = Node;

    fn name(&self) -> &'static str {
        "select list element"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        if let Some(span) = ParserToken(TokenKind::Star).parse(cursor) {
            return Some(Node::Asterisk(span));
        }
        let begin = cursor.pos();
        let expr = ParserTernaryOperatorExpression.parse(cursor)?;
        if !parse_keywords(cursor, &[Keyword::As]) {
            return Some(expr);
        }
        cursor.skip_trivia();
        let alias = ParserIdentifier.parse(cursor)?.name();
        Some(
            Alias {
                expr: Box::new(expr),
                alias,
                span: cursor.span_from(begin),
            }
            .into(),
        )
    }
}

/// `expr [ASC|DESC]`.
struct ParserOrderByElement;

impl Parser for ParserOrderByElement {
    type Output = Node;

    fn name(&self) -> &'static str {
        "ORDER BY element"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let begin = cursor.pos();
        let expr = ParserTernaryOperatorExpression.parse(cursor)?;
        let direction = if parse_keywords(cursor, &[Keyword::Asc]) {
            Some(OrderDirection::Asc)
        } else if parse_keywords(cursor, &[Keyword::Desc]) {
            Some(OrderDirection::Desc)
        } else {
            None
        };
        Some(
            OrderByElement {
                expr: Box::new(expr),
                direction,
                span: cursor.span_from(begin),
            }
            .into(),
        )
    }
}
