//! Expression grammar.
//!
//! Column defaults, type parameters and the queries of `AS SELECT` forms all
//! go through [`ParserTernaryOperatorExpression`]. Binary operators are parsed
//! with a Pratt loop over the binding powers in [`super::pratt`].

use super::base::Parser;
use super::common::{ParserToken, parse_comma_list, parse_keywords, parse_token};
use super::cursor::Cursor;
use super::identifier::{ParserCompoundIdentifier, ParserIdentifier};
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use super::types::ParserTypeInCastExpression;
use crate::ast::{
    Binary, Cast, ExpressionList, Function, Literal, LiteralValue, Node, TUPLE_FUNCTION, Ternary,
    Unary,
};
use crate::lexer::{Keyword, TokenKind};

/// `cond ? then : else`, or any lower-level expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserTernaryOperatorExpression;

impl Parser for ParserTernaryOperatorExpression {
    type Output = Node;

    fn name(&self) -> &'static str {
        "expression"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let begin = cursor.pos();
        let condition = parse_binary(cursor, 0)?;
        if parse_token(cursor, TokenKind::Question).is_none() {
            return Some(condition);
        }
        cursor.skip_trivia();
        let then_branch = self.parse(cursor)?;
        parse_token(cursor, TokenKind::Colon)?;
        cursor.skip_trivia();
        let else_branch = self.parse(cursor)?;
        Some(
            Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
                span: cursor.span_from(begin),
            }
            .into(),
        )
    }
}

/// Operator-precedence loop: a prefix-operator chain or an element, then
/// every infix operator that binds at least as tightly as `min_bp`.
fn parse_binary(cursor: &mut Cursor<'_>, min_bp: u8) -> Option<Node> {
    let begin = cursor.pos();

    let prefix = {
        let token = cursor.peek();
        token_to_unary_op(token).zip(prefix_binding_power(token))
    };
    let mut lhs = if let Some((op, bp)) = prefix {
        cursor.advance();
        cursor.skip_trivia();
        let operand = cursor.descend(|c| parse_binary(c, bp))?;
        Unary {
            op,
            operand: Box::new(operand),
            span: cursor.span_from(begin),
        }
        .into()
    } else {
        ParserExpressionElement.parse(cursor)?
    };

    loop {
        let before = cursor.pos();
        cursor.skip_trivia();
        let infix = {
            let token = cursor.peek();
            infix_binding_power(token).zip(token_to_binary_op(token))
        };
        let Some(((left_bp, right_bp), op)) = infix else {
            cursor.set_pos(before);
            break;
        };
        if left_bp < min_bp {
            cursor.set_pos(before);
            break;
        }
        cursor.advance();
        cursor.skip_trivia();
        let rhs = cursor.descend(|c| parse_binary(c, right_bp))?;
        lhs = Binary {
            left: Box::new(lhs),
            op,
            right: Box::new(rhs),
            span: cursor.span_from(begin),
        }
        .into();
    }

    Some(lhs)
}

/// An operand: literal, `NULL`, parenthesized expression or tuple, `CAST`,
/// function call or (compound) column reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserExpressionElement;

impl Parser for ParserExpressionElement {
    type Output = Node;

    fn name(&self) -> &'static str {
        "element of expression"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let token = cursor.peek();
        let literal = match &token.kind {
            TokenKind::Integer(n) => Some(LiteralValue::Integer(*n)),
            TokenKind::Float(f) => Some(LiteralValue::Float(*f)),
            TokenKind::String(s) => Some(LiteralValue::String(s.clone())),
            TokenKind::Word(_) if token.is_keyword(Keyword::Null) => Some(LiteralValue::Null),
            _ => None,
        };
        if let Some(value) = literal {
            let span = cursor.advance().span;
            return Some(Literal::new(value, span).into());
        }

        match &cursor.peek().kind {
            TokenKind::LeftParen => {
                let begin = cursor.pos();
                cursor.advance();
                cursor.skip_trivia();
                let mut items = ParserExpressionList.parse(cursor)?.items;
                parse_token(cursor, TokenKind::RightParen)?;
                if items.len() == 1 {
                    items.pop()
                } else {
                    let span = cursor.span_from(begin);
                    Some(Function::with_arguments(TUPLE_FUNCTION, items, span).into())
                }
            }
            TokenKind::Word(_) | TokenKind::QuotedIdentifier(_) => {
                if let Some(cast) = cursor.attempt(parse_cast) {
                    return Some(cast);
                }
                if let Some(function) = ParserFunction.parse(cursor) {
                    return Some(function.into());
                }
                if is_reserved_word(cursor) {
                    return None;
                }
                ParserCompoundIdentifier.parse(cursor).map(Node::from)
            }
            _ => None,
        }
    }
}

/// Returns true if the current token is a bare word that cannot be a name
/// inside an expression.
fn is_reserved_word(cursor: &Cursor<'_>) -> bool {
    cursor.peek().as_keyword().is_some_and(|k| k.is_reserved())
}

/// `CAST(expr AS type)`.
fn parse_cast(cursor: &mut Cursor<'_>) -> Option<Node> {
    let begin = cursor.pos();
    if !cursor.peek().is_keyword(Keyword::Cast) {
        return None;
    }
    cursor.advance();
    parse_token(cursor, TokenKind::LeftParen)?;
    cursor.skip_trivia();
    let expr = ParserTernaryOperatorExpression.parse(cursor)?;
    if !parse_keywords(cursor, &[Keyword::As]) {
        return None;
    }
    cursor.skip_trivia();
    let data_type = ParserTypeInCastExpression.parse(cursor)?;
    parse_token(cursor, TokenKind::RightParen)?;
    Some(
        Cast {
            expr: Box::new(expr),
            data_type: Box::new(data_type.into()),
            span: cursor.span_from(begin),
        }
        .into(),
    )
}

/// `name(arguments)`, the parentheses being mandatory.
///
/// Also the first alternative for parametrized data types and engines, so
/// `FixedString(2)` and `MergeTree(EventDate, (CounterID, EventDate), 8192)`
/// parse through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserFunction;

impl Parser for ParserFunction {
    type Output = Function;

    fn name(&self) -> &'static str {
        "function"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Function> {
        let begin = cursor.pos();
        if is_reserved_word(cursor) {
            return None;
        }
        let name = ParserIdentifier.parse(cursor)?.name();
        parse_token(cursor, TokenKind::LeftParen)?;
        cursor.skip_trivia();
        let arguments = parse_arguments(cursor)?;
        Some(Function::with_arguments(
            name,
            arguments,
            cursor.span_from(begin),
        ))
    }
}

/// The inside of an argument list up to and including `)`. `f()` and
/// `count(*)` are accepted.
pub(crate) fn parse_arguments(cursor: &mut Cursor<'_>) -> Option<Vec<Node>> {
    if ParserToken(TokenKind::RightParen).ignore(cursor) {
        return Some(Vec::new());
    }
    let star = cursor.attempt(|c| {
        let span = ParserToken(TokenKind::Star).parse(c)?;
        parse_token(c, TokenKind::RightParen)?;
        Some(Node::Asterisk(span))
    });
    if let Some(star) = star {
        return Some(vec![star]);
    }
    let arguments = ParserExpressionList.parse(cursor)?;
    parse_token(cursor, TokenKind::RightParen)?;
    Some(arguments.items)
}

/// `expr (',' expr)*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserExpressionList;

impl Parser for ParserExpressionList {
    type Output = ExpressionList;

    fn name(&self) -> &'static str {
        "list of expressions"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<ExpressionList> {
        parse_comma_list(cursor, &ParserTernaryOperatorExpression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::cursor::DEFAULT_MAX_DEPTH;

    fn expr(sql: &str) -> Option<String> {
        let tokens = Lexer::new(sql).tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        let node = ParserTernaryOperatorExpression.parse(&mut cursor)?;
        cursor.skip_trivia();
        assert!(cursor.is_at_end(), "trailing input in {sql:?}");
        Some(node.to_string())
    }

    #[test]
    fn test_precedence() {
        assert_eq!(expr("1 + 2 * 3").as_deref(), Some("1 + 2 * 3"));
        assert_eq!(expr("(1 + 2) * 3").as_deref(), Some("(1 + 2) * 3"));
        assert_eq!(expr("a OR b AND c").as_deref(), Some("a OR b AND c"));
        assert_eq!(expr("(a OR b) AND c").as_deref(), Some("(a OR b) AND c"));
        assert_eq!(expr("NOT a = b").as_deref(), Some("NOT (a = b)"));
    }

    #[test]
    fn test_unary_chains() {
        assert_eq!(expr("-1").as_deref(), Some("-1"));
        assert_eq!(expr("- -x").as_deref(), Some("-(-x)"));
        assert_eq!(expr("-a * b").as_deref(), Some("-a * b"));
    }

    #[test]
    fn test_ternary() {
        assert_eq!(
            expr("x > 0 ? 'pos' : x < 0 ? 'neg' : 'zero'").as_deref(),
            Some("x > 0 ? 'pos' : x < 0 ? 'neg' : 'zero'")
        );
        assert!(expr("x ? 1").is_none());
    }

    #[test]
    fn test_functions_and_cast() {
        assert_eq!(expr("now()").as_deref(), Some("now()"));
        assert_eq!(expr("count(*)").as_deref(), Some("count(*)"));
        assert_eq!(
            expr("toDate(EventTime, 'UTC')").as_deref(),
            Some("toDate(EventTime, 'UTC')")
        );
        assert_eq!(
            expr("cast(x AS FixedString(2))").as_deref(),
            Some("CAST(x AS FixedString(2))")
        );
    }

    #[test]
    fn test_reserved_words_are_not_columns() {
        assert!(expr("DEFAULT").is_none());
        assert!(expr("a AND").is_none());
        assert_eq!(expr("date").as_deref(), Some("date"));
        assert_eq!(expr("`from`").as_deref(), Some("`from`"));
    }

    #[test]
    fn test_tuple() {
        assert_eq!(
            expr("MergeTree(EventDate, (CounterID, EventDate), 8192)").as_deref(),
            Some("MergeTree(EventDate, (CounterID, EventDate), 8192)")
        );
        assert_eq!(expr("((x))").as_deref(), Some("x"));
    }

    #[test]
    fn test_compound_column_reference() {
        assert_eq!(expr("Hits.URL || 'x'").as_deref(), Some("Hits.URL || 'x'"));
    }
}
