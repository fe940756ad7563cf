//! Column declarations.

use super::base::Parser;
use super::common::{
    ParserKeyword, ParserStringLiteral, ParserWhitespaceOrComments, parse_comma_list,
    parse_token,
};
use super::cursor::Cursor;
use super::expression::{ParserTernaryOperatorExpression, parse_arguments};
use super::identifier::{ParserCompoundIdentifier, ParserIdentifier};
use super::types::ParserIdentifierWithOptionalParameters;
use crate::ast::{
    ColumnDeclaration, ColumnDefault, DefaultSpecifier, ExpressionList, Function, Identifier,
    Node,
};
use crate::lexer::{Keyword, TokenKind};

/// Name of the function node holding a column's compression codecs.
pub const CODEC_FUNCTION: &str = "CODEC";

/// `name [type] [DEFAULT|MATERIALIZED|ALIAS expr] [COMMENT 'text'] [CODEC(...)]`,
/// generic over how the name is parsed.
///
/// Either the type or the default clause must be present. A specifier
/// keyword right after the name is never taken for a type: `x DEFAULT 1`
/// declares an untyped column, not one of type `DEFAULT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserColumnDeclarationWith<N> {
    name_parser: N,
}

impl<N> ParserColumnDeclarationWith<N> {
    /// Creates the rule around a name parser.
    #[must_use]
    pub const fn new(name_parser: N) -> Self {
        Self { name_parser }
    }
}

/// Column declaration with a plain name.
pub type ParserColumnDeclaration = ParserColumnDeclarationWith<ParserIdentifier>;

/// Column declaration whose name may contain dots.
pub type ParserCompoundColumnDeclaration = ParserColumnDeclarationWith<ParserCompoundIdentifier>;

impl<N> Parser for ParserColumnDeclarationWith<N>
where
    N: Parser<Output = Identifier>,
{
    type Output = ColumnDeclaration;

    fn name(&self) -> &'static str {
        "column declaration"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<ColumnDeclaration> {
        let begin = cursor.pos();

        let name = self.name_parser.parse(cursor)?;
        cursor.skip_trivia();

        // A specifier keyword here means there is no type.
        let mut data_type = None;
        let fallback_pos = cursor.pos();
        let specifier_follows = DefaultSpecifier::ALL
            .iter()
            .any(|s| ParserKeyword::new(s.keyword()).check(cursor));
        if specifier_follows {
            cursor.set_pos(fallback_pos);
        } else if let Some(parsed) = ParserIdentifierWithOptionalParameters.parse(cursor) {
            data_type = Some(Box::new(Node::from(parsed)));
            cursor.skip_trivia();
        }

        let specifier = DefaultSpecifier::ALL
            .into_iter()
            .find(|s| ParserKeyword::new(s.keyword()).ignore(cursor));
        let default = match specifier {
            Some(specifier) => {
                if !ParserWhitespaceOrComments.ignore(cursor) {
                    return None;
                }
                let expression = ParserTernaryOperatorExpression.parse(cursor)?;
                Some(ColumnDefault {
                    specifier,
                    expression: Box::new(expression),
                })
            }
            None if data_type.is_none() => return None,
            None => None,
        };

        let comment = parse_comment(cursor)?;
        let codec = parse_codec(cursor)?;

        Some(ColumnDeclaration {
            name: name.name(),
            data_type,
            default,
            codec,
            comment,
            span: cursor.span_from(begin),
        })
    }
}

/// Optional `COMMENT 'text'`. The outer `None` is a committed failure:
/// the keyword was there but the string was not.
fn parse_comment(cursor: &mut Cursor<'_>) -> Option<Option<Box<Node>>> {
    let before = cursor.pos();
    cursor.skip_trivia();
    if !ParserKeyword::new(Keyword::Comment).ignore(cursor) {
        cursor.set_pos(before);
        return Some(None);
    }
    cursor.skip_trivia();
    let comment = ParserStringLiteral.parse(cursor)?;
    Some(Some(Box::new(comment)))
}

/// Optional `CODEC(ZSTD(1), LZ4)`, with the same commitment as
/// [`parse_comment`].
fn parse_codec(cursor: &mut Cursor<'_>) -> Option<Option<Box<Node>>> {
    let before = cursor.pos();
    cursor.skip_trivia();
    let begin = cursor.pos();
    if !ParserKeyword::new(Keyword::Codec).ignore(cursor) {
        cursor.set_pos(before);
        return Some(None);
    }
    parse_token(cursor, TokenKind::LeftParen)?;
    cursor.skip_trivia();
    let arguments = parse_arguments(cursor)?;
    let codec = Function::with_arguments(CODEC_FUNCTION, arguments, cursor.span_from(begin));
    Some(Some(Box::new(codec.into())))
}

/// Comma-separated column declarations, in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserColumnDeclarationList;

impl Parser for ParserColumnDeclarationList {
    type Output = ExpressionList;

    fn name(&self) -> &'static str {
        "column declaration list"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<ExpressionList> {
        parse_comma_list(cursor, &ColumnNode)
    }
}

/// [`ParserColumnDeclaration`] producing a [`Node`].
struct ColumnNode;

impl Parser for ColumnNode {
    type Output = Node;

    fn name(&self) -> &'static str {
        "column declaration"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        ParserColumnDeclaration::default()
            .parse_impl(cursor)
            .map(Node::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, LiteralValue};
    use crate::lexer::Lexer;
    use crate::parser::cursor::DEFAULT_MAX_DEPTH;

    fn column(sql: &str) -> Option<ColumnDeclaration> {
        let tokens = Lexer::new(sql).tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        let column = ParserColumnDeclaration::default().parse(&mut cursor);
        if column.is_none() {
            assert_eq!(cursor.pos(), 0, "failed parse moved the cursor");
        }
        column
    }

    #[test]
    fn test_default_without_type() {
        let c = column("x DEFAULT 1").expect("column");
        assert_eq!(c.name, "x");
        assert!(c.data_type.is_none());
        assert_eq!(c.default_specifier(), Some(DefaultSpecifier::Default));
        assert!(matches!(
            c.default_expression(),
            Some(Node::Literal(Literal {
                value: LiteralValue::Integer(1),
                ..
            }))
        ));
    }

    #[test]
    fn test_type_and_default() {
        let c = column("x UInt8 DEFAULT 1").expect("column");
        assert_eq!(c.type_function().map(|f| f.name.as_str()), Some("UInt8"));
        assert_eq!(c.default_specifier(), Some(DefaultSpecifier::Default));
    }

    #[test]
    fn test_specifier_keywords_any_case() {
        let c = column("x materialized now()").expect("column");
        assert_eq!(c.default_specifier(), Some(DefaultSpecifier::Materialized));
        let c = column("y Alias x * 2").expect("column");
        assert_eq!(c.default_specifier(), Some(DefaultSpecifier::Alias));
        assert_eq!(
            Node::from(c).to_string(),
            "y ALIAS x * 2"
        );
    }

    #[test]
    fn test_bare_name_is_rejected() {
        assert!(column("x").is_none());
        assert!(column("x ").is_none());
    }

    #[test]
    fn test_specifier_commits_to_expression() {
        assert!(column("x MATERIALIZED").is_none());
        assert!(column("x UInt8 DEFAULT ,").is_none());
        assert!(column("x DEFAULT(1)").is_none());
    }

    #[test]
    fn test_comment_and_codec() {
        let c = column("x UInt64 DEFAULT 0 COMMENT 'id' CODEC(Delta, ZSTD(1))").expect("column");
        assert!(c.comment.is_some());
        assert!(c.codec.is_some());
        assert_eq!(
            Node::from(c).to_string(),
            "x UInt64 DEFAULT 0 COMMENT 'id' CODEC(Delta, ZSTD(1))"
        );

        assert!(column("x UInt8 COMMENT").is_none());
        assert!(column("x UInt8 COMMENT 1").is_none());
        assert!(column("x UInt8 CODEC").is_none());
    }

    #[test]
    fn test_children_follow_declaration_slots() {
        let c = column("x UInt8 DEFAULT 1 COMMENT 'c' CODEC(LZ4)").expect("column");
        let node = Node::from(c);
        let ids: Vec<_> = node.children().iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["Function", "Literal", "Function", "Literal"]);
    }

    #[test]
    fn test_column_list_order_and_trailing_comma() {
        let tokens = Lexer::new("a UInt8, b String, c Nested(x Int32)").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        let list = ParserColumnDeclarationList.parse(&mut cursor).expect("list");
        let names: Vec<_> = list
            .items
            .iter()
            .map(|n| match n {
                Node::ColumnDeclaration(c) => c.name.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let tokens = Lexer::new("a UInt8,").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        assert!(ParserColumnDeclarationList.parse(&mut cursor).is_none());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_compound_column_name() {
        let tokens = Lexer::new("Hits.URL String").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        let c = ParserCompoundColumnDeclaration::default()
            .parse(&mut cursor)
            .expect("column");
        assert_eq!(c.name, "Hits.URL");
    }
}
