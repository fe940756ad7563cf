//! Data types: parametrized identifiers, nested tables and name-type pairs.

use super::base::Parser;
use super::common::{
    ParserKeyword, ParserToken, ParserWhitespaceOrComments, parse_comma_list, parse_token,
};
use super::cursor::Cursor;
use super::expression::ParserFunction;
use super::identifier::{ParserCompoundIdentifier, ParserIdentifier};
use crate::ast::{ExpressionList, Function, Identifier, NameTypePair, Node};
use crate::lexer::{Keyword, TokenKind};

/// Parametric type or storage engine, parentheses mandatory:
/// `FixedString(10)`, `Partitioned(Log, ChunkID)`,
/// `Nested(CounterID UInt32, UserAgentMajor FixedString(2))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserIdentifierWithParameters;

impl Parser for ParserIdentifierWithParameters {
    type Output = Function;

    fn name(&self) -> &'static str {
        "identifier with parameters"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Function> {
        ParserFunction
            .parse(cursor)
            .or_else(|| ParserNestedTable.parse(cursor))
    }
}

/// Data type or storage engine, possibly with parameters: `UInt8`, or any
/// form [`ParserIdentifierWithParameters`] accepts. A bare name becomes a
/// function node without arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserIdentifierWithOptionalParameters;

impl Parser for ParserIdentifierWithOptionalParameters {
    type Output = Function;

    fn name(&self) -> &'static str {
        "identifier with optional parameters"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Function> {
        parse_optional_parameters(cursor)
    }
}

/// The target type of `CAST(x AS type)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserTypeInCastExpression;

impl Parser for ParserTypeInCastExpression {
    type Output = Function;

    fn name(&self) -> &'static str {
        "type in cast expression"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Function> {
        parse_optional_parameters(cursor)
    }
}

fn parse_optional_parameters(cursor: &mut Cursor<'_>) -> Option<Function> {
    if let Some(function) = ParserIdentifierWithParameters.parse(cursor) {
        return Some(function);
    }
    let Identifier { parts, span } = ParserIdentifier.parse(cursor)?;
    Some(Function::bare(parts.join("."), span))
}

/// `Nested(name1 type1, name2 type2, ...)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserNestedTable;

/// Name given to nested-table type nodes, whatever case the input used.
pub const NESTED_TYPE_NAME: &str = "Nested";

impl Parser for ParserNestedTable {
    type Output = Function;

    fn name(&self) -> &'static str {
        "nested table"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Function> {
        let begin = cursor.pos();
        ParserKeyword::new(Keyword::Nested).parse(cursor)?;
        parse_token(cursor, TokenKind::LeftParen)?;
        cursor.skip_trivia();
        let members = ParserNameTypePairList.parse(cursor)?;
        parse_token(cursor, TokenKind::RightParen)?;
        Some(Function::with_arguments(
            NESTED_TYPE_NAME,
            members.items,
            cursor.span_from(begin),
        ))
    }
}

/// `name type`, generic over how the name is parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserNameTypePairWith<N> {
    name_parser: N,
}

impl<N> ParserNameTypePairWith<N> {
    /// Creates the rule around a name parser.
    #[must_use]
    pub const fn new(name_parser: N) -> Self {
        Self { name_parser }
    }
}

/// `URL String`.
pub type ParserNameTypePair = ParserNameTypePairWith<ParserIdentifier>;

/// `Hits.URL String`: the name may contain dots.
pub type ParserCompoundNameTypePair = ParserNameTypePairWith<ParserCompoundIdentifier>;

impl<N> Parser for ParserNameTypePairWith<N>
where
    N: Parser<Output = Identifier>,
{
    type Output = NameTypePair;

    fn name(&self) -> &'static str {
        "name and type pair"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<NameTypePair> {
        let begin = cursor.pos();
        let name = self.name_parser.parse(cursor)?;
        if !ParserWhitespaceOrComments.ignore(cursor) {
            return None;
        }
        let data_type = ParserIdentifierWithOptionalParameters.parse(cursor)?;
        Some(NameTypePair {
            name: name.name(),
            data_type: Box::new(data_type.into()),
            span: cursor.span_from(begin),
        })
    }
}

/// Adapts a name-type pair rule to produce nodes, for list parsing.
struct AsNode<P>(P);

impl<P> Parser for AsNode<P>
where
    P: Parser,
    P::Output: Into<Node>,
{
    type Output = Node;

    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        self.0.parse_impl(cursor).map(Into::into)
    }
}

/// Comma-separated name-type pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserNameTypePairList;

impl Parser for ParserNameTypePairList {
    type Output = ExpressionList;

    fn name(&self) -> &'static str {
        "name and type pair list"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<ExpressionList> {
        parse_comma_list(cursor, &AsNode(ParserNameTypePair::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::cursor::DEFAULT_MAX_DEPTH;

    fn run<P: Parser>(parser: &P, sql: &str) -> (Option<P::Output>, usize) {
        let tokens = Lexer::new(sql).tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        let out = parser.parse(&mut cursor);
        (out, cursor.pos())
    }

    #[test]
    fn test_bare_type_has_no_arguments() {
        let (f, _) = run(&ParserIdentifierWithOptionalParameters, "UInt8");
        let f = f.expect("type");
        assert_eq!(f.name, "UInt8");
        assert_eq!(f.arguments, None);
    }

    #[test]
    fn test_parameters_are_required_without_optional() {
        let (f, pos) = run(&ParserIdentifierWithParameters, "UInt8");
        assert!(f.is_none());
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_nested_table_members_in_order() {
        let (f, _) = run(
            &ParserIdentifierWithParameters,
            "Nested(a UInt32, b FixedString(2))",
        );
        let f = f.expect("nested");
        assert_eq!(f.name, "Nested");
        let names: Vec<_> = f
            .args()
            .iter()
            .map(|n| match n {
                Node::NameTypePair(p) => p.name.as_str(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            Node::from(f).to_string(),
            "Nested(a UInt32, b FixedString(2))"
        );
    }

    #[test]
    fn test_nested_inside_nested() {
        let (f, _) = run(
            &ParserIdentifierWithOptionalParameters,
            "Nested(a Nested(b Nested(c UInt8)), d String)",
        );
        assert_eq!(
            f.map(|f| Node::from(f).to_string()).as_deref(),
            Some("Nested(a Nested(b Nested(c UInt8)), d String)")
        );
    }

    #[test]
    fn test_name_type_pair_requires_separator() {
        let (pair, _) = run(&ParserNameTypePair::default(), "URL String");
        assert_eq!(pair.map(|p| p.name), Some(String::from("URL")));

        let (pair, pos) = run(&ParserNameTypePair::default(), "URL/**/String");
        assert!(pair.is_some());
        assert_eq!(pos, 3);

        let (pair, pos) = run(&ParserNameTypePair::default(), "URL");
        assert!(pair.is_none());
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_compound_name_type_pair() {
        let (pair, _) = run(&ParserCompoundNameTypePair::default(), "Hits.URL String");
        assert_eq!(pair.map(|p| p.name), Some(String::from("Hits.URL")));

        let (pair, _) = run(&ParserNameTypePair::default(), "Hits.URL String");
        assert!(pair.is_none());
    }

    #[test]
    fn test_name_type_pair_list_rejects_trailing_comma() {
        let (list, _) = run(&ParserNameTypePairList, "a UInt8, b String");
        assert_eq!(list.map(|l| l.len()), Some(2));

        let (list, pos) = run(&ParserNameTypePairList, "a UInt8,");
        assert!(list.is_none());
        assert_eq!(pos, 0);
    }
}
