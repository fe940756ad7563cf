//! Token-level rules shared by the whole grammar.

use super::base::Parser;
use super::cursor::Cursor;
use crate::ast::{ExpressionList, Literal, LiteralValue, Node};
use crate::lexer::{Keyword, Span, TokenKind};

/// One or more whitespace/comment tokens. Used where a separator is
/// mandatory; optional separators are skipped with
/// [`Cursor::skip_trivia`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserWhitespaceOrComments;

impl Parser for ParserWhitespaceOrComments {
    type Output = ();

    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<()> {
        if !cursor.peek().is_trivia() {
            return None;
        }
        cursor.skip_trivia();
        Some(())
    }
}

/// A keyword, as a whole word in any case. Produces the keyword's span.
#[derive(Debug, Clone, Copy)]
pub struct ParserKeyword(pub Keyword);

impl ParserKeyword {
    /// Creates a keyword rule.
    #[must_use]
    pub const fn new(keyword: Keyword) -> Self {
        Self(keyword)
    }
}

impl Parser for ParserKeyword {
    type Output = Span;

    fn name(&self) -> &'static str {
        self.0.as_str()
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Span> {
        if cursor.peek().is_keyword(self.0) {
            Some(cursor.advance().span)
        } else {
            None
        }
    }
}

/// A single punctuation token. Produces its span.
#[derive(Debug, Clone)]
pub struct ParserToken(pub TokenKind);

impl Parser for ParserToken {
    type Output = Span;

    fn name(&self) -> &'static str {
        self.0.describe()
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Span> {
        if cursor.peek().kind == self.0 {
            Some(cursor.advance().span)
        } else {
            None
        }
    }
}

/// `'text'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserStringLiteral;

impl Parser for ParserStringLiteral {
    type Output = Node;

    fn name(&self) -> &'static str {
        "string literal"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let TokenKind::String(value) = &cursor.peek().kind else {
            return None;
        };
        let value = LiteralValue::String(value.clone());
        let span = cursor.advance().span;
        Some(Literal::new(value, span).into())
    }
}

/// Consumes `keywords` in order, each preceded by optional trivia. Leaves
/// the cursor untouched unless all of them match.
pub fn parse_keywords(cursor: &mut Cursor<'_>, keywords: &[Keyword]) -> bool {
    cursor
        .attempt(|c| {
            for keyword in keywords {
                c.skip_trivia();
                ParserKeyword::new(*keyword).parse(c)?;
            }
            Some(())
        })
        .is_some()
}

/// Consumes optional trivia and then `kind`. Leaves the cursor untouched
/// on a miss.
pub fn parse_token(cursor: &mut Cursor<'_>, kind: TokenKind) -> Option<Span> {
    cursor.attempt(|c| {
        c.skip_trivia();
        ParserToken(kind).parse(c)
    })
}

/// `element (',' element)*`.
///
/// A comma commits to another element: `a, b,` fails as a whole instead of
/// stopping after `b`.
pub fn parse_comma_list<P>(cursor: &mut Cursor<'_>, element: &P) -> Option<ExpressionList>
where
    P: Parser<Output = Node>,
{
    let begin = cursor.pos();
    let mut items = vec![element.parse(cursor)?];
    while parse_token(cursor, TokenKind::Comma).is_some() {
        cursor.skip_trivia();
        items.push(element.parse(cursor)?);
    }
    Some(ExpressionList::new(items, cursor.span_from(begin)))
}
