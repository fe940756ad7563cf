//! Name rules.

use super::base::Parser;
use super::cursor::Cursor;
use crate::ast::Identifier;
use crate::lexer::TokenKind;

/// A single bare word or quoted identifier.
///
/// Any bare word is accepted here, keywords included: DDL names such as a
/// column called `date` are never ambiguous at the places this rule is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserIdentifier;

impl Parser for ParserIdentifier {
    type Output = Identifier;

    fn name(&self) -> &'static str {
        "identifier"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Identifier> {
        let name = match &cursor.peek().kind {
            TokenKind::Word(word) => word.clone(),
            TokenKind::QuotedIdentifier(name) => name.clone(),
            _ => return None,
        };
        let span = cursor.advance().span;
        Some(Identifier::new(name, span))
    }
}

/// `ident ('.' ident)*`, with no whitespace around the dots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserCompoundIdentifier;

impl Parser for ParserCompoundIdentifier {
    type Output = Identifier;

    fn name(&self) -> &'static str {
        "compound identifier"
    }

    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Identifier> {
        let begin = cursor.pos();
        let mut parts = ParserIdentifier.parse(cursor)?.parts;
        while matches!(cursor.peek().kind, TokenKind::Dot) {
            cursor.advance();
            parts.extend(ParserIdentifier.parse(cursor)?.parts);
        }
        Some(Identifier::compound(parts, cursor.span_from(begin)))
    }
}

/// `[db.]name`, as used for table and view targets.
pub(crate) fn parse_qualified_name(cursor: &mut Cursor<'_>) -> Option<(Option<String>, String)> {
    cursor.attempt(|c| {
        let first = ParserIdentifier.parse(c)?;
        if !matches!(c.peek().kind, TokenKind::Dot) {
            return Some((None, first.name()));
        }
        c.advance();
        let second = ParserIdentifier.parse(c)?;
        Some((Some(first.name()), second.name()))
    })
}
