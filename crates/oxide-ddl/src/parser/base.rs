//! The contract every grammar rule implements.

use super::cursor::Cursor;

/// A grammar rule.
///
/// Implementors provide [`Parser::parse_impl`]; callers use [`Parser::parse`],
/// [`Parser::ignore`] or [`Parser::check`], which add the bookkeeping every
/// rule shares:
///
/// - the rule's [`name`](Parser::name) is recorded as expected at the
///   starting position,
/// - the nesting depth is checked and incremented,
/// - on failure the cursor is put back where the rule started, so the next
///   alternative sees the same position,
/// - on success the furthest-position tracker moves forward.
///
/// Failure is `None`. A rule never reports an error any other way.
pub trait Parser {
    /// What a successful parse produces.
    type Output;

    /// Label used in diagnostics.
    fn name(&self) -> &'static str;

    /// The rule itself. May leave the cursor anywhere on failure.
    fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<Self::Output>;

    /// Runs the rule.
    fn parse(&self, cursor: &mut Cursor<'_>) -> Option<Self::Output> {
        let begin = cursor.pos();
        cursor.descend(|c| {
            c.expected_mut().add(begin, self.name());
            let result = self.parse_impl(c);
            let reached = c.pos();
            c.expected_mut().reach(reached);
            if result.is_none() {
                c.set_pos(begin);
            }
            result
        })
    }

    /// Runs the rule and discards its output.
    fn ignore(&self, cursor: &mut Cursor<'_>) -> bool {
        self.parse(cursor).is_some()
    }

    /// Probes for the rule. On failure the position is exactly what it was
    /// before the call; on success the match is consumed.
    fn check(&self, cursor: &mut Cursor<'_>) -> bool {
        let begin = cursor.pos();
        if self.parse(cursor).is_some() {
            true
        } else {
            cursor.set_pos(begin);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, TokenKind};
    use crate::parser::cursor::DEFAULT_MAX_DEPTH;

    /// Consumes `n` tokens, then succeeds only if it is at a comma.
    struct TakeThenComma(usize);

    impl Parser for TakeThenComma {
        type Output = usize;

        fn name(&self) -> &'static str {
            "take then comma"
        }

        fn parse_impl(&self, cursor: &mut Cursor<'_>) -> Option<usize> {
            for _ in 0..self.0 {
                cursor.advance();
            }
            matches!(cursor.peek().kind, TokenKind::Comma).then_some(self.0)
        }
    }

    #[test]
    fn test_failed_parse_restores_position() {
        let tokens = Lexer::new("a b c").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        cursor.advance();
        let before = cursor.pos();

        assert_eq!(TakeThenComma(3).parse(&mut cursor), None);
        assert_eq!(cursor.pos(), before);
        assert!(!TakeThenComma(1).ignore(&mut cursor));
        assert_eq!(cursor.pos(), before);
        assert!(!TakeThenComma(2).check(&mut cursor));
        assert_eq!(cursor.pos(), before);
    }

    #[test]
    fn test_successful_parse_consumes() {
        let tokens = Lexer::new("a,b").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        assert!(TakeThenComma(1).check(&mut cursor));
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn test_failed_parse_still_moves_furthest_position() {
        let tokens = Lexer::new("a b c").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        assert!(TakeThenComma(4).parse(&mut cursor).is_none());
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.expected().max_parsed_pos, 4);
    }

    #[test]
    fn test_name_recorded_at_start() {
        let tokens = Lexer::new("a").tokenize();
        let mut cursor = Cursor::new(&tokens, DEFAULT_MAX_DEPTH);
        assert!(TakeThenComma(0).parse(&mut cursor).is_none());
        assert_eq!(cursor.expected().variants, vec!["take then comma"]);
    }
}
