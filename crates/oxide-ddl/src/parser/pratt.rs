//! Pratt binding powers for expression operators.

use crate::ast::{BinaryOp, UnaryOp};
use crate::lexer::{Keyword, Token, TokenKind};

/// Returns the prefix binding power for an operator token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub fn prefix_binding_power(token: &Token) -> Option<u8> {
    match &token.kind {
        // Unary minus
        TokenKind::Minus => Some(17),
        // NOT keyword: binds looser than comparisons
        TokenKind::Word(_) if token.is_keyword(Keyword::Not) => Some(5),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub fn infix_binding_power(token: &Token) -> Option<(u8, u8)> {
    match &token.kind {
        // Comparison operators
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => Some((5, 6)),

        // Additive (string concat has same precedence as addition)
        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((13, 14)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((15, 16)),

        TokenKind::Word(_) => match token.as_keyword() {
            // Logical OR (lowest precedence)
            Some(Keyword::Or) => Some((1, 2)),
            // Logical AND
            Some(Keyword::And) => Some((3, 4)),
            Some(Keyword::Like) => Some((7, 8)),
            _ => None,
        },

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub fn token_to_binary_op(token: &Token) -> Option<BinaryOp> {
    match &token.kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Word(_) => match token.as_keyword() {
            Some(Keyword::And) => Some(BinaryOp::And),
            Some(Keyword::Or) => Some(BinaryOp::Or),
            Some(Keyword::Like) => Some(BinaryOp::Like),
            _ => None,
        },
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub fn token_to_unary_op(token: &Token) -> Option<UnaryOp> {
    match &token.kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Word(_) if token.is_keyword(Keyword::Not) => Some(UnaryOp::Not),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn token(kind: TokenKind) -> Token {
        Token::new(kind, Span::default())
    }

    fn word(text: &str) -> Token {
        token(TokenKind::Word(String::from(text)))
    }

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&token(TokenKind::Plus)).unwrap();
        let mul_bp = infix_binding_power(&token(TokenKind::Star)).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // AND should bind tighter than OR
        let and_bp = infix_binding_power(&word("and")).unwrap();
        let or_bp = infix_binding_power(&word("OR")).unwrap();
        assert!(and_bp.0 > or_bp.0);

        // Comparison should bind tighter than logical operators
        let eq_bp = infix_binding_power(&token(TokenKind::Eq)).unwrap();
        assert!(eq_bp.0 > and_bp.0);

        // Unary minus binds tighter than any infix operator
        let neg_bp = prefix_binding_power(&token(TokenKind::Minus)).unwrap();
        assert!(neg_bp > mul_bp.1);
    }

    #[test]
    fn test_binding_powers_agree_with_formatter() {
        let ops = [
            TokenKind::Plus,
            TokenKind::Star,
            TokenKind::Eq,
            TokenKind::Concat,
        ];
        for a in &ops {
            for b in &ops {
                let (ta, tb) = (token(a.clone()), token(b.clone()));
                let (bp_a, bp_b) = (
                    infix_binding_power(&ta).unwrap().0,
                    infix_binding_power(&tb).unwrap().0,
                );
                let (op_a, op_b) = (
                    token_to_binary_op(&ta).unwrap(),
                    token_to_binary_op(&tb).unwrap(),
                );
                assert_eq!(bp_a.cmp(&bp_b), op_a.precedence().cmp(&op_b.precedence()));
            }
        }
    }

    #[test]
    fn test_left_associativity() {
        // Binary operators should be left-associative
        let (left, right) = infix_binding_power(&token(TokenKind::Plus)).unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&token(TokenKind::Plus)), Some(BinaryOp::Add));
        assert_eq!(token_to_binary_op(&token(TokenKind::Minus)), Some(BinaryOp::Sub));
        assert_eq!(token_to_binary_op(&word("like")), Some(BinaryOp::Like));
        assert_eq!(token_to_binary_op(&word("Likes")), None);
        assert_eq!(token_to_binary_op(&token(TokenKind::LeftParen)), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&token(TokenKind::Minus)), Some(UnaryOp::Neg));
        assert_eq!(token_to_unary_op(&word("NOT")), Some(UnaryOp::Not));
        assert_eq!(token_to_unary_op(&token(TokenKind::Plus)), None);
    }
}
