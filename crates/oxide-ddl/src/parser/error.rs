//! Parser error types.

use crate::lexer::Span;

/// Why a statement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input contains something that is not a token.
    #[error("Lexer error at position {}: {message}", .span.start)]
    Lexer {
        /// What the lexer could not read.
        message: String,
        /// Where the bad input is.
        span: Span,
    },

    /// No rule matched. `position` is the byte offset of the furthest token
    /// any rule reached, `expected` the rules attempted there.
    #[error(
        "Syntax error at position {position} (near '{near}'): expected {}",
        .expected.join(", ")
    )]
    Syntax {
        /// Byte offset of the furthest position reached.
        position: usize,
        /// Input text starting at `position`, cut to a short excerpt.
        near: String,
        /// Labels of the rules attempted at `position`, in attempt order.
        expected: Vec<&'static str>,
    },

    /// The input nests deeper than the configured limit.
    #[error("Maximum parse depth ({limit}) exceeded at position {position}")]
    TooDeep {
        /// The configured limit.
        limit: usize,
        /// Byte offset where the limit was hit.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Lexer { span, .. } => span.start,
            Self::Syntax { position, .. } | Self::TooDeep { position, .. } => *position,
        }
    }

    /// Rule labels a syntax error lists; empty for other errors.
    #[must_use]
    pub fn expected(&self) -> &[&'static str] {
        match self {
            Self::Syntax { expected, .. } => expected,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_message_lists_labels() {
        let err = ParseError::Syntax {
            position: 17,
            near: String::from("("),
            expected: vec!["column declaration", "'('"],
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at position 17 (near '('): expected column declaration, '('"
        );
        assert_eq!(err.position(), 17);
        assert_eq!(err.expected().len(), 2);
    }

    #[test]
    fn test_other_errors() {
        let err = ParseError::Lexer {
            message: String::from("unterminated string literal"),
            span: Span::new(4, 9),
        };
        assert_eq!(err.position(), 4);
        assert!(err.expected().is_empty());
        assert_eq!(
            err.to_string(),
            "Lexer error at position 4: unterminated string literal"
        );

        let err = ParseError::TooDeep {
            limit: 8,
            position: 30,
        };
        assert_eq!(
            err.to_string(),
            "Maximum parse depth (8) exceeded at position 30"
        );
    }
}
