//! DDL Lexer/Tokenizer
//!
//! A hand-written lexer that turns DDL text into tokens, keeping whitespace
//! and comments as tokens of their own.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
