//! Token types for the DDL lexer.

use serde::Serialize;

use super::Span;

/// Words with a grammatical role in DDL statements.
///
/// The lexer never classifies words itself: a bare word stays a
/// [`TokenKind::Word`] and the grammar decides, rule by rule, whether it
/// reads it as a keyword or as a name. This is what lets a column be called
/// `Date` or a type be called `Nested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    // Statements
    Create,
    Attach,
    Table,
    Database,
    View,
    Materialized,
    Populate,
    If,
    Not,
    Exists,
    As,
    Engine,

    // Column declarations
    Default,
    Alias,
    Comment,
    Codec,
    Nested,

    // Queries
    Select,
    Distinct,
    From,
    Where,
    Group,
    Order,
    By,
    Asc,
    Desc,
    Limit,

    // Expressions
    And,
    Or,
    Like,
    Null,
    Cast,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "ATTACH" => Some(Self::Attach),
            "TABLE" => Some(Self::Table),
            "DATABASE" => Some(Self::Database),
            "VIEW" => Some(Self::View),
            "MATERIALIZED" => Some(Self::Materialized),
            "POPULATE" => Some(Self::Populate),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "AS" => Some(Self::As),
            "ENGINE" => Some(Self::Engine),
            "DEFAULT" => Some(Self::Default),
            "ALIAS" => Some(Self::Alias),
            "COMMENT" => Some(Self::Comment),
            "CODEC" => Some(Self::Codec),
            "NESTED" => Some(Self::Nested),
            "SELECT" => Some(Self::Select),
            "DISTINCT" => Some(Self::Distinct),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "LIMIT" => Some(Self::Limit),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "LIKE" => Some(Self::Like),
            "NULL" => Some(Self::Null),
            "CAST" => Some(Self::Cast),
            _ => None,
        }
    }

    /// Returns the keyword as an upper-case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Attach => "ATTACH",
            Self::Table => "TABLE",
            Self::Database => "DATABASE",
            Self::View => "VIEW",
            Self::Materialized => "MATERIALIZED",
            Self::Populate => "POPULATE",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::As => "AS",
            Self::Engine => "ENGINE",
            Self::Default => "DEFAULT",
            Self::Alias => "ALIAS",
            Self::Comment => "COMMENT",
            Self::Codec => "CODEC",
            Self::Nested => "NESTED",
            Self::Select => "SELECT",
            Self::Distinct => "DISTINCT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Limit => "LIMIT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::Null => "NULL",
            Self::Cast => "CAST",
        }
    }

    /// Returns true if the keyword can never start or continue an
    /// expression operand, so an unquoted word spelled like it is not read
    /// as a column reference inside expressions.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Group
                | Self::Order
                | Self::By
                | Self::Limit
                | Self::And
                | Self::Or
                | Self::Like
                | Self::As
                | Self::Asc
                | Self::Desc
                | Self::Distinct
                | Self::Engine
                | Self::Populate
                | Self::Default
                | Self::Materialized
                | Self::Alias
                | Self::Comment
                | Self::Codec
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),

    // Words
    /// Unquoted word: a name or a keyword, depending on the grammar rule.
    Word(String),
    /// Quoted identifier (e.g., `column name` or "column name").
    QuotedIdentifier(String),

    /// Whitespace and comments, coalesced into one token.
    Whitespace,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// ?
    Question,
    /// :
    Colon,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

impl TokenKind {
    /// Short human-readable description used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string literal",
            Self::Word(_) => "word",
            Self::QuotedIdentifier(_) => "quoted identifier",
            Self::Whitespace => "whitespace",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::Question => "'?'",
            Self::Colon => "':'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Eof => "end of input",
            Self::Error(_) => "invalid token",
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token is whitespace or a comment.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Returns the keyword spelled by this token, if it is a bare word.
    #[must_use]
    pub fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Word(word) => Keyword::from_str(word),
            _ => None,
        }
    }

    /// Returns true if this token is the bare word `keyword`, in any case.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.kind, TokenKind::Word(word) if word.eq_ignore_ascii_case(keyword.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Token {
        Token::new(TokenKind::Word(String::from(text)), Span::new(0, text.len()))
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("DEFAULT"), Some(Keyword::Default));
        assert_eq!(Keyword::from_str("materialized"), Some(Keyword::Materialized));
        assert_eq!(Keyword::from_str("AlIaS"), Some(Keyword::Alias));
        assert_eq!(Keyword::from_str("UInt8"), None);
    }

    #[test]
    fn test_keyword_round_trips_through_as_str() {
        for kw in [Keyword::Engine, Keyword::Nested, Keyword::Populate] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_token_is_keyword() {
        assert!(word("engine").is_keyword(Keyword::Engine));
        assert!(word("NESTED").is_keyword(Keyword::Nested));
        assert!(!word("Engines").is_keyword(Keyword::Engine));
        assert_eq!(word("alias").as_keyword(), Some(Keyword::Alias));
    }

    #[test]
    fn test_quoted_identifier_is_never_keyword() {
        let quoted = Token::new(
            TokenKind::QuotedIdentifier(String::from("DEFAULT")),
            Span::new(0, 9),
        );
        assert!(!quoted.is_keyword(Keyword::Default));
        assert_eq!(quoted.as_keyword(), None);
    }

    #[test]
    fn test_token_is_eof_and_trivia() {
        assert!(Token::new(TokenKind::Eof, Span::new(0, 0)).is_eof());
        assert!(Token::new(TokenKind::Whitespace, Span::new(0, 1)).is_trivia());
        assert!(!word("x").is_trivia());
    }
}
