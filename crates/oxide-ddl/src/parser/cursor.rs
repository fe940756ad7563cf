//! Parse position, diagnostics tracker and nesting guard.

use crate::lexer::{Span, Token, TokenKind};

/// Default limit on nested rule invocations.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// The furthest token position any rule reached, and the rules that were
/// attempted there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expected {
    /// Token index of the furthest position reached.
    pub max_parsed_pos: usize,
    /// Labels of the rules attempted at `max_parsed_pos`, in first-attempt
    /// order, without duplicates.
    pub variants: Vec<&'static str>,
}

impl Expected {
    /// Records that `name` was attempted at `pos`.
    pub fn add(&mut self, pos: usize, name: &'static str) {
        if pos > self.max_parsed_pos {
            self.max_parsed_pos = pos;
            self.variants.clear();
            self.variants.push(name);
        } else if pos == self.max_parsed_pos && !self.variants.contains(&name) {
            self.variants.push(name);
        }
    }

    /// Records that input up to `pos` was consumed.
    pub fn reach(&mut self, pos: usize) {
        if pos > self.max_parsed_pos {
            self.max_parsed_pos = pos;
            self.variants.clear();
        }
    }
}

/// Token cursor shared by every rule of one parse.
///
/// Positions are token indices. A rule that fails restores the position it
/// started from; [`Cursor::attempt`] does the same for an ad-hoc sequence.
#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
    expected: Expected,
    depth: usize,
    max_depth: usize,
    too_deep: bool,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token], max_depth: usize) -> Self {
        let end = tokens.last().map_or(0, |t| t.span.end);
        Self {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, Span::new(end, end)),
            expected: Expected::default(),
            depth: 0,
            max_depth,
            too_deep: false,
        }
    }

    /// Current token index.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Moves back (or forward) to a previously saved position.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    /// Returns the current token. Past the end this is an `Eof` token.
    #[must_use]
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the token at index `pos`.
    #[must_use]
    pub fn token_at(&self, pos: usize) -> &Token {
        self.tokens.get(pos).unwrap_or(&self.eof)
    }

    /// Returns true if the current token is `Eof`.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Consumes the current token and returns it. `Eof` is never consumed.
    pub fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() && !self.tokens[self.pos].is_eof() {
            self.pos += 1;
            &self.tokens[self.pos - 1]
        } else {
            &self.eof
        }
    }

    /// Consumes whitespace and comments.
    pub fn skip_trivia(&mut self) {
        while self.peek().is_trivia() {
            self.pos += 1;
        }
    }

    /// Span from the token at `begin` to the last non-trivia token consumed
    /// since.
    #[must_use]
    pub fn span_from(&self, begin: usize) -> Span {
        let start = self.token_at(begin).span.start;
        let end = self
            .tokens
            .get(begin..self.pos)
            .unwrap_or(&[])
            .iter()
            .rev()
            .find(|t| !t.is_trivia())
            .map_or(start, |t| t.span.end);
        Span::new(start, end.max(start))
    }

    /// Diagnostics collected so far.
    #[must_use]
    pub const fn expected(&self) -> &Expected {
        &self.expected
    }

    /// Mutable access to the diagnostics.
    pub fn expected_mut(&mut self) -> &mut Expected {
        &mut self.expected
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Configured nesting limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns true once the nesting limit has been hit. From then on every
    /// rule fails immediately.
    #[must_use]
    pub const fn too_deep(&self) -> bool {
        self.too_deep
    }

    /// Runs `f` as one alternative: on `None` the position is restored.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let begin = self.pos;
        let result = f(self);
        if result.is_none() {
            self.pos = begin;
        }
        result
    }

    /// Runs `f` one nesting level deeper, failing without running it if the
    /// limit is reached.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.too_deep {
            return None;
        }
        if self.depth >= self.max_depth {
            tracing::trace!(
                depth = self.depth,
                position = self.pos,
                "nesting limit reached"
            );
            self.too_deep = true;
            return None;
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
