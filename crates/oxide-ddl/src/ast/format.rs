//! Formatting settings and helpers shared by all node kinds.

/// Escape sequence that starts a highlighted keyword.
pub const HILITE_KEYWORD: &str = "\x1b[1m";
/// Escape sequence that starts a highlighted identifier.
pub const HILITE_IDENTIFIER: &str = "\x1b[0;36m";
/// Escape sequence that starts a highlighted function or type name.
pub const HILITE_FUNCTION: &str = "\x1b[0;33m";
/// Escape sequence that starts a highlighted operator.
pub const HILITE_OPERATOR: &str = "\x1b[1;33m";
/// Escape sequence that resets highlighting.
pub const HILITE_NONE: &str = "\x1b[0m";

/// Options that hold for a whole formatting run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSettings {
    /// Render everything on a single line.
    pub one_line: bool,
    /// Wrap keywords, identifiers and operators in ANSI escape sequences.
    pub hilite: bool,
}

impl FormatSettings {
    /// Single-line output without highlighting.
    #[must_use]
    pub const fn one_line() -> Self {
        Self {
            one_line: true,
            hilite: false,
        }
    }

    /// Multi-line output without highlighting.
    #[must_use]
    pub const fn pretty() -> Self {
        Self {
            one_line: false,
            hilite: false,
        }
    }

    /// Returns a copy with highlighting switched on or off.
    #[must_use]
    pub const fn with_hilite(mut self, hilite: bool) -> Self {
        self.hilite = hilite;
        self
    }

    /// Newline in multi-line mode, a single space otherwise.
    #[must_use]
    pub const fn nl_or_ws(&self) -> &'static str {
        if self.one_line { " " } else { "\n" }
    }

    /// Indentation for `frame`, empty in single-line mode.
    #[must_use]
    pub fn indent(&self, frame: FormatFrame) -> String {
        if self.one_line {
            String::new()
        } else {
            " ".repeat(4 * frame.indent)
        }
    }
}

/// Mutable state threaded through a formatting run: the output buffer.
#[derive(Debug, Default)]
pub struct FormatState {
    out: String,
}

impl FormatState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw text.
    pub fn push_str(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Appends a single character.
    pub fn push(&mut self, c: char) {
        self.out.push(c);
    }

    /// Appends `text` wrapped in `hilite` when highlighting is enabled.
    pub fn push_hilited(&mut self, settings: &FormatSettings, hilite: &str, text: &str) {
        if settings.hilite {
            self.out.push_str(hilite);
            self.out.push_str(text);
            self.out.push_str(HILITE_NONE);
        } else {
            self.out.push_str(text);
        }
    }

    /// Appends a keyword.
    pub fn keyword(&mut self, settings: &FormatSettings, keyword: &str) {
        self.push_hilited(settings, HILITE_KEYWORD, keyword);
    }

    /// Appends an identifier, back-quoted if needed.
    pub fn identifier(&mut self, settings: &FormatSettings, name: &str) {
        self.push_hilited(settings, HILITE_IDENTIFIER, &back_quote_if_need(name));
    }

    /// Consumes the state and returns the text written so far.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }
}

/// Per-node formatting context.
///
/// Passed by value: a node may adjust its copy before formatting its
/// children, and the change never reaches the node's siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFrame {
    /// Indentation level in multi-line mode.
    pub indent: usize,
    /// The node must wrap itself in parentheses if it is an operator.
    pub need_parens: bool,
    /// Expression lists put every element on its own line.
    pub expression_list_always_start_on_new_line: bool,
}

/// Returns true if `name` can be written without quotes.
fn is_plain_word(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `name` unchanged if it is a plain word, otherwise wrapped in
/// back-quotes with embedded back-quotes doubled.
#[must_use]
pub fn back_quote_if_need(name: &str) -> String {
    if is_plain_word(name) {
        String::from(name)
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

/// Returns `value` as a single-quoted string literal.
#[must_use]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_quote_if_need() {
        assert_eq!(back_quote_if_need("UserID"), "UserID");
        assert_eq!(back_quote_if_need("_x1"), "_x1");
        assert_eq!(back_quote_if_need("1abc"), "`1abc`");
        assert_eq!(back_quote_if_need("user name"), "`user name`");
        assert_eq!(back_quote_if_need("a`b"), "`a``b`");
        assert_eq!(back_quote_if_need(""), "``");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_hilite_wraps_only_when_enabled() {
        let plain = FormatSettings::one_line();
        let mut state = FormatState::new();
        state.keyword(&plain, "ENGINE");
        assert_eq!(state.as_str(), "ENGINE");

        let hilite = plain.with_hilite(true);
        let mut state = FormatState::new();
        state.keyword(&hilite, "ENGINE");
        assert_eq!(state.into_string(), "\x1b[1mENGINE\x1b[0m");
    }

    #[test]
    fn test_indent_is_empty_on_one_line() {
        let frame = FormatFrame {
            indent: 2,
            ..FormatFrame::default()
        };
        assert_eq!(FormatSettings::one_line().indent(frame), "");
        assert_eq!(FormatSettings::pretty().indent(frame), "        ");
    }
}
