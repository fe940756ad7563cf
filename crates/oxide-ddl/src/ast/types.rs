//! Column and type declaration nodes.

use core::fmt;

use serde::Serialize;

use super::format::{FormatFrame, FormatSettings, FormatState};
use super::{Function, Node};
use crate::lexer::{Keyword, Span};

/// `name type`, used in nested-table member lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameTypePair {
    /// Member name (may contain dots for compound names).
    pub name: String,
    /// Member type, a [`Function`] node.
    pub data_type: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl NameTypePair {
    /// Returns the type as a function-like node.
    #[must_use]
    pub fn type_function(&self) -> Option<&Function> {
        match self.data_type.as_ref() {
            Node::Function(f) => Some(f),
            _ => None,
        }
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        state.identifier(settings, &self.name);
        state.push(' ');
        self.data_type.format(settings, state, frame);
    }
}

/// How a column's value is produced when it is not stored as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DefaultSpecifier {
    /// `DEFAULT expr`: computed when omitted on insert, stored.
    Default,
    /// `MATERIALIZED expr`: always computed, stored, not returned by `SELECT *`.
    Materialized,
    /// `ALIAS expr`: computed on read, never stored.
    Alias,
}

impl DefaultSpecifier {
    /// The three specifier keywords, in the order the grammar tries them.
    pub const ALL: [Self; 3] = [Self::Default, Self::Materialized, Self::Alias];

    /// Returns the keyword introducing this specifier.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        match self {
            Self::Default => Keyword::Default,
            Self::Materialized => Keyword::Materialized,
            Self::Alias => Keyword::Alias,
        }
    }

    /// Returns the specifier as upper-case SQL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.keyword().as_str()
    }
}

impl fmt::Display for DefaultSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A default clause: the specifier and its mandatory expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefault {
    /// `DEFAULT`, `MATERIALIZED` or `ALIAS`.
    pub specifier: DefaultSpecifier,
    /// The value expression.
    pub expression: Box<Node>,
}

/// One column of a table definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDeclaration {
    /// Column name, unquoted.
    pub name: String,
    /// Column type, a [`Function`] node. Absent when the type is implied by
    /// the default expression.
    pub data_type: Option<Box<Node>>,
    /// Default clause.
    pub default: Option<ColumnDefault>,
    /// `CODEC(...)`, a [`Function`] node named `CODEC`.
    pub codec: Option<Box<Node>>,
    /// `COMMENT '...'`, a string literal node.
    pub comment: Option<Box<Node>>,
    /// Source span.
    pub span: Span,
}

impl ColumnDeclaration {
    /// Returns the type as a function-like node.
    #[must_use]
    pub fn type_function(&self) -> Option<&Function> {
        match self.data_type.as_deref() {
            Some(Node::Function(f)) => Some(f),
            _ => None,
        }
    }

    /// Returns the default specifier, if any.
    #[must_use]
    pub fn default_specifier(&self) -> Option<DefaultSpecifier> {
        self.default.as_ref().map(|d| d.specifier)
    }

    /// Returns the default expression, if any.
    #[must_use]
    pub fn default_expression(&self) -> Option<&Node> {
        self.default.as_ref().map(|d| d.expression.as_ref())
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        let frame = FormatFrame {
            need_parens: false,
            ..frame
        };

        state.identifier(settings, &self.name);
        if let Some(data_type) = &self.data_type {
            state.push(' ');
            data_type.format(settings, state, frame);
        }

        if let Some(default) = &self.default {
            state.push(' ');
            state.keyword(settings, default.specifier.as_str());
            state.push(' ');
            default.expression.format(settings, state, frame);
        }

        if let Some(comment) = &self.comment {
            state.push(' ');
            state.keyword(settings, "COMMENT");
            state.push(' ');
            comment.format(settings, state, frame);
        }

        if let Some(codec) = &self.codec {
            state.push(' ');
            match codec.as_ref() {
                Node::Function(f) => {
                    state.keyword(settings, Keyword::Codec.as_str());
                    state.push('(');
                    f.format_arguments(settings, state, frame);
                    state.push(')');
                }
                other => other.format(settings, state, frame),
            }
        }
    }
}
