//! Abstract Syntax Tree (AST) types for DDL statements.
//!
//! Every node kind is a variant of the closed [`Node`] enum. A node owns its
//! children through its own fields; [`Node::children`] derives the ordered
//! child list from those fields instead of keeping a second reference.

mod expression;
mod format;
mod statement;
mod types;

use core::fmt;

use serde::Serialize;

pub use expression::{
    Alias, Binary, BinaryOp, Cast, ExpressionList, Function, Identifier, Literal, LiteralValue,
    TUPLE_FUNCTION, Ternary, Unary, UnaryOp,
};
pub use format::{
    FormatFrame, FormatSettings, FormatState, HILITE_FUNCTION, HILITE_IDENTIFIER,
    HILITE_KEYWORD, HILITE_NONE, HILITE_OPERATOR, back_quote_if_need, quote_string,
};
pub use statement::{
    CreateKind, CreateQuery, Engine, OrderByElement, OrderDirection, SelectQuery,
};
pub use types::{ColumnDeclaration, ColumnDefault, DefaultSpecifier, NameTypePair};

use crate::lexer::Span;

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// Plain or compound identifier.
    Identifier(Identifier),
    /// Literal value.
    Literal(Literal),
    /// Function call, data type or engine reference.
    Function(Function),
    /// Unary operation.
    Unary(Unary),
    /// Binary operation.
    Binary(Binary),
    /// `cond ? a : b`.
    Ternary(Ternary),
    /// `CAST(expr AS type)`.
    Cast(Cast),
    /// `expr AS name`.
    Alias(Alias),
    /// `*` in a select list.
    Asterisk(Span),
    /// Comma-separated list.
    ExpressionList(ExpressionList),
    /// `ORDER BY` element.
    OrderBy(OrderByElement),
    /// `name type`.
    NameTypePair(NameTypePair),
    /// Column definition.
    ColumnDeclaration(ColumnDeclaration),
    /// `ENGINE = ...`.
    Engine(Engine),
    /// `SELECT` query.
    Select(SelectQuery),
    /// `CREATE`/`ATTACH` query.
    Create(CreateQuery),
}

impl Node {
    /// Returns a short label naming the node kind.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "Identifier",
            Self::Literal(_) => "Literal",
            Self::Function(_) => "Function",
            Self::Unary(_) => "Unary",
            Self::Binary(_) => "Binary",
            Self::Ternary(_) => "Ternary",
            Self::Cast(_) => "Cast",
            Self::Alias(_) => "Alias",
            Self::Asterisk(_) => "Asterisk",
            Self::ExpressionList(_) => "ExpressionList",
            Self::OrderBy(_) => "OrderByElement",
            Self::NameTypePair(_) => "NameTypePair",
            Self::ColumnDeclaration(_) => "ColumnDeclaration",
            Self::Engine(_) => "Engine",
            Self::Select(_) => "SelectQuery",
            Self::Create(_) => "CreateQuery",
        }
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Identifier(n) => n.span,
            Self::Literal(n) => n.span,
            Self::Function(n) => n.span,
            Self::Unary(n) => n.span,
            Self::Binary(n) => n.span,
            Self::Ternary(n) => n.span,
            Self::Cast(n) => n.span,
            Self::Alias(n) => n.span,
            Self::Asterisk(span) => *span,
            Self::ExpressionList(n) => n.span,
            Self::OrderBy(n) => n.span,
            Self::NameTypePair(n) => n.span,
            Self::ColumnDeclaration(n) => n.span,
            Self::Engine(n) => n.span,
            Self::Select(n) => n.span,
            Self::Create(n) => n.span,
        }
    }

    fn span_mut(&mut self) -> &mut Span {
        match self {
            Self::Identifier(n) => &mut n.span,
            Self::Literal(n) => &mut n.span,
            Self::Function(n) => &mut n.span,
            Self::Unary(n) => &mut n.span,
            Self::Binary(n) => &mut n.span,
            Self::Ternary(n) => &mut n.span,
            Self::Cast(n) => &mut n.span,
            Self::Alias(n) => &mut n.span,
            Self::Asterisk(span) => span,
            Self::ExpressionList(n) => &mut n.span,
            Self::OrderBy(n) => &mut n.span,
            Self::NameTypePair(n) => &mut n.span,
            Self::ColumnDeclaration(n) => &mut n.span,
            Self::Engine(n) => &mut n.span,
            Self::Select(n) => &mut n.span,
            Self::Create(n) => &mut n.span,
        }
    }

    /// Returns the child nodes in order.
    #[must_use]
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Identifier(_) | Self::Literal(_) | Self::Asterisk(_) => Vec::new(),
            Self::Function(n) => n.args().iter().collect(),
            Self::Unary(n) => vec![n.operand.as_ref()],
            Self::Binary(n) => vec![n.left.as_ref(), n.right.as_ref()],
            Self::Ternary(n) => vec![
                n.condition.as_ref(),
                n.then_branch.as_ref(),
                n.else_branch.as_ref(),
            ],
            Self::Cast(n) => vec![n.expr.as_ref(), n.data_type.as_ref()],
            Self::Alias(n) => vec![n.expr.as_ref()],
            Self::ExpressionList(n) => n.items.iter().collect(),
            Self::OrderBy(n) => vec![n.expr.as_ref()],
            Self::NameTypePair(n) => vec![n.data_type.as_ref()],
            Self::ColumnDeclaration(n) => n
                .data_type
                .as_deref()
                .into_iter()
                .chain(n.default.as_ref().map(|d| d.expression.as_ref()))
                .chain(n.codec.as_deref())
                .chain(n.comment.as_deref())
                .collect(),
            Self::Engine(n) => vec![n.engine.as_ref()],
            Self::Select(n) => core::iter::once(n.columns.as_ref())
                .chain(n.from.as_deref())
                .chain(n.where_expr.as_deref())
                .chain(n.group_by.as_deref())
                .chain(n.order_by.as_deref())
                .chain(n.limit.as_deref())
                .collect(),
            Self::Create(n) => n
                .columns
                .as_deref()
                .into_iter()
                .chain(n.engine.as_deref())
                .chain(n.select.as_deref())
                .collect(),
        }
    }

    /// Returns mutable references to the child nodes, in the same order as
    /// [`Node::children`].
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        match self {
            Self::Identifier(_) | Self::Literal(_) | Self::Asterisk(_) => Vec::new(),
            Self::Function(n) => n.arguments.iter_mut().flatten().collect(),
            Self::Unary(n) => vec![n.operand.as_mut()],
            Self::Binary(n) => vec![n.left.as_mut(), n.right.as_mut()],
            Self::Ternary(n) => vec![
                n.condition.as_mut(),
                n.then_branch.as_mut(),
                n.else_branch.as_mut(),
            ],
            Self::Cast(n) => vec![n.expr.as_mut(), n.data_type.as_mut()],
            Self::Alias(n) => vec![n.expr.as_mut()],
            Self::ExpressionList(n) => n.items.iter_mut().collect(),
            Self::OrderBy(n) => vec![n.expr.as_mut()],
            Self::NameTypePair(n) => vec![n.data_type.as_mut()],
            Self::ColumnDeclaration(n) => n
                .data_type
                .as_deref_mut()
                .into_iter()
                .chain(n.default.as_mut().map(|d| d.expression.as_mut()))
                .chain(n.codec.as_deref_mut())
                .chain(n.comment.as_deref_mut())
                .collect(),
            Self::Engine(n) => vec![n.engine.as_mut()],
            Self::Select(n) => core::iter::once(n.columns.as_mut())
                .chain(n.from.as_deref_mut())
                .chain(n.where_expr.as_deref_mut())
                .chain(n.group_by.as_deref_mut())
                .chain(n.order_by.as_deref_mut())
                .chain(n.limit.as_deref_mut())
                .collect(),
            Self::Create(n) => n
                .columns
                .as_deref_mut()
                .into_iter()
                .chain(n.engine.as_deref_mut())
                .chain(n.select.as_deref_mut())
                .collect(),
        }
    }

    /// Resets every span in the tree to the empty span.
    ///
    /// Two trees parsed from differently spaced text compare equal after
    /// this.
    pub fn clear_spans(&mut self) {
        *self.span_mut() = Span::default();
        for child in self.children_mut() {
            child.clear_spans();
        }
    }

    /// Renders the node into `state`.
    pub fn format(&self, settings: &FormatSettings, state: &mut FormatState, frame: FormatFrame) {
        match self {
            Self::Identifier(n) => n.format(settings, state),
            Self::Literal(n) => n.format(settings, state),
            Self::Function(n) => n.format(settings, state, frame),
            Self::Unary(n) => n.format(settings, state, frame),
            Self::Binary(n) => n.format(settings, state, frame),
            Self::Ternary(n) => n.format(settings, state, frame),
            Self::Cast(n) => n.format(settings, state, frame),
            Self::Alias(n) => n.format(settings, state, frame),
            Self::Asterisk(_) => state.push('*'),
            Self::ExpressionList(n) => n.format(settings, state, frame),
            Self::OrderBy(n) => n.format(settings, state, frame),
            Self::NameTypePair(n) => n.format(settings, state, frame),
            Self::ColumnDeclaration(n) => n.format(settings, state, frame),
            Self::Engine(n) => n.format(settings, state, frame),
            Self::Select(n) => n.format(settings, state, frame),
            Self::Create(n) => n.format(settings, state, frame),
        }
    }

    /// Renders the node to a string.
    #[must_use]
    pub fn to_sql(&self, settings: &FormatSettings) -> String {
        let mut state = FormatState::new();
        self.format(settings, &mut state, FormatFrame::default());
        state.into_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql(&FormatSettings::one_line()))
    }
}

impl fmt::Display for CreateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut state = FormatState::new();
        self.format(&FormatSettings::one_line(), &mut state, FormatFrame::default());
        f.write_str(state.as_str())
    }
}

macro_rules! impl_from_for_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_from_for_node!(
    Identifier(Identifier),
    Literal(Literal),
    Function(Function),
    Unary(Unary),
    Binary(Binary),
    Ternary(Ternary),
    Cast(Cast),
    Alias(Alias),
    ExpressionList(ExpressionList),
    OrderBy(OrderByElement),
    NameTypePair(NameTypePair),
    ColumnDeclaration(ColumnDeclaration),
    Engine(Engine),
    Select(SelectQuery),
    Create(CreateQuery),
);
