//! Expression and identifier nodes.

use serde::Serialize;

use super::format::{
    FormatFrame, FormatSettings, FormatState, HILITE_FUNCTION, HILITE_IDENTIFIER, HILITE_OPERATOR,
    back_quote_if_need, quote_string,
};
use super::Node;
use crate::lexer::{Keyword, Span};

/// Quotes a name used inside an expression. Besides what
/// [`back_quote_if_need`] quotes, words the expression grammar would read as
/// keywords are quoted too.
fn quote_expression_name(name: &str) -> String {
    match Keyword::from_str(name) {
        Some(k) if k.is_reserved() || matches!(k, Keyword::Null | Keyword::Not) => {
            format!("`{name}`")
        }
        _ => back_quote_if_need(name),
    }
}

/// A plain (`URL`) or compound (`Hits.URL`) identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    /// Dot-separated parts, unquoted. Never empty.
    pub parts: Vec<String>,
    /// Source span.
    pub span: Span,
}

impl Identifier {
    /// Creates a single-part identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            parts: vec![name.into()],
            span,
        }
    }

    /// Creates an identifier from dot-separated parts.
    #[must_use]
    pub const fn compound(parts: Vec<String>, span: Span) -> Self {
        Self { parts, span }
    }

    /// Returns the full name, parts joined by dots.
    #[must_use]
    pub fn name(&self) -> String {
        self.parts.join(".")
    }

    /// Returns true if the identifier has more than one part.
    #[must_use]
    pub fn is_compound(&self) -> bool {
        self.parts.len() > 1
    }

    pub(crate) fn format(&self, settings: &FormatSettings, state: &mut FormatState) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                state.push('.');
            }
            state.push_hilited(settings, HILITE_IDENTIFIER, &quote_expression_name(part));
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// NULL literal.
    Null,
}

/// A literal node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    /// The value.
    pub value: LiteralValue,
    /// Source span.
    pub span: Span,
}

impl Literal {
    /// Creates a literal node.
    #[must_use]
    pub const fn new(value: LiteralValue, span: Span) -> Self {
        Self { value, span }
    }

    pub(crate) fn format(&self, settings: &FormatSettings, state: &mut FormatState) {
        match &self.value {
            LiteralValue::Integer(n) => state.push_str(&n.to_string()),
            // Debug keeps the fractional part, so `2.0` does not come back as an integer.
            LiteralValue::Float(f) => state.push_str(&format!("{f:?}")),
            LiteralValue::String(s) => state.push_str(&quote_string(s)),
            LiteralValue::Null => state.keyword(settings, "NULL"),
        }
    }
}

/// Function name of `(a, b, ...)`.
pub const TUPLE_FUNCTION: &str = "tuple";

/// A function-like node: a name with an optional parenthesized argument
/// list.
///
/// Used for function calls in expressions as well as for data types
/// (`UInt8`, `FixedString(2)`, `Nested(a UInt32)`) and storage engines
/// (`Partitioned(Log, ChunkID)`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// The function, type or engine name.
    pub name: String,
    /// `None` when written without parentheses, `Some(vec![])` for `name()`.
    pub arguments: Option<Vec<Node>>,
    /// Source span.
    pub span: Span,
}

impl Function {
    /// Creates a function node without parentheses.
    #[must_use]
    pub fn bare(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            arguments: None,
            span,
        }
    }

    /// Creates a function node with an argument list.
    #[must_use]
    pub fn with_arguments(name: impl Into<String>, arguments: Vec<Node>, span: Span) -> Self {
        Self {
            name: name.into(),
            arguments: Some(arguments),
            span,
        }
    }

    /// Returns true for a tuple of two or more elements, which is written
    /// as a bare parenthesized list.
    #[must_use]
    pub fn is_tuple(&self) -> bool {
        self.name == TUPLE_FUNCTION && self.args().len() > 1
    }

    /// Returns the arguments, empty if there are none.
    #[must_use]
    pub fn args(&self) -> &[Node] {
        self.arguments.as_deref().unwrap_or(&[])
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        if self.is_tuple() {
            state.push('(');
            self.format_arguments(settings, state, frame);
            state.push(')');
            return;
        }
        state.push_hilited(settings, HILITE_FUNCTION, &quote_expression_name(&self.name));
        if self.arguments.is_some() {
            state.push('(');
            self.format_arguments(settings, state, frame);
            state.push(')');
        }
    }

    pub(crate) fn format_arguments(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        if let Some(arguments) = &self.arguments {
            let inner = FormatFrame {
                need_parens: false,
                expression_list_always_start_on_new_line: false,
                ..frame
            };
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    state.push_str(", ");
                }
                argument.format(settings, state, inner);
            }
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unary {
    /// Operator.
    pub op: UnaryOp,
    /// Operand.
    pub operand: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl Unary {
    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        if frame.need_parens {
            state.push('(');
        }
        match self.op {
            UnaryOp::Neg => state.push_hilited(settings, HILITE_OPERATOR, "-"),
            UnaryOp::Not => {
                state.keyword(settings, "NOT");
                state.push(' ');
            }
        }
        let inner = FormatFrame {
            need_parens: matches!(
                *self.operand,
                Node::Unary(_) | Node::Binary(_) | Node::Ternary(_)
            ),
            ..frame
        };
        self.operand.format(settings, state, inner);
        if frame.need_parens {
            state.push(')');
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Like => 4,
            Self::Add | Self::Sub | Self::Concat => 8,
            Self::Mul | Self::Div | Self::Mod => 9,
        }
    }

    const fn is_word(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Like)
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binary {
    /// Left operand.
    pub left: Box<Node>,
    /// Operator.
    pub op: BinaryOp,
    /// Right operand.
    pub right: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl Binary {
    /// Returns true if `operand` must be parenthesized to keep its place
    /// under an operator of precedence `precedence`.
    fn operand_needs_parens(operand: &Node, precedence: u8, is_right: bool) -> bool {
        match operand {
            Node::Binary(b) => {
                let p = b.op.precedence();
                p < precedence || (is_right && p == precedence)
            }
            Node::Ternary(_) => true,
            Node::Unary(u) => u.op == UnaryOp::Not,
            _ => false,
        }
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        if frame.need_parens {
            state.push('(');
        }
        let precedence = self.op.precedence();
        let left = FormatFrame {
            need_parens: Self::operand_needs_parens(&self.left, precedence, false),
            ..frame
        };
        self.left.format(settings, state, left);
        state.push(' ');
        if self.op.is_word() {
            state.keyword(settings, self.op.as_str());
        } else {
            state.push_hilited(settings, HILITE_OPERATOR, self.op.as_str());
        }
        state.push(' ');
        let right = FormatFrame {
            need_parens: Self::operand_needs_parens(&self.right, precedence, true),
            ..frame
        };
        self.right.format(settings, state, right);
        if frame.need_parens {
            state.push(')');
        }
    }
}

/// A conditional expression `cond ? then : else`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ternary {
    /// Condition.
    pub condition: Box<Node>,
    /// Value when the condition holds.
    pub then_branch: Box<Node>,
    /// Value otherwise.
    pub else_branch: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl Ternary {
    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        if frame.need_parens {
            state.push('(');
        }
        let condition = FormatFrame {
            need_parens: matches!(*self.condition, Node::Ternary(_)),
            ..frame
        };
        self.condition.format(settings, state, condition);
        state.push(' ');
        state.push_hilited(settings, HILITE_OPERATOR, "?");
        state.push(' ');
        let branch = FormatFrame {
            need_parens: false,
            ..frame
        };
        self.then_branch.format(settings, state, branch);
        state.push(' ');
        state.push_hilited(settings, HILITE_OPERATOR, ":");
        state.push(' ');
        self.else_branch.format(settings, state, branch);
        if frame.need_parens {
            state.push(')');
        }
    }
}

/// `CAST(expr AS type)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cast {
    /// Expression being converted.
    pub expr: Box<Node>,
    /// Target type, a [`Function`] node.
    pub data_type: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl Cast {
    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        let inner = FormatFrame {
            need_parens: false,
            ..frame
        };
        state.keyword(settings, "CAST");
        state.push('(');
        self.expr.format(settings, state, inner);
        state.push(' ');
        state.keyword(settings, "AS");
        state.push(' ');
        self.data_type.format(settings, state, inner);
        state.push(')');
    }
}

/// `expr AS alias` in a select list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    /// Aliased expression.
    pub expr: Box<Node>,
    /// Alias name.
    pub alias: String,
    /// Source span.
    pub span: Span,
}

impl Alias {
    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        self.expr.format(settings, state, frame);
        state.push(' ');
        state.keyword(settings, "AS");
        state.push(' ');
        state.identifier(settings, &self.alias);
    }
}

/// An ordered, comma-separated list of nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionList {
    /// Elements in source order.
    pub items: Vec<Node>,
    /// Source span.
    pub span: Span,
}

impl ExpressionList {
    /// Creates a list.
    #[must_use]
    pub const fn new(items: Vec<Node>, span: Span) -> Self {
        Self { items, span }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        let on_new_lines = frame.expression_list_always_start_on_new_line && !settings.one_line;
        let inner = FormatFrame {
            need_parens: false,
            expression_list_always_start_on_new_line: false,
            ..frame
        };
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                state.push(',');
                if !on_new_lines {
                    state.push(' ');
                }
            }
            if on_new_lines {
                state.push('\n');
                state.push_str(&settings.indent(frame));
            }
            item.format(settings, state, inner);
        }
    }
}
