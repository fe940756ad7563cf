//! Statement-level nodes.

use serde::Serialize;

use super::format::{FormatFrame, FormatSettings, FormatState};
use super::{ExpressionList, Function, Identifier, Node};
use crate::lexer::Span;

/// `ENGINE = name[(arguments)]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Engine {
    /// The engine, a [`Function`] node.
    pub engine: Box<Node>,
    /// Source span.
    pub span: Span,
}

impl Engine {
    /// Returns the engine as a function-like node.
    #[must_use]
    pub fn function(&self) -> Option<&Function> {
        match self.engine.as_ref() {
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
        state.keyword(settings, "ENGINE");
        state.push_str(" = ");
        self.engine.format(settings, state, frame);
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderByElement {
    /// Sort key.
    pub expr: Box<Node>,
    /// Explicit direction, if written.
    pub direction: Option<OrderDirection>,
    /// Source span.
    pub span: Span,
}

impl OrderByElement {
    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        self.expr.format(settings, state, frame);
        if let Some(direction) = self.direction {
            state.push(' ');
            state.keyword(settings, direction.as_str());
        }
    }
}

/// A `SELECT` query, as far as `AS SELECT` forms need one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectQuery {
    /// `SELECT DISTINCT`.
    pub distinct: bool,
    /// Select list, an [`ExpressionList`] node.
    pub columns: Box<Node>,
    /// Source table, an [`Identifier`] node.
    pub from: Option<Box<Node>>,
    /// `WHERE` condition.
    pub where_expr: Option<Box<Node>>,
    /// `GROUP BY` keys, an [`ExpressionList`] node.
    pub group_by: Option<Box<Node>>,
    /// `ORDER BY` elements, an [`ExpressionList`] of `OrderBy` nodes.
    pub order_by: Option<Box<Node>>,
    /// `LIMIT` expression.
    pub limit: Option<Box<Node>>,
    /// Source span.
    pub span: Span,
}

impl SelectQuery {
    /// Returns the select list.
    #[must_use]
    pub fn select_list(&self) -> Option<&ExpressionList> {
        match self.columns.as_ref() {
            Node::ExpressionList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the source table.
    #[must_use]
    pub fn from_table(&self) -> Option<&Identifier> {
        match self.from.as_deref() {
            Some(Node::Identifier(id)) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        let inner = FormatFrame {
            need_parens: false,
            expression_list_always_start_on_new_line: false,
            ..frame
        };
        let separator = format!("{}{}", settings.nl_or_ws(), settings.indent(frame));

        state.keyword(settings, "SELECT");
        if self.distinct {
            state.push(' ');
            state.keyword(settings, "DISTINCT");
        }
        state.push(' ');
        self.columns.format(settings, state, inner);

        if let Some(from) = &self.from {
            state.push_str(&separator);
            state.keyword(settings, "FROM");
            state.push(' ');
            from.format(settings, state, inner);
        }
        if let Some(where_expr) = &self.where_expr {
            state.push_str(&separator);
            state.keyword(settings, "WHERE");
            state.push(' ');
            where_expr.format(settings, state, inner);
        }
        if let Some(group_by) = &self.group_by {
            state.push_str(&separator);
            state.keyword(settings, "GROUP BY");
            state.push(' ');
            group_by.format(settings, state, inner);
        }
        if let Some(order_by) = &self.order_by {
            state.push_str(&separator);
            state.keyword(settings, "ORDER BY");
            state.push(' ');
            order_by.format(settings, state, inner);
        }
        if let Some(limit) = &self.limit {
            state.push_str(&separator);
            state.keyword(settings, "LIMIT");
            state.push(' ');
            limit.format(settings, state, inner);
        }
    }
}

/// What a `CREATE`/`ATTACH` statement creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CreateKind {
    /// `TABLE`.
    Table,
    /// `DATABASE`.
    Database,
    /// `VIEW` or `MATERIALIZED VIEW`.
    View,
}

impl CreateKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Database => "DATABASE",
            Self::View => "VIEW",
        }
    }
}

/// A `CREATE`/`ATTACH` `TABLE`, `DATABASE` or `VIEW` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateQuery {
    /// `ATTACH` instead of `CREATE`.
    pub attach: bool,
    /// Object kind.
    pub kind: CreateKind,
    /// `MATERIALIZED VIEW`.
    pub materialized: bool,
    /// `POPULATE` (views only).
    pub populate: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Database qualifier of the target (`db` in `db.name`).
    pub database: Option<String>,
    /// Target name: the table, view or database being created.
    pub name: String,
    /// Column declarations, an [`ExpressionList`] node.
    pub columns: Option<Box<Node>>,
    /// Engine clause, an [`Engine`] node.
    pub engine: Option<Box<Node>>,
    /// Database of the table copied by `AS [db.]table`.
    pub as_database: Option<String>,
    /// Table copied by `AS [db.]table`.
    pub as_table: Option<String>,
    /// Query of `AS SELECT ...`, a [`SelectQuery`] node.
    pub select: Option<Box<Node>>,
    /// Source span.
    pub span: Span,
}

impl CreateQuery {
    /// Returns the column declarations.
    #[must_use]
    pub fn column_list(&self) -> Option<&ExpressionList> {
        match self.columns.as_deref() {
            Some(Node::ExpressionList(list)) => Some(list),
            _ => None,
        }
    }

    /// Returns the engine clause.
    #[must_use]
    pub fn engine_clause(&self) -> Option<&Engine> {
        match self.engine.as_deref() {
            Some(Node::Engine(engine)) => Some(engine),
            _ => None,
        }
    }

    /// Returns the `AS SELECT` query.
    #[must_use]
    pub fn select_query(&self) -> Option<&SelectQuery> {
        match self.select.as_deref() {
            Some(Node::Select(select)) => Some(select),
            _ => None,
        }
    }

    /// Returns `db.name` or `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.database {
            Some(db) => format!("{db}.{}", self.name),
            None => self.name.clone(),
        }
    }

    fn format_target(
        settings: &FormatSettings,
        state: &mut FormatState,
        database: Option<&String>,
        name: &str,
    ) {
        if let Some(db) = database {
            state.identifier(settings, db);
            state.push('.');
        }
        state.identifier(settings, name);
    }

    pub(crate) fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
    ) {
        let frame = FormatFrame {
            need_parens: false,
            expression_list_always_start_on_new_line: false,
            ..frame
        };

        state.keyword(settings, if self.attach { "ATTACH" } else { "CREATE" });
        state.push(' ');
        if self.materialized {
            state.keyword(settings, "MATERIALIZED");
            state.push(' ');
        }
        state.keyword(settings, self.kind.as_str());
        state.push(' ');
        if self.if_not_exists {
            state.keyword(settings, "IF NOT EXISTS");
            state.push(' ');
        }
        Self::format_target(settings, state, self.database.as_ref(), &self.name);

        if let Some(columns) = &self.columns {
            let list = FormatFrame {
                indent: frame.indent + 1,
                expression_list_always_start_on_new_line: true,
                ..frame
            };
            if settings.one_line {
                state.push_str(" (");
            } else {
                state.push_str("\n");
                state.push_str(&settings.indent(frame));
                state.push('(');
            }
            columns.format(settings, state, list);
            if !settings.one_line {
                state.push('\n');
                state.push_str(&settings.indent(frame));
            }
            state.push(')');
        }

        if let Some(as_table) = &self.as_table {
            state.push(' ');
            state.keyword(settings, "AS");
            state.push(' ');
            Self::format_target(settings, state, self.as_database.as_ref(), as_table);
        }

        if let Some(engine) = &self.engine {
            state.push(' ');
            engine.format(settings, state, frame);
        }

        if self.populate {
            state.push(' ');
            state.keyword(settings, "POPULATE");
        }

        if let Some(select) = &self.select {
            state.push(' ');
            state.keyword(settings, "AS");
            state.push_str(settings.nl_or_ws());
            select.format(settings, state, frame);
        }
    }
}
