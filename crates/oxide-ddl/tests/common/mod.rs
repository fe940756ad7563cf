#![allow(dead_code)]

use oxide_ddl::ast::{ColumnDeclaration, Node};
use oxide_ddl::{CreateQuery, ParseError, parse_create_query};

pub fn parse(sql: &str) -> CreateQuery {
    parse_create_query(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_create_query(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

/// Column declarations of a `CREATE TABLE ... (columns)` statement.
pub fn columns(sql: &str) -> Vec<ColumnDeclaration> {
    let query = parse(sql);
    let list = query
        .column_list()
        .unwrap_or_else(|| panic!("Expected a column list in: {sql}"));
    list.items
        .iter()
        .map(|n| match n {
            Node::ColumnDeclaration(c) => c.clone(),
            other => panic!("Expected column declaration, got {other:?}"),
        })
        .collect()
}

/// The single column of `CREATE TABLE t (<decl>) ENGINE = Memory`.
pub fn column(decl: &str) -> ColumnDeclaration {
    let mut all = columns(&format!("CREATE TABLE t ({decl}) ENGINE = Memory"));
    assert_eq!(all.len(), 1, "Expected one column in: {decl}");
    all.remove(0)
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again, and the two trees agree once spans are cleared.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(
        structure(ast1),
        structure(ast2),
        "Round-trip changed the tree for: {sql}"
    );
}

/// The tree of `query` with all spans reset.
pub fn structure(query: CreateQuery) -> Node {
    let mut node = Node::from(query);
    node.clear_spans();
    node
}
