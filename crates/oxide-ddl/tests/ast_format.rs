//! Tests for multi-line and highlighted output.

mod common;
use common::*;

use oxide_ddl::ast::{HILITE_FUNCTION, HILITE_KEYWORD, HILITE_NONE};
use oxide_ddl::{FormatSettings, Node};

fn strip_escapes(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        match c {
            '\x1b' => in_escape = true,
            'm' if in_escape => in_escape = false,
            _ if in_escape => {}
            _ => out.push(c),
        }
    }
    out
}

#[test]
fn format_pretty_columns() {
    let node = Node::from(parse("CREATE TABLE t (a UInt8, b String DEFAULT 'x') ENGINE = Log"));
    assert_eq!(
        node.to_sql(&FormatSettings::pretty()),
        "CREATE TABLE t\n(\n    a UInt8,\n    b String DEFAULT 'x'\n) ENGINE = Log"
    );
}

#[test]
fn format_pretty_select() {
    let node = Node::from(parse("CREATE VIEW v AS SELECT a FROM t WHERE a > 1"));
    assert_eq!(
        node.to_sql(&FormatSettings::pretty()),
        "CREATE VIEW v AS\nSELECT a\nFROM t\nWHERE a > 1"
    );
}

#[test]
fn format_pretty_reparses() {
    let sql = "CREATE MATERIALIZED VIEW mv (d Date) ENGINE = Memory POPULATE \
               AS SELECT d FROM t ORDER BY d DESC LIMIT 5";
    let pretty = Node::from(parse(sql)).to_sql(&FormatSettings::pretty());
    assert_eq!(parse(&pretty).to_string(), parse(sql).to_string());
}

#[test]
fn format_hilite() {
    let node = Node::from(parse("CREATE TABLE t (x FixedString(2)) ENGINE = Log"));
    let settings = FormatSettings::one_line().with_hilite(true);
    let out = node.to_sql(&settings);
    assert!(out.starts_with(&format!("{HILITE_KEYWORD}CREATE{HILITE_NONE}")));
    assert!(out.contains(&format!("{HILITE_FUNCTION}FixedString{HILITE_NONE}")));
    assert_eq!(strip_escapes(&out), node.to_string());
}

#[test]
fn format_quotes_names_when_needed() {
    round_trip("CREATE TABLE `order` (`select` UInt8, `a``b` String) ENGINE = Log");
    assert_eq!(
        parse("CREATE TABLE t (`a``b` String) ENGINE = Log").to_string(),
        "CREATE TABLE t (`a``b` String) ENGINE = Log"
    );
}
