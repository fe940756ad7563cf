//! Tests for the JSON form of the tree.

mod common;
use common::*;

#[test]
fn serialize_create_query() {
    let q = parse("CREATE TABLE db.t (x UInt8 DEFAULT 1) ENGINE = Log");
    let json = serde_json::to_value(&q).expect("json");
    assert_eq!(json["kind"], "Table");
    assert_eq!(json["database"], "db");
    assert_eq!(json["name"], "t");
    assert_eq!(json["attach"], false);

    let column = &json["columns"]["ExpressionList"]["items"][0]["ColumnDeclaration"];
    assert_eq!(column["name"], "x");
    assert_eq!(column["default"]["specifier"], "Default");
    assert_eq!(column["data_type"]["Function"]["name"], "UInt8");
}
