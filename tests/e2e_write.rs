//! End-to-end tests for UPDATE, DELETE and INSERT statements.

use pretty_assertions::assert_eq;
use sqlfsm::{Condition, Conjunction, Operator, QueryKind, State};

// ============================================================================
// 1. DELETE with a single condition
// ============================================================================

#[test]
fn test_delete() {
    let query = sqlfsm::parse("DELETE FROM users WHERE id = 1").unwrap();

    assert_eq!(query.kind, QueryKind::Delete);
    assert_eq!(query.table, "users");
    assert_eq!(
        query.conditions,
        vec![Condition::new("id").with_operator(Operator::Eq).with_field("1")]
    );
}

#[test]
fn test_delete_keywords_joined() {
    let joined = sqlfsm::parse("DELETE FROM t WHEREa = 1").unwrap();
    assert_eq!(joined, sqlfsm::parse("DELETE FROM t WHERE a = 1").unwrap());
}

#[test]
fn test_update_keywords_joined() {
    let joined = sqlfsm::parse("UPDATEt SETa = 'v' WHEREid = 1").unwrap();
    assert_eq!(joined, sqlfsm::parse("UPDATE t SET a = 'v' WHERE id = 1").unwrap());
}

#[test]
fn test_delete_without_where() {
    let query = sqlfsm::parse("delete from logs").unwrap();
    assert_eq!(query.kind, QueryKind::Delete);
    assert_eq!(query.table, "logs");
    assert!(query.conditions.is_empty());
}

// ============================================================================
// 2. UPDATE with one assignment and a WHERE clause
// ============================================================================

#[test]
fn test_update_single_field() {
    let query = sqlfsm::parse("UPDATE users SET name = 'devansh' WHERE id = 1").unwrap();

    assert_eq!(query.kind, QueryKind::Update);
    assert_eq!(query.table, "users");
    assert_eq!(query.updates.len(), 1);
    assert_eq!(query.updates["name"], "devansh");
    assert_eq!(
        query.conditions,
        vec![Condition::new("id").with_operator(Operator::Eq).with_field("1")]
    );
}

// ============================================================================
// 3. UPDATE keeps assignments in source order
// ============================================================================

#[test]
fn test_update_assignment_order() {
    let query = sqlfsm::parse("UPDATE t SET z = 1, a = 'two', m = other WHERE k = 0 OR j = 1").unwrap();

    let columns: Vec<&str> = query.updates.keys().map(String::as_str).collect();
    assert_eq!(columns, vec!["z", "a", "m"]);
    assert_eq!(query.updates["m"], "other");
    assert_eq!(query.conditions[1].conjunction, Some(Conjunction::Or));
}

#[test]
fn test_update_repeated_column_takes_last_value() {
    let query = sqlfsm::parse("UPDATE t SET a = 1, b = 2, a = 3").unwrap();
    let pairs: Vec<(&str, &str)> = query
        .updates
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
}

#[test]
fn test_update_display_roundtrip() {
    let query = sqlfsm::parse("UPDATE t SET a='hello world',b=c WHERE id=7").unwrap();
    let rendered = query.to_string();
    assert_eq!(rendered, "UPDATE t SET a = 'hello world', b = c WHERE id = 7");
    assert_eq!(sqlfsm::parse(&rendered).unwrap(), query);
}

// ============================================================================
// 4. INSERT is recognized but its body is not parsed
// ============================================================================

#[test]
fn test_insert_kind_recognized() {
    let query = sqlfsm::parse("insert into").unwrap();
    assert_eq!(query.kind, QueryKind::Insert);
    assert!(query.table.is_empty());
}

#[test]
fn test_insert_body_unsupported() {
    let err = sqlfsm::parse("INSERT INTO users VALUES ('a')").unwrap_err();
    assert_eq!(err.state(), Some(State::InsertBody));
    assert!(err.to_string().contains("not supported"));
}
