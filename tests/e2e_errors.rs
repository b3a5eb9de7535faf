//! End-to-end tests for rejected statements.
//!
//! Every failure is a `Error::Parse` naming the state that rejected the
//! offending token.

use sqlfsm::{Error, State};

fn rejected_at(sql: &str) -> (State, String) {
    match sqlfsm::parse(sql) {
        Err(Error::Parse { state, found, .. }) => (state, found),
        other => panic!("Expected a parse error for {sql:?}, got {other:?}"),
    }
}

// ============================================================================
// 1. Missing pieces
// ============================================================================

#[test]
fn test_select_without_fields() {
    let (state, found) = rejected_at("SELECT FROM x");
    assert_eq!(state, State::SelectField);
    assert_eq!(found, "FROM");
}

#[test]
fn test_select_without_table() {
    let (state, found) = rejected_at("SELECT a FROM");
    assert_eq!(state, State::SelectFromTable);
    assert_eq!(found, "");
}

#[test]
fn test_where_without_value() {
    let (state, _) = rejected_at("SELECT a FROM t WHERE id =");
    assert_eq!(state, State::WhereValue);
}

#[test]
fn test_empty_statement() {
    assert_eq!(rejected_at("").0, State::Init);
}

// ============================================================================
// 2. Unsupported grammar
// ============================================================================

#[test]
fn test_unknown_statement_kind() {
    let (state, found) = rejected_at("MERGE INTO t");
    assert_eq!(state, State::Init);
    assert_eq!(found, "MERGE");
}

#[test]
fn test_parenthesized_conditions_rejected() {
    assert_eq!(rejected_at("SELECT a FROM t WHERE (a = 1)").0, State::WhereField);
}

#[test]
fn test_order_by_rejected() {
    assert_eq!(rejected_at("SELECT a FROM t ORDER BY a").0, State::Where);
}

#[test]
fn test_leading_whitespace_rejected() {
    assert_eq!(rejected_at(" SELECT a FROM t").0, State::Init);
}

#[test]
fn test_tab_separator_rejected() {
    let (state, found) = rejected_at("SELECT a FROM\tt");
    assert_eq!(state, State::SelectFromTable);
    assert_eq!(found, "\tt");
}

// ============================================================================
// 3. Literals
// ============================================================================

#[test]
fn test_unterminated_literal() {
    assert_eq!(rejected_at("SELECT a FROM t WHERE name = 'open").0, State::WhereValue);
    assert_eq!(rejected_at("UPDATE t SET name = 'it\\'").0, State::UpdateValue);
}

#[test]
fn test_literal_is_not_a_field() {
    assert_eq!(rejected_at("SELECT 'a' FROM t").0, State::SelectField);
    assert_eq!(rejected_at("DELETE FROM t WHERE 'a' = b").0, State::WhereField);
}

#[test]
fn test_identifier_with_keyword_prefix_splits() {
    // `asset` reads as AS followed by SET.
    let (state, found) = rejected_at("SELECT asset FROM t");
    assert_eq!(state, State::SelectField);
    assert_eq!(found, "as");
}

// ============================================================================
// 4. Error messages
// ============================================================================

#[test]
fn test_error_message_names_state_and_token() {
    let err = sqlfsm::parse("SELECT a FROM t WHERE id LIKE 'x'").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("WHERE_OPERATOR"), "{msg}");
    assert!(msg.contains("'LIKE'"), "{msg}");
}

#[test]
fn test_rejected_literal_reported_with_quotes() {
    let (state, found) = rejected_at("SELECT 'a' FROM t");
    assert_eq!(state, State::SelectField);
    assert_eq!(found, "'a'");

    let err = sqlfsm::parse("SELECT 'a' FROM t").unwrap_err();
    assert!(err.to_string().contains("found ''a''"), "{err}");
}
