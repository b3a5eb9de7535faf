//! # sqlfsm — Finite-State Statement Parser
//!
//! Turns one statement of a minimal SQL-like dialect into a [`Query`]: its
//! kind, target table, selected fields and aliases, UPDATE assignments, and a
//! flat chain of WHERE conditions. Nothing is executed or checked against a
//! schema.
//!
//! ## Design Principles
//!
//! 1. **Lazy tokens**: the tokenizer peeks and consumes over a cursor into the
//!    original text, it never builds a token list
//! 2. **Explicit states**: every parser state expects one kind of token and
//!    names its successor
//! 3. **All or nothing**: the first mismatch aborts the parse; a partial
//!    `Query` is never returned
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlfsm::{QueryKind, Operator};
//!
//! # fn example() -> sqlfsm::Result<()> {
//! let query = sqlfsm::parse("SELECT fname AS first_name FROM data WHERE age > 20")?;
//!
//! assert_eq!(query.kind, QueryKind::Select);
//! assert_eq!(query.table, "data");
//! assert_eq!(query.alias_of("fname"), Some("first_name"));
//! assert_eq!(query.conditions[0].operator, Operator::Gt);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Dialect
//!
//! | Statement | Form |
//! |-----------|------|
//! | SELECT | `SELECT f [AS a], ... FROM t [WHERE ...]` |
//! | UPDATE | `UPDATE t SET c = v, ... [WHERE ...]` |
//! | DELETE | `DELETE FROM t [WHERE ...]` |
//! | INSERT | `INSERT INTO` is recognized, its body is not parsed |
//!
//! WHERE clauses are `field op value` comparisons joined left to right by
//! `AND`/`OR`, with `op` one of `= < > <= >= !=`. Values are field names or
//! single-quoted literals (`\'` escapes a quote).

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod sql;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Condition, Conjunction, Operator, Query, QueryKind};
pub use sql::lexer::{Token, TokenKind, Tokenizer};
pub use sql::parser::{Parser, State};
pub use sql::parse;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error at {state} (position {position}): {message}")]
    Parse {
        state: State,
        position: usize,
        found: String,
        message: String,
    },

    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The parser state a parse error was raised in.
    pub fn state(&self) -> Option<State> {
        match self {
            Error::Parse { state, .. } => Some(*state),
            #[cfg(feature = "serde")]
            Error::Serialization(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
