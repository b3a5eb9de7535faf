//! # Statement Language
//!
//! Tokenizer and finite-state parser for the statement dialect.
//! Pure functions — no I/O, no state shared between calls.

pub mod lexer;
pub mod parser;

use crate::Result;
use crate::model::Query;

/// Parse one statement into a [`Query`].
pub fn parse(sql: &str) -> Result<Query> {
    parser::parse_statement(sql)
}
