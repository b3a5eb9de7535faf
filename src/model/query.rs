//! The parse result.

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Condition;
use crate::sql::lexer::{TokenKind, Tokenizer};

/// Statement kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    #[default]
    Unknown,
}

impl QueryKind {
    /// The leading keyword of a statement of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            QueryKind::Select => "SELECT",
            QueryKind::Insert => "INSERT INTO",
            QueryKind::Update => "UPDATE",
            QueryKind::Delete => "DELETE FROM",
            QueryKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed statement.
///
/// Which collections are populated depends on `kind`: `fields` and `aliases`
/// for SELECT, `updates` for UPDATE, `conditions` for anything with a WHERE
/// clause. Map iteration follows source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Query {
    pub kind: QueryKind,
    pub table: String,
    pub fields: Vec<String>,
    /// Field name → alias.
    pub aliases: IndexMap<String, String>,
    /// Column name → assigned value.
    pub updates: IndexMap<String, String>,
    pub conditions: Vec<Condition>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias_of(&self, field: &str) -> Option<&str> {
        self.aliases.get(field).map(String::as_str)
    }

    /// Pretty-printed JSON form of the statement.
    #[cfg(feature = "serde")]
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn write_where(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cond) in self.conditions.iter().enumerate() {
            if i == 0 {
                f.write_str(" WHERE ")?;
            } else {
                write!(f, " {} ", cond.conjunction.unwrap_or(super::Conjunction::And))?;
            }
            write!(f, "{cond}")?;
        }
        Ok(())
    }
}

/// Renders the statement back as single-spaced SQL in the parser's dialect.
impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            QueryKind::Select => {
                f.write_str("SELECT ")?;
                for (i, field) in self.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(field)?;
                    if let Some(alias) = self.alias_of(field) {
                        write!(f, " AS {alias}")?;
                    }
                }
                if !self.table.is_empty() {
                    write!(f, " FROM {}", self.table)?;
                }
                self.write_where(f)
            }
            QueryKind::Update => {
                write!(f, "UPDATE {}", self.table)?;
                for (i, (column, value)) in self.updates.iter().enumerate() {
                    f.write_str(if i == 0 { " SET " } else { ", " })?;
                    if reads_as_identifier(value) {
                        write!(f, "{column} = {value}")?;
                    } else {
                        write!(f, "{column} = '{value}'")?;
                    }
                }
                self.write_where(f)
            }
            QueryKind::Delete => {
                write!(f, "DELETE FROM {}", self.table)?;
                self.write_where(f)
            }
            QueryKind::Insert => f.write_str("INSERT INTO"),
            QueryKind::Unknown => Ok(()),
        }
    }
}

/// Whether `value` tokenizes back as exactly one identifier, so it can be
/// rendered without quotes.
fn reads_as_identifier(value: &str) -> bool {
    let tok = Tokenizer::new(value).peek();
    tok.kind == TokenKind::Identifier && tok.span.len() == value.len()
}
