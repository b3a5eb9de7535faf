//! WHERE-clause comparisons.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Eq,
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    Lt,
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    Gt,
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    Lte,
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    Gte,
    #[cfg_attr(feature = "serde", serde(rename = "!="))]
    Neq,
    /// Not set yet. Never present on a condition returned by the parser.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "UNKNOWN"))]
    Unknown,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Neq => "!=",
            Operator::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a condition combines with the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    /// Case-insensitive `AND` / `OR`.
    pub fn from_keyword(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("AND") {
            Some(Conjunction::And)
        } else if s.eq_ignore_ascii_case("OR") {
            Some(Conjunction::Or)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Conjunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conjunction::And => f.write_str("AND"),
            Conjunction::Or => f.write_str("OR"),
        }
    }
}

/// One comparison in a WHERE clause.
///
/// Conditions form a flat left-to-right chain: `conjunction` links a condition
/// to the previous one and is `None` on the first. There is no grouping and
/// no precedence between AND and OR.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Condition {
    pub left: String,
    /// Always true: the left operand is a field reference in this dialect.
    pub left_is_field: bool,
    pub operator: Operator,
    pub right: String,
    /// `false` when `right` came from a quoted literal.
    pub right_is_field: bool,
    pub conjunction: Option<Conjunction>,
}

impl Condition {
    /// A condition on `left` with the operator and right operand still unset.
    pub fn new(left: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            left_is_field: true,
            operator: Operator::Unknown,
            right: String::new(),
            right_is_field: true,
            conjunction: None,
        }
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Right operand naming a column.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.right = field.into();
        self.right_is_field = true;
        self
    }

    /// Right operand taken from a quoted literal.
    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.right = literal.into();
        self.right_is_field = false;
        self
    }

    pub fn with_conjunction(mut self, conjunction: Conjunction) -> Self {
        self.conjunction = Some(conjunction);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.operator != Operator::Unknown
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ", self.left, self.operator)?;
        if self.right_is_field {
            f.write_str(&self.right)
        } else {
            write!(f, "'{}'", self.right)
        }
    }
}
