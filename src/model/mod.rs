//! # Statement Model
//!
//! Plain records produced by the parser. No behavior beyond construction
//! and rendering; no I/O, no state.

pub mod condition;
pub mod query;

pub use condition::{Condition, Conjunction, Operator};
pub use query::{Query, QueryKind};
