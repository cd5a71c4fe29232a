//! Terminal values: what a variable can be bound to.

use crate::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully reduced expression result.
///
/// Mirrors the two terminal expression nodes, `Node::Number` and
/// `Node::Boolean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Number(i64),
    Boolean(bool),
}

impl Value {
    /// Convert back into the equivalent terminal node.
    pub fn into_node(self) -> Node {
        match self {
            Value::Number(n) => Node::Number(n),
            Value::Boolean(b) => Node::Boolean(b),
        }
    }

    /// Lowercase type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
