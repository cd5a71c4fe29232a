//! Persistent variable environment for the SIMPLE evaluators.

use crate::error::{EvalError, EvalResult};
use im::OrdMap;
use serde::{Deserialize, Serialize};
use simple_types::Value;
use std::fmt;

/// Immutable name → value mapping.
///
/// Backed by `im::OrdMap`, so `clone` is O(1) and [`Environment::with`]
/// shares structure with the receiver instead of copying it. A snapshot
/// never changes after it is created; "updating" a binding produces a new
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    bindings: OrdMap<String, Value>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self {
            bindings: OrdMap::new(),
        }
    }

    /// Look up a binding, failing with `UnboundVariable` if absent.
    pub fn lookup(&self, name: &str) -> EvalResult<Value> {
        self.get(name)
            .copied()
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// A new environment identical to this one except for `name`.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: Value) -> Self {
        Self {
            bindings: self.bindings.update(name.into(), value),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.bindings.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(k, v)| (Into::<String>::into(k), v))
                .collect(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} => {value}")?;
        }
        f.write_str("}")
    }
}
