//! AST node types for the SIMPLE language.
//!
//! Programs are built directly as in-memory trees; there is no parser.
//! Nodes are immutable once constructed: evaluation never mutates a node,
//! it builds new ones. Recursive children are boxed to keep the enum small.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// An expression or statement node.
///
/// The variant set is closed. `Number`, `Boolean` and `DoNothing` are
/// terminal; every other variant is reducible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    // ── Terminal values ──
    /// `42`
    Number(i64),
    /// `true` / `false`
    Boolean(bool),

    // ── Expressions ──
    /// `x`
    Variable(String),
    /// `left + right`, `left * right`, `left < right`, `left > right`
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    // ── Statements ──
    /// `x = expr`
    Assign { name: String, expression: Box<Node> },
    /// `do-nothing`. The unit statement; all instances are interchangeable.
    DoNothing,
    /// `if (condition) { consequence } else { alternative }`
    If {
        condition: Box<Node>,
        consequence: Box<Node>,
        alternative: Box<Node>,
    },
    /// `first; second`
    Sequence { first: Box<Node>, second: Box<Node> },
    /// `while (condition) { body }`
    While { condition: Box<Node>, body: Box<Node> },
}

impl Node {
    // ── Construction ──────────────────────────────────────────────────────

    pub fn number(value: i64) -> Self {
        Node::Number(value)
    }

    pub fn boolean(value: bool) -> Self {
        Node::Boolean(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(left: Node, right: Node) -> Self {
        Self::binary(BinOp::Add, left, right)
    }

    pub fn multiply(left: Node, right: Node) -> Self {
        Self::binary(BinOp::Multiply, left, right)
    }

    pub fn less_than(left: Node, right: Node) -> Self {
        Self::binary(BinOp::LessThan, left, right)
    }

    pub fn greater_than(left: Node, right: Node) -> Self {
        Self::binary(BinOp::GreaterThan, left, right)
    }

    pub fn assign(name: impl Into<String>, expression: Node) -> Self {
        Node::Assign {
            name: name.into(),
            expression: Box::new(expression),
        }
    }

    pub fn do_nothing() -> Self {
        Node::DoNothing
    }

    pub fn if_else(condition: Node, consequence: Node, alternative: Node) -> Self {
        Node::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative: Box::new(alternative),
        }
    }

    pub fn sequence(first: Node, second: Node) -> Self {
        Node::Sequence {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn while_loop(condition: Node, body: Node) -> Self {
        Node::While {
            condition: Box::new(condition),
            body: Box::new(body),
        }
    }

    // ── Classification ────────────────────────────────────────────────────

    /// True if a further rewrite step exists for this node.
    ///
    /// Depends only on the variant, never on an environment.
    pub fn reducible(&self) -> bool {
        match self {
            Node::Number(_) | Node::Boolean(_) | Node::DoNothing => false,
            Node::Variable(_)
            | Node::Binary { .. }
            | Node::Assign { .. }
            | Node::If { .. }
            | Node::Sequence { .. }
            | Node::While { .. } => true,
        }
    }

    /// True for nodes that evaluate to an environment rather than a value.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::Assign { .. }
                | Node::DoNothing
                | Node::If { .. }
                | Node::Sequence { .. }
                | Node::While { .. }
        )
    }

    /// The terminal value this node holds, if it is `Number` or `Boolean`.
    pub fn as_value(&self) -> Option<Value> {
        match self {
            Node::Number(n) => Some(Value::Number(*n)),
            Node::Boolean(b) => Some(Value::Boolean(*b)),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "Number",
            Node::Boolean(_) => "Boolean",
            Node::Variable(_) => "Variable",
            Node::Binary { op, .. } => op.kind_name(),
            Node::Assign { .. } => "Assign",
            Node::DoNothing => "DoNothing",
            Node::If { .. } => "If",
            Node::Sequence { .. } => "Sequence",
            Node::While { .. } => "While",
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    /// Human-readable infix form. For tracing only; it is not parseable.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// The rendered form wrapped in `<<` `>>`.
    pub fn inspect(&self) -> String {
        format!("<<{self}>>")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{n}"),
            Node::Boolean(b) => write!(f, "{b}"),
            Node::Variable(name) => f.write_str(name),
            Node::Binary { op, left, right } => write!(f, "{left} {} {right}", op.as_str()),
            Node::Assign { name, expression } => write!(f, "{name} = {expression}"),
            Node::DoNothing => f.write_str("do-nothing"),
            Node::If {
                condition,
                consequence,
                alternative,
            } => write!(
                f,
                "if ({condition}) {{ {consequence} }} else {{ {alternative} }}"
            ),
            Node::Sequence { first, second } => write!(f, "{first}; {second}"),
            Node::While { condition, body } => write!(f, "while ({condition}) {{ {body} }}"),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        value.into_node()
    }
}

// ── Binary Operators ──────────────────────────────────────────────────────────

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    // Arithmetic
    Add,
    Multiply,
    // Comparison
    LessThan,
    GreaterThan,
}

impl BinOp {
    /// Returns the operator symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Multiply => "*",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
        }
    }

    /// Name of the node variant this operator builds.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BinOp::Add => "Add",
            BinOp::Multiply => "Multiply",
            BinOp::LessThan => "LessThan",
            BinOp::GreaterThan => "GreaterThan",
        }
    }

    /// True for operators that collapse to a `Boolean`.
    pub fn is_comparison(&self) -> bool {
        matches!(self, BinOp::LessThan | BinOp::GreaterThan)
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
