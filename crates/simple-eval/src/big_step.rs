//! Big-step evaluator: direct structural recursion to a final result.
//!
//! This is the reference the small-step machine is checked against. Every
//! node evaluates to the terminal `(node, environment)` pair the machine
//! would stop at, so statements nested in expression positions (and the
//! reverse) behave exactly as they do under reduction. Operator primitives
//! and failure reporting are shared with the reduction engine.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult, Violation};
use crate::machine::State;
use crate::ops::{apply_binary, branch_on, operand_value};
use simple_types::{Node, Value};

/// The result of evaluating a node: a value, or the environment left by a
/// statement that settled to `do-nothing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluated {
    Value(Value),
    Environment(Environment),
}

/// Evaluate `node` without a gas bound.
pub fn evaluate(node: &Node, environment: &Environment) -> EvalResult<Evaluated> {
    Evaluator::unbounded().evaluate(node, environment)
}

/// Evaluate `node` to the terminal state the machine would reach.
pub fn normal_form(node: &Node, environment: &Environment) -> EvalResult<State> {
    Evaluator::unbounded().eval(node, environment)
}

/// Evaluate an expression node to a value.
pub fn evaluate_expression(node: &Node, environment: &Environment) -> EvalResult<Value> {
    let state = normal_form(node, environment)?;
    operand_value(&state.statement)
}

/// Execute a node for its effect, producing the final environment.
pub fn execute(statement: &Node, environment: &Environment) -> EvalResult<Environment> {
    normal_form(statement, environment).map(|state| state.environment)
}

/// Big-step evaluator with optional gas metering.
pub struct Evaluator {
    /// Ticks consumed so far.
    pub gas: u64,
    /// Ticks allowed; `None` is unbounded.
    pub gas_limit: Option<u64>,
}

impl Evaluator {
    pub fn unbounded() -> Self {
        Self {
            gas: 0,
            gas_limit: None,
        }
    }

    /// Create an evaluator that fails with `GasExhausted` after `limit` ticks.
    pub fn with_gas_limit(limit: u64) -> Self {
        Self {
            gas: 0,
            gas_limit: Some(limit),
        }
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        match self.gas_limit {
            Some(limit) if self.gas > limit => Err(EvalError::GasExhausted),
            _ => Ok(()),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(node = %node))]
    pub fn evaluate(&mut self, node: &Node, environment: &Environment) -> EvalResult<Evaluated> {
        let state = self.eval(node, environment)?;
        Ok(match state.statement.as_value() {
            Some(value) => Evaluated::Value(value),
            None => Evaluated::Environment(state.environment),
        })
    }

    /// Evaluate any node to a terminal node and the environment it leaves.
    pub fn eval(&mut self, node: &Node, environment: &Environment) -> EvalResult<State> {
        self.tick()?;
        match node {
            Node::Number(_) | Node::Boolean(_) | Node::DoNothing => {
                Ok(State::new(node.clone(), environment.clone()))
            }

            Node::Variable(name) => {
                let value = environment.lookup(name)?;
                Ok(State::new(value.into_node(), environment.clone()))
            }

            // ── Expressions ──────────────────────────────────────────────

            Node::Binary { op, left, right } => {
                let left = self.eval(left, environment)?;
                let right = self.eval(right, &left.environment)?;
                let value = apply_binary(
                    *op,
                    operand_value(&left.statement)?,
                    operand_value(&right.statement)?,
                )?;
                Ok(State::new(value.into_node(), right.environment))
            }

            // ── Statements ───────────────────────────────────────────────

            Node::Assign { name, expression } => {
                let settled = self.eval(expression, environment)?;
                let value = operand_value(&settled.statement)?;
                Ok(State::new(
                    Node::DoNothing,
                    settled.environment.with(name.clone(), value),
                ))
            }

            Node::If {
                condition,
                consequence,
                alternative,
            } => {
                let settled = self.eval(condition, environment)?;
                if branch_on(&settled.statement)? {
                    self.eval(consequence, &settled.environment)
                } else {
                    self.eval(alternative, &settled.environment)
                }
            }

            Node::Sequence { first, second } => {
                let environment = self.eval_leading(first, environment)?;
                self.eval(second, &environment)
            }

            Node::While { condition, body } => {
                let mut environment = environment.clone();
                loop {
                    let settled = self.eval(condition, &environment)?;
                    if !branch_on(&settled.statement)? {
                        return Ok(State::new(Node::DoNothing, settled.environment));
                    }
                    environment = self.eval_leading(body, &settled.environment)?;
                }
            }
        }
    }

    /// Evaluate a node that something else is sequenced after.
    ///
    /// It has to settle to `do-nothing`; a value there can never be
    /// dropped, so the sequence is stuck on it.
    fn eval_leading(&mut self, node: &Node, environment: &Environment) -> EvalResult<Environment> {
        let settled = self.eval(node, environment)?;
        match settled.statement {
            Node::DoNothing => Ok(settled.environment),
            stuck => Err(Violation::Irreducible {
                node: stuck.render(),
            }
            .into()),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::unbounded()
    }
}
