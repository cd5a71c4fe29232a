//! Small-step reduction: one syntactic rewrite at a time.

use crate::env::Environment;
use crate::error::{EvalResult, Violation};
use crate::ops::{apply_binary, branch_on, operand_value};
use simple_types::Node;

/// Rewrite `node` once, threading `environment` through the rewrite.
///
/// Only defined for reducible nodes; calling it on `Number`, `Boolean` or
/// `DoNothing` fails with [`Violation::Irreducible`]. Binary operators
/// always make progress on their left operand before their right.
pub fn reduce(node: &Node, environment: &Environment) -> EvalResult<(Node, Environment)> {
    tracing::trace!(node = %node, "reduce");
    match node {
        Node::Number(_) | Node::Boolean(_) | Node::DoNothing => Err(Violation::Irreducible {
            node: node.render(),
        }
        .into()),

        Node::Variable(name) => {
            let value = environment.lookup(name)?;
            Ok((value.into_node(), environment.clone()))
        }

        Node::Binary { op, left, right } => {
            if left.reducible() {
                let (left, env) = reduce(left, environment)?;
                Ok((Node::binary(*op, left, (**right).clone()), env))
            } else if right.reducible() {
                let (right, env) = reduce(right, environment)?;
                Ok((Node::binary(*op, (**left).clone(), right), env))
            } else {
                let value = apply_binary(*op, operand_value(left)?, operand_value(right)?)?;
                Ok((value.into_node(), environment.clone()))
            }
        }

        Node::Assign { name, expression } => {
            if expression.reducible() {
                let (expression, env) = reduce(expression, environment)?;
                Ok((Node::assign(name.clone(), expression), env))
            } else {
                let value = operand_value(expression)?;
                Ok((Node::DoNothing, environment.with(name.clone(), value)))
            }
        }

        Node::If {
            condition,
            consequence,
            alternative,
        } => {
            if condition.reducible() {
                let (condition, env) = reduce(condition, environment)?;
                Ok((
                    Node::if_else(condition, (**consequence).clone(), (**alternative).clone()),
                    env,
                ))
            } else if branch_on(condition)? {
                Ok(((**consequence).clone(), environment.clone()))
            } else {
                Ok(((**alternative).clone(), environment.clone()))
            }
        }

        Node::Sequence { first, second } => match &**first {
            Node::DoNothing => Ok(((**second).clone(), environment.clone())),
            first => {
                let (first, env) = reduce(first, environment)?;
                Ok((Node::sequence(first, (**second).clone()), env))
            }
        },

        Node::While { condition, body } => Ok((
            Node::if_else(
                (**condition).clone(),
                Node::sequence((**body).clone(), node.clone()),
                Node::DoNothing,
            ),
            environment.clone(),
        )),
    }
}
