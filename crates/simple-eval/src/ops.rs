//! Operator primitives shared by both evaluators.

use crate::error::{EvalError, EvalResult, Violation};
use simple_types::{BinOp, Node, Value};

/// Apply `op` to two fully reduced operands.
///
/// All four operators take integers; any other operand pairing is a
/// malformed program.
pub fn apply_binary(op: BinOp, left: Value, right: Value) -> EvalResult<Value> {
    let (a, b) = match (left, right) {
        (Value::Number(a), Value::Number(b)) => (a, b),
        _ => {
            return Err(Violation::OperandMismatch {
                op,
                left: left.type_name(),
                right: right.type_name(),
            }
            .into())
        }
    };
    let overflow = || EvalError::ArithmeticOverflow { op, left: a, right: b };
    match op {
        BinOp::Add => a.checked_add(b).map(Value::Number).ok_or_else(overflow),
        BinOp::Multiply => a.checked_mul(b).map(Value::Number).ok_or_else(overflow),
        BinOp::LessThan => Ok(Value::Boolean(a < b)),
        BinOp::GreaterThan => Ok(Value::Boolean(a > b)),
    }
}

/// The value held by a terminal operand node.
///
/// `DoNothing` is terminal but carries no value.
pub fn operand_value(node: &Node) -> EvalResult<Value> {
    node.as_value().ok_or_else(|| {
        Violation::StatementAsValue {
            node: node.render(),
        }
        .into()
    })
}

/// Pick a branch from a settled condition.
pub fn branch_on(condition: &Node) -> EvalResult<bool> {
    match condition {
        Node::Boolean(b) => Ok(*b),
        other => Err(Violation::NonBooleanCondition {
            found: other.render(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(
            apply_binary(BinOp::Add, Value::Number(2), Value::Number(3)),
            Ok(Value::Number(5))
        );
        assert_eq!(
            apply_binary(BinOp::Multiply, Value::Number(-2), Value::Number(3)),
            Ok(Value::Number(-6))
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            apply_binary(BinOp::LessThan, Value::Number(2), Value::Number(3)),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            apply_binary(BinOp::GreaterThan, Value::Number(2), Value::Number(3)),
            Ok(Value::Boolean(false))
        );
        assert_eq!(
            apply_binary(BinOp::GreaterThan, Value::Number(3), Value::Number(3)),
            Ok(Value::Boolean(false))
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            apply_binary(BinOp::Add, Value::Number(i64::MAX), Value::Number(1)),
            Err(EvalError::ArithmeticOverflow {
                op: BinOp::Add,
                left: i64::MAX,
                right: 1,
            })
        );
    }

    #[test]
    fn test_boolean_operand_rejected() {
        assert_eq!(
            apply_binary(BinOp::LessThan, Value::Boolean(true), Value::Number(1)),
            Err(EvalError::PreconditionViolation(Violation::OperandMismatch {
                op: BinOp::LessThan,
                left: "boolean",
                right: "number",
            }))
        );
    }

    #[test]
    fn test_branch_on_requires_boolean() {
        assert_eq!(branch_on(&Node::boolean(true)), Ok(true));
        assert_eq!(branch_on(&Node::boolean(false)), Ok(false));
        assert_eq!(
            branch_on(&Node::number(1)),
            Err(EvalError::PreconditionViolation(Violation::NonBooleanCondition {
                found: "1".into(),
            }))
        );
    }

    #[test]
    fn test_operand_value_rejects_do_nothing() {
        assert_eq!(operand_value(&Node::number(4)), Ok(Value::Number(4)));
        assert!(matches!(
            operand_value(&Node::do_nothing()),
            Err(EvalError::PreconditionViolation(Violation::StatementAsValue { .. }))
        ));
    }
}
