//! Runtime error types for the SIMPLE evaluators.

use simple_types::BinOp;
use thiserror::Error;

/// Evaluation error shared by the reduction engine, the machine and the
/// big-step evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable was looked up that the environment does not bind.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    /// The program tree is malformed for the operation attempted.
    #[error("precondition violation: {0}")]
    PreconditionViolation(Violation),

    /// Checked integer arithmetic overflowed.
    #[error("arithmetic overflow: {left} {op} {right}")]
    ArithmeticOverflow { op: BinOp, left: i64, right: i64 },

    /// The machine ran past its configured step limit.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    /// The big-step evaluator ran out of gas.
    #[error("gas exhausted")]
    GasExhausted,
}

/// The specific way a program tree broke an evaluator's precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// `reduce` was called on a terminal node.
    #[error("cannot reduce irreducible node `{node}`")]
    Irreducible { node: String },

    /// A binary operator collapsed with operands it does not support.
    #[error("operator `{op}` does not apply to {left} and {right}")]
    OperandMismatch {
        op: BinOp,
        left: &'static str,
        right: &'static str,
    },

    /// An `if` or `while` condition settled on something other than a boolean.
    #[error("condition must be a boolean, found `{found}`")]
    NonBooleanCondition { found: String },

    /// A statement appeared where a value was required.
    #[error("statement `{node}` used where a value is required")]
    StatementAsValue { node: String },
}

impl From<Violation> for EvalError {
    fn from(v: Violation) -> Self {
        EvalError::PreconditionViolation(v)
    }
}

/// Failure of a machine run that writes a trace to a sink.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("failed to write trace: {0}")]
    Trace(#[from] std::io::Error),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Result alias for traced machine runs.
pub type RunResult<T> = Result<T, RunError>;
