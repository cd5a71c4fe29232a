//! SIMPLE evaluators.
//!
//! Two evaluation strategies over the same AST:
//!
//! - [`reduce`] and [`Machine`]: small-step reduction, one rewrite at a
//!   time, exposing every intermediate program state.
//! - [`evaluate`]: big-step structural recursion, used as the reference
//!   the machine is cross-checked against.

mod big_step;
mod env;
mod error;
mod machine;
mod ops;
mod reduce;

pub use big_step::{evaluate, evaluate_expression, execute, normal_form, Evaluated, Evaluator};
pub use env::Environment;
pub use error::{EvalError, EvalResult, RunError, RunResult, Violation};
pub use machine::{step, Machine, MachineConfig, State, TraceFormat};
pub use ops::apply_binary;
pub use reduce::reduce;
