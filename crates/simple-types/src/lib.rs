//! Shared types for the SIMPLE interpreter.
//!
//! This crate defines the AST node model and the terminal values that
//! variables are bound to. Both evaluators in `simple-eval` operate over
//! these types.

pub mod ast;
mod value;

pub use ast::{BinOp, Node};
pub use value::Value;
