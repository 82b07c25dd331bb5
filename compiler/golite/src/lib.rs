//! Golite - an embeddable interpreter for a small Go subset.
//!
//! Programs arrive as [`ast`] syntax trees, are lowered once into an
//! operator-free IR, and are then run by a tree-walking evaluator:
//!
//! ```text
//! ast::Package --lower--> ir::Package --evaluate--> Vec<Value>
//! ```
//!
//! [`Interpreter`] ties the passes together with a native package registry
//! (`fmt`, `time` by default) and a print handler.
//!
//! # Environment
//!
//! - `RUST_LOG` enables tracing output once [`init_tracing`] has run.
//! - `GOLITE_TRACE_TREE` switches that output to an indented call tree.
//! - `GOLITE_MAX_CALL_DEPTH` sets the default recursion limit.

mod error;
mod interpreter;
mod tracing_setup;

pub use error::Error;
pub use interpreter::{Interpreter, InterpreterBuilder, MAX_CALL_DEPTH_ENV};
pub use tracing_setup::init_tracing;

pub use golite_eval::{EvalError, EvalErrorKind, StructField, StructValue, Value};
pub use golite_ir as ir;
pub use golite_lower::LowerError;
pub use golite_runtime::{
    buffer_handler, silent_handler, stdout_handler, Arity, NativeError, NativeFunc, NativePackage,
    NativeValue, SharedPrintHandler,
};
pub use golite_syntax as ast;
