//! Errors raised by native operations.

use thiserror::Error;

/// Failure inside a native callable or operator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NativeError {
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("integer divide by zero")]
    DivisionByZero,

    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("index out of range [{index}] with length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("{0}")]
    Custom(String),
}
