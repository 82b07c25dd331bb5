//! Evaluation errors.
//!
//! Every error aborts the run: the interpreted program has no way to
//! recover from one. `panic(v)` is reported as [`EvalErrorKind::Panic`]
//! carrying the evaluated payload.

use std::fmt;

use golite_runtime::NativeError;
use thiserror::Error;

use crate::Value;

/// What went wrong.
#[derive(Clone, Debug, Error)]
pub enum EvalErrorKind {
    #[error("panic: {payload}")]
    Panic { payload: Value },

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("call to {name} produced {count} results where one value is expected")]
    MultipleResults { name: String, count: usize },

    #[error("assignment mismatch: {targets} targets but {sources} values")]
    AssignMismatch { targets: usize, sources: usize },

    #[error("cannot assign to {0}")]
    NotAssignable(String),

    #[error("field access on non-struct value of type {type_name}")]
    NotAStruct { type_name: &'static str },

    #[error("field not found: {field}")]
    NoSuchField { field: String },

    #[error("cannot index {type_name}")]
    CannotIndex { type_name: &'static str },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("unsupported element type `{0}`")]
    UnsupportedElementType(String),

    #[error("{name} cannot be passed to native code")]
    NotNative { name: &'static str },

    #[error("break escaped function {func}")]
    BreakOutsideLoop { func: String },

    #[error("maximum call depth exceeded (limit: {depth})")]
    StackOverflow { depth: usize },

    #[error("no function named `{0}`")]
    UndefinedFunction(String),
}

/// Evaluation error with the interpreted call stack at the failure point.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Function names, innermost first.
    pub backtrace: Vec<String>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            backtrace: Vec::new(),
        }
    }

    /// Record one more enclosing frame while the error propagates outward.
    #[must_use]
    pub fn in_frame(mut self, func: &str) -> Self {
        self.backtrace.push(func.to_owned());
        self
    }

    /// The payload of a `panic` call, if that is what this error is.
    pub fn panic_payload(&self) -> Option<&Value> {
        match &self.kind {
            EvalErrorKind::Panic { payload } => Some(payload),
            _ => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.backtrace.is_empty() {
            write!(f, "\n  in {}", self.backtrace.join("\n  in "))?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl From<NativeError> for EvalError {
    fn from(err: NativeError) -> Self {
        EvalError::new(EvalErrorKind::Native(err))
    }
}

// Factory functions

pub fn not_callable(value: &Value) -> EvalError {
    EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    }
    .into()
}

pub fn not_a_struct(value: &Value) -> EvalError {
    EvalErrorKind::NotAStruct {
        type_name: value.type_name(),
    }
    .into()
}

pub fn no_such_field(field: &str) -> EvalError {
    EvalErrorKind::NoSuchField {
        field: field.to_owned(),
    }
    .into()
}

pub fn cannot_index(value: &Value) -> EvalError {
    EvalErrorKind::CannotIndex {
        type_name: value.type_name(),
    }
    .into()
}

pub fn type_mismatch(expected: &'static str, got: &Value) -> EvalError {
    EvalErrorKind::TypeMismatch {
        expected,
        got: got.type_name(),
    }
    .into()
}

pub fn not_native(value: &Value) -> EvalError {
    EvalErrorKind::NotNative {
        name: value.type_name(),
    }
    .into()
}

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    }
    .into()
}
