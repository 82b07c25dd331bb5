//! Lowering errors.
//!
//! Lowering is all-or-nothing: the first unsupported or unresolvable
//! construct aborts the whole package.

use golite_syntax::{LitKind, Token};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerError {
    #[error("statement compile not implemented: {0}")]
    UnsupportedStmt(&'static str),

    #[error("expression compile not implemented: {0}")]
    UnsupportedExpr(&'static str),

    #[error("operator not implemented: {0}")]
    UnsupportedOperator(Token),

    #[error("unsupported branch statement: {0}")]
    UnsupportedBranch(Token),

    #[error("{0} literals are not implemented")]
    UnsupportedLiteral(LitKind),

    #[error("invalid integer literal `{0}`")]
    InvalidIntLiteral(String),

    #[error("invalid string literal `{0}`")]
    InvalidStringLiteral(String),

    #[error("composite literal not implemented for {0}")]
    UnsupportedComposite(&'static str),

    #[error("unknown package `{0}`")]
    UnknownPackage(String),

    #[error("unknown member `{member}` in package `{package}`")]
    UnknownMember { package: String, member: String },

    #[error("unknown struct `{0}`")]
    UnknownStruct(String),

    #[error("struct `{ty}` has no field `{field}`")]
    UnknownField { ty: String, field: String },

    #[error("struct literal keys must be field names")]
    InvalidStructKey,

    #[error("too many values in `{ty}` literal: {count} for {fields} fields")]
    TooManyElements {
        ty: String,
        count: usize,
        fields: usize,
    },

    #[error("embedded field `{field}` in struct `{ty}` is not supported")]
    EmbeddedField { ty: String, field: String },

    #[error("no zero value for type `{0}`")]
    UnknownType(String),

    #[error("zero value not implemented for {0}")]
    UnsupportedZeroValue(&'static str),

    #[error("method `{0}` must have a receiver of type T or *T")]
    InvalidReceiver(String),

    #[error("function `{0}` has no body")]
    MissingBody(String),

    #[error("assignment mismatch: {targets} targets but {sources} values")]
    AssignMismatch { targets: usize, sources: usize },

    #[error("break is not in a loop")]
    BreakOutsideLoop,

    #[error("package-level variable `{0}` is not supported")]
    PackageLevelVar(String),
}
