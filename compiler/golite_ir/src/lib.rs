//! Golite IR - the lowered program representation.
//!
//! A [`Package`] holds free functions and per-type method tables. Function
//! bodies are [`Stmt`] trees over [`Expr`] nodes that contain no operators
//! and no implicit control flow: every `if`/`for` carries all of its parts,
//! and every operator is a call to a literal native function.
//!
//! IR nodes are never mutated after lowering. Runtime state lives in the
//! evaluator's value model.

mod interner;
mod node;
mod package;

pub use interner::{Name, SharedInterner, StringInterner};
pub use node::{Expr, FieldInit, Stmt};
pub use package::{FuncDecl, MethodDecl, Package, Param, TypeDecl};
