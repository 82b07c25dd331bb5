//! Golite Lower - translates syntax trees into the IR.
//!
//! Lowering removes every operator and every piece of sugar from the source
//! program:
//!
//! - binary, compound-assignment and inc/dec operators become calls to
//!   literal native functions from the operator table
//! - `var` declarations become assignments of zero values
//! - struct literals become complete field maps
//! - `pkg.Member` selectors on native packages become literals
//! - absent `if`/`for` parts become no-ops and `true`
//!
//! Any construct outside the supported subset fails with a [`LowerError`].

mod compiler;
mod error;
mod expr;
mod literal;
mod stmt;

pub use compiler::{Compiler, StructDef, StructField, StructRegistry};
pub use error::LowerError;
pub use literal::{parse_int, parse_literal, parse_string};

use golite_ir::{Package, SharedInterner};
use golite_runtime::NativeRegistry;

/// Lower one package with a fresh struct registry.
pub fn lower_package(
    pkg: &golite_syntax::Package,
    natives: &NativeRegistry,
    interner: SharedInterner,
) -> Result<Package, LowerError> {
    Compiler::new(natives, interner).compile_package(pkg)
}

#[cfg(test)]
mod tests;
