//! Golite Eval - tree-walking evaluator for lowered packages.
//!
//! The evaluator runs [`golite_ir`] function bodies directly. Runtime values
//! are host values from [`golite_runtime`], struct handles, or interpreted
//! function values carrying pre-bound variables.
//!
//! # Receivers
//!
//! Selecting a method on a struct builds a bound method value. A `*T`
//! receiver embeds the caller's struct handle, so writes inside the method
//! are visible afterwards; a `T` receiver is copied when the method value is
//! built. That copy duplicates structs held in value-typed fields and shares
//! the ones held in `*T` fields.
//!
//! Plain assignment never copies a struct: `b = a` makes `b` another handle
//! to the same instance. Arrays behave the same way under assignment and
//! only get fresh storage when the struct holding them is copied.

mod builtins;
mod context;
mod errors;
mod evaluator;
mod place;
mod value;

pub use context::Context;
pub use errors::{EvalError, EvalErrorKind};
pub use evaluator::{bind_method, EvalResult, Evaluator};
pub use place::Place;
pub use value::{FunctionValue, StructField, StructValue, Value};
