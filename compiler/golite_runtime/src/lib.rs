//! Golite Runtime - host values and native packages.
//!
//! Everything the interpreter treats as opaque lives here: integers,
//! strings, booleans, sequences, host callables, and the operator table
//! that lowering turns binary operators into.

mod error;
mod func;
mod operators;
mod packages;
mod print_handler;
mod stack;
mod value;

pub use error::NativeError;
pub use func::{Arity, NativeFunc, NativeResult};
pub use operators::{assign_operator, binary_operator, inc_dec_operator, BinaryOperator};
pub use packages::{
    fmt_package, sprint, sprintln, std_registry, time_package, NativePackage, NativeRegistry,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{NativeValue, SeqKind, Sequence};
