//! Expression results.
//!
//! Evaluating an expression yields a [`Place`]: something that can be read
//! and, unless it is a plain value, written. Element and field places alias
//! the storage they point into, so writing through them is visible to every
//! other holder of the same sequence or struct handle.

use golite_ir::Name;
use golite_runtime::Sequence;

use crate::errors::{not_native, EvalErrorKind};
use crate::{Context, EvalError, StructValue, Value};

/// Result of evaluating an expression.
#[derive(Clone, Debug)]
pub enum Place {
    /// A temporary: literals, call results, bound methods.
    Value(Value),
    /// A local variable of the current context.
    Variable(Name),
    /// One element of an array or slice; `pos` is already range-checked.
    Element { seq: Sequence, pos: usize },
    /// A field of a struct instance known to have that field.
    Field { object: StructValue, field: Name },
}

impl Place {
    pub fn get(&self, ctx: &Context) -> Result<Value, EvalError> {
        match self {
            Place::Value(value) => Ok(value.clone()),
            Place::Variable(name) => Ok(ctx.get(*name).cloned().unwrap_or_else(Value::nil)),
            Place::Element { seq, pos } => Ok(Value::Native(seq.get(*pos)?)),
            // Instances never lose fields.
            Place::Field { object, field } => Ok(object.field(*field).unwrap_or_else(Value::nil)),
        }
    }

    /// Overwrite the referenced storage. Plain values are not assignable.
    pub fn set(&self, ctx: &mut Context, value: Value) -> Result<(), EvalError> {
        match self {
            Place::Value(target) => {
                Err(EvalErrorKind::NotAssignable(target.type_name().to_owned()).into())
            }
            Place::Variable(name) => {
                ctx.define(*name, value);
                Ok(())
            }
            Place::Element { seq, pos } => {
                let native = match value {
                    Value::Native(native) => native,
                    other => return Err(not_native(&other)),
                };
                seq.set(*pos, native)?;
                Ok(())
            }
            Place::Field { object, field } => {
                object.set_field(*field, value);
                Ok(())
            }
        }
    }

    pub fn into_value(self, ctx: &Context) -> Result<Value, EvalError> {
        match self {
            Place::Value(value) => Ok(value),
            other => other.get(ctx),
        }
    }
}
