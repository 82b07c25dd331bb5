//! Builtin functions.
//!
//! Builtins are weak names: a call site only reaches one when the callee
//! identifier is neither a local nor a package function.

use golite_ir::{Name, StringInterner};
use golite_runtime::NativeValue;

use crate::errors::{arity_mismatch, type_mismatch, EvalErrorKind};
use crate::{EvalError, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Builtin {
    Panic,
    Len,
}

impl Builtin {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Builtin::Panic => "panic",
            Builtin::Len => "len",
        }
    }

    pub(crate) fn call(self, mut args: Vec<Value>) -> Result<Vec<Value>, EvalError> {
        if args.len() != 1 {
            return Err(arity_mismatch(self.name(), 1, args.len()));
        }
        let arg = args.swap_remove(0);
        match self {
            Builtin::Panic => {
                tracing::debug!(payload = %arg, "panic");
                Err(EvalErrorKind::Panic { payload: arg }.into())
            }
            Builtin::Len => {
                let len = match &arg {
                    Value::Native(NativeValue::Str(s)) => s.len(),
                    Value::Native(NativeValue::Seq(seq)) => seq.len(),
                    other => return Err(type_mismatch("string or sequence", other)),
                };
                let len = i64::try_from(len).unwrap_or(i64::MAX);
                Ok(vec![Value::int(len)])
            }
        }
    }
}

/// Interned names of the builtins, where the program mentions them at all.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BuiltinNames {
    panic: Option<Name>,
    len: Option<Name>,
}

impl BuiltinNames {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        Self {
            panic: interner.get("panic"),
            len: interner.get("len"),
        }
    }

    pub(crate) fn lookup(&self, name: Name) -> Option<Builtin> {
        if self.panic == Some(name) {
            Some(Builtin::Panic)
        } else if self.len == Some(name) {
            Some(Builtin::Len)
        } else {
            None
        }
    }
}
