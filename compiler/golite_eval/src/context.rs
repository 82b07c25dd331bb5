//! Per-invocation state.

use golite_ir::Name;
use rustc_hash::FxHashMap;

use crate::Value;

/// Locals and control signals of one function invocation.
///
/// Each call owns a fresh context; nothing here outlives the call except
/// the returned values.
#[derive(Debug, Default)]
pub struct Context {
    locals: FxHashMap<Name, Value>,
    /// Set by `return`; `None` while the body is still running.
    pub(crate) returned: Option<Vec<Value>>,
    /// Set by `break`; cleared by the directly enclosing loop.
    pub(crate) breaking: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: Name, value: Value) {
        self.locals.insert(name, value);
    }

    pub fn get(&self, name: Name) -> Option<&Value> {
        self.locals.get(&name)
    }

    pub fn has_local(&self, name: Name) -> bool {
        self.locals.contains_key(&name)
    }

    /// Bind `name` to the undefined placeholder unless it is already bound.
    pub(crate) fn touch(&mut self, name: Name) {
        self.locals.entry(name).or_insert_with(Value::nil);
    }

    /// True once `return` or `break` has fired.
    pub fn signalled(&self) -> bool {
        self.returned.is_some() || self.breaking
    }

    pub fn returned(&self) -> Option<&[Value]> {
        self.returned.as_deref()
    }
}
