//! Native callables.

use std::fmt;
use std::rc::Rc;

use crate::{NativeError, NativeValue};

/// Result of a native call: at most one value.
pub type NativeResult = Result<Option<NativeValue>, NativeError>;

type NativeFn = dyn Fn(&[NativeValue]) -> NativeResult;

/// Number of arguments a native callable accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// A host function callable from interpreted code.
///
/// Cloning shares the underlying closure.
#[derive(Clone)]
pub struct NativeFunc {
    name: Rc<str>,
    arity: Arity,
    func: Rc<NativeFn>,
}

impl NativeFunc {
    pub fn new(
        name: impl Into<Rc<str>>,
        arity: Arity,
        func: impl Fn(&[NativeValue]) -> NativeResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Invoke the callable after checking the argument count.
    pub fn call(&self, args: &[NativeValue]) -> NativeResult {
        if !self.arity.accepts(args.len()) {
            let expected = match self.arity {
                Arity::Exact(n) => n,
                Arity::Variadic => args.len(),
            };
            return Err(NativeError::ArityMismatch {
                name: self.name.to_string(),
                expected,
                got: args.len(),
            });
        }
        tracing::trace!(name = %self.name, argc = args.len(), "native call");
        (self.func)(args)
    }

    /// True if both handles share one closure.
    pub fn same_callable(&self, other: &NativeFunc) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunc")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
