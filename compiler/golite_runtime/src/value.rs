//! Host values the interpreter treats as opaque.
//!
//! A `NativeValue` is anything a native callable can consume or produce.
//! The interpreter never looks inside one beyond what the operator table
//! and the indexing machinery need.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::{NativeError, NativeFunc};

/// Whether a sequence has array (value) or slice (reference) semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKind {
    Array,
    Slice,
}

/// Integer-indexed linear container.
///
/// Storage is shared between handles, so cloning a handle (which is what
/// assignment does) aliases arrays and slices alike. Copying a value
/// keeps sharing a slice's backing storage but gives an array its own.
#[derive(Clone)]
pub struct Sequence {
    kind: SeqKind,
    elems: Rc<RefCell<Vec<NativeValue>>>,
}

impl Sequence {
    pub fn new(kind: SeqKind, elems: Vec<NativeValue>) -> Self {
        Self {
            kind,
            elems: Rc::new(RefCell::new(elems)),
        }
    }

    pub fn array(elems: Vec<NativeValue>) -> Self {
        Self::new(SeqKind::Array, elems)
    }

    pub fn slice(elems: Vec<NativeValue>) -> Self {
        Self::new(SeqKind::Slice, elems)
    }

    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.elems.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.borrow().is_empty()
    }

    /// Borrow the elements for reading.
    pub fn elems(&self) -> Ref<'_, Vec<NativeValue>> {
        self.elems.borrow()
    }

    /// Convert a host index into a checked position.
    pub fn position(&self, index: i64) -> Result<usize, NativeError> {
        let len = self.len();
        usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(NativeError::IndexOutOfRange { index, len })
    }

    /// Read the element at a position previously checked by [`Sequence::position`].
    pub fn get(&self, pos: usize) -> Result<NativeValue, NativeError> {
        let elems = self.elems.borrow();
        elems.get(pos).cloned().ok_or(NativeError::IndexOutOfRange {
            index: i64::try_from(pos).unwrap_or(i64::MAX),
            len: elems.len(),
        })
    }

    /// Overwrite the element at a position, in place.
    pub fn set(&self, pos: usize, value: NativeValue) -> Result<(), NativeError> {
        let mut elems = self.elems.borrow_mut();
        let len = elems.len();
        match elems.get_mut(pos) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(NativeError::IndexOutOfRange {
                index: i64::try_from(pos).unwrap_or(i64::MAX),
                len,
            }),
        }
    }

    /// True if both handles refer to the same storage.
    pub fn same_storage(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.elems, &other.elems)
    }

    fn copy(&self) -> Self {
        match self.kind {
            SeqKind::Slice => self.clone(),
            SeqKind::Array => {
                let elems = self.elems.borrow().iter().map(NativeValue::copy).collect();
                Self::array(elems)
            }
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("kind", &self.kind)
            .field("elems", &*self.elems.borrow())
            .finish()
    }
}

/// A host-level value.
#[derive(Clone, Debug)]
pub enum NativeValue {
    /// Absent value: Go's `nil`, an unassigned local, or a call with no result.
    Nil,
    Bool(bool),
    /// The single integer type; every integer literal lowers to this.
    Int(i64),
    Str(Rc<str>),
    Seq(Sequence),
    Func(NativeFunc),
    Instant(Instant),
    Duration(Duration),
}

impl NativeValue {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        NativeValue::Str(s.into())
    }

    /// Name of the value's kind, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Nil => "nil",
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) => "int",
            NativeValue::Str(_) => "string",
            NativeValue::Seq(seq) => match seq.kind() {
                SeqKind::Array => "array",
                SeqKind::Slice => "slice",
            },
            NativeValue::Func(_) => "func",
            NativeValue::Instant(_) => "time.Time",
            NativeValue::Duration(_) => "time.Duration",
        }
    }

    pub fn as_bool(&self) -> Result<bool, NativeError> {
        match self {
            NativeValue::Bool(b) => Ok(*b),
            other => Err(NativeError::TypeMismatch {
                expected: "bool",
                got: other.type_name(),
            }),
        }
    }

    pub fn as_int(&self) -> Result<i64, NativeError> {
        match self {
            NativeValue::Int(n) => Ok(*n),
            other => Err(NativeError::TypeMismatch {
                expected: "int",
                got: other.type_name(),
            }),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, NativeValue::Nil)
    }

    /// Duplicate the value the way an assignment of the host type would.
    ///
    /// Scalars and slices are shallow; arrays get fresh storage.
    pub fn copy(&self) -> Self {
        match self {
            NativeValue::Seq(seq) => NativeValue::Seq(seq.copy()),
            other => other.clone(),
        }
    }
}

impl PartialEq for NativeValue {
    /// Value-based equality. Values of different kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NativeValue::Nil, NativeValue::Nil) => true,
            (NativeValue::Bool(a), NativeValue::Bool(b)) => a == b,
            (NativeValue::Int(a), NativeValue::Int(b)) => a == b,
            (NativeValue::Str(a), NativeValue::Str(b)) => a == b,
            (NativeValue::Seq(a), NativeValue::Seq(b)) => match (a.kind(), b.kind()) {
                (SeqKind::Array, SeqKind::Array) => *a.elems() == *b.elems(),
                _ => a.same_storage(b),
            },
            (NativeValue::Func(a), NativeValue::Func(b)) => a.same_callable(b),
            (NativeValue::Instant(a), NativeValue::Instant(b)) => a == b,
            (NativeValue::Duration(a), NativeValue::Duration(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for NativeValue {
    fn from(n: i64) -> Self {
        NativeValue::Int(n)
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::string(s)
    }
}

impl fmt::Display for NativeValue {
    /// Formats like Go's `%v` verb.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Nil => f.write_str("<nil>"),
            NativeValue::Bool(b) => write!(f, "{b}"),
            NativeValue::Int(n) => write!(f, "{n}"),
            NativeValue::Str(s) => f.write_str(s),
            NativeValue::Seq(seq) => {
                f.write_str("[")?;
                for (i, elem) in seq.elems().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str("]")
            }
            NativeValue::Func(func) => write!(f, "func {}", func.name()),
            NativeValue::Instant(instant) => write!(f, "{instant:?}"),
            NativeValue::Duration(d) => write!(f, "{d:?}"),
        }
    }
}
