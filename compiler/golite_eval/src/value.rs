//! Runtime values.
//!
//! A [`Value`] is either an opaque host value, a struct, or an interpreted
//! function. Struct values are shared handles: two variables holding the
//! same `StructValue` see each other's writes until one of them is
//! explicitly copied.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use golite_ir::{FuncDecl, Name};
use golite_runtime::{ensure_sufficient_stack, NativeValue};
use rustc_hash::FxHashMap;

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Native(NativeValue),
    Struct(StructValue),
    Function(FunctionValue),
}

impl Value {
    /// The undefined placeholder held by never-assigned variables.
    pub fn nil() -> Self {
        Value::Native(NativeValue::Nil)
    }

    pub fn int(n: i64) -> Self {
        Value::Native(NativeValue::Int(n))
    }

    pub fn string(s: &str) -> Self {
        Value::Native(NativeValue::from(s))
    }

    pub fn bool(b: bool) -> Self {
        Value::Native(NativeValue::Bool(b))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Native(native) => native.type_name(),
            Value::Struct(_) => "struct",
            Value::Function(_) => "func",
        }
    }

    /// Value-copy semantics: natives copy as the host type does, structs are
    /// copied as [`StructValue::copy`] describes, and functions get a new
    /// wrapper over the same bound variables.
    pub fn copy(&self) -> Self {
        match self {
            Value::Native(native) => Value::Native(native.copy()),
            Value::Struct(sv) => Value::Struct(sv.copy()),
            Value::Function(fv) => Value::Function(fv.clone()),
        }
    }

    /// Host representation, if the value has one.
    pub fn as_native(&self) -> Option<&NativeValue> {
        match self {
            Value::Native(native) => Some(native),
            Value::Struct(_) | Value::Function(_) => None,
        }
    }

    pub fn into_native(self) -> Option<NativeValue> {
        match self {
            Value::Native(native) => Some(native),
            Value::Struct(_) | Value::Function(_) => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(sv) => Some(sv),
            _ => None,
        }
    }
}

impl From<NativeValue> for Value {
    fn from(native: NativeValue) -> Self {
        Value::Native(native)
    }
}

impl PartialEq for Value {
    /// Natives compare by value; structs and functions by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a.same_handle(b),
            (Value::Function(a), Value::Function(b)) => {
                Rc::ptr_eq(&a.func, &b.func) && Rc::ptr_eq(&a.bound, &b.bound)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Native(native) => write!(f, "{native}"),
            Value::Struct(sv) => write!(f, "{sv}"),
            Value::Function(_) => f.write_str("func"),
        }
    }
}

#[derive(Debug)]
struct StructData {
    type_name: Name,
    /// Declaration order.
    fields: Vec<StructField>,
}

/// One field of a struct instance.
#[derive(Clone, Debug)]
pub struct StructField {
    pub name: Name,
    pub value: Value,
    /// Declared as `*T`: copies of the struct share the referenced value.
    pub by_reference: bool,
}

impl StructField {
    pub fn new(name: Name, value: Value) -> Self {
        Self {
            name,
            value,
            by_reference: false,
        }
    }

    pub fn pointer(name: Name, value: Value) -> Self {
        Self {
            name,
            value,
            by_reference: true,
        }
    }
}

type HandlePtr = *const RefCell<StructData>;

/// Handle to a struct instance.
#[derive(Clone, Debug)]
pub struct StructValue(Rc<RefCell<StructData>>);

impl StructValue {
    /// A struct whose fields all hold values.
    pub fn new(type_name: Name, fields: Vec<(Name, Value)>) -> Self {
        Self::with_fields(
            type_name,
            fields
                .into_iter()
                .map(|(name, value)| StructField::new(name, value))
                .collect(),
        )
    }

    pub fn with_fields(type_name: Name, fields: Vec<StructField>) -> Self {
        StructValue(Rc::new(RefCell::new(StructData { type_name, fields })))
    }

    pub fn type_name(&self) -> Name {
        self.0.borrow().type_name
    }

    pub fn has_field(&self, name: Name) -> bool {
        self.0.borrow().fields.iter().any(|f| f.name == name)
    }

    pub fn field(&self, name: Name) -> Option<Value> {
        self.0
            .borrow()
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.clone())
    }

    /// Overwrite a field. Returns false if the struct has no such field.
    pub fn set_field(&self, name: Name, value: Value) -> bool {
        let mut data = self.0.borrow_mut();
        match data.fields.iter_mut().find(|f| f.name == name) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    pub fn field_names(&self) -> Vec<Name> {
        self.0.borrow().fields.iter().map(|f| f.name).collect()
    }

    /// A new instance, as a Go assignment of the struct would produce.
    ///
    /// Value fields are copied in turn; pointer fields keep referring to the
    /// same instance. A struct reached twice while copying is copied once,
    /// so cycles through value fields terminate.
    pub fn copy(&self) -> Self {
        self.copy_with(&mut FxHashMap::default())
    }

    fn copy_with(&self, copies: &mut FxHashMap<HandlePtr, StructValue>) -> Self {
        if let Some(done) = copies.get(&Rc::as_ptr(&self.0)) {
            return done.clone();
        }
        let type_name = self.type_name();
        let fresh = StructValue::with_fields(type_name, Vec::new());
        copies.insert(Rc::as_ptr(&self.0), fresh.clone());

        let source = self.0.borrow().fields.clone();
        let fields = source
            .into_iter()
            .map(|field| {
                let value = match (&field.value, field.by_reference) {
                    (_, true) => field.value.clone(),
                    (Value::Struct(sv), false) => {
                        Value::Struct(ensure_sufficient_stack(|| sv.copy_with(copies)))
                    }
                    (other, false) => other.copy(),
                };
                StructField { value, ..field }
            })
            .collect();
        fresh.0.borrow_mut().fields = fields;
        fresh
    }

    /// True if both handles refer to the same instance.
    pub fn same_handle(&self, other: &StructValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<HandlePtr>) -> fmt::Result {
        let this = Rc::as_ptr(&self.0);
        if open.contains(&this) {
            return f.write_str("{...}");
        }
        open.push(this);
        f.write_str("{")?;
        for (i, field) in self.0.borrow().fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match (&field.value, field.by_reference) {
                // Go prints the address of a nested pointer.
                (Value::Struct(sv), true) => write!(f, "{:p}", Rc::as_ptr(&sv.0))?,
                (Value::Struct(sv), false) => sv.fmt_with(f, open)?,
                (other, _) => write!(f, "{other}")?,
            }
        }
        open.pop();
        f.write_str("}")
    }
}

impl fmt::Display for StructValue {
    /// `{1 2}`, like Go's `%v`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &mut Vec::new())
    }
}

/// An interpreted function plus pre-bound variables.
///
/// Cloning shares the bound-variable map.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    pub(crate) func: Rc<FuncDecl>,
    pub(crate) bound: Rc<FxHashMap<Name, Value>>,
}

impl FunctionValue {
    pub fn new(func: Rc<FuncDecl>) -> Self {
        Self::with_bound(func, FxHashMap::default())
    }

    pub fn with_bound(func: Rc<FuncDecl>, bound: FxHashMap<Name, Value>) -> Self {
        Self {
            func,
            bound: Rc::new(bound),
        }
    }

    pub fn decl(&self) -> &FuncDecl {
        &self.func
    }

    pub fn bound(&self, name: Name) -> Option<&Value> {
        self.bound.get(&name)
    }
}

#[cfg(test)]
mod tests;
