//! Native packages: named bundles of host callables and globals.
//!
//! Lowering resolves `pkg.Member` selectors against a [`NativeRegistry`]
//! and embeds the member directly as a literal.

use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::{Arity, NativeError, NativeFunc, NativeValue, SharedPrintHandler};

/// A named set of members visible to interpreted code as `name.Member`.
#[derive(Clone, Debug)]
pub struct NativePackage {
    name: String,
    members: FxHashMap<String, NativeValue>,
}

impl NativePackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a callable member. The function is registered as `pkg.name`.
    #[must_use]
    pub fn with_func(
        mut self,
        name: &str,
        arity: Arity,
        func: impl Fn(&[NativeValue]) -> crate::NativeResult + 'static,
    ) -> Self {
        let qualified = format!("{}.{name}", self.name);
        let func = NativeFunc::new(qualified, arity, func);
        self.members.insert(name.to_owned(), NativeValue::Func(func));
        self
    }

    /// Add a global value member.
    #[must_use]
    pub fn with_global(mut self, name: &str, value: NativeValue) -> Self {
        self.members.insert(name.to_owned(), value);
        self
    }

    pub fn member(&self, name: &str) -> Option<&NativeValue> {
        self.members.get(name)
    }
}

/// Lookup table from package name to native package.
#[derive(Clone, Debug, Default)]
pub struct NativeRegistry {
    packages: FxHashMap<String, NativePackage>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package, replacing any previous package of the same name.
    pub fn register(&mut self, package: NativePackage) {
        tracing::debug!(package = package.name(), "registering native package");
        self.packages.insert(package.name.clone(), package);
    }

    pub fn get(&self, name: &str) -> Option<&NativePackage> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }
}

/// Registry holding `fmt` and `time`.
pub fn std_registry(printer: SharedPrintHandler) -> NativeRegistry {
    let mut registry = NativeRegistry::new();
    registry.register(fmt_package(printer));
    registry.register(time_package());
    registry
}

/// `Sprint` formatting: spaces go between operands when neither is a string.
pub fn sprint(args: &[NativeValue]) -> String {
    let is_str = |v: &NativeValue| matches!(v, NativeValue::Str(_));
    let mut out = String::new();
    let mut prev: Option<&NativeValue> = None;
    for arg in args {
        if prev.is_some_and(|p| !is_str(p) && !is_str(arg)) {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
        prev = Some(arg);
    }
    out
}

/// `Sprintln` formatting: spaces between every operand and a trailing newline.
pub fn sprintln(args: &[NativeValue]) -> String {
    let mut out = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    out.push('\n');
    out
}

pub fn fmt_package(printer: SharedPrintHandler) -> NativePackage {
    let print_out = printer.clone();
    let println_out = printer;
    NativePackage::new("fmt")
        .with_func("Print", Arity::Variadic, move |args| {
            print_out.write(&sprint(args));
            Ok(None)
        })
        .with_func("Println", Arity::Variadic, move |args| {
            println_out.write(&sprintln(args));
            Ok(None)
        })
        .with_func("Sprint", Arity::Variadic, |args| {
            Ok(Some(NativeValue::string(sprint(args))))
        })
        .with_func("Sprintln", Arity::Variadic, |args| {
            Ok(Some(NativeValue::string(sprintln(args))))
        })
}

pub fn time_package() -> NativePackage {
    NativePackage::new("time")
        .with_func("Now", Arity::Exact(0), |_| {
            Ok(Some(NativeValue::Instant(Instant::now())))
        })
        .with_func("Since", Arity::Exact(1), |args| match args {
            [NativeValue::Instant(start)] => Ok(Some(NativeValue::Duration(start.elapsed()))),
            [other] => Err(NativeError::TypeMismatch {
                expected: "time.Time",
                got: other.type_name(),
            }),
            _ => Err(NativeError::Custom("time.Since takes one argument".to_owned())),
        })
}
