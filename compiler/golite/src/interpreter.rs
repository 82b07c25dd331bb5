//! The embedding entry point.

mod builder;

pub use builder::{InterpreterBuilder, MAX_CALL_DEPTH_ENV};

use golite_eval::{Evaluator, Value};
use golite_ir::{Package, SharedInterner};
use golite_lower::lower_package;
use golite_runtime::{
    fmt_package, time_package, NativePackage, NativeRegistry, SharedPrintHandler,
};
use rustc_hash::FxHashMap;

use crate::Error;

/// Loads packages and runs their functions.
///
/// Native packages must be registered before the packages that import
/// them are loaded: selectors on native packages are resolved during
/// lowering.
pub struct Interpreter {
    natives: NativeRegistry,
    interner: SharedInterner,
    printer: SharedPrintHandler,
    packages: FxHashMap<String, Package>,
    max_call_depth: Option<usize>,
}

impl Interpreter {
    /// Interpreter with the default configuration.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn load_native_package(&mut self, package: NativePackage) {
        self.natives.register(package);
    }

    /// Register `fmt` (printing through this interpreter's handler) and
    /// `time`, replacing any packages of the same names.
    #[must_use]
    pub fn with_std_packages(mut self) -> Self {
        self.natives.register(fmt_package(self.printer.clone()));
        self.natives.register(time_package());
        self
    }

    pub fn has_native_package(&self, name: &str) -> bool {
        self.natives.contains(name)
    }

    /// Lower a source package and keep it under its package name.
    ///
    /// Loading a package with the name of an already loaded one replaces it.
    #[tracing::instrument(level = "debug", skip_all, fields(package = %source.name))]
    pub fn load_package(&mut self, source: &golite_syntax::Package) -> Result<&Package, Error> {
        let lowered = lower_package(source, &self.natives, self.interner.clone())?;
        let name = source.name.clone();
        self.packages.insert(name.clone(), lowered);
        self.packages
            .get(&name)
            .ok_or(Error::UnknownPackage(name))
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Call `func` in `package`, returning every result.
    pub fn call(&self, package: &str, func: &str, args: Vec<Value>) -> Result<Vec<Value>, Error> {
        let pkg = self
            .packages
            .get(package)
            .ok_or_else(|| Error::UnknownPackage(package.to_owned()))?;
        if pkg.func_named(func).is_none() {
            return Err(Error::UnknownFunction {
                package: package.to_owned(),
                func: func.to_owned(),
            });
        }
        let mut evaluator = Evaluator::new(pkg).with_max_call_depth(self.max_call_depth);
        Ok(evaluator.call_func(func, args)?)
    }

    /// Run `main.main`.
    pub fn run_main(&self) -> Result<(), Error> {
        self.call("main", "main", Vec::new()).map(drop)
    }

    /// Everything printed so far, if the print handler captures output.
    pub fn print_output(&self) -> String {
        self.printer.output()
    }

    pub fn clear_print_output(&self) {
        self.printer.clear();
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.printer
    }

    pub fn max_call_depth(&self) -> Option<usize> {
        self.max_call_depth
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
