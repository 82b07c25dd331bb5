//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use golite_ir::SharedInterner;
use golite_runtime::{
    fmt_package, stdout_handler, time_package, NativeRegistry, SharedPrintHandler,
};
use rustc_hash::FxHashMap;

use super::Interpreter;

/// Environment variable holding the default recursion limit.
pub const MAX_CALL_DEPTH_ENV: &str = "GOLITE_MAX_CALL_DEPTH";

/// Builder for creating Interpreter instances with various configurations.
///
/// Defaults: output goes to stdout, `fmt` and `time` are registered, and
/// the recursion limit comes from `GOLITE_MAX_CALL_DEPTH` (unbounded when
/// unset or unparsable).
pub struct InterpreterBuilder {
    max_call_depth: Option<usize>,
    print_handler: Option<SharedPrintHandler>,
    std_packages: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            max_call_depth: depth_from_env(),
            print_handler: None,
            std_packages: true,
        }
    }

    /// Maximum interpreted call depth. `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Where `fmt.Print*` output goes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Whether to register `fmt` and `time`.
    #[must_use]
    pub fn std_packages(mut self, enabled: bool) -> Self {
        self.std_packages = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let printer = self.print_handler.unwrap_or_else(stdout_handler);
        let mut natives = NativeRegistry::new();
        if self.std_packages {
            natives.register(fmt_package(printer.clone()));
            natives.register(time_package());
        }
        Interpreter {
            natives,
            interner: SharedInterner::new(),
            printer,
            packages: FxHashMap::default(),
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn depth_from_env() -> Option<usize> {
    let raw = std::env::var(MAX_CALL_DEPTH_ENV).ok()?;
    match raw.trim().parse() {
        Ok(depth) => Some(depth),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring invalid {MAX_CALL_DEPTH_ENV}");
            None
        }
    }
}
