//! Tree-walking evaluator over the lowered IR.
//!
//! # Calls
//!
//! Calling an interpreted function creates a fresh [`Context`], binds the
//! arguments to the declared parameters in order, and then binds the
//! function value's pre-bound variables. Bound variables are applied last,
//! so a method receiver wins over a parameter of the same name.
//!
//! # Signals
//!
//! `return` and `break` do not unwind the Rust stack. They set a signal on
//! the context; blocks stop at the first signalled statement, and loops
//! clear `break` on their way out.

use std::rc::Rc;

use golite_ir::{Expr, FieldInit, MethodDecl, Name, Package, Param, Stmt};
use golite_runtime::{ensure_sufficient_stack, NativeValue, Sequence};
use rustc_hash::FxHashMap;

use crate::builtins::{Builtin, BuiltinNames};
use crate::errors::{
    arity_mismatch, cannot_index, no_such_field, not_a_struct, not_callable, not_native,
    type_mismatch, EvalErrorKind,
};
use crate::{Context, EvalError, FunctionValue, Place, StructField, StructValue, Value};

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Evaluates functions of one compiled package.
///
/// # Calls
///
/// Every interpreted call gets a fresh [`Context`]. Arguments are bound to
/// parameters first and pre-bound variables (a method's receiver) after, so
/// a bound name wins over a parameter of the same name. Errors leaving a
/// call record the function's name, innermost first.
///
/// # Limits
///
/// Recursion grows the native stack on demand. With a call-depth limit set,
/// exceeding it fails with [`EvalErrorKind::StackOverflow`] instead.
pub struct Evaluator<'p> {
    package: &'p Package,
    builtins: BuiltinNames,
    /// `None` leaves recursion bounded only by stack growth.
    max_call_depth: Option<usize>,
    /// Names of the interpreted functions currently executing.
    call_stack: Vec<Name>,
}

impl<'p> Evaluator<'p> {
    pub fn new(package: &'p Package) -> Self {
        Self {
            package,
            builtins: BuiltinNames::new(package.interner()),
            max_call_depth: None,
            call_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn package(&self) -> &'p Package {
        self.package
    }

    /// Current interpreted call depth.
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    /// A callable value for the top-level function `name`.
    pub fn func_value(&self, name: &str) -> EvalResult {
        self.package
            .func_named(name)
            .map(|decl| Value::Function(FunctionValue::new(Rc::clone(decl))))
            .ok_or_else(|| EvalErrorKind::UndefinedFunction(name.to_owned()).into())
    }

    /// Call the top-level function `name`, returning every result.
    pub fn call_func(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        let callee = self.func_value(name)?;
        self.call(&callee, args)
    }

    /// Invoke a callable value, returning every result.
    pub fn call(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::Native(NativeValue::Func(native)) => {
                let args = args
                    .into_iter()
                    .map(|arg| match arg {
                        Value::Native(native) => Ok(native),
                        other => Err(not_native(&other)),
                    })
                    .collect::<EvalResult<Vec<_>>>()?;
                let result = native.call(&args)?;
                Ok(result.into_iter().map(Value::Native).collect())
            }
            other => Err(not_callable(other)),
        }
    }

    /// Run one interpreted call.
    ///
    /// A `break` that reaches the end of the body without meeting a loop
    /// fails the call.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(func = %self.package.resolve(func.func.name), depth = self.call_stack.len())
    )]
    fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult<Vec<Value>> {
        let decl = &func.func;
        if let Some(max) = self.max_call_depth {
            if self.call_stack.len() >= max {
                return Err(EvalErrorKind::StackOverflow { depth: max }.into());
            }
        }
        if args.len() != decl.params.len() {
            return Err(arity_mismatch(
                &self.package.resolve(decl.name),
                decl.params.len(),
                args.len(),
            ));
        }

        let mut ctx = Context::new();
        for (param, arg) in decl.params.iter().zip(args) {
            if let Param::Named(name) = param {
                ctx.define(*name, arg);
            }
        }
        for (name, value) in func.bound.iter() {
            ctx.define(*name, value.clone());
        }

        self.call_stack.push(decl.name);
        let outcome = ensure_sufficient_stack(|| self.exec_stmt(&decl.body, &mut ctx));
        self.call_stack.pop();
        outcome.map_err(|e| e.in_frame(&self.package.resolve(decl.name)))?;

        if ctx.breaking {
            return Err(EvalErrorKind::BreakOutsideLoop {
                func: self.package.resolve(decl.name).to_string(),
            }
            .into());
        }
        let results = ctx.returned.unwrap_or_default();
        tracing::trace!(results = results.len(), "return");
        Ok(results)
    }

    /// Execute one statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt, ctx: &mut Context) -> EvalResult<()> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt, ctx))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt, ctx: &mut Context) -> EvalResult<()> {
        match stmt {
            // Results of a call in statement position are dropped, however many.
            Stmt::Expr(Expr::Call { func, args }) => {
                self.eval_call(func, args, ctx)?;
            }
            Stmt::Expr(expr) => {
                self.eval_value(expr, ctx)?;
            }
            Stmt::Assign { targets, sources } => self.exec_assign(targets, sources, ctx)?,
            Stmt::Block(stmts) => {
                for stmt in stmts {
                    self.exec_stmt(stmt, ctx)?;
                    if ctx.signalled() {
                        break;
                    }
                }
            }
            Stmt::Empty => {}
            Stmt::If {
                init,
                cond,
                body,
                els,
            } => {
                self.exec_stmt(init, ctx)?;
                if self.eval_cond(cond, ctx)? {
                    self.exec_stmt(body, ctx)?;
                } else {
                    self.exec_stmt(els, ctx)?;
                }
            }
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => {
                self.exec_stmt(init, ctx)?;
                while self.eval_cond(cond, ctx)? {
                    self.exec_stmt(body, ctx)?;
                    if ctx.breaking {
                        ctx.breaking = false;
                        break;
                    }
                    if ctx.returned.is_some() {
                        break;
                    }
                    self.exec_stmt(post, ctx)?;
                }
            }
            Stmt::Break => ctx.breaking = true,
            Stmt::Return(exprs) => {
                let values = exprs
                    .iter()
                    .map(|e| self.eval_value(e, ctx))
                    .collect::<EvalResult<Vec<_>>>()?;
                ctx.returned = Some(values);
            }
        }
        Ok(())
    }

    /// Every source is evaluated before any target is written.
    fn exec_assign(
        &mut self,
        targets: &[Expr],
        sources: &[Expr],
        ctx: &mut Context,
    ) -> EvalResult<()> {
        if targets.len() != sources.len() {
            return Err(EvalErrorKind::AssignMismatch {
                targets: targets.len(),
                sources: sources.len(),
            }
            .into());
        }
        let values = sources
            .iter()
            .map(|e| self.eval_value(e, ctx))
            .collect::<EvalResult<Vec<_>>>()?;
        for (target, value) in targets.iter().zip(values) {
            let place = self.eval_expr(target, ctx)?;
            place.set(ctx, value)?;
        }
        Ok(())
    }

    fn eval_cond(&mut self, cond: &Expr, ctx: &mut Context) -> EvalResult<bool> {
        let value = self.eval_value(cond, ctx)?;
        match &value {
            Value::Native(NativeValue::Bool(b)) => Ok(*b),
            other => Err(type_mismatch("bool", other)),
        }
    }

    /// Evaluate an expression and read its result.
    pub fn eval_value(&mut self, expr: &Expr, ctx: &mut Context) -> EvalResult {
        let place = self.eval_expr(expr, ctx)?;
        place.into_value(ctx)
    }

    /// Evaluate an expression to a readable (and possibly writable) place.
    pub fn eval_expr(&mut self, expr: &Expr, ctx: &mut Context) -> EvalResult<Place> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr, ctx))
    }

    fn eval_expr_inner(&mut self, expr: &Expr, ctx: &mut Context) -> EvalResult<Place> {
        match expr {
            Expr::Ident(name) => Ok(self.eval_ident(*name, ctx)),
            Expr::Literal(native) => Ok(Place::Value(Value::Native(native.clone()))),
            Expr::Call { func, args } => {
                let mut results = self.eval_call(func, args, ctx)?;
                let value = match results.len() {
                    0 => Value::nil(),
                    1 => results.swap_remove(0),
                    count => {
                        return Err(EvalErrorKind::MultipleResults {
                            name: self.callee_label(func),
                            count,
                        }
                        .into())
                    }
                };
                Ok(Place::Value(value))
            }
            Expr::Index { container, index } => {
                let container = self.eval_value(container, ctx)?;
                let index = self.eval_value(index, ctx)?;
                let index = match index {
                    Value::Native(NativeValue::Int(n)) => n,
                    other => return Err(type_mismatch("int", &other)),
                };
                match container {
                    Value::Native(NativeValue::Seq(seq)) => {
                        let pos = seq.position(index)?;
                        Ok(Place::Element { seq, pos })
                    }
                    other => Err(cannot_index(&other)),
                }
            }
            Expr::Field { object, field } => {
                let object = self.eval_value(object, ctx)?;
                self.select(object, *field)
            }
            Expr::SliceLit { elem_type, values } => {
                let elems = self.eval_elements(*elem_type, values, ctx)?;
                Ok(Place::Value(Value::Native(NativeValue::Seq(Sequence::slice(
                    elems,
                )))))
            }
            Expr::ArrayLit { elem_type, values } => {
                let elems = self.eval_elements(*elem_type, values, ctx)?;
                Ok(Place::Value(Value::Native(NativeValue::Seq(Sequence::array(
                    elems,
                )))))
            }
            Expr::StructLit { type_name, fields } => {
                let fields = fields
                    .iter()
                    .map(|FieldInit { name, value, by_reference }| {
                        Ok(StructField {
                            name: *name,
                            value: self.eval_value(value, ctx)?,
                            by_reference: *by_reference,
                        })
                    })
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Place::Value(Value::Struct(StructValue::with_fields(
                    *type_name, fields,
                ))))
            }
        }
    }

    /// Locals first, then package functions; anything else becomes a new
    /// local holding the undefined placeholder.
    fn eval_ident(&self, name: Name, ctx: &mut Context) -> Place {
        if ctx.has_local(name) {
            return Place::Variable(name);
        }
        if let Some(decl) = self.package.func(name) {
            return Place::Value(Value::Function(FunctionValue::new(Rc::clone(decl))));
        }
        ctx.touch(name);
        Place::Variable(name)
    }

    /// Evaluate a call, returning every result.
    fn eval_call(&mut self, func: &Expr, args: &[Expr], ctx: &mut Context) -> EvalResult<Vec<Value>> {
        if let Some(builtin) = self.builtin_callee(func, ctx) {
            let args = self.eval_args(args, ctx)?;
            return builtin.call(args);
        }
        let callee = self.eval_value(func, ctx)?;
        let args = self.eval_args(args, ctx)?;
        self.call(&callee, args)
    }

    fn eval_args(&mut self, args: &[Expr], ctx: &mut Context) -> EvalResult<Vec<Value>> {
        args.iter().map(|arg| self.eval_value(arg, ctx)).collect()
    }

    fn builtin_callee(&self, func: &Expr, ctx: &Context) -> Option<Builtin> {
        let Expr::Ident(name) = func else {
            return None;
        };
        if ctx.has_local(*name) || self.package.has_func(*name) {
            return None;
        }
        self.builtins.lookup(*name)
    }

    /// Method of the value's type first, then a field of the same name.
    fn select(&self, object: Value, field: Name) -> EvalResult<Place> {
        let object = match object {
            Value::Struct(object) => object,
            other => return Err(not_a_struct(&other)),
        };
        if let Some(method) = self.package.method(object.type_name(), field) {
            return Ok(Place::Value(bind_method(&object, method)));
        }
        if object.has_field(field) {
            return Ok(Place::Field { object, field });
        }
        Err(no_such_field(&self.package.resolve(field)))
    }

    fn eval_elements(
        &mut self,
        elem_type: Name,
        values: &[Expr],
        ctx: &mut Context,
    ) -> EvalResult<Vec<NativeValue>> {
        let type_name = self.package.resolve(elem_type);
        let expected = match &*type_name {
            "int" => "int",
            "string" => "string",
            "bool" => "bool",
            other => return Err(EvalErrorKind::UnsupportedElementType(other.to_owned()).into()),
        };
        values
            .iter()
            .map(|expr| {
                let value = self.eval_value(expr, ctx)?;
                match value {
                    Value::Native(native) if native.type_name() == expected => Ok(native),
                    other => Err(type_mismatch(expected, &other)),
                }
            })
            .collect()
    }

    fn callee_label(&self, func: &Expr) -> String {
        match func {
            Expr::Ident(name) | Expr::Field { field: name, .. } => {
                self.package.resolve(*name).to_string()
            }
            Expr::Literal(NativeValue::Func(native)) => native.name().to_owned(),
            _ => "call".to_owned(),
        }
    }
}

/// Build a bound method value. By-value receivers are snapshotted here, so
/// later writes to the original are invisible to the method. Structs held in
/// the receiver's pointer fields stay shared.
pub fn bind_method(receiver: &StructValue, method: &MethodDecl) -> Value {
    let receiver = if method.by_reference {
        receiver.clone()
    } else {
        receiver.copy()
    };
    let mut bound = FxHashMap::default();
    if let Some(name) = method.receiver.name() {
        bound.insert(name, Value::Struct(receiver));
    }
    Value::Function(FunctionValue::with_bound(Rc::clone(&method.func), bound))
}
