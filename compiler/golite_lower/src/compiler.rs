//! Package-level lowering: struct collection, functions and methods.

use golite_ir as ir;
use golite_runtime::NativeRegistry;
use golite_syntax as ast;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::LowerError;

/// Ordered field list of a struct type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructDef {
    pub fields: Vec<StructField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructField {
    pub name: String,
    pub ty: ast::Expr,
}

impl StructField {
    pub fn is_pointer(&self) -> bool {
        matches!(self.ty, ast::Expr::Star(_))
    }
}

impl StructDef {
    /// Build from source fields, expanding `x, y int` into two fields.
    pub fn from_fields(type_name: &str, fields: &[ast::Field]) -> Result<Self, LowerError> {
        let mut def = StructDef::default();
        for field in fields {
            if field.names.is_empty() {
                return Err(LowerError::EmbeddedField {
                    ty: type_name.to_owned(),
                    field: type_label(&field.ty),
                });
            }
            for name in &field.names {
                def.fields.push(StructField {
                    name: name.clone(),
                    ty: field.ty.clone(),
                });
            }
        }
        Ok(def)
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == field)
    }
}

pub type StructRegistry = FxHashMap<String, StructDef>;

/// Lowers source packages against a native-package registry.
///
/// Struct definitions accumulate across packages compiled by the same
/// `Compiler`.
pub struct Compiler<'a> {
    pub(crate) natives: &'a NativeRegistry,
    pub(crate) structs: StructRegistry,
    pub(crate) interner: ir::SharedInterner,
}

impl<'a> Compiler<'a> {
    pub fn new(natives: &'a NativeRegistry, interner: ir::SharedInterner) -> Self {
        Self {
            natives,
            structs: StructRegistry::default(),
            interner,
        }
    }

    /// Pre-seed struct definitions, e.g. for types declared elsewhere.
    #[must_use]
    pub fn with_structs(mut self, structs: StructRegistry) -> Self {
        self.structs.extend(structs);
        self
    }

    pub fn define_struct(&mut self, name: &str, fields: &[ast::Field]) -> Result<(), LowerError> {
        let def = StructDef::from_fields(name, fields)?;
        self.structs.insert(name.to_owned(), def);
        Ok(())
    }

    pub fn structs(&self) -> &StructRegistry {
        &self.structs
    }

    /// Lower a whole package.
    ///
    /// Struct types are collected first so functions may use types declared
    /// later in the source.
    #[tracing::instrument(level = "debug", skip_all, fields(package = %pkg.name))]
    pub fn compile_package(&mut self, pkg: &ast::Package) -> Result<ir::Package, LowerError> {
        for decl in pkg.decls() {
            if let ast::Decl::Gen(gen) = decl {
                self.collect_gen_decl(gen)?;
            }
        }

        let mut package = ir::Package::new(self.interner.intern(&pkg.name), self.interner.clone());
        for decl in pkg.decls() {
            let ast::Decl::Func(func) = decl else {
                continue;
            };
            let name = self.interner.intern(&func.name);
            match &func.recv {
                None => {
                    package.insert_func(self.compile_func(func)?);
                }
                Some(recv) => {
                    let (type_name, method) = self.compile_method(recv, func)?;
                    package.insert_method(self.interner.intern(&type_name), name, method);
                }
            }
        }
        tracing::debug!(funcs = package.funcs().count(), "lowered package");
        Ok(package)
    }

    fn collect_gen_decl(&mut self, gen: &ast::GenDecl) -> Result<(), LowerError> {
        for spec in &gen.specs {
            match spec {
                ast::Spec::Import(_) => {}
                ast::Spec::Type(ts) => {
                    if let ast::Expr::StructType(fields) = &ts.ty {
                        self.define_struct(&ts.name, fields)?;
                    }
                }
                ast::Spec::Value(vs) => {
                    let name = vs.names.first().cloned().unwrap_or_default();
                    return Err(LowerError::PackageLevelVar(name));
                }
            }
        }
        Ok(())
    }

    /// Lower a free function.
    pub fn compile_func(&self, decl: &ast::FuncDecl) -> Result<ir::FuncDecl, LowerError> {
        self.lower_body(decl, None)
    }

    /// Lower a method, returning its receiver type name and declaration.
    pub fn compile_method(
        &self,
        recv: &ast::Field,
        decl: &ast::FuncDecl,
    ) -> Result<(String, ir::MethodDecl), LowerError> {
        let (type_name, by_reference) = match &recv.ty {
            ast::Expr::Ident(name) => (name.clone(), false),
            ast::Expr::Star(inner) => match &**inner {
                ast::Expr::Ident(name) => (name.clone(), true),
                _ => return Err(LowerError::InvalidReceiver(decl.name.clone())),
            },
            _ => return Err(LowerError::InvalidReceiver(decl.name.clone())),
        };
        let receiver = match recv.names.first().map(String::as_str) {
            None | Some("_") => None,
            Some(name) => Some(name),
        };
        let func = self.lower_body(decl, receiver)?;
        let method = ir::MethodDecl {
            receiver: receiver.map_or(ir::Param::Blank, |r| ir::Param::Named(self.interner.intern(r))),
            by_reference,
            func: std::rc::Rc::new(func),
        };
        Ok((type_name, method))
    }

    fn lower_body(
        &self,
        decl: &ast::FuncDecl,
        receiver: Option<&str>,
    ) -> Result<ir::FuncDecl, LowerError> {
        tracing::trace!(func = %decl.name, "lowering function");
        let body = decl
            .body
            .as_ref()
            .ok_or_else(|| LowerError::MissingBody(decl.name.clone()))?;

        let mut ctx = FuncCtx::new(self);
        if let Some(receiver) = receiver {
            ctx.activate(receiver);
        }

        let mut params = Vec::new();
        for field in &decl.ty.params {
            if field.names.is_empty() {
                params.push(ir::Param::Blank);
            }
            for name in &field.names {
                params.push(ctx.declare_param(name));
            }
        }

        // Named results start at their zero value.
        let mut result_targets = Vec::new();
        let mut result_zeros = Vec::new();
        for field in &decl.ty.results {
            for name in field.names.iter().filter(|n| *n != "_") {
                ctx.activate(name);
                let name = self.interner.intern(name);
                ctx.named_results.push(name);
                result_targets.push(ir::Expr::Ident(name));
                result_zeros.push(ctx.zero_value(&field.ty)?);
            }
        }

        let mut stmts = Vec::with_capacity(body.stmts.len() + 1);
        if !result_targets.is_empty() {
            stmts.push(ir::Stmt::assign(result_targets, result_zeros));
        }
        for stmt in &body.stmts {
            stmts.push(ctx.lower_stmt(stmt)?);
        }

        Ok(ir::FuncDecl {
            name: self.interner.intern(&decl.name),
            params,
            body: ir::Stmt::Block(stmts),
        })
    }
}

/// Per-function lowering state.
pub(crate) struct FuncCtx<'c, 'a> {
    pub(crate) compiler: &'c Compiler<'a>,
    /// Every name declared so far in the function: receiver, parameters,
    /// named results, and anything assigned or declared.
    active: FxHashSet<String>,
    pub(crate) loop_depth: u32,
    pub(crate) named_results: Vec<ir::Name>,
}

impl<'c, 'a> FuncCtx<'c, 'a> {
    fn new(compiler: &'c Compiler<'a>) -> Self {
        Self {
            compiler,
            active: FxHashSet::default(),
            loop_depth: 0,
            named_results: Vec::new(),
        }
    }

    pub(crate) fn activate(&mut self, name: &str) {
        self.active.insert(name.to_owned());
    }

    pub(crate) fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    pub(crate) fn intern(&self, name: &str) -> ir::Name {
        self.compiler.interner.intern(name)
    }

    fn declare_param(&mut self, name: &str) -> ir::Param {
        if name == "_" {
            return ir::Param::Blank;
        }
        self.activate(name);
        ir::Param::Named(self.intern(name))
    }
}

/// Readable name of a type expression, for diagnostics.
pub(crate) fn type_label(ty: &ast::Expr) -> String {
    match ty {
        ast::Expr::Ident(name) => name.clone(),
        ast::Expr::Star(inner) => format!("*{}", type_label(inner)),
        ast::Expr::Selector { x, sel } => format!("{}.{sel}", type_label(x)),
        other => other.kind_name().to_owned(),
    }
}
