//! Compiled packages: free functions plus per-type method tables.

use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{Name, SharedInterner, Stmt};

/// A declared parameter or receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Named(Name),
    /// Unnamed or `_`: the argument is accepted and dropped.
    Blank,
}

impl Param {
    pub fn name(self) -> Option<Name> {
        match self {
            Param::Named(name) => Some(name),
            Param::Blank => None,
        }
    }
}

/// A lowered function body.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    /// Declared name, for diagnostics.
    pub name: Name,
    pub params: Vec<Param>,
    pub body: Stmt,
}

/// A method: a function plus its receiver binding.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub receiver: Param,
    /// `func (r *T)` binds by reference; `func (r T)` copies.
    pub by_reference: bool,
    pub func: Rc<FuncDecl>,
}

/// Method table of one named type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeDecl {
    pub methods: FxHashMap<Name, MethodDecl>,
}

/// Output of lowering one source package.
///
/// Read-only once lowering returns it.
#[derive(Clone, Debug)]
pub struct Package {
    name: Name,
    funcs: FxHashMap<Name, Rc<FuncDecl>>,
    types: FxHashMap<Name, TypeDecl>,
    interner: SharedInterner,
}

impl Package {
    pub fn new(name: Name, interner: SharedInterner) -> Self {
        Self {
            name,
            funcs: FxHashMap::default(),
            types: FxHashMap::default(),
            interner,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Render a name for diagnostics.
    pub fn resolve(&self, name: Name) -> Arc<str> {
        self.interner.lookup(name)
    }

    /// Add a free function, returning any previous function of that name.
    pub fn insert_func(&mut self, func: FuncDecl) -> Option<Rc<FuncDecl>> {
        self.funcs.insert(func.name, Rc::new(func))
    }

    /// Add a method to `type_name`'s table.
    pub fn insert_method(
        &mut self,
        type_name: Name,
        method: Name,
        decl: MethodDecl,
    ) -> Option<MethodDecl> {
        self.types
            .entry(type_name)
            .or_default()
            .methods
            .insert(method, decl)
    }

    pub fn func(&self, name: Name) -> Option<&Rc<FuncDecl>> {
        self.funcs.get(&name)
    }

    /// Function lookup by source name. Does not intern.
    pub fn func_named(&self, name: &str) -> Option<&Rc<FuncDecl>> {
        self.interner.get(name).and_then(|n| self.func(n))
    }

    pub fn has_func(&self, name: Name) -> bool {
        self.funcs.contains_key(&name)
    }

    pub fn type_decl(&self, name: Name) -> Option<&TypeDecl> {
        self.types.get(&name)
    }

    pub fn method(&self, type_name: Name, method: Name) -> Option<&MethodDecl> {
        self.types.get(&type_name)?.methods.get(&method)
    }

    pub fn funcs(&self) -> impl Iterator<Item = &Rc<FuncDecl>> {
        self.funcs.values()
    }
}
