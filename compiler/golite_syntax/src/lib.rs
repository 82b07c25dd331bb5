//! Golite Syntax - source syntax tree for the golite lowering pass.
//!
//! The tree mirrors the shape of a Go syntax tree closely enough that a
//! front end can produce it mechanically. Parsing is not part of this
//! crate; callers either build trees by hand (tests) or translate them from
//! an external parser.
//!
//! No semantic validation happens here. Programs are assumed to be well
//! typed by the time they reach lowering.

mod expr;
mod stmt;
mod token;

pub use expr::Expr;
pub use stmt::{BlockStmt, CaseClause, CommClause, Stmt};
pub use token::{ChanDir, LitKind, Token};

/// A package: every file that shares a package clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    pub name: String,
    pub files: Vec<File>,
}

impl Package {
    pub fn new(name: impl Into<String>, files: Vec<File>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// Iterate the top-level declarations of every file, in file order.
    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.files.iter().flat_map(|file| file.decls.iter())
    }
}

/// A single source file.
#[derive(Clone, Debug, PartialEq)]
pub struct File {
    pub package_name: String,
    pub decls: Vec<Decl>,
}

impl File {
    pub fn new(package_name: impl Into<String>, decls: Vec<Decl>) -> Self {
        Self {
            package_name: package_name.into(),
            decls,
        }
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
}

/// A function or method declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    /// Receiver, present only for methods.
    pub recv: Option<Field>,
    pub name: String,
    pub ty: FuncType,
    /// Absent for externally implemented functions.
    pub body: Option<BlockStmt>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, ty: FuncType, body: Vec<Stmt>) -> Self {
        Self {
            recv: None,
            name: name.into(),
            ty,
            body: Some(BlockStmt::new(body)),
        }
    }

    pub fn method(recv: Field, name: impl Into<String>, ty: FuncType, body: Vec<Stmt>) -> Self {
        Self {
            recv: Some(recv),
            ..Self::new(name, ty, body)
        }
    }
}

/// Parameter and result lists of a function signature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl FuncType {
    pub fn new(params: Vec<Field>, results: Vec<Field>) -> Self {
        Self { params, results }
    }
}

/// A parameter, result, receiver or struct field entry.
///
/// `names` is empty for unnamed parameters and embedded fields, and holds
/// several names for grouped declarations such as `a, b int`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub names: Vec<String>,
    pub ty: Expr,
}

impl Field {
    pub fn named(name: impl Into<String>, ty: Expr) -> Self {
        Self {
            names: vec![name.into()],
            ty,
        }
    }

    pub fn unnamed(ty: Expr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    pub fn group(names: &[&str], ty: Expr) -> Self {
        Self {
            names: names.iter().map(|n| (*n).to_owned()).collect(),
            ty,
        }
    }
}

/// Keyword that introduced a general declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Const,
    Type,
    Var,
}

/// A general declaration: `import`, `const`, `type` or `var`, possibly grouped.
#[derive(Clone, Debug, PartialEq)]
pub struct GenDecl {
    pub tok: DeclKind,
    pub specs: Vec<Spec>,
}

impl GenDecl {
    pub fn new(tok: DeclKind, specs: Vec<Spec>) -> Self {
        Self { tok, specs }
    }

    /// `var names ty`, without initial values.
    pub fn var(names: &[&str], ty: Expr) -> Self {
        Self::new(
            DeclKind::Var,
            vec![Spec::Value(ValueSpec {
                names: names.iter().map(|n| (*n).to_owned()).collect(),
                ty: Some(ty),
                values: Vec::new(),
            })],
        )
    }

    /// `type name struct { fields }`.
    pub fn struct_type(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(
            DeclKind::Type,
            vec![Spec::Type(TypeSpec {
                name: name.into(),
                ty: Expr::StructType(fields),
            })],
        )
    }

    /// `import "path"`.
    pub fn import(path: impl Into<String>) -> Self {
        Self::new(
            DeclKind::Import,
            vec![Spec::Import(ImportSpec {
                alias: None,
                path: path.into(),
            })],
        )
    }
}

/// One entry of a general declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

/// `import alias "path"`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpec {
    pub alias: Option<String>,
    pub path: String,
}

/// `names ty = values` inside a `var` or `const` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// `name ty` inside a `type` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub ty: Expr,
}
