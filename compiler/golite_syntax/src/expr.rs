//! Expression and type-expression nodes.

use crate::{BlockStmt, ChanDir, Field, FuncType, LitKind, Token};

/// An expression or a type expression.
///
/// Types share the expression tree the way they do in Go source: `[]int`
/// is an `ArrayType`, `T` is an `Ident`, `*T` is a `Star`.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Identifier: `x`, `int`, `true`.
    Ident(String),

    /// Basic literal with its raw source text, e.g. `0x1f` or `"hi\n"`.
    BasicLit { kind: LitKind, value: String },

    /// Function literal: `func(params) results { body }`.
    FuncLit { ty: FuncType, body: BlockStmt },

    /// Composite literal: `T{elts}`. `ty` is absent for elided inner literals.
    CompositeLit {
        ty: Option<Box<Expr>>,
        elts: Vec<Expr>,
    },

    /// Parenthesized expression: `(x)`.
    Paren(Box<Expr>),

    /// Selector: `x.sel`.
    Selector { x: Box<Expr>, sel: String },

    /// Index: `x[index]`.
    Index { x: Box<Expr>, index: Box<Expr> },

    /// Slice expression: `x[low:high:max]`.
    Slice {
        x: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },

    /// Type assertion: `x.(T)`, or `x.(type)` in a type switch.
    TypeAssert { x: Box<Expr>, ty: Option<Box<Expr>> },

    /// Call: `fun(args...)`.
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
        /// True when the last argument is spread with `...`.
        ellipsis: bool,
    },

    /// Dereference or pointer type: `*x`.
    Star(Box<Expr>),

    /// Unary operation: `op x`.
    Unary { op: Token, x: Box<Expr> },

    /// Binary operation: `x op y`.
    Binary {
        x: Box<Expr>,
        op: Token,
        y: Box<Expr>,
    },

    /// Key-value pair inside a composite literal: `key: value`.
    KeyValue { key: Box<Expr>, value: Box<Expr> },

    /// `...` in an array length or variadic parameter type.
    Ellipsis(Option<Box<Expr>>),

    /// Array or slice type: `[len]elt`, `[]elt`.
    ArrayType {
        len: Option<Box<Expr>>,
        elt: Box<Expr>,
    },

    /// Struct type: `struct { fields }`.
    StructType(Vec<Field>),

    /// Function type: `func(params) results`.
    FuncType(FuncType),

    /// Interface type: `interface { methods }`.
    InterfaceType(Vec<Field>),

    /// Map type: `map[key]value`.
    MapType { key: Box<Expr>, value: Box<Expr> },

    /// Channel type: `chan T`, `chan<- T`, `<-chan T`.
    ChanType { dir: ChanDir, value: Box<Expr> },
}

impl Expr {
    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "identifier",
            Expr::BasicLit { .. } => "basic literal",
            Expr::FuncLit { .. } => "function literal",
            Expr::CompositeLit { .. } => "composite literal",
            Expr::Paren(_) => "parenthesized expression",
            Expr::Selector { .. } => "selector expression",
            Expr::Index { .. } => "index expression",
            Expr::Slice { .. } => "slice expression",
            Expr::TypeAssert { .. } => "type assertion",
            Expr::Call { .. } => "call expression",
            Expr::Star(_) => "star expression",
            Expr::Unary { .. } => "unary expression",
            Expr::Binary { .. } => "binary expression",
            Expr::KeyValue { .. } => "key-value expression",
            Expr::Ellipsis(_) => "ellipsis",
            Expr::ArrayType { .. } => "array type",
            Expr::StructType(_) => "struct type",
            Expr::FuncType(_) => "function type",
            Expr::InterfaceType(_) => "interface type",
            Expr::MapType { .. } => "map type",
            Expr::ChanType { .. } => "channel type",
        }
    }
}

// Builder methods for expressions
impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn lit(kind: LitKind, value: impl Into<String>) -> Self {
        Expr::BasicLit {
            kind,
            value: value.into(),
        }
    }

    /// Integer literal from its source text, e.g. `"42"` or `"0x2A"`.
    pub fn int(value: impl Into<String>) -> Self {
        Expr::lit(LitKind::Int, value)
    }

    /// Interpreted string literal; `contents` is wrapped in double quotes.
    pub fn string(contents: &str) -> Self {
        Expr::lit(LitKind::String, format!("\"{contents}\""))
    }

    pub fn paren(x: Expr) -> Self {
        Expr::Paren(Box::new(x))
    }

    pub fn selector(x: Expr, sel: impl Into<String>) -> Self {
        Expr::Selector {
            x: Box::new(x),
            sel: sel.into(),
        }
    }

    pub fn index(x: Expr, index: Expr) -> Self {
        Expr::Index {
            x: Box::new(x),
            index: Box::new(index),
        }
    }

    pub fn call(fun: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            fun: Box::new(fun),
            args,
            ellipsis: false,
        }
    }

    pub fn star(x: Expr) -> Self {
        Expr::Star(Box::new(x))
    }

    pub fn unary(op: Token, x: Expr) -> Self {
        Expr::Unary { op, x: Box::new(x) }
    }

    pub fn binary(x: Expr, op: Token, y: Expr) -> Self {
        Expr::Binary {
            x: Box::new(x),
            op,
            y: Box::new(y),
        }
    }

    pub fn key_value(key: Expr, value: Expr) -> Self {
        Expr::KeyValue {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn composite(ty: Expr, elts: Vec<Expr>) -> Self {
        Expr::CompositeLit {
            ty: Some(Box::new(ty)),
            elts,
        }
    }

    /// Slice type `[]elt`.
    pub fn slice_type(elt: Expr) -> Self {
        Expr::ArrayType {
            len: None,
            elt: Box::new(elt),
        }
    }

    /// Array type `[len]elt`.
    pub fn array_type(len: Expr, elt: Expr) -> Self {
        Expr::ArrayType {
            len: Some(Box::new(len)),
            elt: Box::new(elt),
        }
    }
}
