//! Statement and expression nodes.
//!
//! The node set is deliberately tiny: no operators, no sugar, every
//! optional part of a compound statement is present. Operators appear only
//! as `Call(Literal(op), [l, r])`.

use golite_runtime::NativeValue;

use crate::Name;

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Evaluate an expression for its side effects.
    Expr(Expr),

    /// Parallel assignment. `targets` and `sources` have equal length.
    Assign { targets: Vec<Expr>, sources: Vec<Expr> },

    /// Sequential statements; stops early on return or break.
    Block(Vec<Stmt>),

    /// No-op.
    Empty,

    If {
        init: Box<Stmt>,
        cond: Expr,
        body: Box<Stmt>,
        els: Box<Stmt>,
    },

    For {
        init: Box<Stmt>,
        cond: Expr,
        post: Box<Stmt>,
        body: Box<Stmt>,
    },

    Break,

    Return(Vec<Expr>),
}

impl Stmt {
    pub fn assign(targets: Vec<Expr>, sources: Vec<Expr>) -> Self {
        Stmt::Assign { targets, sources }
    }

    /// `if` with no initializer.
    pub fn if_else(cond: Expr, body: Stmt, els: Stmt) -> Self {
        Stmt::If {
            init: Box::new(Stmt::Empty),
            cond,
            body: Box::new(body),
            els: Box::new(els),
        }
    }

    pub fn for_loop(init: Stmt, cond: Expr, post: Stmt, body: Stmt) -> Self {
        Stmt::For {
            init: Box::new(init),
            cond,
            post: Box::new(post),
            body: Box::new(body),
        }
    }
}

/// One entry of a struct literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldInit {
    pub name: Name,
    pub value: Expr,
    /// Declared with a pointer type (`*T`). Copying the struct shares what
    /// such a field refers to instead of duplicating it.
    pub by_reference: bool,
}

/// An expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Call { func: Box<Expr>, args: Vec<Expr> },

    Ident(Name),

    /// A value resolved at lowering time: scalars, operators, native members.
    Literal(NativeValue),

    Index { container: Box<Expr>, index: Box<Expr> },

    /// Field or method selection on a struct value.
    Field { object: Box<Expr>, field: Name },

    /// `[]T{values}`.
    SliceLit { elem_type: Name, values: Vec<Expr> },

    /// `[N]T{values}`, where N is the number of values.
    ArrayLit { elem_type: Name, values: Vec<Expr> },

    /// `T{...}` with every field of `T` present, in declaration order.
    StructLit { type_name: Name, fields: Vec<FieldInit> },
}

impl Expr {
    pub fn literal(value: impl Into<NativeValue>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn index(container: Expr, index: Expr) -> Self {
        Expr::Index {
            container: Box::new(container),
            index: Box::new(index),
        }
    }

    pub fn field(object: Expr, field: Name) -> Self {
        Expr::Field {
            object: Box::new(object),
            field,
        }
    }

    /// Literal `true`, the condition of a loop without one.
    pub fn always() -> Self {
        Expr::Literal(NativeValue::Bool(true))
    }
}
