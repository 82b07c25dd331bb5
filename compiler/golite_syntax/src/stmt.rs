//! Statement nodes.

use crate::{Expr, GenDecl, Token};

/// A braced statement list: `{ stmts... }`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStmt {
    pub stmts: Vec<Stmt>,
}

impl BlockStmt {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

/// One `case` arm of a switch or type switch.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseClause {
    /// Case expressions; empty for `default`.
    pub list: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// One arm of a select statement.
#[derive(Clone, Debug, PartialEq)]
pub struct CommClause {
    /// Send or receive statement; `None` for `default`.
    pub comm: Option<Box<Stmt>>,
    pub body: Vec<Stmt>,
}

/// A statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// Declaration inside a function body: `var x int`, `const c = 1`.
    Decl(GenDecl),

    /// Empty statement.
    Empty,

    /// Labeled statement: `label: stmt`.
    Labeled { label: String, stmt: Box<Stmt> },

    /// Expression statement: `f(x)`.
    Expr(Expr),

    /// Channel send: `ch <- value`.
    Send { chan: Expr, value: Expr },

    /// Increment or decrement: `x++`, `x--`.
    IncDec { x: Expr, tok: Token },

    /// Assignment or definition: `a, b = x, y`, `a := x`, `a += x`.
    Assign {
        lhs: Vec<Expr>,
        tok: Token,
        rhs: Vec<Expr>,
    },

    /// `go f()`.
    Go(Expr),

    /// `defer f()`.
    Defer(Expr),

    /// `return results...`.
    Return(Vec<Expr>),

    /// `break`, `continue`, `goto`, `fallthrough`.
    Branch { tok: Token, label: Option<String> },

    /// Nested block.
    Block(BlockStmt),

    /// `if init; cond { body } else els`.
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        body: BlockStmt,
        /// Either a `Block` or another `If`.
        els: Option<Box<Stmt>>,
    },

    /// Expression switch.
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        clauses: Vec<CaseClause>,
    },

    /// Type switch: `switch x := y.(type) { ... }`.
    TypeSwitch {
        init: Option<Box<Stmt>>,
        assign: Box<Stmt>,
        clauses: Vec<CaseClause>,
    },

    /// `select { ... }`.
    Select { clauses: Vec<CommClause> },

    /// `for init; cond; post { body }`; every header part is optional.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: BlockStmt,
    },

    /// `for key, value := range x { body }`.
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        tok: Option<Token>,
        x: Expr,
        body: BlockStmt,
    },
}

impl Stmt {
    /// Short human-readable name of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Decl(_) => "declaration statement",
            Stmt::Empty => "empty statement",
            Stmt::Labeled { .. } => "labeled statement",
            Stmt::Expr(_) => "expression statement",
            Stmt::Send { .. } => "send statement",
            Stmt::IncDec { .. } => "increment/decrement statement",
            Stmt::Assign { .. } => "assignment statement",
            Stmt::Go(_) => "go statement",
            Stmt::Defer(_) => "defer statement",
            Stmt::Return(_) => "return statement",
            Stmt::Branch { .. } => "branch statement",
            Stmt::Block(_) => "block statement",
            Stmt::If { .. } => "if statement",
            Stmt::Switch { .. } => "switch statement",
            Stmt::TypeSwitch { .. } => "type switch statement",
            Stmt::Select { .. } => "select statement",
            Stmt::For { .. } => "for statement",
            Stmt::Range { .. } => "range statement",
        }
    }
}

// Builder methods for statements
impl Stmt {
    pub fn expr(e: Expr) -> Self {
        Stmt::Expr(e)
    }

    /// `lhs = rhs`.
    pub fn assign(lhs: Vec<Expr>, rhs: Vec<Expr>) -> Self {
        Stmt::Assign {
            lhs,
            tok: Token::Assign,
            rhs,
        }
    }

    /// `name := value`.
    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            lhs: vec![Expr::ident(name)],
            tok: Token::Define,
            rhs: vec![value],
        }
    }

    /// Compound assignment such as `x += v`.
    pub fn op_assign(target: Expr, tok: Token, value: Expr) -> Self {
        Stmt::Assign {
            lhs: vec![target],
            tok,
            rhs: vec![value],
        }
    }

    pub fn inc(x: Expr) -> Self {
        Stmt::IncDec { x, tok: Token::Inc }
    }

    pub fn dec(x: Expr) -> Self {
        Stmt::IncDec { x, tok: Token::Dec }
    }

    pub fn ret(results: Vec<Expr>) -> Self {
        Stmt::Return(results)
    }

    pub fn break_stmt() -> Self {
        Stmt::Branch {
            tok: Token::Break,
            label: None,
        }
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block(BlockStmt::new(stmts))
    }

    pub fn if_stmt(cond: Expr, body: Vec<Stmt>, els: Option<Stmt>) -> Self {
        Stmt::If {
            init: None,
            cond,
            body: BlockStmt::new(body),
            els: els.map(Box::new),
        }
    }

    pub fn for_loop(
        init: Option<Stmt>,
        cond: Option<Expr>,
        post: Option<Stmt>,
        body: Vec<Stmt>,
    ) -> Self {
        Stmt::For {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body: BlockStmt::new(body),
        }
    }
}
