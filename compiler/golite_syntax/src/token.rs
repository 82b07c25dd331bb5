//! Operator and keyword tokens carried by syntax nodes.

use std::fmt;

/// Operator, assignment and branch tokens.
///
/// Only the tokens that appear inside syntax nodes are listed: binary and
/// unary operators, assignment operators, increment/decrement and the
/// branch keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Arithmetic and bitwise
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,

    // Compound assignment
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,

    // Logical and comparison
    LAnd,
    LOr,
    Eql,
    Neq,
    Lss,
    Gtr,
    Leq,
    Geq,
    Not,

    // Misc operators
    Arrow,
    Inc,
    Dec,
    Assign,
    Define,

    // Branch keywords
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl Token {
    /// Source spelling of the token.
    pub fn as_str(self) -> &'static str {
        match self {
            Token::Add => "+",
            Token::Sub => "-",
            Token::Mul => "*",
            Token::Quo => "/",
            Token::Rem => "%",
            Token::And => "&",
            Token::Or => "|",
            Token::Xor => "^",
            Token::Shl => "<<",
            Token::Shr => ">>",
            Token::AndNot => "&^",
            Token::AddAssign => "+=",
            Token::SubAssign => "-=",
            Token::MulAssign => "*=",
            Token::QuoAssign => "/=",
            Token::RemAssign => "%=",
            Token::AndAssign => "&=",
            Token::OrAssign => "|=",
            Token::XorAssign => "^=",
            Token::ShlAssign => "<<=",
            Token::ShrAssign => ">>=",
            Token::AndNotAssign => "&^=",
            Token::LAnd => "&&",
            Token::LOr => "||",
            Token::Eql => "==",
            Token::Neq => "!=",
            Token::Lss => "<",
            Token::Gtr => ">",
            Token::Leq => "<=",
            Token::Geq => ">=",
            Token::Not => "!",
            Token::Arrow => "<-",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::Assign => "=",
            Token::Define => ":=",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Goto => "goto",
            Token::Fallthrough => "fallthrough",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a basic literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl fmt::Display for LitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LitKind::Int => "integer",
            LitKind::Float => "float",
            LitKind::Imag => "imaginary",
            LitKind::Char => "char",
            LitKind::String => "string",
        };
        f.write_str(s)
    }
}

/// Channel direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}
