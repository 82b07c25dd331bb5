//! The fixed operator table.
//!
//! Lowering rewrites every operator into a call of a literal holding one of
//! these functions, so the evaluator never sees an operator node. Both
//! operands are always evaluated: `&&` and `||` do not short-circuit.

use golite_syntax::Token;

use crate::{Arity, NativeError, NativeFunc, NativeResult, NativeValue};

/// Binary operations available to interpreted code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Integer addition or string concatenation.
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Equal,
    NotEqual,
    LogicalOr,
    LogicalAnd,
}

impl BinaryOperator {
    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Quo => "/",
            BinaryOperator::Rem => "%",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEq => "<=",
            BinaryOperator::GreaterEq => ">=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
        }
    }

    /// Apply the operator to two host values.
    pub fn apply(self, left: &NativeValue, right: &NativeValue) -> Result<NativeValue, NativeError> {
        use NativeValue::{Bool, Int, Str};

        let value = match (self, left, right) {
            (BinaryOperator::Equal, l, r) => Bool(l == r),
            (BinaryOperator::NotEqual, l, r) => Bool(l != r),

            (BinaryOperator::Add, Int(a), Int(b)) => Int(a.wrapping_add(*b)),
            (BinaryOperator::Sub, Int(a), Int(b)) => Int(a.wrapping_sub(*b)),
            (BinaryOperator::Mul, Int(a), Int(b)) => Int(a.wrapping_mul(*b)),
            (BinaryOperator::Quo | BinaryOperator::Rem, Int(_), Int(0)) => {
                return Err(NativeError::DivisionByZero)
            }
            (BinaryOperator::Quo, Int(a), Int(b)) => Int(a.wrapping_div(*b)),
            (BinaryOperator::Rem, Int(a), Int(b)) => Int(a.wrapping_rem(*b)),
            (BinaryOperator::Less, Int(a), Int(b)) => Bool(a < b),
            (BinaryOperator::Greater, Int(a), Int(b)) => Bool(a > b),
            (BinaryOperator::LessEq, Int(a), Int(b)) => Bool(a <= b),
            (BinaryOperator::GreaterEq, Int(a), Int(b)) => Bool(a >= b),

            (BinaryOperator::Add, Str(a), Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                NativeValue::string(joined)
            }
            (BinaryOperator::Less, Str(a), Str(b)) => Bool(a < b),
            (BinaryOperator::Greater, Str(a), Str(b)) => Bool(a > b),
            (BinaryOperator::LessEq, Str(a), Str(b)) => Bool(a <= b),
            (BinaryOperator::GreaterEq, Str(a), Str(b)) => Bool(a >= b),

            (BinaryOperator::LogicalOr, Bool(a), Bool(b)) => Bool(*a || *b),
            (BinaryOperator::LogicalAnd, Bool(a), Bool(b)) => Bool(*a && *b),

            (op, l, r) => {
                return Err(NativeError::InvalidOperands {
                    op: op.symbol(),
                    left: l.type_name(),
                    right: r.type_name(),
                })
            }
        };
        Ok(value)
    }

    /// Wrap the operator as a two-argument native callable.
    pub fn native_func(self) -> NativeFunc {
        NativeFunc::new(self.symbol(), Arity::Exact(2), move |args| -> NativeResult {
            match args {
                [left, right] => self.apply(left, right).map(Some),
                _ => Err(NativeError::ArityMismatch {
                    name: self.symbol().to_owned(),
                    expected: 2,
                    got: args.len(),
                }),
            }
        })
    }
}

/// Operator for a binary expression token.
pub fn binary_operator(tok: Token) -> Option<BinaryOperator> {
    let op = match tok {
        Token::Add => BinaryOperator::Add,
        Token::Sub => BinaryOperator::Sub,
        Token::Mul => BinaryOperator::Mul,
        Token::Quo => BinaryOperator::Quo,
        Token::Rem => BinaryOperator::Rem,
        Token::Lss => BinaryOperator::Less,
        Token::Gtr => BinaryOperator::Greater,
        Token::Leq => BinaryOperator::LessEq,
        Token::Geq => BinaryOperator::GreaterEq,
        Token::Eql => BinaryOperator::Equal,
        Token::Neq => BinaryOperator::NotEqual,
        Token::LOr => BinaryOperator::LogicalOr,
        Token::LAnd => BinaryOperator::LogicalAnd,
        _ => return None,
    };
    Some(op)
}

/// Operator applied by a compound assignment token such as `+=`.
pub fn assign_operator(tok: Token) -> Option<BinaryOperator> {
    let op = match tok {
        Token::AddAssign => BinaryOperator::Add,
        Token::SubAssign => BinaryOperator::Sub,
        Token::MulAssign => BinaryOperator::Mul,
        Token::QuoAssign => BinaryOperator::Quo,
        Token::RemAssign => BinaryOperator::Rem,
        _ => return None,
    };
    Some(op)
}

/// Operator applied by `++` / `--`.
pub fn inc_dec_operator(tok: Token) -> Option<BinaryOperator> {
    match tok {
        Token::Inc => Some(BinaryOperator::Add),
        Token::Dec => Some(BinaryOperator::Sub),
        _ => None,
    }
}
