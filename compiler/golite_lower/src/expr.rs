//! Expression lowering, including composite literals and zero values.

use golite_ir as ir;
use golite_runtime::{binary_operator, ensure_sufficient_stack, BinaryOperator, NativeValue};
use golite_syntax as ast;
use golite_syntax::{LitKind, Token};

use crate::compiler::{FuncCtx, StructDef};
use crate::literal::{parse_int, parse_literal};
use crate::LowerError;

/// Type names whose zero value is the integer 0.
const INT_TYPES: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "byte", "rune",
];

fn op_call(op: BinaryOperator, args: Vec<ir::Expr>) -> ir::Expr {
    ir::Expr::call(ir::Expr::Literal(NativeValue::Func(op.native_func())), args)
}

impl FuncCtx<'_, '_> {
    pub(crate) fn lower_expr(&mut self, expr: &ast::Expr) -> Result<ir::Expr, LowerError> {
        ensure_sufficient_stack(|| self.lower_expr_inner(expr))
    }

    fn lower_expr_inner(&mut self, expr: &ast::Expr) -> Result<ir::Expr, LowerError> {
        match expr {
            ast::Expr::Ident(name) => Ok(self.lower_ident(name)),

            ast::Expr::BasicLit { kind, value } => {
                parse_literal(*kind, value).map(ir::Expr::Literal)
            }

            ast::Expr::CompositeLit { ty, elts } => match ty.as_deref() {
                Some(ty) => self.lower_composite(ty, elts),
                None => Err(LowerError::UnsupportedComposite("elided type")),
            },

            ast::Expr::Paren(inner) => self.lower_expr(inner),

            ast::Expr::Selector { x, sel } => match &**x {
                ast::Expr::Ident(left) if !self.is_active(left) => self.lower_native_member(left, sel),
                object => {
                    let object = self.lower_expr(object)?;
                    Ok(ir::Expr::field(object, self.intern(sel)))
                }
            },

            ast::Expr::Index { x, index } => {
                Ok(ir::Expr::index(self.lower_expr(x)?, self.lower_expr(index)?))
            }

            ast::Expr::Call {
                fun,
                args,
                ellipsis,
            } => {
                if *ellipsis {
                    return Err(LowerError::UnsupportedExpr("variadic argument spread"));
                }
                let func = self.lower_expr(fun)?;
                let args = args
                    .iter()
                    .map(|a| self.lower_expr(a))
                    .collect::<Result<_, _>>()?;
                Ok(ir::Expr::call(func, args))
            }

            ast::Expr::Unary { op, x } => {
                let x = self.lower_expr(x)?;
                match op {
                    Token::Sub => Ok(op_call(BinaryOperator::Sub, vec![ir::Expr::literal(0_i64), x])),
                    Token::Not => Ok(op_call(BinaryOperator::Equal, vec![x, ir::Expr::literal(false)])),
                    // Struct values are already handles, so `&x` is `x`.
                    Token::Add | Token::And => Ok(x),
                    other => Err(LowerError::UnsupportedOperator(*other)),
                }
            }

            ast::Expr::Binary { x, op, y } => {
                let op = binary_operator(*op).ok_or(LowerError::UnsupportedOperator(*op))?;
                Ok(op_call(op, vec![self.lower_expr(x)?, self.lower_expr(y)?]))
            }

            ast::Expr::FuncLit { .. }
            | ast::Expr::Slice { .. }
            | ast::Expr::TypeAssert { .. }
            | ast::Expr::Star(_)
            | ast::Expr::KeyValue { .. }
            | ast::Expr::Ellipsis(_)
            | ast::Expr::ArrayType { .. }
            | ast::Expr::StructType(_)
            | ast::Expr::FuncType(_)
            | ast::Expr::InterfaceType(_)
            | ast::Expr::MapType { .. }
            | ast::Expr::ChanType { .. } => Err(LowerError::UnsupportedExpr(expr.kind_name())),
        }
    }

    /// Predeclared constants are literals unless a local shadows them.
    fn lower_ident(&self, name: &str) -> ir::Expr {
        if !self.is_active(name) {
            match name {
                "true" => return ir::Expr::literal(true),
                "false" => return ir::Expr::literal(false),
                "nil" => return ir::Expr::Literal(NativeValue::Nil),
                _ => {}
            }
        }
        ir::Expr::Ident(self.intern(name))
    }

    fn lower_native_member(&self, package: &str, member: &str) -> Result<ir::Expr, LowerError> {
        let pkg = self
            .compiler
            .natives
            .get(package)
            .ok_or_else(|| LowerError::UnknownPackage(package.to_owned()))?;
        let value = pkg.member(member).ok_or_else(|| LowerError::UnknownMember {
            package: package.to_owned(),
            member: member.to_owned(),
        })?;
        Ok(ir::Expr::Literal(value.clone()))
    }

    fn lower_composite(&mut self, ty: &ast::Expr, elts: &[ast::Expr]) -> Result<ir::Expr, LowerError> {
        match ty {
            ast::Expr::ArrayType { len, elt } => {
                let ast::Expr::Ident(elem) = &**elt else {
                    return Err(LowerError::UnsupportedComposite("non-primitive element type"));
                };
                let elem_type = self.intern(elem);
                let mut values = Vec::with_capacity(elts.len());
                for elt in elts {
                    if matches!(elt, ast::Expr::KeyValue { .. }) {
                        return Err(LowerError::UnsupportedComposite("indexed sequence element"));
                    }
                    values.push(self.lower_expr(elt)?);
                }
                Ok(match len {
                    None => ir::Expr::SliceLit { elem_type, values },
                    Some(_) => ir::Expr::ArrayLit { elem_type, values },
                })
            }
            ast::Expr::Ident(name) => {
                let compiler = self.compiler;
                let def = compiler
                    .structs
                    .get(name)
                    .ok_or_else(|| LowerError::UnknownStruct(name.clone()))?;
                self.lower_struct_literal(name, def, elts)
            }
            other => Err(LowerError::UnsupportedComposite(other.kind_name())),
        }
    }

    /// Every field starts at its zero value and is then overwritten by the
    /// literal's elements. A positional element at index `i` sets field `i`
    /// even when keyed elements precede it.
    fn lower_struct_literal(
        &mut self,
        name: &str,
        def: &StructDef,
        elts: &[ast::Expr],
    ) -> Result<ir::Expr, LowerError> {
        let mut fields = self.zero_fields(def)?;
        for (i, elt) in elts.iter().enumerate() {
            let (slot, value) = match elt {
                ast::Expr::KeyValue { key, value } => {
                    let ast::Expr::Ident(key) = &**key else {
                        return Err(LowerError::InvalidStructKey);
                    };
                    let slot = def.position(key).ok_or_else(|| LowerError::UnknownField {
                        ty: name.to_owned(),
                        field: key.clone(),
                    })?;
                    (slot, &**value)
                }
                positional => (i, positional),
            };
            let value = self.lower_expr(value)?;
            let field = fields.get_mut(slot).ok_or_else(|| LowerError::TooManyElements {
                ty: name.to_owned(),
                count: elts.len(),
                fields: def.fields.len(),
            })?;
            field.value = value;
        }
        Ok(ir::Expr::StructLit {
            type_name: self.intern(name),
            fields,
        })
    }

    fn zero_fields(&self, def: &StructDef) -> Result<Vec<ir::FieldInit>, LowerError> {
        def.fields
            .iter()
            .map(|f| {
                Ok(ir::FieldInit {
                    name: self.intern(&f.name),
                    value: self.zero_value(&f.ty)?,
                    by_reference: f.is_pointer(),
                })
            })
            .collect()
    }

    /// Expression producing the zero value of a type.
    pub(crate) fn zero_value(&self, ty: &ast::Expr) -> Result<ir::Expr, LowerError> {
        ensure_sufficient_stack(|| match ty {
            ast::Expr::Ident(name) => {
                if INT_TYPES.contains(&name.as_str()) {
                    return Ok(ir::Expr::literal(0_i64));
                }
                match name.as_str() {
                    "string" => return Ok(ir::Expr::literal("")),
                    "bool" => return Ok(ir::Expr::literal(false)),
                    _ => {}
                }
                let def = self
                    .compiler
                    .structs
                    .get(name)
                    .ok_or_else(|| LowerError::UnknownType(name.clone()))?;
                Ok(ir::Expr::StructLit {
                    type_name: self.intern(name),
                    fields: self.zero_fields(def)?,
                })
            }
            ast::Expr::ArrayType { len: None, .. } | ast::Expr::Star(_) => {
                Ok(ir::Expr::Literal(NativeValue::Nil))
            }
            ast::Expr::ArrayType { len: Some(len), elt } => {
                let ast::Expr::BasicLit {
                    kind: LitKind::Int,
                    value,
                } = &**len
                else {
                    return Err(LowerError::UnsupportedZeroValue("array with non-literal length"));
                };
                let ast::Expr::Ident(elem) = &**elt else {
                    return Err(LowerError::UnsupportedZeroValue("array of non-primitive type"));
                };
                let count = usize::try_from(parse_int(value)?)
                    .map_err(|_| LowerError::InvalidIntLiteral(value.clone()))?;
                let zero = self.zero_value(elt)?;
                Ok(ir::Expr::ArrayLit {
                    elem_type: self.intern(elem),
                    values: vec![zero; count],
                })
            }
            other => Err(LowerError::UnsupportedZeroValue(other.kind_name())),
        })
    }
}
