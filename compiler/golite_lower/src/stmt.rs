//! Statement lowering.

use golite_ir as ir;
use golite_runtime::{assign_operator, ensure_sufficient_stack, inc_dec_operator, NativeValue};
use golite_syntax as ast;
use golite_syntax::{DeclKind, Token};

use crate::compiler::FuncCtx;
use crate::LowerError;

impl FuncCtx<'_, '_> {
    pub(crate) fn lower_stmt(&mut self, stmt: &ast::Stmt) -> Result<ir::Stmt, LowerError> {
        ensure_sufficient_stack(|| self.lower_stmt_inner(stmt))
    }

    fn lower_stmt_inner(&mut self, stmt: &ast::Stmt) -> Result<ir::Stmt, LowerError> {
        match stmt {
            ast::Stmt::Decl(gen) => self.lower_decl_stmt(gen),
            ast::Stmt::Empty => Ok(ir::Stmt::Empty),
            ast::Stmt::Expr(expr) => Ok(ir::Stmt::Expr(self.lower_expr(expr)?)),

            ast::Stmt::IncDec { x, tok } => {
                let op = inc_dec_operator(*tok).ok_or(LowerError::UnsupportedOperator(*tok))?;
                // The target is lowered twice, so it is evaluated twice.
                let target = self.lower_expr(x)?;
                let value = ir::Expr::call(
                    ir::Expr::Literal(NativeValue::Func(op.native_func())),
                    vec![target.clone(), ir::Expr::literal(1_i64)],
                );
                Ok(ir::Stmt::assign(vec![target], vec![value]))
            }

            ast::Stmt::Assign { lhs, tok, rhs } => self.lower_assign(lhs, *tok, rhs),

            ast::Stmt::Return(results) => {
                if results.is_empty() && !self.named_results.is_empty() {
                    let named = self.named_results.iter().copied().map(ir::Expr::Ident);
                    return Ok(ir::Stmt::Return(named.collect()));
                }
                let results = results
                    .iter()
                    .map(|r| self.lower_expr(r))
                    .collect::<Result<_, _>>()?;
                Ok(ir::Stmt::Return(results))
            }

            ast::Stmt::Branch { tok, label } => match (tok, label) {
                (Token::Break, None) if self.loop_depth > 0 => Ok(ir::Stmt::Break),
                (Token::Break, None) => Err(LowerError::BreakOutsideLoop),
                (Token::Break, Some(_)) => Err(LowerError::UnsupportedStmt("labeled break")),
                (other, _) => Err(LowerError::UnsupportedBranch(*other)),
            },

            ast::Stmt::Block(block) => self.lower_block(block),

            ast::Stmt::If {
                init,
                cond,
                body,
                els,
            } => {
                let init = self.lower_optional(init.as_deref())?;
                let cond = self.lower_expr(cond)?;
                let body = self.lower_block(body)?;
                let els = self.lower_optional(els.as_deref())?;
                Ok(ir::Stmt::If {
                    init: Box::new(init),
                    cond,
                    body: Box::new(body),
                    els: Box::new(els),
                })
            }

            ast::Stmt::For {
                init,
                cond,
                post,
                body,
            } => {
                let init = self.lower_optional(init.as_deref())?;
                let cond = match cond {
                    Some(cond) => self.lower_expr(cond)?,
                    None => ir::Expr::always(),
                };
                let post = self.lower_optional(post.as_deref())?;
                self.loop_depth += 1;
                let body = self.lower_block(body);
                self.loop_depth -= 1;
                Ok(ir::Stmt::for_loop(init, cond, post, body?))
            }

            ast::Stmt::Labeled { .. }
            | ast::Stmt::Send { .. }
            | ast::Stmt::Go(_)
            | ast::Stmt::Defer(_)
            | ast::Stmt::Switch { .. }
            | ast::Stmt::TypeSwitch { .. }
            | ast::Stmt::Select { .. }
            | ast::Stmt::Range { .. } => Err(LowerError::UnsupportedStmt(stmt.kind_name())),
        }
    }

    fn lower_block(&mut self, block: &ast::BlockStmt) -> Result<ir::Stmt, LowerError> {
        let stmts = block
            .stmts
            .iter()
            .map(|s| self.lower_stmt(s))
            .collect::<Result<_, _>>()?;
        Ok(ir::Stmt::Block(stmts))
    }

    fn lower_optional(&mut self, stmt: Option<&ast::Stmt>) -> Result<ir::Stmt, LowerError> {
        stmt.map_or(Ok(ir::Stmt::Empty), |s| self.lower_stmt(s))
    }

    fn lower_assign(
        &mut self,
        lhs: &[ast::Expr],
        tok: Token,
        rhs: &[ast::Expr],
    ) -> Result<ir::Stmt, LowerError> {
        if let Some(op) = assign_operator(tok) {
            let ([target], [value]) = (lhs, rhs) else {
                return Err(LowerError::AssignMismatch {
                    targets: lhs.len(),
                    sources: rhs.len(),
                });
            };
            // The target is lowered twice, so it is evaluated twice.
            let target = self.lower_expr(target)?;
            let value = ir::Expr::call(
                ir::Expr::Literal(NativeValue::Func(op.native_func())),
                vec![target.clone(), self.lower_expr(value)?],
            );
            return Ok(ir::Stmt::assign(vec![target], vec![value]));
        }
        if !matches!(tok, Token::Assign | Token::Define) {
            return Err(LowerError::UnsupportedOperator(tok));
        }
        if lhs.len() != rhs.len() {
            return Err(LowerError::AssignMismatch {
                targets: lhs.len(),
                sources: rhs.len(),
            });
        }

        let sources = rhs
            .iter()
            .map(|e| self.lower_expr(e))
            .collect::<Result<_, _>>()?;
        // Assigning to a bare name declares it, whether or not the
        // statement used `:=`.
        for target in lhs {
            if let ast::Expr::Ident(name) = target {
                self.activate(name);
            }
        }
        let targets = lhs
            .iter()
            .map(|e| self.lower_expr(e))
            .collect::<Result<_, _>>()?;
        Ok(ir::Stmt::assign(targets, sources))
    }

    /// `var a, b T` becomes `a, b = zero(T), zero(T)`; `var a = v` becomes
    /// `a = v`. A grouped declaration becomes a single assignment.
    fn lower_decl_stmt(&mut self, gen: &ast::GenDecl) -> Result<ir::Stmt, LowerError> {
        match gen.tok {
            DeclKind::Var | DeclKind::Const => {}
            DeclKind::Type => return Err(LowerError::UnsupportedStmt("local type declaration")),
            DeclKind::Import => return Err(LowerError::UnsupportedStmt("local import")),
        }

        let mut targets = Vec::new();
        let mut sources = Vec::new();
        for spec in &gen.specs {
            let ast::Spec::Value(vs) = spec else {
                return Err(LowerError::UnsupportedStmt("non-value declaration"));
            };
            if vs.values.is_empty() {
                let ty = vs
                    .ty
                    .as_ref()
                    .ok_or(LowerError::UnsupportedStmt("untyped declaration without value"))?;
                let zero = self.zero_value(ty)?;
                sources.extend(std::iter::repeat(zero).take(vs.names.len()));
            } else {
                if vs.values.len() != vs.names.len() {
                    return Err(LowerError::AssignMismatch {
                        targets: vs.names.len(),
                        sources: vs.values.len(),
                    });
                }
                for value in &vs.values {
                    sources.push(self.lower_expr(value)?);
                }
            }
            for name in &vs.names {
                self.activate(name);
                targets.push(ir::Expr::Ident(self.intern(name)));
            }
        }

        if targets.is_empty() {
            return Ok(ir::Stmt::Empty);
        }
        Ok(ir::Stmt::assign(targets, sources))
    }
}
