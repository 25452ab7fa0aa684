//! Statement lowering.
//!
//! Statements lower one-to-one except for conditions and loops, which may
//! emit setup statements (raw subject bindings, loop guards) into the
//! enclosing block ahead of the statement itself. That is why lowering
//! appends to an output list instead of returning a single statement.

mod condition;
mod loops;

use vela_ir::Name;
use vela_target::{JBlock, JExpr, JStmt, JVarDecl};
use vela_types::tree::{AttributeDecl, Block, Expr, Stmt, StmtKind};

use crate::boxing::BoxingStrategy;
use crate::stack::ensure_sufficient_stack;
use crate::{LowerError, Lowerer, TypeContext};

impl Lowerer<'_> {
    pub fn lower_block(&mut self, block: &Block) -> Result<JBlock, LowerError> {
        let mut out = Vec::with_capacity(block.stmts.len());
        self.lower_stmts(&block.stmts, &mut out)?;
        Ok(JBlock::new(out))
    }

    pub(crate) fn lower_stmts(
        &mut self,
        stmts: &[Stmt],
        out: &mut Vec<JStmt>,
    ) -> Result<(), LowerError> {
        for stmt in stmts {
            ensure_sufficient_stack(|| self.lower_stmt(stmt, out))?;
        }
        Ok(())
    }

    /// Lower `stmt`, appending the result and any setup it needs to `out`.
    pub fn lower_stmt(&mut self, stmt: &Stmt, out: &mut Vec<JStmt>) -> Result<(), LowerError> {
        self.set_span(stmt.span);
        match &stmt.kind {
            StmtKind::Attribute(decl) => {
                let lowered = self.lower_attribute(decl)?;
                out.push(lowered);
            }
            StmtKind::Specifier { target, value } => {
                let lowered = self.lower_specifier(*target, value)?;
                out.push(lowered);
            }
            StmtKind::Expr(expr) => {
                let lowered = self.lower_expr(expr, BoxingStrategy::Indifferent)?;
                out.push(JStmt::Exec(lowered));
            }
            StmtKind::Return(value) => {
                let lowered = self.lower_return(value.as_ref())?;
                out.push(lowered);
            }
            StmtKind::Break => {
                if let Some(guard) = self.ctx.loop_guard {
                    out.push(JStmt::Exec(JExpr::assign(
                        JExpr::ident(guard),
                        JExpr::bool(false),
                    )));
                }
                out.push(JStmt::Break);
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => self.lower_if(cond, then_block, else_block.as_ref(), out)?,
            StmtKind::While { cond, body } => self.lower_while(cond, body, out)?,
            StmtKind::For(for_stmt) => self.lower_for(for_stmt, out)?,
            StmtKind::Block(block) => {
                let lowered = self.lower_block(block)?;
                out.push(JStmt::Block(lowered));
            }
        }
        Ok(())
    }

    /// `[final] T name = init;`, stored in the type's default form.
    fn lower_attribute(&mut self, decl: &AttributeDecl) -> Result<JStmt, LowerError> {
        let strategy = self.value_repr(decl.ty);
        let ty = self.lower(decl.ty, TypeContext::empty());
        let init = decl
            .init
            .as_ref()
            .map(|init| self.lower_expr(init, strategy))
            .transpose()?;
        self.ctx.locals.insert(decl.name, strategy);
        Ok(JStmt::VarDef(JVarDecl {
            is_final: !decl.variable,
            name: decl.name,
            ty,
            init,
        }))
    }

    fn lower_specifier(&mut self, target: Name, value: &Expr) -> Result<JStmt, LowerError> {
        let target = self.ctx.names.resolve(target);
        let strategy = match self.ctx.locals.get(&target) {
            Some(&strategy) => strategy,
            None => self.value_repr(value.ty),
        };
        let value = self.lower_expr(value, strategy)?;
        Ok(JStmt::Exec(JExpr::assign(JExpr::ident(target), value)))
    }

    fn lower_return(&mut self, value: Option<&Expr>) -> Result<JStmt, LowerError> {
        let returns = self.ctx.returns;
        let lowered = match (value, returns) {
            (Some(value), Some(returns)) => Some(self.lower_expr(value, returns.strategy)?),
            (Some(value), None) => Some(self.lower_expr(value, BoxingStrategy::Indifferent)?),
            (None, Some(returns)) if returns.in_callable => Some(JExpr::null()),
            (None, _) => None,
        };
        Ok(JStmt::Return(lowered))
    }
}
