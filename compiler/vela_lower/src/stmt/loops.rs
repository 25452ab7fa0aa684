//! `for` loops over the iterator protocol.
//!
//! ```text
//! boolean doforelse$0 = true;              // only with an else clause
//! for (Iterator<? extends E> x$iter$1 = subject.iterator();
//!      x$iter$1.getHead() != null;
//!      x$iter$1 = x$iter$1.getTail()) {
//!     final E x = x$iter$1.getHead();
//!     body
//! }
//! if (doforelse$0) { else body }
//! ```
//!
//! A `break` inside the body clears the guard before leaving the loop, so
//! the else clause runs only when the iterator was exhausted.

use vela_target::{JBinOp, JBlock, JExpr, JStmt, JType, JVarDecl, Primitive};
use vela_types::tree::{ForIterator, ForStmt, Variable};
use vela_types::Idx;

use crate::abi::{ENTRY_ITEM, ENTRY_KEY, HEAD, ITERATOR, ITERATOR_SUFFIX, LOOP_GUARD, TAIL};
use crate::boxing::BoxingStrategy;
use crate::{LowerError, LowerProblem, Lowerer, TypeContext};

impl Lowerer<'_> {
    pub(crate) fn lower_for(
        &mut self,
        stmt: &ForStmt,
        out: &mut Vec<JStmt>,
    ) -> Result<(), LowerError> {
        let guard = if stmt.else_block.is_some() {
            let guard = self.fresh(LOOP_GUARD);
            out.push(JStmt::VarDef(JVarDecl::new(
                guard,
                JType::Primitive(Primitive::Boolean),
                JExpr::bool(true),
            )));
            Some(guard)
        } else {
            None
        };

        let outer = std::mem::replace(&mut self.ctx.loop_guard, guard);
        let lowered = self.lower_for_loop(stmt);
        self.ctx.loop_guard = outer;
        out.push(lowered?);

        if let (Some(guard), Some(else_block)) = (guard, &stmt.else_block) {
            let otherwise = self.lower_block(else_block)?;
            out.push(JStmt::If {
                cond: JExpr::ident(guard),
                then: otherwise,
                otherwise: None,
            });
        }
        Ok(())
    }

    fn lower_for_loop(&mut self, stmt: &ForStmt) -> Result<JStmt, LowerError> {
        let model = self.model;
        let subject_ty = stmt.subject.ty;
        let element = if let Some(element) = model.iterated_type(subject_ty) {
            element
        } else {
            self.problem(LowerProblem::NotIterable {
                ty: subject_ty,
                span: stmt.subject.span,
            });
            Idx::ERROR
        };

        let first = match stmt.iterator {
            ForIterator::Value(var) | ForIterator::KeyValue(var, _) => var.name,
        };
        let iter = self.fresh(&format!("{}{ITERATOR_SUFFIX}", model.str(first)));
        let iter_ty = self.lower(model.iterator_type(element), TypeContext::TYPE_ARGUMENT);
        let subject = self.lower_expr(&stmt.subject, BoxingStrategy::Boxed)?;
        let init = JVarDecl::new(iter, iter_ty, self.call0(subject, ITERATOR));

        let head = || JExpr::call(JExpr::ident(iter), model.intern(HEAD), Vec::new());
        let cond = JExpr::binary(JBinOp::Ne, head(), JExpr::null());
        let step = JExpr::assign(JExpr::ident(iter), self.call0(JExpr::ident(iter), TAIL));

        let mut body = Vec::with_capacity(stmt.body.stmts.len() + 2);
        match stmt.iterator {
            ForIterator::Value(var) => body.push(self.bind_head(var, head(), element)),
            ForIterator::KeyValue(key, item) => {
                let entry = model
                    .supertype(element, model.builtins().entry)
                    .map(|entry| model.type_args(entry))
                    .unwrap_or_default();
                let key_ty = entry.first().copied().unwrap_or(Idx::ERROR);
                let item_ty = entry.get(1).copied().unwrap_or(Idx::ERROR);
                let key_value = self.call0(head(), ENTRY_KEY);
                let item_value = self.call0(head(), ENTRY_ITEM);
                body.push(self.bind_head(key, key_value, key_ty));
                body.push(self.bind_head(item, item_value, item_ty));
            }
        }
        self.lower_stmts(&stmt.body.stmts, &mut body)?;

        Ok(JStmt::For {
            init: vec![init],
            cond,
            step: vec![step],
            body: JBlock::new(body),
        })
    }

    /// `final T var = value;` for a value of type `value_ty` coming off the
    /// iterator in boxed form.
    fn bind_head(&mut self, var: Variable, value: JExpr, value_ty: Idx) -> JStmt {
        let value = if var.ty == value_ty {
            value
        } else {
            JExpr::cast(self.lower(var.ty, TypeContext::NO_PRIMITIVES), value)
        };
        let strategy = self.value_repr(var.ty);
        let init = self.box_unbox_if_necessary(value, true, var.ty, strategy);
        let ty = self.lower(var.ty, TypeContext::empty());
        JStmt::VarDef(JVarDecl::final_var(var.name, ty, init))
    }
}
