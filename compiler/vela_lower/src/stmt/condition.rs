//! `if` and `while` conditions, including narrowing conditions.
//!
//! A narrowing condition (`exists x = e`, `is T x`, `nonempty x`) evaluates
//! its subject once into a raw binding declared ahead of the statement,
//! tests the raw binding, and opens the guarded block with a second binding
//! holding the subject at its narrowed type. Inside the block the source
//! name resolves to that second binding; outside it, nothing changes.

use vela_ir::Name;
use vela_target::{JBinOp, JBlock, JExpr, JStmt, JVarDecl};
use vela_types::tree::{Block, Condition, Expr};
use vela_types::Idx;

use crate::abi::GET_EMPTY;
use crate::boxing::BoxingStrategy;
use crate::{LowerError, Lowerer, TypeContext};

/// The narrowed binding a guarded block opens with.
struct Narrowed {
    source: Name,
    synthetic: Name,
    decl: JStmt,
}

struct LoweredCondition {
    /// Statements to run before each evaluation of the test.
    prelude: Vec<JStmt>,
    test: JExpr,
    narrowed: Option<Narrowed>,
}

impl Lowerer<'_> {
    pub(crate) fn lower_if(
        &mut self,
        cond: &Condition,
        then_block: &Block,
        else_block: Option<&Block>,
        out: &mut Vec<JStmt>,
    ) -> Result<(), LowerError> {
        let cond = self.lower_condition(cond)?;
        out.extend(cond.prelude);
        let then = self.lower_guarded(cond.narrowed, then_block)?;
        let otherwise = else_block.map(|b| self.lower_block(b)).transpose()?;
        out.push(JStmt::If {
            cond: cond.test,
            then,
            otherwise,
        });
        Ok(())
    }

    /// A `while` loop. Its body never sees the guard of an enclosing `for`.
    pub(crate) fn lower_while(
        &mut self,
        cond: &Condition,
        body: &Block,
        out: &mut Vec<JStmt>,
    ) -> Result<(), LowerError> {
        let outer = self.ctx.loop_guard.take();
        let lowered = self.lower_while_loop(cond, body);
        self.ctx.loop_guard = outer;
        out.push(lowered?);
        Ok(())
    }

    fn lower_while_loop(&mut self, cond: &Condition, body: &Block) -> Result<JStmt, LowerError> {
        let cond = self.lower_condition(cond)?;
        if cond.prelude.is_empty() && cond.narrowed.is_none() {
            return Ok(JStmt::While {
                cond: cond.test,
                body: self.lower_block(body)?,
            });
        }
        // The subject is re-evaluated on every iteration:
        // while (true) { raw; if (!(test)) break; narrowed; body }
        let mut stmts = cond.prelude;
        stmts.push(JStmt::If {
            cond: JExpr::not(cond.test),
            then: JBlock::new(vec![JStmt::Break]),
            otherwise: None,
        });
        let guarded = self.lower_guarded(cond.narrowed, body)?;
        stmts.extend(guarded.stmts);
        Ok(JStmt::While {
            cond: JExpr::bool(true),
            body: JBlock::new(stmts),
        })
    }

    fn lower_condition(&mut self, cond: &Condition) -> Result<LoweredCondition, LowerError> {
        let lowered = match cond {
            Condition::Boolean(expr) => LoweredCondition {
                prelude: Vec::new(),
                test: self.lower_expr(expr, BoxingStrategy::Unboxed)?,
                narrowed: None,
            },
            Condition::Exists {
                variable: None,
                expr,
            } => {
                let subject = self.lower_expr(expr, BoxingStrategy::Boxed)?;
                LoweredCondition {
                    prelude: Vec::new(),
                    test: JExpr::binary(JBinOp::Ne, subject, JExpr::null()),
                    narrowed: None,
                }
            }
            Condition::Exists {
                variable: Some(variable),
                expr,
            } => {
                let (raw, decl) = self.raw_subject(variable.name, expr)?;
                LoweredCondition {
                    prelude: vec![decl],
                    test: JExpr::binary(JBinOp::Ne, JExpr::ident(raw), JExpr::null()),
                    narrowed: Some(self.narrowed(raw, variable.name, variable.ty)),
                }
            }
            Condition::Is { variable, ty, expr } => {
                if self.model.str(*variable).is_empty() {
                    return Err(LowerError::MissingSubjectVariable {
                        span: self.ctx.span,
                    });
                }
                let (raw, decl) = self.raw_subject(*variable, expr)?;
                LoweredCondition {
                    prelude: vec![decl],
                    test: self.type_test(raw, *ty),
                    narrowed: Some(self.narrowed(raw, *variable, *ty)),
                }
            }
            Condition::Nonempty { variable, expr } => {
                let (raw, decl) = self.raw_subject(variable.name, expr)?;
                let test = self.nonempty_test(raw);
                LoweredCondition {
                    prelude: vec![decl],
                    test,
                    narrowed: Some(self.narrowed(raw, variable.name, variable.ty)),
                }
            }
        };
        Ok(lowered)
    }

    /// `final T name$N = subject;` with `T` the subject's boxed type.
    fn raw_subject(&mut self, source: Name, subject: &Expr) -> Result<(Name, JStmt), LowerError> {
        let raw = self.fresh_for(source);
        let ty = self.lower(subject.ty, TypeContext::NO_PRIMITIVES);
        let init = self.lower_expr(subject, BoxingStrategy::Boxed)?;
        Ok((raw, JStmt::VarDef(JVarDecl::final_var(raw, ty, init))))
    }

    /// `final U name$M = (U) raw;`, unboxed when `U` has a raw form that
    /// values of `narrowed` are stored in.
    fn narrowed(&mut self, raw: Name, source: Name, narrowed: Idx) -> Narrowed {
        let synthetic = self.fresh_for(source);
        let boxed = self.lower(narrowed, TypeContext::NO_PRIMITIVES);
        let cast = JExpr::cast(boxed.clone(), JExpr::ident(raw));
        let decl = match self.value_repr(narrowed) {
            BoxingStrategy::Unboxed => {
                let ty = self.lower(narrowed, TypeContext::empty());
                JVarDecl::final_var(synthetic, ty, self.unbox_type(cast, narrowed))
            }
            BoxingStrategy::Boxed | BoxingStrategy::Indifferent => {
                JVarDecl::final_var(synthetic, boxed, cast)
            }
        };
        Narrowed {
            source,
            synthetic,
            decl: JStmt::VarDef(decl),
        }
    }

    /// `raw instanceof FixedSized && !((FixedSized) raw).getEmpty()`
    fn nonempty_test(&mut self, raw: Name) -> JExpr {
        let model = self.model;
        let fixed_sized = model.declared_type(model.builtins().fixed_sized);
        let class = self.lower(fixed_sized, TypeContext::NO_PRIMITIVES | TypeContext::RAW);
        let is_fixed = JExpr::instance_of(JExpr::ident(raw), class.clone());
        let empty = self.call0(JExpr::cast(class, JExpr::ident(raw)), GET_EMPTY);
        JExpr::binary(JBinOp::And, is_fixed, JExpr::not(empty))
    }

    /// Lower `block` with the narrowed binding in scope, then retract it.
    fn lower_guarded(
        &mut self,
        narrowed: Option<Narrowed>,
        block: &Block,
    ) -> Result<JBlock, LowerError> {
        let Some(narrowed) = narrowed else {
            return self.lower_block(block);
        };
        let prev = self.ctx.names.substitute(narrowed.source, narrowed.synthetic);
        let lowered = self.lower_block(block);
        self.ctx.names.restore(narrowed.source, prev);
        let mut lowered = lowered?;
        lowered.stmts.insert(0, narrowed.decl);
        Ok(lowered)
    }
}
