//! The lowering state threaded through every component.

use rustc_hash::FxHashMap;
use vela_ir::{Name, Span};
use vela_target::{JExpr, JType};
use vela_types::{Idx, Model};

use crate::boxing::BoxingStrategy;
use crate::naming::{NameScope, Naming};
use crate::{LowerConfig, LowerProblem};

/// How `return` statements of the body being lowered produce their value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReturnCtx {
    /// Declared result type.
    pub ty: Idx,
    pub strategy: BoxingStrategy,
    /// Inside a callable's `call`: a bare `return` yields `null`.
    pub in_callable: bool,
}

/// Per-declaration lowering state.
///
/// Created fresh for each declaration and dropped after it. Nothing here is
/// shared between declarations.
#[derive(Clone, Debug, Default)]
pub struct LowerCtx {
    pub(crate) names: NameScope,
    /// Guard flag of the innermost `for` with an `else` clause, if its body
    /// is being lowered.
    pub(crate) loop_guard: Option<Name>,
    /// Position of the construct being lowered, for problems.
    pub(crate) span: Span,
    pub(crate) problems: Vec<LowerProblem>,
    pub(crate) returns: Option<ReturnCtx>,
    /// Storage form of each local declared so far, for assignments.
    pub(crate) locals: FxHashMap<Name, BoxingStrategy>,
}

/// Lowers one declaration at a time against a shared model.
///
/// The component methods live in their own modules (`types`, `refine`,
/// `stmt`, `callable`, ...) as `impl Lowerer` blocks.
pub struct Lowerer<'a> {
    pub(crate) model: &'a Model,
    pub(crate) naming: &'a Naming,
    pub(crate) config: &'a LowerConfig,
    pub(crate) ctx: LowerCtx,
}

impl<'a> Lowerer<'a> {
    pub fn new(model: &'a Model, naming: &'a Naming, config: &'a LowerConfig) -> Self {
        Lowerer {
            model,
            naming,
            config,
            ctx: LowerCtx::default(),
        }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn ctx(&self) -> &LowerCtx {
        &self.ctx
    }

    /// Problems recorded so far.
    pub fn problems(&self) -> &[LowerProblem] {
        &self.ctx.problems
    }

    /// Drain the recorded problems.
    pub fn take_problems(&mut self) -> Vec<LowerProblem> {
        std::mem::take(&mut self.ctx.problems)
    }

    /// Reset per-declaration state before lowering the next declaration.
    pub fn reset(&mut self) {
        self.ctx = LowerCtx::default();
    }

    /// Set the position that subsequent problems are reported at.
    pub fn set_span(&mut self, span: Span) {
        self.ctx.span = span;
    }

    pub(crate) fn problem(&mut self, problem: LowerProblem) {
        self.ctx.problems.push(problem);
    }

    pub(crate) fn name(&self, text: &str) -> Name {
        self.model.intern(text)
    }

    /// A fresh synthetic binding name `base$N`.
    pub(crate) fn fresh(&mut self, base: &str) -> Name {
        self.ctx.names.fresh(self.model, base)
    }

    /// A fresh binding derived from a source name: `x` -> `x$N`.
    pub(crate) fn fresh_for(&mut self, source: Name) -> Name {
        let base = self.model.str(source);
        self.fresh(base)
    }

    /// A top-level class by fully qualified name.
    pub(crate) fn class(&self, qualified: &str) -> JType {
        JType::Class(self.name(qualified))
    }

    /// `Class.<type_args>method(args)` on a runtime class.
    pub(crate) fn static_call(
        &self,
        class: &str,
        type_args: Vec<JType>,
        method: &str,
        args: Vec<JExpr>,
    ) -> JExpr {
        JExpr::static_call(self.class(class), type_args, self.name(method), args)
    }

    /// `target.method()`
    pub(crate) fn call0(&self, target: JExpr, method: &str) -> JExpr {
        JExpr::call(target, self.name(method), Vec::new())
    }
}

impl LowerCtx {
    /// Guard flag of the innermost `for`-with-`else` body being lowered.
    pub fn loop_guard(&self) -> Option<Name> {
        self.loop_guard
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The name a source identifier lowers to right now.
    pub fn resolve(&self, name: Name) -> Name {
        self.names.resolve(name)
    }
}
