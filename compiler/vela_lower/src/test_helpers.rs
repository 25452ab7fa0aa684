//! Shared fixtures for the lowering unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use vela_target::format::{expr_to_string, method_to_string, stmts_to_string, type_to_string};
use vela_target::{JExpr, JMethod, JStmt, JType};
use vela_types::Model;

use crate::{LowerConfig, Lowerer, Naming};

/// A model plus the shared state a [`Lowerer`] borrows.
pub(crate) struct Harness {
    pub model: Model,
    pub naming: Naming,
    pub config: LowerConfig,
}

impl Harness {
    /// The language module only.
    pub fn new() -> Self {
        Self::with_model(Model::new())
    }

    pub fn with_model(model: Model) -> Self {
        Harness {
            model,
            naming: Naming::new(),
            config: LowerConfig::for_tests(),
        }
    }

    pub fn lowerer(&self) -> Lowerer<'_> {
        Lowerer::new(&self.model, &self.naming, &self.config)
    }

    pub fn ty(&self, ty: &JType) -> String {
        type_to_string(ty, self.model.interner())
    }

    pub fn expr(&self, expr: &JExpr) -> String {
        expr_to_string(expr, self.model.interner())
    }

    pub fn stmts(&self, stmts: &[JStmt]) -> String {
        stmts_to_string(stmts, self.model.interner())
    }

    pub fn method(&self, method: &JMethod) -> String {
        method_to_string(method, self.model.interner())
    }
}
