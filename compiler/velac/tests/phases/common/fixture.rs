//! Typed trees for phase tests.
//!
//! A [`Program`] is a model with one built-in effect, `emit`, whose calls
//! the [`Machine`](super::Machine) records. Tests write a body as typed
//! statements, lower it through the driver and run the result.

use vela_diagnostic::Diagnostic;
use vela_lower::LowerConfig;
use vela_target::format::method_to_string;
use vela_target::JMethod;
use vela_types::tree::{Block, Expr, ExprKind, FunctionDef, Stmt, StmtKind, Variable};
use vela_types::{Builtins, DeclFlags, DeclId, DeclKind, Idx, Model, Parameter};
use velac::Backend;

use super::{Machine, Value};

pub struct Program {
    pub model: Model,
    emit: DeclId,
}

impl Program {
    /// The language module plus `shared void emit(Object value)`.
    pub fn new() -> Self {
        let mut model = Model::new();
        let b = model.builtins().clone();
        let emit = model.declare(DeclKind::Method, "demo", "emit");
        model.set_type(emit, b.void_ty);
        model.add_flags(emit, DeclFlags::SHARED);
        let value = model.intern("value");
        model.add_param_list(emit, vec![Parameter::new(value, b.object_ty).unboxed(false)]);
        Program { model, emit }
    }

    pub fn builtins(&self) -> Builtins {
        self.model.builtins().clone()
    }

    /// A local in boxed form.
    pub fn local(&self, name: &str, ty: Idx) -> Expr {
        Expr::new(ExprKind::Ident(self.model.intern(name)), ty)
    }

    /// A local in raw form.
    pub fn raw(&self, name: &str, ty: Idx) -> Expr {
        self.local(name, ty).unboxed()
    }

    pub fn integer(&self, value: i64) -> Expr {
        Expr::new(ExprKind::Integer(value), self.model.builtins().integer_ty).unboxed()
    }

    pub fn string(&self, text: &str) -> Expr {
        let string = self.model.builtins().string_ty;
        Expr::new(ExprKind::String(self.model.intern(text)), string).unboxed()
    }

    pub fn var(&self, name: &str, ty: Idx) -> Variable {
        Variable {
            name: self.model.intern(name),
            ty,
        }
    }

    /// `emit(value);`
    pub fn emit(&self, value: Expr) -> Stmt {
        let void = self.model.builtins().void_ty;
        Stmt::new(StmtKind::Expr(Expr::new(
            ExprKind::Call {
                receiver: None,
                function: self.emit,
                args: vec![value],
            },
            void,
        )))
    }

    /// A shared top-level function with the given parameter lists, each
    /// parameter `(name, type, unboxed)`.
    pub fn function(&mut self, name: &str, ret: Idx, lists: &[&[(&str, Idx, bool)]]) -> DeclId {
        let model = &mut self.model;
        let f = model.declare(DeclKind::Method, "demo", name);
        model.set_type(f, ret);
        model.add_flags(f, DeclFlags::SHARED);
        for list in lists {
            let params = list
                .iter()
                .map(|&(name, ty, unboxed)| Parameter::new(model.intern(name), ty).unboxed(unboxed))
                .collect();
            model.add_param_list(f, params);
        }
        f
    }

    /// Lower definitions through the driver.
    pub fn lower(&self, defs: &[FunctionDef]) -> (Vec<JMethod>, Vec<Diagnostic>) {
        let mut backend = Backend::new(&self.model, LowerConfig::for_tests()).unwrap();
        let methods = backend.lower_functions(defs);
        (methods, backend.finish())
    }

    /// Lower definitions that must lower cleanly.
    pub fn lower_clean(&self, defs: &[FunctionDef]) -> Vec<JMethod> {
        let (methods, diags) = self.lower(defs);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:#?}");
        assert_eq!(methods.len(), defs.len());
        methods
    }

    /// Lower `shared void main() { stmts }` and run it with `globals` in
    /// scope. Returns what it emitted.
    pub fn run_main(&mut self, stmts: Vec<Stmt>, globals: Vec<(&str, Value)>) -> Vec<Value> {
        let void = self.model.builtins().void_ty;
        let main = self.function("main", void, &[&[]]);
        let def = FunctionDef {
            decl: main,
            body: Block::new(stmts),
        };
        let methods = self.lower_clean(&[def]);
        let mut machine = globals
            .into_iter()
            .fold(Machine::new(&self.model, methods), |m, (name, value)| {
                m.with_global(name, value)
            });
        machine.call("main", Vec::new());
        machine.output
    }

    pub fn render(&self, method: &JMethod) -> String {
        method_to_string(method, self.model.interner())
    }
}
