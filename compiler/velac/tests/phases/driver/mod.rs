//! Driver behavior: diagnostics across declarations and logging setup.

use pretty_assertions::assert_eq;
use vela_diagnostic::ErrorCode;
use vela_ir::Span;
use vela_types::tree::{Block, Condition, FunctionDef, Stmt, StmtKind};
use vela_types::{DeclKind, Variance};

use crate::common::Program;

#[test]
fn init_tracing_is_idempotent() {
    velac::init_tracing();
    velac::init_tracing();
}

#[test]
fn raw_type_lowers_without_diagnostics() {
    let mut p = Program::new();
    let b = p.builtins();
    let raw_sequence = p.model.nominal(b.sequence, vec![]);
    let f = p.function("f", b.void_ty, &[&[("xs", raw_sequence, false)]]);
    let def = FunctionDef {
        decl: f,
        body: Block::new(vec![Stmt::new(StmtKind::Return(None))]),
    };
    p.lower_clean(&[def]);
}

/// `class Pair<First, Second>()`, used as `Pair<String>`.
#[test]
fn missing_type_argument_is_reported_at_the_body() {
    let mut p = Program::new();
    let b = p.builtins();
    let pair = p.model.declare(DeclKind::Class, "demo", "Pair");
    p.model.add_type_param(pair, "First", Variance::Invariant);
    p.model.add_type_param(pair, "Second", Variance::Invariant);
    let half_applied = p.model.nominal(pair, vec![b.string_ty]);
    let f = p.function("f", b.void_ty, &[&[("pair", half_applied, false)]]);
    let mut body = Block::new(vec![Stmt::new(StmtKind::Return(None))]);
    body.span = Span::new(3, 9);

    let (methods, diags) = p.lower(&[FunctionDef { decl: f, body }]);
    assert_eq!(methods.len(), 1);
    assert!(!diags.is_empty());
    assert!(diags.iter().all(|d| d.code == ErrorCode::E4001), "{diags:#?}");
    assert_eq!(
        diags[0].message,
        "type `Pair<String>` has no argument for type parameter `Second`"
    );
    assert_eq!(diags[0].primary_span(), Some(Span::new(3, 9)));
}

#[test]
fn malformed_body_is_dropped_and_reported() {
    let mut p = Program::new();
    let b = p.builtins();
    let f = p.function("f", b.void_ty, &[&[("x", b.object_ty, false)]]);
    let unnamed = Stmt::new(StmtKind::If {
        cond: Condition::Is {
            variable: p.model.intern(""),
            ty: b.integer_ty,
            expr: p.local("x", b.object_ty),
        },
        then_block: Block::new(Vec::new()),
        else_block: None,
    })
    .at(Span::new(5, 9));
    let g = p.function("g", b.void_ty, &[&[]]);

    let (methods, diags) = p.lower(&[
        FunctionDef {
            decl: f,
            body: Block::new(vec![unnamed]),
        },
        FunctionDef {
            decl: g,
            body: Block::new(Vec::new()),
        },
    ]);
    assert_eq!(methods.len(), 1);
    assert_eq!(p.model.str(methods[0].name), "g");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E9001);
    assert_eq!(diags[0].primary_span(), Some(Span::new(5, 9)));
}
