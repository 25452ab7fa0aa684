use pretty_assertions::assert_eq;
use vela_types::tree::{BinaryOp, Block, Condition, Expr, ExprKind, Stmt, StmtKind};

use crate::common::{Program, Value};

/// ```text
/// if (is Integer x) { emit(x + 1); } else { emit(x); }
/// emit(x);
/// ```
fn narrow_to_integer(x: Value) -> Vec<Value> {
    let mut p = Program::new();
    let b = p.builtins();
    let successor = Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(p.raw("x", b.integer_ty)),
            rhs: Box::new(p.integer(1)),
        },
        b.integer_ty,
    )
    .unboxed();
    let stmts = vec![
        Stmt::new(StmtKind::If {
            cond: Condition::Is {
                variable: p.model.intern("x"),
                ty: b.integer_ty,
                expr: p.local("x", b.object_ty),
            },
            then_block: Block::new(vec![p.emit(successor)]),
            else_block: Some(Block::new(vec![p.emit(p.local("x", b.object_ty))])),
        }),
        p.emit(p.local("x", b.object_ty)),
    ];
    p.run_main(stmts, vec![("x", x)])
}

/// `if (exists s = maybe) { emit(s); } else { emit("none"); }`
fn exists_or_none(maybe: Value) -> Vec<Value> {
    let mut p = Program::new();
    let b = p.builtins();
    let stmt = Stmt::new(StmtKind::If {
        cond: Condition::Exists {
            variable: Some(p.var("s", b.string_ty)),
            expr: p.local("maybe", p.model.optional(b.string_ty)),
        },
        then_block: Block::new(vec![p.emit(p.raw("s", b.string_ty))]),
        else_block: Some(Block::new(vec![p.emit(p.string("none"))])),
    });
    p.run_main(vec![stmt], vec![("maybe", maybe)])
}

/// `if (nonempty xs) { emit("some"); } else { emit("none"); }`
fn nonempty_or_none(xs: Value) -> Vec<Value> {
    let mut p = Program::new();
    let b = p.builtins();
    let iterable = p.model.nominal(b.iterable, vec![b.integer_ty]);
    let sequence = p.model.nominal(b.sequence, vec![b.integer_ty]);
    let stmt = Stmt::new(StmtKind::If {
        cond: Condition::Nonempty {
            variable: p.var("xs", sequence),
            expr: p.local("xs", iterable),
        },
        then_block: Block::new(vec![p.emit(p.string("some"))]),
        else_block: Some(Block::new(vec![p.emit(p.string("none"))])),
    });
    p.run_main(vec![stmt], vec![("xs", xs)])
}

// ── Narrowing scope ─────────────────────────────────────────────────────

#[test]
fn is_binds_the_narrowed_value_in_the_then_block_only() {
    assert_eq!(narrow_to_integer(Value::Int(5)), [Value::Int(6), Value::Int(5)]);
}

#[test]
fn failed_is_leaves_the_subject_alone() {
    assert_eq!(
        narrow_to_integer(Value::str("a")),
        [Value::str("a"), Value::str("a")]
    );
}

#[test]
fn exists_binds_a_present_value() {
    assert_eq!(exists_or_none(Value::str("hi")), [Value::str("hi")]);
    assert_eq!(exists_or_none(Value::Null), [Value::str("none")]);
}

#[test]
fn nonempty_tests_fixed_sized_emptiness() {
    assert_eq!(nonempty_or_none(Value::seq([Value::Int(1)])), [Value::str("some")]);
    assert_eq!(nonempty_or_none(Value::seq([])), [Value::str("none")]);
}

#[test]
fn narrowing_while_tests_before_every_iteration() {
    let mut p = Program::new();
    let b = p.builtins();
    let optional = p.model.optional(b.integer_ty);
    let pending = p.model.intern("pending");
    let stmt = Stmt::new(StmtKind::While {
        cond: Condition::Exists {
            variable: Some(p.var("n", b.integer_ty)),
            expr: p.local("pending", optional),
        },
        body: Block::new(vec![
            p.emit(p.raw("n", b.integer_ty)),
            Stmt::new(StmtKind::Specifier {
                target: pending,
                value: Expr::new(ExprKind::Null, optional),
            }),
        ]),
    });
    let out = p.run_main(vec![stmt], vec![("pending", Value::Int(3))]);
    assert_eq!(out, [Value::Int(3)]);
}
