use pretty_assertions::assert_eq;
use vela_types::tree::{
    AttributeDecl, BinaryOp, Block, Condition, Expr, ExprKind, ForIterator, ForStmt, Stmt,
    StmtKind,
};
use vela_types::Idx;

use crate::common::{Program, Value};

fn ints(values: &[i64]) -> Value {
    Value::seq(values.iter().map(|&v| Value::Int(v)))
}

/// `for (x in xs) { body } [else { otherwise }]` over integers.
fn for_each(p: &Program, x: &str, xs: &str, body: Vec<Stmt>, otherwise: Option<Vec<Stmt>>) -> Stmt {
    let b = p.builtins();
    let sequence = p.model.nominal(b.sequence, vec![b.integer_ty]);
    Stmt::new(StmtKind::For(ForStmt {
        iterator: ForIterator::Value(p.var(x, b.integer_ty)),
        subject: p.local(xs, sequence),
        body: Block::new(body),
        else_block: otherwise.map(Block::new),
    }))
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, ty: Idx) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        ty,
    )
    .unboxed()
}

fn while_loop(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::While {
        cond: Condition::Boolean(cond),
        body: Block::new(body),
    })
}

fn brk() -> Stmt {
    Stmt::new(StmtKind::Break)
}

/// `for (x in xs) { body } else { emit("done"); }`
fn run_for_else(xs: Value, body: impl FnOnce(&Program) -> Vec<Stmt>) -> Vec<Value> {
    let mut p = Program::new();
    let body = body(&p);
    let otherwise = vec![p.emit(p.string("done"))];
    let stmt = for_each(&p, "x", "xs", body, Some(otherwise));
    p.run_main(vec![stmt], vec![("xs", xs)])
}

// ── For/else ────────────────────────────────────────────────────────────

#[test]
fn else_runs_after_the_last_element() {
    let out = run_for_else(ints(&[1, 2, 3]), |p| {
        vec![p.emit(p.raw("x", p.builtins().integer_ty))]
    });
    assert_eq!(
        out,
        [Value::Int(1), Value::Int(2), Value::Int(3), Value::str("done")]
    );
}

#[test]
fn else_runs_for_an_empty_subject() {
    let out = run_for_else(ints(&[]), |p| {
        vec![p.emit(p.raw("x", p.builtins().integer_ty))]
    });
    assert_eq!(out, [Value::str("done")]);
}

#[test]
fn break_skips_else() {
    let out = run_for_else(ints(&[1, 2, 3]), |p| {
        let b = p.builtins();
        let integer = b.integer_ty;
        let is_two = binary(BinaryOp::Eq, p.raw("x", integer), p.integer(2), b.boolean_ty);
        vec![
            Stmt::new(StmtKind::If {
                cond: Condition::Boolean(is_two),
                then_block: Block::new(vec![brk()]),
                else_block: None,
            }),
            p.emit(p.raw("x", integer)),
        ]
    });
    assert_eq!(out, [Value::Int(1)]);
}

#[test]
fn break_out_of_inner_while_keeps_else() {
    let out = run_for_else(ints(&[1, 2]), |p| {
        let always = Expr::new(ExprKind::Boolean(true), p.builtins().boolean_ty).unboxed();
        vec![
            while_loop(always, vec![brk()]),
            p.emit(p.raw("x", p.builtins().integer_ty)),
        ]
    });
    assert_eq!(out, [Value::Int(1), Value::Int(2), Value::str("done")]);
}

#[test]
fn break_out_of_inner_for_keeps_outer_else() {
    let mut p = Program::new();
    let integer = p.builtins().integer_ty;
    let inner_else = vec![p.emit(p.string("inner"))];
    let inner = for_each(&p, "y", "ys", vec![brk()], Some(inner_else));
    let outer_else = vec![p.emit(p.string("outer"))];
    let outer = for_each(
        &p,
        "x",
        "xs",
        vec![inner, p.emit(p.raw("x", integer))],
        Some(outer_else),
    );
    let out = p.run_main(vec![outer], vec![("xs", ints(&[1, 2])), ("ys", ints(&[9]))]);
    assert_eq!(out, [Value::Int(1), Value::Int(2), Value::str("outer")]);
}

#[test]
fn entries_bind_key_and_item() {
    let mut p = Program::new();
    let b = p.builtins();
    let entry = p.model.nominal(b.entry, vec![b.string_ty, b.integer_ty]);
    let entries = p.model.nominal(b.sequence, vec![entry]);
    let stmt = Stmt::new(StmtKind::For(ForStmt {
        iterator: ForIterator::KeyValue(p.var("k", b.string_ty), p.var("v", b.integer_ty)),
        subject: p.local("entries", entries),
        body: Block::new(vec![
            p.emit(p.raw("k", b.string_ty)),
            p.emit(p.raw("v", b.integer_ty)),
        ]),
        else_block: None,
    }));
    let subject = Value::seq([
        Value::entry(Value::str("a"), Value::Int(1)),
        Value::entry(Value::str("b"), Value::Int(2)),
    ]);
    let out = p.run_main(vec![stmt], vec![("entries", subject)]);
    assert_eq!(
        out,
        [Value::str("a"), Value::Int(1), Value::str("b"), Value::Int(2)]
    );
}

// ── While ───────────────────────────────────────────────────────────────

#[test]
fn counting_while() {
    let mut p = Program::new();
    let b = p.builtins();
    let integer = b.integer_ty;
    let i = p.model.intern("i");
    let below = binary(BinaryOp::Lt, p.raw("i", integer), p.integer(3), b.boolean_ty);
    let next = binary(BinaryOp::Add, p.raw("i", integer), p.integer(1), integer);
    let stmts = vec![
        Stmt::new(StmtKind::Attribute(AttributeDecl {
            name: i,
            ty: integer,
            init: Some(p.integer(0)),
            variable: true,
        })),
        while_loop(
            below,
            vec![
                p.emit(p.raw("i", integer)),
                Stmt::new(StmtKind::Specifier {
                    target: i,
                    value: next,
                }),
            ],
        ),
    ];
    let out = p.run_main(stmts, Vec::new());
    assert_eq!(out, [Value::Int(0), Value::Int(1), Value::Int(2)]);
}
