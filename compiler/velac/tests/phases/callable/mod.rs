//! Function values and curried functions, called through the evaluator.

use pretty_assertions::assert_eq;
use vela_types::tree::{BinaryOp, Block, Expr, ExprKind, FunctionDef, Stmt, StmtKind};
use vela_types::Idx;

use crate::common::{Machine, Program, Value};

fn concat(lhs: Expr, rhs: Expr, ty: Idx) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        ty,
    )
    .unboxed()
}

fn returning(value: Expr) -> Block {
    Block::new(vec![Stmt::new(StmtKind::Return(Some(value)))])
}

/// Lower `function` and a `main` that emits it as a value, run `main` and
/// return the emitted function value with its machine.
fn function_value(p: &mut Program, function: FunctionDef, callable: Idx) -> (Machine<'_>, Value) {
    let void = p.builtins().void_ty;
    let main = p.function("main", void, &[&[]]);
    let reference = Expr::new(ExprKind::FunctionRef(function.decl), callable);
    let main = FunctionDef {
        decl: main,
        body: Block::new(vec![p.emit(reference)]),
    };
    let methods = p.lower_clean(&[function, main]);
    let mut machine = Machine::new(&p.model, methods);
    machine.call("main", Vec::new());
    let value = machine.output.pop().unwrap();
    assert!(matches!(value, Value::Callable(_)), "{value:?}");
    (machine, value)
}

// ── Function references ─────────────────────────────────────────────────

#[test]
fn function_value_unpicks_and_reboxes() {
    let mut p = Program::new();
    let integer = p.builtins().integer_ty;
    let twice = p.function("twice", integer, &[&[("x", integer, true)]]);
    let body = returning(concat(p.raw("x", integer), p.raw("x", integer), integer));
    let callable = p.model.callable_type(integer, &[integer]);
    let (mut machine, f) = function_value(&mut p, FunctionDef { decl: twice, body }, callable);
    assert_eq!(machine.apply(&f, vec![Value::Int(21)]), Value::Int(42));
}

#[test]
fn many_arguments_arrive_as_one_array() {
    let mut p = Program::new();
    let string = p.builtins().string_ty;
    let names = ["a", "b", "c", "d"];
    let params: Vec<(&str, Idx, bool)> = names.iter().map(|&n| (n, string, false)).collect();
    let join = p.function("join", string, &[params.as_slice()]);
    let joined = names[1..]
        .iter()
        .fold(p.local("a", string), |acc, &n| concat(acc, p.local(n, string), string));
    let callable = p.model.callable_type(string, &[string; 4]);
    let def = FunctionDef {
        decl: join,
        body: returning(joined),
    };
    let (mut machine, f) = function_value(&mut p, def, callable);
    let args = names.iter().map(|&n| Value::str(n)).collect();
    assert_eq!(machine.apply(&f, args), Value::str("abcd"));
}

// ── Curried functions ───────────────────────────────────────────────────

#[test]
fn curried_function_captures_earlier_lists() {
    let mut p = Program::new();
    let string = p.builtins().string_ty;
    let greet = p.function(
        "greet",
        string,
        &[&[("greeting", string, true)], &[("name", string, true)]],
    );
    let body = returning(concat(p.raw("greeting", string), p.raw("name", string), string));
    let methods = p.lower_clean(&[FunctionDef { decl: greet, body }]);
    let mut machine = Machine::new(&p.model, methods);

    let hello = machine.call("greet", vec![Value::str("Hello, ")]);
    assert_eq!(machine.apply(&hello, vec![Value::str("Ann")]), Value::str("Hello, Ann"));
    assert_eq!(machine.apply(&hello, vec![Value::str("Bo")]), Value::str("Hello, Bo"));
}

#[test]
fn curried_void_function_returns_null() {
    let mut p = Program::new();
    let b = p.builtins();
    let tell = p.function(
        "tell",
        b.void_ty,
        &[&[("prefix", b.string_ty, true)], &[("name", b.string_ty, true)]],
    );
    let message = concat(p.raw("prefix", b.string_ty), p.raw("name", b.string_ty), b.string_ty);
    let body = Block::new(vec![p.emit(message)]);
    let methods = p.lower_clean(&[FunctionDef { decl: tell, body }]);
    let mut machine = Machine::new(&p.model, methods);

    let hi = machine.call("tell", vec![Value::str("Hi ")]);
    assert_eq!(machine.apply(&hi, vec![Value::str("Cy")]), Value::Null);
    assert_eq!(machine.output, [Value::str("Hi Cy")]);
}
