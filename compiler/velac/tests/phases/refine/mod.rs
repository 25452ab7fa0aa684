//! Method headers chosen by the refinement resolver.

use pretty_assertions::assert_eq;
use vela_types::tree::{Block, Expr, ExprKind, FunctionDef, Stmt, StmtKind};
use vela_types::{DeclFlags, DeclKind, Idx, Variance};

use crate::common::{Machine, Program, Value};

/// ```text
/// interface Source<out E> { shared formal E get(); }
/// interface Names satisfies Source<String> {}
/// interface Things satisfies Source<Identifiable> {}
/// class Impl() satisfies Names & Things {
///     shared actual <own> get() => "impl";
/// }
/// ```
///
/// With `things_first`, `Impl` satisfies `Things & Names` instead.
fn diamond(p: &mut Program, own: Idx, things_first: bool) -> FunctionDef {
    let b = p.builtins();
    let model = &mut p.model;

    let source = model.declare(DeclKind::Interface, "demo", "Source");
    let e = model.add_type_param(source, "E", Variance::Covariant);
    let source_get = model.declare_member(source, DeclKind::Method, "get");
    let e_ty = model.param_type(e);
    model.set_type(source_get, e_ty);
    model.add_param_list(source_get, Vec::new());
    model.add_flags(source_get, DeclFlags::SHARED | DeclFlags::FORMAL);

    let names = model.declare(DeclKind::Interface, "demo", "Names");
    let of_string = model.nominal(source, vec![b.string_ty]);
    model.add_satisfied(names, of_string);
    let things = model.declare(DeclKind::Interface, "demo", "Things");
    let of_identifiable = model.nominal(source, vec![b.identifiable_ty]);
    model.add_satisfied(things, of_identifiable);

    let class = model.declare(DeclKind::Class, "demo", "Impl");
    model.set_extended(class, b.object_ty);
    let names_ty = model.nominal(names, vec![]);
    let things_ty = model.nominal(things, vec![]);
    if things_first {
        model.add_satisfied(class, things_ty);
        model.add_satisfied(class, names_ty);
    } else {
        model.add_satisfied(class, names_ty);
        model.add_satisfied(class, things_ty);
    }
    let get = model.declare_member(class, DeclKind::Method, "get");
    model.set_type(get, own);
    model.add_param_list(get, Vec::new());
    model.set_refined(get, source_get);
    model.add_flags(get, DeclFlags::SHARED | DeclFlags::ACTUAL);

    let text = Expr::new(ExprKind::String(model.intern("impl")), b.string_ty).unboxed();
    FunctionDef {
        decl: get,
        body: Block::new(vec![Stmt::new(StmtKind::Return(Some(text)))]),
    }
}

#[test]
fn erased_override_takes_the_precise_inherited_result() {
    let mut p = Program::new();
    let identifiable = p.builtins().identifiable_ty;
    let def = diamond(&mut p, identifiable, false);
    let methods = p.lower_clean(&[def]);
    assert_eq!(
        p.render(&methods[0]),
        "public java.lang.String get() {\n    return \"impl\";\n}"
    );
    let mut machine = Machine::new(&p.model, methods);
    assert_eq!(machine.call("get", Vec::new()), Value::str("impl"));
}

#[test]
fn precise_override_keeps_its_own_result() {
    let mut p = Program::new();
    let string = p.builtins().string_ty;
    let def = diamond(&mut p, string, false);
    let methods = p.lower_clean(&[def]);
    assert_eq!(
        p.render(&methods[0]),
        "public java.lang.String get() {\n    return \"impl\";\n}"
    );
}

#[test]
fn erased_override_inherited_erased_first_still_takes_the_precise_result() {
    let mut p = Program::new();
    let identifiable = p.builtins().identifiable_ty;
    let def = diamond(&mut p, identifiable, true);
    let methods = p.lower_clean(&[def]);
    assert_eq!(
        p.render(&methods[0]),
        "public java.lang.String get() {\n    return \"impl\";\n}"
    );
}
