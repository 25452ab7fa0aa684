use super::*;
use crate::{DeclFlags, Repr, Tag};
use pretty_assertions::assert_eq;

/// `interface List<out E> satisfies Sequence<E>` and `class Box<T>` with a
/// member `shared T get`.
struct Fixture {
    model: Model,
    list: DeclId,
    boxed: DeclId,
    get: DeclId,
}

fn fixture() -> Fixture {
    let mut model = Model::new();
    let list = model.declare(DeclKind::Interface, "demo", "List");
    let e = model.add_type_param(list, "E", Variance::Covariant);
    let e_ty = model.param_type(e);
    let seq = model.builtins().sequence;
    let seq_e = model.nominal(seq, vec![e_ty]);
    model.add_satisfied(list, seq_e);

    let boxed = model.declare(DeclKind::Class, "demo", "Box");
    let t = model.add_type_param(boxed, "T", Variance::Invariant);
    let object_ty = model.builtins().object_ty;
    model.set_extended(boxed, object_ty);
    let get = model.declare_member(boxed, DeclKind::Attribute, "get");
    let t_ty = model.param_type(t);
    model.set_type(get, t_ty);
    model.add_flags(get, DeclFlags::SHARED);

    Fixture {
        model,
        list,
        boxed,
        get,
    }
}

// ── Language module ──────────────────────────────────────────────────────

#[test]
fn language_hierarchy() {
    let model = Model::new();
    let b = model.builtins();
    assert!(model.is_subtype_of_decl(b.integer_ty, b.object));
    assert!(model.is_subtype_of_decl(b.integer_ty, b.void));
    assert!(model.is_subtype_of_decl(b.true_ty, b.boolean));
    assert!(model.is_subtype_of_decl(b.exception_ty, b.identifiable));
    assert!(!model.is_subtype_of_decl(b.string_ty, b.iterable));
    assert!(!model.is_subtype_of_decl(b.nothing_ty, b.object));
}

#[test]
fn qualified_names() {
    let f = fixture();
    let b = f.model.builtins();
    assert_eq!(f.model.qualified_name(b.integer), "vela.language.Integer");
    assert_eq!(f.model.qualified_name(f.get), "demo.Box.get");
}

// ── Supertypes ───────────────────────────────────────────────────────────

#[test]
fn supertype_substitutes_through_chain() {
    let f = fixture();
    let m = &f.model;
    let b = m.builtins();
    let list_string = m.nominal(f.list, vec![b.string_ty]);
    let iterable = m.supertype(list_string, b.iterable);
    assert_eq!(iterable, Some(m.nominal(b.iterable, vec![b.string_ty])));
    assert_eq!(m.iterated_type(list_string), Some(b.string_ty));
}

#[test]
fn union_supertype_joins_covariantly() {
    let m = Model::new();
    let b = m.builtins();
    let seq_int = m.nominal(b.sequence, vec![b.integer_ty]);
    let possibly_empty = m.union(vec![b.empty_ty, seq_int]);
    assert_eq!(
        m.supertype(possibly_empty, b.iterable),
        Some(m.nominal(b.iterable, vec![b.integer_ty]))
    );
    assert!(m.nonempty_iterable(possibly_empty).is_some());
    assert_eq!(m.nonempty_iterable(b.empty_ty), None);
}

#[test]
fn union_supertype_requires_every_case() {
    let m = Model::new();
    let b = m.builtins();
    let seq_int = m.nominal(b.sequence, vec![b.integer_ty]);
    let mixed = m.union(vec![b.string_ty, seq_int]);
    assert_eq!(m.supertype(mixed, b.iterable), None);
}

#[test]
fn invariant_join_needs_equal_arguments() {
    let m = Model::new();
    let b = m.builtins();
    let ints = m.nominal(b.array, vec![b.integer_ty]);
    let strings = m.nominal(b.array, vec![b.string_ty]);
    let either = m.union(vec![ints, strings]);
    assert_eq!(m.supertype(either, b.array), None);
    assert_eq!(
        m.supertype(either, b.iterable),
        Some(m.nominal(
            b.iterable,
            vec![m.union(vec![b.integer_ty, b.string_ty])]
        ))
    );
}

#[test]
fn type_param_supertype_uses_bounds() {
    let mut m = Model::new();
    let f = m.declare(DeclKind::Method, "demo", "f");
    let t = m.add_type_param(f, "T", Variance::Invariant);
    let b = m.builtins().clone();
    let seq_string = m.nominal(b.sequence, vec![b.string_ty]);
    m.set_bounds(t, vec![seq_string]);
    let t_ty = m.param_type(t);
    assert_eq!(m.iterated_type(t_ty), Some(b.string_ty));
}

// ── Optional types ───────────────────────────────────────────────────────

#[test]
fn definite_strips_nothing_and_repr() {
    let m = Model::new();
    let b = m.builtins();
    let small = m.pool().with_repr(b.integer_ty, Repr::Int);
    let opt = m.optional(small);
    assert!(m.is_optional(opt));
    assert!(!m.is_optional(small));
    assert_eq!(m.definite(opt), b.integer_ty);
    assert_eq!(m.non_null(opt), small);
}

#[test]
fn definite_of_optional_param_is_intersection() {
    let mut m = Model::new();
    let f = m.declare(DeclKind::Method, "demo", "f");
    let t = m.add_type_param(f, "T", Variance::Invariant);
    let t_ty = m.param_type(t);
    let object_ty = m.builtins().object_ty;
    let def = m.definite(m.optional(t_ty));
    assert_eq!(m.pool().tag(def), Tag::Intersection);
    assert_eq!(def, m.intersection(vec![t_ty, object_ty]));
}

#[test]
fn void_is_optional_and_definite_object() {
    let m = Model::new();
    let b = m.builtins();
    assert!(m.is_optional(b.void_ty));
    assert_eq!(m.definite(b.void_ty), b.object_ty);
    assert_eq!(m.non_null(b.void_ty), b.object_ty);
    assert_eq!(m.definite(b.nothing_ty), Idx::BOTTOM);
}

// ── Members ──────────────────────────────────────────────────────────────

#[test]
fn member_reference_instantiates_type() {
    let f = fixture();
    let m = &f.model;
    let b = m.builtins();
    let box_int = m.nominal(f.boxed, vec![b.integer_ty]);
    let get = m.member_ref(box_int, f.get);
    assert_eq!(get.qualifying, Some(box_int));
    assert_eq!(m.ref_type(get), b.integer_ty);
    assert_eq!(m.direct_member(f.boxed, m.intern("get")), Some(f.get));
}

#[test]
fn declared_type_of_member_class_is_qualified() {
    let mut m = Model::new();
    let outer = m.declare(DeclKind::Class, "demo", "Outer");
    m.add_type_param(outer, "A", Variance::Invariant);
    let inner = m.declare_member(outer, DeclKind::Class, "Inner");
    let ty = m.declared_type(inner);
    assert_eq!(m.display(ty), "Outer<A>.Inner");
}

// ── Display ──────────────────────────────────────────────────────────────

#[test]
fn display_forms() {
    let m = Model::new();
    let b = m.builtins();
    let seq = m.nominal(b.sequence, vec![b.string_ty]);
    assert_eq!(m.display(seq), "Sequence<String>");
    assert_eq!(m.display(m.optional(b.integer_ty)), "Integer?");
    assert_eq!(
        m.display(m.union(vec![b.integer_ty, b.float_ty])),
        "Integer|Float"
    );
    assert_eq!(
        m.display(m.intersection(vec![b.identifiable_ty, b.object_ty])),
        "Identifiable&Object"
    );
    assert_eq!(m.display(Idx::BOTTOM), "Bottom");
    assert_eq!(
        m.display(m.callable_type(b.integer_ty, &[b.string_ty])),
        "Callable<Integer, String>"
    );
}
