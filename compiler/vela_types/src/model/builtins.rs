//! The `vela.language` module every model starts with.

use crate::{DeclFlags, DeclId, DeclKind, Idx, Model, Variance};

/// Package of the language module.
pub const LANGUAGE_PACKAGE: &str = "vela.language";

/// Well-known language declarations and their (non-generic) types.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builtins {
    pub void: DeclId,
    pub object: DeclId,
    pub nothing: DeclId,
    pub identifiable: DeclId,
    pub identifiable_object: DeclId,
    pub exception: DeclId,
    pub boolean: DeclId,
    pub true_object: DeclId,
    pub false_object: DeclId,
    pub string: DeclId,
    pub integer: DeclId,
    pub float: DeclId,
    pub character: DeclId,
    pub iterable: DeclId,
    pub iterator: DeclId,
    pub fixed_sized: DeclId,
    pub sequence: DeclId,
    pub empty: DeclId,
    pub entry: DeclId,
    pub callable: DeclId,
    pub array: DeclId,
    pub array_sequence: DeclId,

    pub void_ty: Idx,
    pub object_ty: Idx,
    pub nothing_ty: Idx,
    pub identifiable_ty: Idx,
    pub identifiable_object_ty: Idx,
    pub exception_ty: Idx,
    pub boolean_ty: Idx,
    pub true_ty: Idx,
    pub false_ty: Idx,
    pub string_ty: Idx,
    pub integer_ty: Idx,
    pub float_ty: Idx,
    pub character_ty: Idx,
    pub empty_ty: Idx,
}

fn class(model: &mut Model, name: &str, extended: Option<Idx>) -> (DeclId, Idx) {
    let decl = model.declare(DeclKind::Class, LANGUAGE_PACKAGE, name);
    if let Some(ext) = extended {
        model.set_extended(decl, ext);
    }
    model.add_flags(decl, DeclFlags::SHARED);
    (decl, model.nominal(decl, vec![]))
}

/// Declare an interface with a single `out Element` parameter; returns the
/// declaration and the parameter's type.
fn element_interface(model: &mut Model, name: &str) -> (DeclId, Idx) {
    let decl = model.declare(DeclKind::Interface, LANGUAGE_PACKAGE, name);
    model.add_flags(decl, DeclFlags::SHARED);
    let element = model.add_type_param(decl, "Element", Variance::Covariant);
    (decl, model.param_type(element))
}

pub(super) fn declare_language_module(model: &mut Model) -> Builtins {
    let (void, void_ty) = class(model, "Void", None);
    model.add_flags(void, DeclFlags::ABSTRACT);
    let (object, object_ty) = class(model, "Object", Some(void_ty));
    model.add_flags(object, DeclFlags::ABSTRACT);
    let (nothing, nothing_ty) = class(model, "Nothing", Some(void_ty));

    let identifiable = model.declare(DeclKind::Interface, LANGUAGE_PACKAGE, "Identifiable");
    model.add_flags(identifiable, DeclFlags::SHARED);
    let identifiable_ty = model.nominal(identifiable, vec![]);
    let (identifiable_object, identifiable_object_ty) =
        class(model, "IdentifiableObject", Some(object_ty));
    model.add_satisfied(identifiable_object, identifiable_ty);

    let (exception, exception_ty) = class(model, "Exception", Some(identifiable_object_ty));

    let (boolean, boolean_ty) = class(model, "Boolean", Some(identifiable_object_ty));
    model.add_flags(boolean, DeclFlags::ABSTRACT);
    let true_object = model.declare(DeclKind::Object, LANGUAGE_PACKAGE, "true");
    model.set_extended(true_object, boolean_ty);
    let false_object = model.declare(DeclKind::Object, LANGUAGE_PACKAGE, "false");
    model.set_extended(false_object, boolean_ty);
    let true_ty = model.nominal(true_object, vec![]);
    let false_ty = model.nominal(false_object, vec![]);

    let (string, string_ty) = class(model, "String", Some(object_ty));
    let (integer, integer_ty) = class(model, "Integer", Some(object_ty));
    let (float, float_ty) = class(model, "Float", Some(object_ty));
    let (character, character_ty) = class(model, "Character", Some(object_ty));

    let (iterable, _) = element_interface(model, "Iterable");
    let (iterator, _) = element_interface(model, "Iterator");

    let (fixed_sized, fixed_element) = element_interface(model, "FixedSized");
    let iterable_of_fixed = model.nominal(iterable, vec![fixed_element]);
    model.add_satisfied(fixed_sized, iterable_of_fixed);

    let (sequence, sequence_element) = element_interface(model, "Sequence");
    let fixed_of_sequence = model.nominal(fixed_sized, vec![sequence_element]);
    model.add_satisfied(sequence, fixed_of_sequence);

    let empty = model.declare(DeclKind::Interface, LANGUAGE_PACKAGE, "Empty");
    model.add_flags(empty, DeclFlags::SHARED);
    let fixed_of_bottom = model.nominal(fixed_sized, vec![Idx::BOTTOM]);
    model.add_satisfied(empty, fixed_of_bottom);
    let empty_ty = model.nominal(empty, vec![]);

    let (entry, _) = class(model, "Entry", Some(object_ty));
    let key = model.add_type_param(entry, "Key", Variance::Covariant);
    let item = model.add_type_param(entry, "Item", Variance::Covariant);
    model.set_bounds(key, vec![object_ty]);
    model.set_bounds(item, vec![object_ty]);

    let callable = model.declare(DeclKind::Interface, LANGUAGE_PACKAGE, "Callable");
    model.add_flags(callable, DeclFlags::SHARED);
    model.add_type_param(callable, "Return", Variance::Covariant);
    let arguments = model.add_type_param(callable, "Arguments", Variance::Contravariant);
    model.set_sequenced(arguments);

    let (array, _) = class(model, "Array", Some(object_ty));
    let array_element = model.add_type_param(array, "Element", Variance::Invariant);
    let array_element_ty = model.param_type(array_element);
    let fixed_of_array = model.nominal(fixed_sized, vec![array_element_ty]);
    model.add_satisfied(array, fixed_of_array);

    let (array_sequence, _) = class(model, "ArraySequence", Some(object_ty));
    let array_sequence_element =
        model.add_type_param(array_sequence, "Element", Variance::Covariant);
    let array_sequence_element_ty = model.param_type(array_sequence_element);
    let sequence_of_array = model.nominal(sequence, vec![array_sequence_element_ty]);
    model.add_satisfied(array_sequence, sequence_of_array);

    Builtins {
        void,
        object,
        nothing,
        identifiable,
        identifiable_object,
        exception,
        boolean,
        true_object,
        false_object,
        string,
        integer,
        float,
        character,
        iterable,
        iterator,
        fixed_sized,
        sequence,
        empty,
        entry,
        callable,
        array,
        array_sequence,
        void_ty,
        object_ty,
        nothing_ty,
        identifiable_ty,
        identifiable_object_ty,
        exception_ty,
        boolean_ty,
        true_ty,
        false_ty,
        string_ty,
        integer_ty,
        float_ty,
        character_ty,
        empty_ty,
    }
}
