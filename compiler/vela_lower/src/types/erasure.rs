//! Type simplification and erasure classification.

use vela_types::{Idx, Repr, TypeKind};

use crate::Lowerer;

impl Lowerer<'_> {
    /// Canonical form used by every erasure decision.
    ///
    /// `T?` becomes its definite type without representation hint, a
    /// one-member union or intersection becomes its member, and `T&Object`
    /// becomes `T`.
    pub fn simplify(&self, ty: Idx) -> Idx {
        let model = self.model;
        let ty = if model.is_optional(ty) {
            model.definite(ty)
        } else {
            ty
        };
        let ty = self.collapse_singleton(ty);
        match model.kind(ty) {
            TypeKind::Intersection(bounds) => match bounds.as_slice() {
                [param, object]
                    if model.is_type_param(*param) && *object == model.builtins().object_ty =>
                {
                    *param
                }
                _ => ty,
            },
            _ => ty,
        }
    }

    /// The sole member of a one-case union or one-bound intersection.
    pub fn collapse_singleton(&self, ty: Idx) -> Idx {
        match self.model.kind(ty) {
            TypeKind::Union(members) | TypeKind::Intersection(members) if members.len() == 1 => {
                members[0]
            }
            _ => ty,
        }
    }

    /// Whether `ty` lowers to the platform root object.
    ///
    /// Unions and intersections with a common nonempty `Iterable` shape are
    /// excluded; they lower to that shape instead.
    pub fn erases_to_object(&self, ty: Idx) -> bool {
        let simple = self.simplify(ty);
        let b = self.model.builtins();
        match self.model.kind(simple) {
            TypeKind::Nominal(nominal) => {
                nominal.qualifying.is_none()
                    && nominal.args.is_empty()
                    && [
                        b.void,
                        b.object,
                        b.nothing,
                        b.identifiable_object,
                        b.identifiable,
                    ]
                    .contains(&nominal.decl)
            }
            TypeKind::Bottom => true,
            TypeKind::Union(_) | TypeKind::Intersection(_) => self.iterable_shape(simple).is_none(),
            TypeKind::Param(_) | TypeKind::Error => false,
        }
    }

    /// Whether `ty` is exactly the base exception type.
    pub fn erases_to_exception(&self, ty: Idx) -> bool {
        let simple = self.model.pool().without_repr(self.simplify(ty));
        simple == self.model.builtins().exception_ty
    }

    /// The `Iterable<E>` that the definite form of `ty` satisfies, for a
    /// non-`Bottom` element.
    pub fn iterable_shape(&self, ty: Idx) -> Option<Idx> {
        self.model.nonempty_iterable(self.model.definite(ty))
    }

    // ── Basic types ─────────────────────────────────────────────────────

    fn is_exactly(&self, ty: Idx, expected: Idx) -> bool {
        self.model.pool().without_repr(ty) == expected
    }

    pub fn is_string(&self, ty: Idx) -> bool {
        self.is_exactly(ty, self.model.builtins().string_ty)
    }

    pub fn is_integer(&self, ty: Idx) -> bool {
        self.is_exactly(ty, self.model.builtins().integer_ty)
    }

    pub fn is_float(&self, ty: Idx) -> bool {
        self.is_exactly(ty, self.model.builtins().float_ty)
    }

    pub fn is_character(&self, ty: Idx) -> bool {
        self.is_exactly(ty, self.model.builtins().character_ty)
    }

    pub fn is_object(&self, ty: Idx) -> bool {
        self.is_exactly(ty, self.model.builtins().object_ty)
    }

    /// `Boolean` or one of its cases, but never `Bottom`.
    pub fn is_boolean(&self, ty: Idx) -> bool {
        ty != Idx::BOTTOM && self.model.is_subtype_of_decl(ty, self.model.builtins().boolean)
    }

    pub fn is_basic(&self, ty: Idx) -> bool {
        self.is_string(ty)
            || self.is_boolean(ty)
            || self.is_integer(ty)
            || self.is_float(ty)
            || self.is_character(ty)
    }

    /// A `String`, possibly optional, that stays a platform string.
    pub fn is_platform_string(&self, ty: Idx) -> bool {
        self.model.repr(self.model.non_null(ty)) == Some(Repr::PlatformString)
    }

    /// Whether `ty` is a type parameter, also when optional.
    pub fn is_type_parameter(&self, ty: Idx) -> bool {
        self.model.is_type_param(self.model.non_null(ty))
    }

    pub fn is_array(&self, ty: Idx) -> bool {
        ty != Idx::BOTTOM && self.model.is_subtype_of_decl(ty, self.model.builtins().array)
    }

    pub fn is_callable(&self, ty: Idx) -> bool {
        self.model.is_decl(ty, self.model.builtins().callable)
    }

    pub fn is_union_or_intersection(&self, ty: Idx) -> bool {
        matches!(
            self.model.kind(ty),
            TypeKind::Union(_) | TypeKind::Intersection(_)
        )
    }
}
