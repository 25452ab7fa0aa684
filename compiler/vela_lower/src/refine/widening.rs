//! The widening predicate.
//!
//! A refinement widens when its target type is less precise than the
//! refined member's: it erases to the root object where the refined type
//! does not, at the top level or in any type argument.

use vela_types::{Idx, TypeKind, TypeParamId};

use crate::Lowerer;

impl Lowerer<'_> {
    /// `decl_ty` widens `refined_ty`.
    pub fn is_widening(&self, decl_ty: Idx, refined_ty: Idx) -> bool {
        decl_ty != self.model.builtins().object_ty
            && self.erases_to_object(decl_ty)
            && !self.erases_to_object(refined_ty)
    }

    /// Whether any type argument of `decl_ty` widens the corresponding
    /// argument of `refined_ty`, at any depth.
    ///
    /// With `allow_subtypes`, `decl_ty` is first seen as the supertype
    /// instantiation of `refined_ty`'s declaration.
    pub fn is_widening_type_arguments(
        &self,
        decl_ty: Idx,
        refined_ty: Idx,
        allow_subtypes: bool,
    ) -> bool {
        let model = self.model;
        if let (TypeKind::Param(a), TypeKind::Param(b)) = (model.kind(decl_ty), model.kind(refined_ty)) {
            return !self.have_same_bounds(a, b);
        }

        let mut decl_ty = decl_ty;
        let mut refined_ty = refined_ty;
        if allow_subtypes {
            if self.erases_to_object(refined_ty) && !self.erases_to_object(decl_ty) {
                return false;
            }
            if decl_ty != refined_ty {
                refined_ty = model.definite(refined_ty);
                let Some(target) = model.nominal_decl(refined_ty) else {
                    return true;
                };
                match model.supertype(decl_ty, target) {
                    Some(sup) => decl_ty = sup,
                    None => return true,
                }
            }
        }

        let args = model.substitution(decl_ty);
        let refined_args = model.substitution(refined_ty);
        let mut pairs: Vec<(TypeParamId, Idx)> = args.into_iter().collect();
        pairs.sort_unstable();
        pairs.into_iter().any(|(param, arg)| {
            match refined_args.get(&param) {
                None => true,
                Some(&refined_arg) => {
                    self.is_widening(arg, refined_arg)
                        || self.is_widening_type_arguments(arg, refined_arg, false)
                }
            }
        })
    }

    /// Whether two type parameters have the same bounds, in any order.
    pub fn have_same_bounds(&self, a: TypeParamId, b: TypeParamId) -> bool {
        let a = &self.model.type_param(a).bounds;
        let mut remaining = self.model.type_param(b).bounds.clone();
        if a.len() != remaining.len() {
            return false;
        }
        for bound in a {
            match remaining.iter().position(|r| r == bound) {
                Some(i) => {
                    remaining.swap_remove(i);
                }
                None => return false,
            }
        }
        true
    }
}
