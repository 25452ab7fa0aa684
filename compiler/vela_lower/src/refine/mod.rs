//! Refinement resolution.
//!
//! A member that refines declarations inherited through several supertypes
//! must be emitted with a signature that does not widen any of them. The
//! topmost refined declaration (the "model" refined declaration) is the
//! naive answer; it is wrong when the same member is inherited with
//! different instantiations, some erasing to the root object and some not.
//!
//! [`Lowerer::refined_reference`] picks the candidate to use, and
//! [`Lowerer::non_widening_reference`] decides whether the override
//! signature should come from it or from the member itself.

mod widening;

use rustc_hash::FxHashSet;
use tracing::trace;
use vela_types::{DeclId, Idx, TypeKind, TypedRef};

use crate::Lowerer;

impl Lowerer<'_> {
    /// The reference a member's signature should be checked against, or
    /// `None` when it refines nothing.
    pub fn refined_reference(&self, reference: TypedRef) -> Option<TypedRef> {
        let model = self.model;
        let decl = model.decl(reference.decl);
        let model_refined = decl.refined.unwrap_or(reference.decl);
        if model_refined == reference.decl {
            return None;
        }
        let qualifying = reference.qualifying?;

        let declaring = decl
            .container
            .filter(|&c| model.decl(c).is_class_or_interface());
        let ref_ty = model.ref_type(reference);
        if let Some(declaring) = declaring {
            if self.erases_to_object(ref_ty) && !self.is_type_parameter(ref_ty) {
                let candidates = self.refined_members(declaring, decl.name);
                if candidates.len() > 1 {
                    if let Some(chosen) = self.pick_candidate(qualifying, declaring, model_refined, &candidates) {
                        trace!(
                            member = %model.qualified_name(reference.decl),
                            refined = %model.qualified_name(chosen.decl),
                            "multiply inherited member refined"
                        );
                        return Some(chosen);
                    }
                }
            }
        }
        Some(model.member_ref(qualifying, model_refined))
    }

    fn pick_candidate(
        &self,
        qualifying: Idx,
        declaring: DeclId,
        model_refined: DeclId,
        candidates: &[DeclId],
    ) -> Option<TypedRef> {
        let model = self.model;
        let refs: Vec<TypedRef> = candidates
            .iter()
            .map(|&c| model.member_ref(qualifying, c))
            .collect();

        // A type parameter left uninstantiated refines the root object on
        // the target, but not the other way around.
        if let Some(&r) = refs.iter().find(|&&r| self.is_type_parameter(model.ref_type(r))) {
            return Some(r);
        }
        if let Some(&r) = refs.iter().find(|&&r| !self.erases_to_object(model.ref_type(r))) {
            return Some(r);
        }

        // Inherited twice through different instantiations of one supertype.
        let refined_ty = model.decl(model_refined).ty?;
        if !model.is_type_param(refined_ty) {
            return None;
        }
        let data = model.decl(declaring);
        data.extended
            .iter()
            .chain(&data.satisfied)
            .map(|&sup| model.member_ref(sup, model_refined))
            .find(|&r| {
                let ty = model.ref_type(r);
                !self.is_type_parameter(ty) && !self.erases_to_object(ty)
            })
    }

    /// Members named `name` declared by `decl` or any of its supertypes,
    /// deduplicated, in depth-first order: extended type, satisfied types,
    /// then the declaration itself.
    pub fn refined_members(&self, decl: DeclId, name: vela_ir::Name) -> Vec<DeclId> {
        let mut visited = FxHashSet::default();
        let mut found = Vec::new();
        self.collect_refined_members(decl, name, &mut visited, &mut found);
        found
    }

    fn collect_refined_members(
        &self,
        decl: DeclId,
        name: vela_ir::Name,
        visited: &mut FxHashSet<DeclId>,
        found: &mut Vec<DeclId>,
    ) {
        if !visited.insert(decl) {
            return;
        }
        let model = self.model;
        let data = model.decl(decl);
        for &sup in data.extended.iter().chain(&data.satisfied) {
            if let Some(sup_decl) = model.nominal_decl(sup) {
                self.collect_refined_members(sup_decl, name, visited, found);
            }
        }
        if let Some(member) = model.direct_member(decl, name) {
            if !found.contains(&member) {
                found.push(member);
            }
        }
    }

    /// The reference to take a member's override signature from.
    ///
    /// That is the refined reference when the member's own type would widen
    /// it, directly or in a type argument. Otherwise it is the member itself.
    pub fn non_widening_reference(&self, reference: TypedRef) -> TypedRef {
        let Some(refined) = self.refined_reference(reference) else {
            return reference;
        };
        let model = self.model;
        let decl_ty = model.ref_type(reference);
        let mut refined_ty = model.ref_type(refined);

        let mut widening = self.is_widening(decl_ty, refined_ty);
        if !widening {
            if model.is_type_param(refined_ty) && !model.is_type_param(decl_ty) {
                refined_ty = self.non_widening_type(reference, refined);
            }
            widening = self.is_widening_type_arguments(decl_ty, refined_ty, true);
        }
        if widening {
            refined
        } else {
            reference
        }
    }

    /// The type to compare a member against its refined member with. A
    /// refined type that is a method-level type parameter says nothing about
    /// the member, so the member's own type is used.
    pub fn non_widening_type(&self, reference: TypedRef, refined: TypedRef) -> Idx {
        let model = self.model;
        let decl_ty = model.ref_type(reference);
        if reference == refined {
            return decl_ty;
        }
        let refined_ty = model.ref_type(refined);
        if let TypeKind::Param(param) = model.kind(refined_ty) {
            if model.decl(model.type_param(param).owner).is_method() {
                return decl_ty;
            }
        }
        refined_ty
    }

    /// The member as seen through its container's own declared type.
    pub fn typed_reference(&self, decl: DeclId) -> TypedRef {
        let model = self.model;
        match model.decl(decl).container {
            Some(container) if model.decl(container).is_class_or_interface() => {
                model.member_ref(model.declared_type(container), decl)
            }
            _ => TypedRef {
                decl,
                qualifying: None,
            },
        }
    }
}
