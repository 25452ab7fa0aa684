//! Type parameter declarations and explicit type argument lists.

use vela_target::{JType, JTypeParam};
use vela_types::{DeclKind, Idx, TypeParamId};

use crate::{Lowerer, TypeContext};

impl Lowerer<'_> {
    /// `<T extends A & B>` for a declared type parameter.
    ///
    /// Bounds that erase to the root object are dropped. A method that
    /// refines another cannot change its type parameters' bounds on the
    /// target, so when they differ the refined method's bounds are used.
    pub fn lower_type_parameter(&mut self, param: TypeParamId) -> JTypeParam {
        let model = self.model;
        let data = model.type_param(param);
        let bounds_from = self.bounds_source(param).unwrap_or(param);
        let bounds = model
            .type_param(bounds_from)
            .bounds
            .iter()
            .copied()
            .filter(|&bound| !self.erases_to_object(bound))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|bound| self.lower(bound, TypeContext::NO_PRIMITIVES))
            .collect();
        JTypeParam {
            name: data.name,
            bounds,
        }
    }

    /// The refined method's parameter at the same position, when the bounds
    /// differ.
    fn bounds_source(&self, param: TypeParamId) -> Option<TypeParamId> {
        let model = self.model;
        let owner = model.decl(model.type_param(param).owner);
        if owner.kind != DeclKind::Method {
            return None;
        }
        let refined = model.decl(owner.refined?);
        let index = owner.type_params.iter().position(|&p| p == param)?;
        let refined_param = *refined.type_params.get(index)?;
        if refined_param == param || self.have_same_bounds(param, refined_param) {
            None
        } else {
            Some(refined_param)
        }
    }

    /// Explicit type arguments for `params`, each lowered as a type
    /// argument. A parameter without an argument stands for itself.
    pub fn lower_type_arguments(
        &mut self,
        params: &[TypeParamId],
        args: &[Idx],
    ) -> Vec<JType> {
        params
            .iter()
            .enumerate()
            .map(|(i, &param)| {
                let ty = match args.get(i) {
                    Some(&arg) => arg,
                    None => self.model.param_type(param),
                };
                self.lower(ty, TypeContext::TYPE_ARGUMENT)
            })
            .collect()
    }
}
