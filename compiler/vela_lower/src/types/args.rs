//! Type-argument projection.
//!
//! Declaration-site variance becomes use-site wildcards; arguments the
//! target cannot express become wildcards, bounds, or force the whole type
//! raw.

use tracing::warn;
use vela_target::{JType, Wildcard};
use vela_types::{Idx, TypeParamId, Variance};

use crate::abi::PLATFORM_OBJECT;
use crate::{LowerProblem, Lowerer, TypeContext};

impl Lowerer<'_> {
    /// Project the arguments of `owner` for its type parameters `params`.
    ///
    /// `args[i]` is the argument for `params[i]`, `None` when the type is
    /// missing one. Returns `None` when the enclosing type must be emitted
    /// raw.
    pub(crate) fn make_type_args(
        &mut self,
        is_callable: bool,
        ctx: TypeContext,
        owner: Idx,
        params: &[TypeParamId],
        args: &[Option<Idx>],
    ) -> Option<Vec<JType>> {
        let model = self.model;
        let b = model.builtins();
        let mut out = Vec::with_capacity(params.len());

        for (i, &param) in params.iter().enumerate() {
            // The runtime callable only has a return type parameter.
            if i > 0 && is_callable {
                break;
            }
            let data = model.type_param(param);
            let Some(ta) = args.get(i).copied().flatten() else {
                warn!(
                    ty = %model.display(owner),
                    param = model.str(data.name),
                    "missing type argument"
                );
                self.problem(LowerProblem::MissingTypeArgument {
                    ty: owner,
                    param: data.name,
                    span: self.ctx.span,
                });
                out.push(JType::Erroneous);
                continue;
            };

            let mut ta = self.collapse_singleton(ta);
            if ta != b.void_ty && model.is_optional(ta) {
                ta = model.non_null(ta);
            }
            if self.is_union_or_intersection(ta) {
                match self.iterable_shape(ta) {
                    Some(shape) => ta = shape,
                    None if ctx.contains(TypeContext::CLASS_NEW) || !ctx.nests_arguments() => {
                        return None;
                    }
                    None => {}
                }
            }
            if self.is_boolean(ta) && !self.is_type_parameter(ta) {
                ta = b.boolean_ty;
            }

            let jta = if ta == b.void_ty {
                if ctx.in_supertype_clause() {
                    self.class(PLATFORM_OBJECT)
                } else {
                    match data.variance {
                        Variance::Covariant => JType::Wildcard(Wildcard::Unbounded),
                        Variance::Contravariant | Variance::Invariant => self.class(PLATFORM_OBJECT),
                    }
                }
            } else if ta == Idx::BOTTOM
                || (ctx.nests_arguments() && self.is_union_or_intersection(ta))
            {
                if ctx.contains(TypeContext::CLASS_NEW) {
                    return None;
                }
                if ctx.in_supertype_clause() {
                    match data.bounds.first() {
                        Some(&bound) if ta != Idx::BOTTOM => {
                            self.lower(bound, TypeContext::TYPE_ARGUMENT)
                        }
                        _ => self.class(PLATFORM_OBJECT),
                    }
                } else if ta == Idx::BOTTOM {
                    JType::Wildcard(Wildcard::Unbounded)
                } else {
                    self.variance_wildcard(ta, data.variance, ctx)
                }
            } else if ctx.in_supertype_clause() {
                self.lower(ta, TypeContext::TYPE_ARGUMENT)
            } else {
                self.variance_wildcard(ta, data.variance, ctx)
            };
            out.push(jta);
        }
        Some(out)
    }

    /// `? extends T` / `? super T` by variance; exact when invariant or
    /// instantiated.
    fn variance_wildcard(&mut self, ta: Idx, variance: Variance, ctx: TypeContext) -> JType {
        let lowered = self.lower(ta, TypeContext::TYPE_ARGUMENT);
        if ctx.contains(TypeContext::CLASS_NEW) {
            return lowered;
        }
        match variance {
            Variance::Covariant => JType::Wildcard(Wildcard::Extends(Box::new(lowered))),
            Variance::Contravariant => JType::Wildcard(Wildcard::Super(Box::new(lowered))),
            Variance::Invariant => lowered,
        }
    }
}
