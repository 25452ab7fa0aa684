//! Type lowering: semantic types to target type expressions.
//!
//! A single entry point, [`Lowerer::lower_type`], decides for every type
//! occurrence how it is represented on the target: erased to the root
//! object, mapped to a primitive, or emitted as a (possibly nested,
//! possibly raw) generic class type. The [`TypeContext`] says where the
//! type will appear and drives every choice.
//!
//! The rules, in order:
//!
//! 1. `RAW_TP_BOUND` replaces a type parameter by its first bound.
//! 2. Erasure: `Void`, `Object`, `Nothing`, `Identifiable`,
//!    `IdentifiableObject`, `Bottom` and shapeless unions/intersections
//!    lower to the root object (or to nothing in `SATISFIES`). Unions with
//!    an iterable shape lower to that `Iterable<E>`.
//! 3. The base exception type maps to a context-specific platform class.
//! 4. Basic types map to primitives where the context allows them.
//! 5. Everything else is emitted through its qualifying chain, with type
//!    arguments projected by [`args`].

mod args;
mod context;
mod erasure;
pub mod params;

use smallvec::SmallVec;
use tracing::trace;
use vela_target::{JType, Primitive};
use vela_types::{Idx, Repr, TypeKind};

use crate::abi::{
    ABSTRACT_CALLABLE, PLATFORM_EXCEPTION, PLATFORM_OBJECT, PLATFORM_STRING, PLATFORM_THROWABLE,
    RUNTIME_EXCEPTION,
};
use crate::naming::DeclNameFlags;
use crate::Lowerer;

pub use context::TypeContext;

/// A qualifying chain is rarely more than a couple of segments deep.
type Chain = SmallVec<[Idx; 4]>;

impl Lowerer<'_> {
    /// Lower `ty` for a position described by `ctx`.
    ///
    /// Returns `None` only in `SATISFIES` context for a type that erases to
    /// the root object: the supertype is omitted.
    pub fn lower_type(&mut self, ty: Idx, ctx: TypeContext) -> Option<JType> {
        let ctx = if self.config.small_integers {
            ctx | TypeContext::SMALL
        } else {
            ctx
        };
        crate::stack::ensure_sufficient_stack(|| self.lower_type_inner(ty, ctx))
    }

    /// [`lower_type`](Self::lower_type) for positions that always need a
    /// type. An omitted supertype reads as the root object.
    pub fn lower(&mut self, ty: Idx, ctx: TypeContext) -> JType {
        match self.lower_type(ty, ctx) {
            Some(jt) => jt,
            None => self.class(PLATFORM_OBJECT),
        }
    }

    fn lower_type_inner(&mut self, ty: Idx, ctx: TypeContext) -> Option<JType> {
        let model = self.model;
        let b = model.builtins();
        let mut ty = self.collapse_singleton(ty);

        if ty == Idx::ERROR {
            return Some(JType::Erroneous);
        }

        if ctx.resolves_bound() {
            if let TypeKind::Param(param) = model.kind(ty) {
                ty = model.first_bound(param).unwrap_or(b.object_ty);
            }
        }

        if self.erases_to_object(ty) {
            if ctx.contains(TypeContext::SATISFIES) {
                trace!(ty = %model.display(ty), "erased supertype omitted");
                return None;
            }
            trace!(ty = %model.display(ty), "erased to object");
            return Some(self.class(PLATFORM_OBJECT));
        }

        if self.is_union_or_intersection(self.simplify(ty)) {
            // Only unions and intersections with an iterable shape survive
            // erasure.
            if let Some(shape) = self.iterable_shape(ty) {
                trace!(ty = %model.display(ty), shape = %model.display(shape), "lowered to iterable shape");
                ty = shape;
            }
        } else if self.erases_to_exception(ty) {
            let class = if ctx.intersects(TypeContext::CLASS_NEW | TypeContext::EXTENDS) {
                RUNTIME_EXCEPTION
            } else if ctx.contains(TypeContext::CATCH) {
                PLATFORM_EXCEPTION
            } else {
                PLATFORM_THROWABLE
            };
            return Some(self.class(class));
        } else if ctx.allows_primitives()
            && (!model.is_optional(ty) || self.is_platform_string(ty))
        {
            if let Some(jt) = self.primitive(ty, ctx) {
                return Some(jt);
            }
        } else if self.is_boolean(ty) && !self.is_type_parameter(ty) {
            ty = b.boolean_ty;
        }

        Some(self.class_type(ty, ctx))
    }

    /// The platform type of a basic type in a primitive-friendly position.
    fn primitive(&self, ty: Idx, ctx: TypeContext) -> Option<JType> {
        let repr = self.model.repr(ty);
        let small = ctx.contains(TypeContext::SMALL);
        let prim = if self.is_string(ty) || self.is_platform_string(ty) {
            return Some(self.class(PLATFORM_STRING));
        } else if self.is_boolean(ty) {
            Primitive::Boolean
        } else if self.is_integer(ty) {
            match repr {
                Some(Repr::Byte) => Primitive::Byte,
                Some(Repr::Short) => Primitive::Short,
                Some(Repr::Int) => Primitive::Int,
                _ if small => Primitive::Int,
                _ => Primitive::Long,
            }
        } else if self.is_float(ty) {
            match repr {
                Some(Repr::Float) => Primitive::Float,
                _ if small => Primitive::Float,
                _ => Primitive::Double,
            }
        } else if self.is_character(ty) {
            match repr {
                Some(Repr::Char) => Primitive::Char,
                _ => Primitive::Int,
            }
        } else {
            return None;
        };
        Some(JType::Primitive(prim))
    }

    /// A class, interface or type parameter type, emitted segment by
    /// segment through its qualifying chain.
    fn class_type(&mut self, ty: Idx, ctx: TypeContext) -> JType {
        let model = self.model;
        let simple = self.simplify(ty);

        let mut chain = Chain::new();
        let mut has_type_args = false;
        let mut cursor = Some(simple);
        while let Some(segment) = cursor {
            match model.kind(segment) {
                TypeKind::Nominal(nominal) => {
                    has_type_args |= !nominal.args.is_empty();
                    chain.push(segment);
                    cursor = nominal.qualifying;
                }
                _ => {
                    chain.push(segment);
                    cursor = None;
                }
            }
        }

        // Segments outward of the innermost static one carry no arguments.
        let mut first_with_args = chain.len() - 1;
        for &segment in &chain {
            let is_static = model
                .nominal_decl(segment)
                .is_some_and(|d| model.decl(d).is_static());
            if is_static {
                break;
            }
            first_with_args = first_with_args.saturating_sub(1);
        }
        chain.reverse();

        if !ctx.contains(TypeContext::RAW) && has_type_args {
            let innermost = model.nominal_decl(simple);
            let lifted_interface = chain.len() > 1
                && innermost.is_some_and(|d| model.decl(d).is_interface());
            if lifted_interface {
                return self.lifted_interface_type(simple, &chain, ctx);
            }
            if !ctx.contains(TypeContext::NON_QUALIFIED) {
                let mut jt = JType::Erroneous;
                for (index, &segment) in chain.iter().enumerate() {
                    jt = self.parameterised_segment(segment, simple, ctx, jt, &chain, first_with_args, index);
                }
                return jt;
            }
            let single: Chain = SmallVec::from_slice(&[simple]);
            return self.parameterised_segment(simple, simple, ctx, JType::Erroneous, &single, 0, 0);
        }

        match model.kind(simple) {
            TypeKind::Param(param) => JType::Var(model.type_param(param).name),
            TypeKind::Nominal(nominal) => {
                let primitive_ok = !ctx.intersects(TypeContext::SATISFIES | TypeContext::NO_PRIMITIVES);
                if primitive_ok && nominal.repr == Some(Repr::PlatformString) {
                    self.class(PLATFORM_STRING)
                } else {
                    let name = self.naming.declaration_name(model, nominal.decl, decl_name_flags(ctx));
                    JType::Class(name)
                }
            }
            // Unions and intersections only get here with an iterable shape,
            // which is nominal; anything else has no representation.
            TypeKind::Union(_) | TypeKind::Intersection(_) | TypeKind::Bottom | TypeKind::Error => {
                JType::Erroneous
            }
        }
    }

    /// A member interface lifted to the top level: every segment's type
    /// parameters flattened onto `pkg.Outer$Inner`.
    fn lifted_interface_type(&mut self, simple: Idx, chain: &[Idx], ctx: TypeContext) -> JType {
        let model = self.model;
        let mut params = Vec::new();
        let mut args = Vec::new();
        for &segment in chain {
            if let TypeKind::Nominal(nominal) = model.kind(segment) {
                let decl_params = &model.decl(nominal.decl).type_params;
                for (i, &param) in decl_params.iter().enumerate() {
                    params.push(param);
                    args.push(nominal.args.get(i).copied());
                }
            }
        }
        let is_callable = self.is_callable(simple);
        let type_args = self.make_type_args(is_callable, ctx, simple, &params, &args);
        let base = match model.nominal_decl(simple) {
            Some(_) if is_callable && ctx.contains(TypeContext::CLASS_NEW) => {
                self.class(ABSTRACT_CALLABLE)
            }
            Some(decl) => JType::Class(self.naming.declaration_name(model, decl, DeclNameFlags::QUALIFIED)),
            None => JType::Erroneous,
        };
        JType::apply(base, type_args.unwrap_or_default())
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the chain walk state")]
    fn parameterised_segment(
        &mut self,
        segment: Idx,
        general: Idx,
        ctx: TypeContext,
        outer: JType,
        chain: &[Idx],
        first_with_args: usize,
        index: usize,
    ) -> JType {
        let model = self.model;
        let TypeKind::Nominal(nominal) = model.kind(segment) else {
            return JType::Erroneous;
        };
        let decl = model.decl(nominal.decl);
        let type_args = if index >= first_with_args {
            let params = &decl.type_params;
            let args: Vec<Option<Idx>> = (0..params.len()).map(|i| nominal.args.get(i).copied()).collect();
            let is_callable = self.is_callable(segment);
            self.make_type_args(is_callable, ctx, segment, params, &args)
        } else {
            None
        };

        let base = if self.is_callable(general) && ctx.contains(TypeContext::CLASS_NEW) {
            self.class(ABSTRACT_CALLABLE)
        } else if index == 0 {
            if decl.is_interface() && chain.len() > 1 && first_with_args == 0 {
                JType::Class(self.naming.companion_name(model, nominal.decl))
            } else {
                JType::Class(self.naming.declaration_name(model, nominal.decl, decl_name_flags(ctx)))
            }
        } else {
            let mut flags = decl_name_flags(ctx | TypeContext::NON_QUALIFIED);
            if decl.is_interface() {
                flags |= DeclNameFlags::COMPANION;
            }
            JType::Member {
                outer: Box::new(outer),
                name: self.naming.declaration_name(model, nominal.decl, flags),
            }
        };
        JType::apply(base, type_args.unwrap_or_default())
    }
}

/// Declaration-name spelling for a type context.
fn decl_name_flags(ctx: TypeContext) -> DeclNameFlags {
    let mut flags = DeclNameFlags::empty();
    if ctx.contains(TypeContext::COMPANION) {
        flags |= DeclNameFlags::COMPANION;
    }
    if !ctx.contains(TypeContext::NON_QUALIFIED) {
        flags |= DeclNameFlags::QUALIFIED;
    }
    flags
}
