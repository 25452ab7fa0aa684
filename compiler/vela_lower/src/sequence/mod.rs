//! Sequence literals and sequence-to-array conversion.

use tracing::warn;
use vela_target::{JExpr, JStmt, JType, JVarDecl, Primitive};
use vela_types::{Idx, Repr};

use crate::abi::{
    EMPTY_VALUE, GET_SIZE, PLATFORM_OBJECT, TEMP, TO_ARRAY, TO_BOOLEAN_ARRAY, TO_BYTE_ARRAY,
    TO_CHAR_ARRAY, TO_DOUBLE_ARRAY, TO_FLOAT_ARRAY, TO_INT_ARRAY, TO_LONG_ARRAY,
    TO_PLATFORM_STRING_ARRAY, TO_SHORT_ARRAY, UTIL, VALUE_GETTER,
};
use crate::boxing::BoxingStrategy;
use crate::{LowerProblem, Lowerer, TypeContext};

impl Lowerer<'_> {
    /// `new ArraySequence<E>(elems...)`, with the sequence type lowered in
    /// `ctx`.
    ///
    /// `elem_types` gives the source type of each element; a lone element
    /// of type `Nothing` is cast to the root object so the constructor call
    /// is not ambiguous.
    pub fn make_sequence(
        &mut self,
        elems: Vec<JExpr>,
        elem_types: &[Idx],
        elem_type: Idx,
        ctx: TypeContext,
    ) -> JExpr {
        let model = self.model;
        let b = model.builtins();
        let seq_ty = model.nominal(b.array_sequence, vec![elem_type]);
        let class = self.lower(seq_ty, ctx);
        let args = match (elems.len(), elem_types) {
            (1, [only]) if model.is_decl(*only, b.nothing) => {
                let object = self.class(PLATFORM_OBJECT);
                elems
                    .into_iter()
                    .map(|e| JExpr::cast(object.clone(), e))
                    .collect()
            }
            _ => elems,
        };
        JExpr::New {
            class,
            args,
            body: None,
        }
    }

    /// The language's `empty` value.
    pub fn make_empty(&self) -> JExpr {
        self.static_call(EMPTY_VALUE, Vec::new(), VALUE_GETTER, Vec::new())
    }

    /// Convert a sequence to a platform array.
    ///
    /// With an `Unboxed` strategy, basic element types use the matching
    /// primitive array helper; everything else becomes an object array of
    /// the element class. `expr_type` is the static type of `expr`, used to
    /// pick the sized conversion for fixed-sized sequences.
    pub fn sequence_to_array(
        &mut self,
        expr: JExpr,
        seq_type: Idx,
        strategy: BoxingStrategy,
        expr_type: Idx,
    ) -> JExpr {
        let model = self.model;
        let element = model.iterated_type(seq_type).unwrap_or(Idx::ERROR);
        if strategy != BoxingStrategy::Unboxed {
            return self.object_array(element, expr, expr_type);
        }

        let repr = model.repr(element);
        let helper = if self.is_integer(element) {
            Some(match repr {
                Some(Repr::Byte) => TO_BYTE_ARRAY,
                Some(Repr::Short) => TO_SHORT_ARRAY,
                Some(Repr::Int) => TO_INT_ARRAY,
                _ => TO_LONG_ARRAY,
            })
        } else if self.is_float(element) {
            Some(match repr {
                Some(Repr::Float) => TO_FLOAT_ARRAY,
                _ => TO_DOUBLE_ARRAY,
            })
        } else if self.is_character(element) {
            (repr == Some(Repr::Char)).then_some(TO_CHAR_ARRAY)
        } else if self.is_boolean(element) {
            Some(TO_BOOLEAN_ARRAY)
        } else if self.is_platform_string(element) {
            Some(TO_PLATFORM_STRING_ARRAY)
        } else if self.is_string(element) {
            return self.object_array(element, expr, expr_type);
        } else {
            None
        };

        match helper {
            Some(method) => self.static_call(UTIL, Vec::new(), method, vec![expr]),
            None => {
                warn!(element = %model.display(element), "no array conversion for element type");
                self.problem(LowerProblem::UnsupportedArrayElement {
                    element,
                    span: self.ctx.span,
                });
                expr
            }
        }
    }

    fn object_array(&mut self, element: Idx, expr: JExpr, expr_type: Idx) -> JExpr {
        let model = self.model;
        if model.is_subtype_of_decl(expr_type, model.builtins().fixed_sized) {
            return self.fixed_sized_array(element, expr);
        }
        let class = self.lower(element, TypeContext::CLASS_NEW | TypeContext::NO_PRIMITIVES);
        self.static_call(UTIL, Vec::new(), TO_ARRAY, vec![expr, JExpr::ClassLiteral(class)])
    }

    /// `(let final FixedSized<E> seq$N = (FixedSized<E>) expr; in
    /// Util.<E>toArray(seq$N, new E[(int) seq$N.getSize()]))`
    fn fixed_sized_array(&mut self, element: Idx, expr: JExpr) -> JExpr {
        let model = self.model;
        let class = self.lower(element, TypeContext::CLASS_NEW | TypeContext::NO_PRIMITIVES);
        let fixed_ty = model.nominal(model.builtins().fixed_sized, vec![element]);
        let fixed = self.lower(fixed_ty, TypeContext::empty());
        let seq = self.fresh(TEMP);

        let size = JExpr::cast(
            JType::Primitive(Primitive::Int),
            self.call0(JExpr::ident(seq), GET_SIZE),
        );
        let array = JExpr::NewArray {
            element: class.clone(),
            size: Box::new(size),
        };
        let to_array = self.static_call(UTIL, vec![class], TO_ARRAY, vec![JExpr::ident(seq), array]);
        let binding = JVarDecl::final_var(seq, fixed.clone(), JExpr::cast(fixed, expr));
        JExpr::let_in(vec![JStmt::VarDef(binding)], to_array)
    }
}
