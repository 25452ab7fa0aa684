//! Boxing and unboxing of basic values.
//!
//! Basic types have two forms on the target: a raw platform value (`long`,
//! `java.lang.String`, ...) and a boxed runtime object. Expressions carry
//! which form they are in; a [`BoxingStrategy`] says which form a position
//! needs, and [`Lowerer::box_unbox_if_necessary`] converts between them.

use vela_target::{JBinOp, JExpr, JStmt, JType, JVarDecl, Literal};
use vela_types::{Idx, Repr};

use crate::abi::{
    BOX, TEMP, UNBOX_ARRAY, UNBOX_BOOLEAN, UNBOX_CHAR, UNBOX_CODE_POINT, UNBOX_FLOAT,
    UNBOX_INTEGER, UNBOX_STRING,
};
use crate::naming::DeclNameFlags;
use crate::{Lowerer, TypeContext};

/// Which form a position needs a value in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoxingStrategy {
    /// The raw platform value.
    Unboxed,
    /// The runtime object.
    Boxed,
    /// Whatever form the value is already in.
    Indifferent,
}

impl BoxingStrategy {
    /// The strategy for a declared `unboxed` flag: `Some(true)` raw,
    /// `Some(false)` boxed, `None` either.
    pub fn from_flag(unboxed: Option<bool>) -> Self {
        match unboxed {
            Some(true) => BoxingStrategy::Unboxed,
            Some(false) => BoxingStrategy::Boxed,
            None => BoxingStrategy::Indifferent,
        }
    }

    /// The strategy matching a value's current form.
    pub fn of_form(unboxed: bool) -> Self {
        if unboxed {
            BoxingStrategy::Unboxed
        } else {
            BoxingStrategy::Boxed
        }
    }
}

impl Lowerer<'_> {
    /// Whether values of `ty` have a raw form.
    pub fn can_unbox(&self, ty: Idx) -> bool {
        self.is_basic(ty) || self.is_platform_string(ty)
    }

    /// The form values of `ty` are stored in by default: raw when the type
    /// lowers to something other than its boxed form.
    pub fn value_repr(&mut self, ty: Idx) -> BoxingStrategy {
        let natural = self.lower(ty, TypeContext::empty());
        let boxed = self.lower(ty, TypeContext::NO_PRIMITIVES);
        if natural == boxed {
            BoxingStrategy::Boxed
        } else {
            BoxingStrategy::Unboxed
        }
    }

    /// Convert `expr`, currently boxed iff `expr_boxed`, to the form
    /// `strategy` asks for.
    pub fn box_unbox_if_necessary(
        &mut self,
        expr: JExpr,
        expr_boxed: bool,
        ty: Idx,
        strategy: BoxingStrategy,
    ) -> JExpr {
        let target_boxed = match strategy {
            BoxingStrategy::Indifferent => return expr,
            BoxingStrategy::Boxed => true,
            BoxingStrategy::Unboxed => false,
        };
        if target_boxed == expr_boxed {
            return expr;
        }
        if target_boxed {
            self.box_type(expr, ty)
        } else {
            self.unbox_type(expr, ty)
        }
    }

    /// Wrap a raw value of `ty` in its runtime object.
    pub fn box_type(&mut self, expr: JExpr, ty: Idx) -> JExpr {
        let model = self.model;
        let b = model.builtins();
        let class = if self.is_integer(ty) {
            b.integer
        } else if self.is_float(ty) {
            b.float
        } else if self.is_string(ty) {
            b.string
        } else if self.is_character(ty) {
            b.character
        } else if self.is_boolean(ty) {
            b.boolean
        } else if self.is_array(ty) {
            let element = model
                .supertype(ty, b.array)
                .and_then(|array| model.type_args(array).first().copied())
                .unwrap_or(Idx::ERROR);
            let element = self.lower(element, TypeContext::TYPE_ARGUMENT);
            let array = self.naming.declaration_name(model, b.array, DeclNameFlags::QUALIFIED);
            return JExpr::static_call(
                JType::Class(array),
                vec![element],
                self.name(BOX),
                vec![expr],
            );
        } else if ty == b.void_ty {
            return JExpr::let_in(vec![JStmt::Exec(expr)], JExpr::null());
        } else {
            return expr;
        };
        let class = self.naming.declaration_name(model, class, DeclNameFlags::QUALIFIED);
        JExpr::static_call(JType::Class(class), Vec::new(), self.name(BOX), vec![expr])
    }

    /// Extract the raw value of `ty` from its runtime object.
    pub fn unbox_type(&mut self, expr: JExpr, ty: Idx) -> JExpr {
        let model = self.model;
        if self.is_integer(ty) {
            self.call0(expr, UNBOX_INTEGER)
        } else if self.is_float(ty) {
            self.call0(expr, UNBOX_FLOAT)
        } else if self.is_string(ty) {
            self.unbox_string(expr)
        } else if self.is_character(ty) {
            let method = if model.repr(ty) == Some(Repr::Char) {
                UNBOX_CHAR
            } else {
                UNBOX_CODE_POINT
            };
            self.call0(expr, method)
        } else if self.is_boolean(ty) {
            self.call0(expr, UNBOX_BOOLEAN)
        } else if self.is_array(ty) {
            self.call0(expr, UNBOX_ARRAY)
        } else if model.is_optional(ty) && self.is_string(model.definite(ty)) {
            self.unbox_optional_string(expr)
        } else {
            expr
        }
    }

    fn unbox_string(&self, expr: JExpr) -> JExpr {
        if is_string_literal(&expr) {
            return expr;
        }
        self.call0(expr, UNBOX_STRING)
    }

    /// `(let final String tmp$N = expr; in tmp$N != null ? tmp$N.toString() : null)`
    fn unbox_optional_string(&mut self, expr: JExpr) -> JExpr {
        if is_string_literal(&expr) {
            return expr;
        }
        let tmp = self.fresh(TEMP);
        let string_ty = self.model.builtins().string_ty;
        let ty = self.lower(string_ty, TypeContext::NO_PRIMITIVES);
        let test = JExpr::binary(JBinOp::Ne, JExpr::ident(tmp), JExpr::null());
        let value = JExpr::conditional(test, self.unbox_string(JExpr::ident(tmp)), JExpr::null());
        JExpr::let_in(vec![JStmt::VarDef(JVarDecl::final_var(tmp, ty, expr))], value)
    }
}

fn is_string_literal(expr: &JExpr) -> bool {
    matches!(expr, JExpr::Literal(Literal::String(_)))
}
