//! Recoverable lowering problems.
//!
//! Problems are collected while lowering and converted to diagnostics by the
//! driver. None of them stops lowering: the offending position gets an
//! erroneous placeholder and the rest of the declaration is still lowered.

use vela_diagnostic::{Diagnostic, ErrorCode};
use vela_ir::{Name, Span};
use vela_types::{Idx, Model};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LowerProblem {
    /// A generic type with fewer arguments than type parameters.
    MissingTypeArgument { ty: Idx, param: Name, span: Span },
    /// A `for` subject with no `Iterable` supertype.
    NotIterable { ty: Idx, span: Span },
    /// A sequence whose element type has no platform array conversion.
    UnsupportedArrayElement { element: Idx, span: Span },
    /// A construct with no lowering rule, such as a reference to a
    /// declaration that is not a function.
    UnsupportedConstruct { what: &'static str, span: Span },
}

impl LowerProblem {
    pub fn span(&self) -> Span {
        match self {
            LowerProblem::MissingTypeArgument { span, .. }
            | LowerProblem::NotIterable { span, .. }
            | LowerProblem::UnsupportedArrayElement { span, .. }
            | LowerProblem::UnsupportedConstruct { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LowerProblem::MissingTypeArgument { .. } => ErrorCode::E4001,
            LowerProblem::NotIterable { .. } => ErrorCode::E4002,
            LowerProblem::UnsupportedArrayElement { .. } => ErrorCode::E4003,
            LowerProblem::UnsupportedConstruct { .. } => ErrorCode::E4004,
        }
    }

    /// Convert to a diagnostic, rendering types and names through `model`.
    pub fn into_diagnostic(self, model: &Model) -> Diagnostic {
        let code = self.code();
        let span = self.span();
        let (message, label) = match self {
            LowerProblem::MissingTypeArgument { ty, param, .. } => (
                format!(
                    "type `{}` has no argument for type parameter `{}`",
                    model.display(ty),
                    model.str(param)
                ),
                "lowered as an erroneous type",
            ),
            LowerProblem::NotIterable { ty, .. } => (
                format!("cannot iterate over `{}`", model.display(ty)),
                "not an `Iterable`",
            ),
            LowerProblem::UnsupportedArrayElement { element, .. } => (
                format!(
                    "no platform array conversion for sequences of `{}`",
                    model.display(element)
                ),
                "left as a sequence",
            ),
            LowerProblem::UnsupportedConstruct { what, .. } => {
                (format!("cannot lower {what}"), "unsupported here")
            }
        };
        let diag = Diagnostic::error(code).with_message(message);
        if span.is_dummy() {
            diag
        } else {
            diag.with_label(span, label)
        }
    }
}
