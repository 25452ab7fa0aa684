//! Internal lowering defects.

use thiserror::Error;
use vela_ir::Span;

/// A typed tree the lowering core cannot accept.
///
/// These are defects in the input's shape, not user errors: the front end
/// never produces them for a checked program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LowerError {
    #[error("function `{name}` has no parameter lists")]
    NoParameterLists { name: String },

    #[error("narrowing condition at {span} binds no variable")]
    MissingSubjectVariable { span: Span },
}
