//! Resolved declaration and type graph.
//!
//! The front end hands the backend a fully type-checked program. This crate
//! is that hand-off: declarations, type parameters, interned semantic types
//! and the typed statement tree, plus the handful of type queries the
//! lowering core relies on (supertype instantiation, substitution, optional
//! splitting, iterated-type projection).
//!
//! It is not a type checker. Nothing here infers, unifies or reports.
//!
//! # Types
//!
//! Every [`TypeKind`] is hash-consed in a [`TypePool`] and referred to by
//! [`Idx`], so two indices are equal exactly when the types are
//! structurally equal. The pool interns through `&self`, which lets the
//! queries on a shared [`Model`] build substituted types on the fly.

mod data;
mod decl;
mod idx;
mod model;
mod pool;
pub mod tree;

pub use data::{NominalType, Repr, Tag, TypeKind, Variance};
pub use decl::{
    DeclFlags, DeclId, DeclKind, Declaration, ParamList, Parameter, TypeParamData, TypeParamId,
};
pub use idx::Idx;
pub use model::{Builtins, Model, Subst, TypedRef, LANGUAGE_PACKAGE};
pub use pool::TypePool;

vela_ir::static_assert_size!(Idx, 4);
vela_ir::static_assert_size!(DeclId, 4);
