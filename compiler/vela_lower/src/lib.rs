//! Type-directed lowering core of the Vela backend.
//!
//! Turns the resolved model and typed statement tree into target fragments
//! for a JVM-like platform:
//!
//! - **Type lowering** ([`Lowerer::lower_type`]) maps semantic types to
//!   target type expressions under an emission [`TypeContext`]: erasure of
//!   types the target generics cannot express, primitive mapping of basic
//!   types, raw forms and wildcard type arguments.
//! - **Refinement resolution** ([`Lowerer::non_widening_reference`]) picks,
//!   for a member inherited along several paths, the signature that never
//!   widens what an ancestor promised.
//! - **Condition lowering** turns boolean and narrowing conditions into
//!   `if`/`while` statements with scoped narrowed bindings.
//! - **Loop lowering** desugars `for`/`else` into the runtime's iterator
//!   protocol with a guard flag.
//! - **Callable lowering** ([`Lowerer::build_callable`],
//!   [`Lowerer::lower_function`]) builds function values and curried
//!   methods.
//!
//! Supporting modules handle boxing, sequences, runtime ABI names and
//! declaration naming.
//!
//! # Errors
//!
//! Lowering is total: unrepresentable types become
//! [`JType::Erroneous`](vela_target::JType::Erroneous) and recoverable
//! oddities are recorded as [`LowerProblem`]s. Only a malformed tree yields
//! a [`LowerError`].

pub mod abi;
pub mod boxing;
mod callable;
pub mod config;
mod error;
mod expr;
pub mod lowerer;
pub mod naming;
pub mod problem;
mod refine;
mod sequence;
mod stack;
mod stmt;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use boxing::BoxingStrategy;
pub use config::{ConfigError, LowerConfig};
pub use error::LowerError;
pub use lowerer::{LowerCtx, Lowerer, ReturnCtx};
pub use naming::{DeclNameFlags, NameScope, Naming};
pub use problem::LowerProblem;
pub use types::TypeContext;
