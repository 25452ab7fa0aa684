//! Shared test utilities for phase tests.
//!
//! - `fixture`: typed trees built on a model with an `emit` effect, lowered
//!   through the driver
//! - `eval`: an interpreter for the lowered fragments

mod eval;
mod fixture;

pub use eval::{Machine, Value};
pub use fixture::Program;
