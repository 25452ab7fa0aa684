//! Statement lowering, checked by running the lowered bodies.
//!
//! - `loops`: `for`/`else` guards, `break` at different depths, entry
//!   iteration, plain `while`
//! - `conditions`: narrowing conditions and the scope of their bindings

mod conditions;
mod loops;
