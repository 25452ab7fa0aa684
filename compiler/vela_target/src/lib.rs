//! Target syntax fragments.
//!
//! The backend's output: type expressions, expressions, statements and
//! anonymous class bodies for a JVM-like platform. Fragments are plain
//! owned trees, built fresh by each lowering call and handed to an external
//! assembler. [`format`] renders them as Java-like source for logs and
//! tests.

mod expr;
pub mod format;
mod stmt;
mod ty;

pub use expr::{JBinOp, JExpr, Literal};
pub use stmt::{JBlock, JClassBody, JMethod, JModifiers, JParam, JStmt, JTypeParam, JVarDecl};
pub use ty::{JType, Primitive, Wildcard};
