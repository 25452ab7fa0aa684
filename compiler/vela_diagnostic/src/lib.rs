//! Diagnostic system for the backend.
//!
//! Lowering never stops at the first problem. Every recoverable problem is
//! turned into a [`Diagnostic`] and pushed into a [`DiagnosticQueue`],
//! which applies the error limit and deduplication from
//! [`DiagnosticConfig`] and hands back a position-sorted list at the end.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained from the queue, as proof that at
//! least one error was recorded.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
