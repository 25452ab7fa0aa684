//! Error codes for backend diagnostics.
//!
//! The first digit names the phase:
//! - E4xxx: lowering problems (recoverable, lowering keeps going)
//! - E9xxx: internal and configuration errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lowering (E4xxx)
    /// Generic type instantiated with fewer arguments than parameters
    E4001,
    /// `for` subject does not satisfy `Iterable`
    E4002,
    /// Sequence element type has no platform array conversion
    E4003,
    /// Construct with no lowering rule
    E4004,

    // Internal (E9xxx)
    /// Malformed input tree (internal defect)
    E9001,
    /// Invalid backend configuration
    E9002,
}

impl ErrorCode {
    /// All codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// The code as written in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Whether this is a lowering error (E4xxx range).
    pub fn is_lowering_error(self) -> bool {
        self.as_str().starts_with("E4")
    }

    /// Whether this is an internal error (E9xxx range).
    pub fn is_internal_error(self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
