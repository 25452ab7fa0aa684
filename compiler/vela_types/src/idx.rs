//! Type index handle.

use std::fmt;

/// A 32-bit index into the [`TypePool`](crate::TypePool).
///
/// The pool hash-conses, so index equality is structural type equality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    /// The erroneous type. Already reported by the front end; lowers silently.
    pub const ERROR: Self = Self(0);
    /// The bottom type, subtype of every type and inhabited by nothing.
    pub const BOTTOM: Self = Self(1);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the pool's item table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for Idx {
    fn default() -> Self {
        Self::ERROR
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ERROR => write!(f, "Idx::ERROR"),
            Self::BOTTOM => write!(f, "Idx::BOTTOM"),
            Self(raw) => write!(f, "Idx({raw})"),
        }
    }
}
