//! Vela IR - shared leaf types for the backend.
//!
//! - [`Name`]: interned identifier, compared in O(1)
//! - [`StringInterner`]: owner of every interned string
//! - [`Span`]: byte range into the source, carried for diagnostics
//!
//! Everything above the lowering core (declarations, types, target
//! fragments) refers to identifiers through [`Name`] so that equality and
//! hashing never touch string contents.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;

pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;

static_assert_size!(Name, 4);
static_assert_size!(Span, 8);
