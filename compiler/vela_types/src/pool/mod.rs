//! Hash-consing type pool.

mod construct;

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::{Idx, Tag, TypeKind};

/// Interning store for semantic types.
///
/// Append-only: an index, once handed out, stays valid for the life of the
/// pool. Interning goes through `&self` so read-only passes can still build
/// substituted types. The pool is single-threaded (`!Sync`).
pub struct TypePool {
    items: RefCell<Vec<TypeKind>>,
    map: RefCell<FxHashMap<TypeKind, Idx>>,
}

impl TypePool {
    /// Create a pool with [`Idx::ERROR`] and [`Idx::BOTTOM`] pre-interned.
    pub fn new() -> Self {
        let pool = TypePool {
            items: RefCell::new(Vec::with_capacity(128)),
            map: RefCell::new(FxHashMap::default()),
        };
        let error = pool.intern(TypeKind::Error);
        let bottom = pool.intern(TypeKind::Bottom);
        debug_assert_eq!(error, Idx::ERROR);
        debug_assert_eq!(bottom, Idx::BOTTOM);
        pool
    }

    /// Intern a type, returning the existing index for an equal type.
    pub fn intern(&self, kind: TypeKind) -> Idx {
        if let Some(&idx) = self.map.borrow().get(&kind) {
            return idx;
        }
        let mut items = self.items.borrow_mut();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type pools never approach u32::MAX entries"
        )]
        let idx = Idx::from_raw(items.len() as u32);
        items.push(kind.clone());
        self.map.borrow_mut().insert(kind, idx);
        idx
    }

    /// The type stored at `idx`.
    ///
    /// Out-of-range indices read as [`TypeKind::Error`].
    pub fn kind(&self, idx: Idx) -> TypeKind {
        self.items
            .borrow()
            .get(idx.index())
            .cloned()
            .unwrap_or(TypeKind::Error)
    }

    /// The discriminant of the type at `idx`, without cloning it.
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items
            .borrow()
            .get(idx.index())
            .map_or(Tag::Error, TypeKind::tag)
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Always false: error and bottom are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
