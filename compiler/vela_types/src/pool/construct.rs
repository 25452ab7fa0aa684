//! Type construction helpers.

use crate::{DeclId, Idx, NominalType, Repr, TypeKind, TypeParamId, TypePool};

impl TypePool {
    /// `Decl<args>` with no qualifying type and no representation hint.
    pub fn nominal(&self, decl: DeclId, args: Vec<Idx>) -> Idx {
        self.intern(TypeKind::Nominal(NominalType {
            decl,
            args,
            qualifying: None,
            repr: None,
        }))
    }

    /// `Outer<..>.Decl<args>` for a member type of `qualifying`.
    pub fn qualified(&self, qualifying: Idx, decl: DeclId, args: Vec<Idx>) -> Idx {
        self.intern(TypeKind::Nominal(NominalType {
            decl,
            args,
            qualifying: Some(qualifying),
            repr: None,
        }))
    }

    /// The same nominal type with a representation hint attached.
    ///
    /// Non-nominal types are returned unchanged.
    pub fn with_repr(&self, ty: Idx, repr: Repr) -> Idx {
        match self.kind(ty) {
            TypeKind::Nominal(mut nominal) => {
                nominal.repr = Some(repr);
                self.intern(TypeKind::Nominal(nominal))
            }
            _ => ty,
        }
    }

    /// The same type with any representation hint removed.
    pub fn without_repr(&self, ty: Idx) -> Idx {
        match self.kind(ty) {
            TypeKind::Nominal(mut nominal) if nominal.repr.is_some() => {
                nominal.repr = None;
                self.intern(TypeKind::Nominal(nominal))
            }
            _ => ty,
        }
    }

    /// Union of `cases`, kept exactly as given.
    pub fn union(&self, cases: Vec<Idx>) -> Idx {
        debug_assert!(!cases.is_empty(), "union needs at least one case");
        self.intern(TypeKind::Union(cases))
    }

    /// Intersection of `bounds`, kept exactly as given.
    pub fn intersection(&self, bounds: Vec<Idx>) -> Idx {
        debug_assert!(!bounds.is_empty(), "intersection needs at least one bound");
        self.intern(TypeKind::Intersection(bounds))
    }

    /// A reference to a type parameter.
    pub fn param(&self, param: TypeParamId) -> Idx {
        self.intern(TypeKind::Param(param))
    }

    /// Union with duplicates and `Bottom` removed, collapsing to the sole
    /// remaining member. Used when joining instantiations, not for
    /// front-end supplied types.
    pub fn join(&self, cases: impl IntoIterator<Item = Idx>) -> Idx {
        let mut kept: Vec<Idx> = Vec::new();
        for case in cases {
            if case != Idx::BOTTOM && !kept.contains(&case) {
                kept.push(case);
            }
        }
        match kept.len() {
            0 => Idx::BOTTOM,
            1 => kept[0],
            _ => self.union(kept),
        }
    }

    /// Intersection with duplicates removed, collapsing to the sole member.
    pub fn meet(&self, bounds: impl IntoIterator<Item = Idx>) -> Idx {
        let mut kept: Vec<Idx> = Vec::new();
        for bound in bounds {
            if !kept.contains(&bound) {
                kept.push(bound);
            }
        }
        match kept.len() {
            0 => Idx::ERROR,
            1 => kept[0],
            _ => self.intersection(kept),
        }
    }
}
