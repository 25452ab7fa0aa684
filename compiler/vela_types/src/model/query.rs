//! Type queries used by the backend.
//!
//! These are the only type-system operations lowering needs. They assume a
//! well-formed, already checked model and never report errors: a query
//! that cannot answer returns `None` or the input unchanged.

use rustc_hash::FxHashMap;

use crate::{DeclId, Idx, Model, NominalType, Repr, TypeKind, TypeParamId, Variance};

/// Mapping from type parameters to their arguments.
pub type Subst = FxHashMap<TypeParamId, Idx>;

/// A member declaration seen through an instantiation of its container.
///
/// `qualifying` is the container's instantiation, e.g. `Iterable<String>`
/// for `Iterable.iterator` reached from a `Sequence<String>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypedRef {
    pub decl: DeclId,
    pub qualifying: Option<Idx>,
}

impl Model {
    // Shape tests

    /// The declaration of a nominal type.
    pub fn nominal_decl(&self, ty: Idx) -> Option<DeclId> {
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => Some(nominal.decl),
            _ => None,
        }
    }

    /// Whether `ty` is a (possibly representation-hinted) reference to `decl`.
    pub fn is_decl(&self, ty: Idx, decl: DeclId) -> bool {
        self.nominal_decl(ty) == Some(decl)
    }

    pub fn is_type_param(&self, ty: Idx) -> bool {
        matches!(self.kind(ty), TypeKind::Param(_))
    }

    /// The representation hint of a nominal type.
    pub fn repr(&self, ty: Idx) -> Option<Repr> {
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => nominal.repr,
            _ => None,
        }
    }

    /// Type arguments of a nominal type, empty otherwise.
    pub fn type_args(&self, ty: Idx) -> Vec<Idx> {
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => nominal.args,
            _ => Vec::new(),
        }
    }

    pub fn first_bound(&self, param: TypeParamId) -> Option<Idx> {
        self.type_param(param).bounds.first().copied()
    }

    // Substitution

    /// The parameter-to-argument map of a nominal type, including the
    /// arguments of its qualifying types.
    pub fn substitution(&self, ty: Idx) -> Subst {
        let mut subst = Subst::default();
        self.collect_substitution(ty, &mut subst);
        subst
    }

    fn collect_substitution(&self, ty: Idx, subst: &mut Subst) {
        if let TypeKind::Nominal(nominal) = self.kind(ty) {
            if let Some(outer) = nominal.qualifying {
                self.collect_substitution(outer, subst);
            }
            for (&param, &arg) in self.decl(nominal.decl).type_params.iter().zip(&nominal.args) {
                if !self.type_param(param).sequenced {
                    subst.insert(param, arg);
                }
            }
        }
    }

    /// Replace type parameters in `ty` according to `subst`.
    pub fn substitute(&self, ty: Idx, subst: &Subst) -> Idx {
        if subst.is_empty() {
            return ty;
        }
        match self.kind(ty) {
            TypeKind::Param(param) => subst.get(&param).copied().unwrap_or(ty),
            TypeKind::Nominal(nominal) => {
                let args = nominal
                    .args
                    .iter()
                    .map(|&arg| self.substitute(arg, subst))
                    .collect();
                let qualifying = nominal.qualifying.map(|q| self.substitute(q, subst));
                self.pool().intern(TypeKind::Nominal(NominalType {
                    decl: nominal.decl,
                    args,
                    qualifying,
                    repr: nominal.repr,
                }))
            }
            TypeKind::Union(cases) => {
                let cases = cases.iter().map(|&c| self.substitute(c, subst)).collect();
                self.union(cases)
            }
            TypeKind::Intersection(bounds) => {
                let bounds = bounds.iter().map(|&b| self.substitute(b, subst)).collect();
                self.intersection(bounds)
            }
            TypeKind::Bottom | TypeKind::Error => ty,
        }
    }

    // Supertypes

    /// The instantiation of `target` that `ty` is a subtype of.
    ///
    /// Walks the extended type before satisfied types, in source order. For
    /// a union, every case must reach `target`; the per-case instantiations
    /// are joined according to each parameter's variance.
    pub fn supertype(&self, ty: Idx, target: DeclId) -> Option<Idx> {
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => {
                if nominal.decl == target {
                    return Some(ty);
                }
                let subst = self.substitution(ty);
                let decl = self.decl(nominal.decl);
                decl.extended
                    .iter()
                    .chain(&decl.satisfied)
                    .find_map(|&sup| self.supertype(self.substitute(sup, &subst), target))
            }
            TypeKind::Param(param) => self
                .type_param(param)
                .bounds
                .iter()
                .find_map(|&bound| self.supertype(bound, target)),
            TypeKind::Intersection(bounds) => {
                bounds.iter().find_map(|&bound| self.supertype(bound, target))
            }
            TypeKind::Union(cases) => {
                let found: Option<Vec<Idx>> = cases
                    .iter()
                    .filter(|&&case| case != Idx::BOTTOM)
                    .map(|&case| self.supertype(case, target))
                    .collect();
                self.join_instantiations(target, found?)
            }
            TypeKind::Bottom => {
                let arity = self.decl(target).type_params.len();
                Some(self.nominal(target, vec![Idx::BOTTOM; arity]))
            }
            TypeKind::Error => None,
        }
    }

    fn join_instantiations(&self, target: DeclId, found: Vec<Idx>) -> Option<Idx> {
        match found.len() {
            0 => {
                let arity = self.decl(target).type_params.len();
                return Some(self.nominal(target, vec![Idx::BOTTOM; arity]));
            }
            1 => return found.into_iter().next(),
            _ => {}
        }
        let first = match self.kind(found[0]) {
            TypeKind::Nominal(nominal) => nominal,
            _ => return None,
        };
        let per_case: Vec<Vec<Idx>> = found.iter().map(|&t| self.type_args(t)).collect();
        let mut args = Vec::with_capacity(first.args.len());
        for (i, &param) in self.decl(target).type_params.iter().enumerate() {
            let column = per_case.iter().filter_map(|a| a.get(i).copied());
            let joined = match self.type_param(param).variance {
                Variance::Covariant => self.pool().join(column),
                Variance::Contravariant => self.pool().meet(column),
                Variance::Invariant => {
                    let column: Vec<Idx> = column.collect();
                    let head = *column.first()?;
                    if column.iter().any(|&c| c != head) {
                        return None;
                    }
                    head
                }
            };
            args.push(joined);
        }
        Some(self.pool().intern(TypeKind::Nominal(NominalType {
            decl: target,
            args,
            qualifying: first.qualifying,
            repr: None,
        })))
    }

    /// Whether `ty` is a subtype of some instantiation of `target`.
    pub fn is_subtype_of_decl(&self, ty: Idx, target: DeclId) -> bool {
        self.supertype(ty, target).is_some()
    }

    // Optional types

    /// Whether `ty` admits the absent value.
    pub fn is_optional(&self, ty: Idx) -> bool {
        let builtins = self.builtins();
        match self.kind(ty) {
            TypeKind::Nominal(nominal) => {
                nominal.decl == builtins.nothing || nominal.decl == builtins.void
            }
            TypeKind::Union(cases) => cases.iter().any(|&c| self.is_optional(c)),
            _ => false,
        }
    }

    /// `T` for `T?`. A lone type parameter becomes `T&Object`, the
    /// definite form of a possibly-absent type variable. The remaining
    /// case loses its representation hint.
    pub fn definite(&self, ty: Idx) -> Idx {
        let builtins = self.builtins();
        match self.kind(ty) {
            TypeKind::Nominal(nominal) if nominal.decl == builtins.void => builtins.object_ty,
            TypeKind::Nominal(nominal) if nominal.decl == builtins.nothing => Idx::BOTTOM,
            TypeKind::Union(cases) => {
                let rest: Vec<Idx> = cases
                    .iter()
                    .copied()
                    .filter(|&c| !self.is_decl(c, builtins.nothing))
                    .collect();
                match rest.as_slice() {
                    [] => Idx::BOTTOM,
                    [only] if self.is_decl(*only, builtins.void) => builtins.object_ty,
                    [only] if self.is_type_param(*only) => {
                        self.intersection(vec![*only, builtins.object_ty])
                    }
                    [only] => self.pool().without_repr(*only),
                    _ => self.union(rest),
                }
            }
            _ => ty,
        }
    }

    /// `ty` without its absent case. `Void` becomes `Object`.
    pub fn non_null(&self, ty: Idx) -> Idx {
        let builtins = self.builtins();
        match self.kind(ty) {
            TypeKind::Nominal(nominal) if nominal.decl == builtins.void => builtins.object_ty,
            TypeKind::Nominal(nominal) if nominal.decl == builtins.nothing => Idx::BOTTOM,
            TypeKind::Union(cases) => {
                let rest: Vec<Idx> = cases
                    .iter()
                    .copied()
                    .filter(|&c| !self.is_decl(c, builtins.nothing))
                    .collect();
                match rest.as_slice() {
                    [] => Idx::BOTTOM,
                    [only] => *only,
                    _ => self.union(rest),
                }
            }
            _ => ty,
        }
    }

    // Iteration

    /// The `Iterable<E>` instantiation of `ty`, when `E` is not `Bottom`.
    pub fn nonempty_iterable(&self, ty: Idx) -> Option<Idx> {
        let iterable = self.supertype(ty, self.builtins().iterable)?;
        match self.type_args(iterable).first() {
            Some(&element) if element != Idx::BOTTOM => Some(iterable),
            _ => None,
        }
    }

    /// The element type of an iterable type.
    pub fn iterated_type(&self, ty: Idx) -> Option<Idx> {
        let iterable = self.supertype(ty, self.builtins().iterable)?;
        self.type_args(iterable).first().copied()
    }

    /// `Iterator<element>`.
    pub fn iterator_type(&self, element: Idx) -> Idx {
        self.nominal(self.builtins().iterator, vec![element])
    }

    /// `Callable<ret, params...>`.
    pub fn callable_type(&self, ret: Idx, params: &[Idx]) -> Idx {
        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(ret);
        args.extend_from_slice(params);
        self.nominal(self.builtins().callable, args)
    }

    /// The return type of a callable type.
    pub fn callable_return(&self, ty: Idx) -> Option<Idx> {
        let callable = self.supertype(ty, self.builtins().callable)?;
        self.type_args(callable).first().copied()
    }

    // Members

    /// A direct member of `decl` with the given name.
    pub fn direct_member(&self, decl: DeclId, name: vela_ir::Name) -> Option<DeclId> {
        self.decl(decl)
            .members
            .iter()
            .copied()
            .find(|&m| self.decl(m).name == name)
    }

    /// `member` seen through `ty`: the supertype of `ty` that declares it.
    pub fn member_ref(&self, ty: Idx, member: DeclId) -> TypedRef {
        let qualifying = self
            .decl(member)
            .container
            .and_then(|container| self.supertype(ty, container));
        TypedRef {
            decl: member,
            qualifying,
        }
    }

    /// The declared type of a member reference, instantiated.
    pub fn ref_type(&self, member: TypedRef) -> Idx {
        let Some(ty) = self.decl(member.decl).ty else {
            return Idx::ERROR;
        };
        match member.qualifying {
            Some(qualifying) => self.substitute(ty, &self.substitution(qualifying)),
            None => ty,
        }
    }

    /// Dotted name: package, enclosing declarations, then the declaration.
    pub fn qualified_name(&self, decl: DeclId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(decl);
        while let Some(id) = current {
            segments.push(self.str(self.decl(id).name));
            current = self.decl(id).container;
        }
        let package = self.str(self.decl(decl).package);
        if !package.is_empty() {
            segments.push(package);
        }
        segments.reverse();
        segments.join(".")
    }
}
