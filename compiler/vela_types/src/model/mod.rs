//! The resolved program model: declarations, type parameters, types.

mod builtins;
mod format;
mod query;

use vela_ir::{Name, StringInterner};

use crate::{
    DeclFlags, DeclId, DeclKind, Declaration, Idx, ParamList, TypeKind, TypeParamData,
    TypeParamId, TypePool, Variance,
};

pub use builtins::{Builtins, LANGUAGE_PACKAGE};
pub use query::{Subst, TypedRef};

/// Owner of every declaration, type parameter and type in a compilation.
///
/// Building goes through `&mut self`; the backend only ever holds `&Model`.
pub struct Model {
    interner: StringInterner,
    pool: TypePool,
    decls: Vec<Declaration>,
    params: Vec<TypeParamData>,
    builtins: Builtins,
}

impl Model {
    /// A model containing only the `vela.language` module.
    pub fn new() -> Self {
        let mut model = Model {
            interner: StringInterner::new(),
            pool: TypePool::new(),
            decls: Vec::new(),
            params: Vec::new(),
            builtins: Builtins::default(),
        };
        model.builtins = builtins::declare_language_module(&mut model);
        model
    }

    // Accessors

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn pool(&self) -> &TypePool {
        &self.pool
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Intern a string in this model's interner.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// The string behind a name.
    pub fn str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    pub fn type_param(&self, id: TypeParamId) -> &TypeParamData {
        &self.params[id.index()]
    }

    pub fn kind(&self, ty: Idx) -> TypeKind {
        self.pool.kind(ty)
    }

    // Declaration building

    /// Add a top-level declaration in `package`.
    pub fn declare(&mut self, kind: DeclKind, package: &str, name: &str) -> DeclId {
        let decl = Declaration::new(self.intern(name), kind, self.intern(package), None);
        self.push_decl(decl)
    }

    /// Add a member declaration to `container`, in the container's package.
    pub fn declare_member(&mut self, container: DeclId, kind: DeclKind, name: &str) -> DeclId {
        let package = self.decl(container).package;
        let decl = Declaration::new(self.intern(name), kind, package, Some(container));
        let id = self.push_decl(decl);
        self.decls[container.index()].members.push(id);
        id
    }

    fn push_decl(&mut self, decl: Declaration) -> DeclId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "declaration counts never approach u32::MAX"
        )]
        let id = DeclId::from_raw(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    /// Add a type parameter to `owner` and return it.
    pub fn add_type_param(&mut self, owner: DeclId, name: &str, variance: Variance) -> TypeParamId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type parameter counts never approach u32::MAX"
        )]
        let id = TypeParamId::from_raw(self.params.len() as u32);
        let name = self.intern(name);
        self.params.push(TypeParamData {
            name,
            variance,
            bounds: Vec::new(),
            owner,
            sequenced: false,
        });
        self.decls[owner.index()].type_params.push(id);
        id
    }

    /// Mark a type parameter as accepting any number of arguments.
    pub fn set_sequenced(&mut self, param: TypeParamId) {
        self.params[param.index()].sequenced = true;
    }

    pub fn set_bounds(&mut self, param: TypeParamId, bounds: Vec<Idx>) {
        self.params[param.index()].bounds = bounds;
    }

    pub fn set_extended(&mut self, decl: DeclId, ty: Idx) {
        self.decls[decl.index()].extended = Some(ty);
    }

    pub fn add_satisfied(&mut self, decl: DeclId, ty: Idx) {
        self.decls[decl.index()].satisfied.push(ty);
    }

    /// Set the value type of an attribute or the return type of a method.
    pub fn set_type(&mut self, decl: DeclId, ty: Idx) {
        self.decls[decl.index()].ty = Some(ty);
    }

    pub fn add_param_list(&mut self, decl: DeclId, params: ParamList) {
        self.decls[decl.index()].param_lists.push(params);
    }

    pub fn set_refined(&mut self, decl: DeclId, refined: DeclId) {
        self.decls[decl.index()].refined = Some(refined);
    }

    pub fn add_flags(&mut self, decl: DeclId, flags: DeclFlags) {
        self.decls[decl.index()].flags |= flags;
    }

    // Type construction shortcuts

    pub fn nominal(&self, decl: DeclId, args: Vec<Idx>) -> Idx {
        self.pool.nominal(decl, args)
    }

    pub fn qualified(&self, qualifying: Idx, decl: DeclId, args: Vec<Idx>) -> Idx {
        self.pool.qualified(qualifying, decl, args)
    }

    pub fn union(&self, cases: Vec<Idx>) -> Idx {
        self.pool.union(cases)
    }

    pub fn intersection(&self, bounds: Vec<Idx>) -> Idx {
        self.pool.intersection(bounds)
    }

    pub fn param_type(&self, param: TypeParamId) -> Idx {
        self.pool.param(param)
    }

    /// `T?`, encoded as `Nothing|T`.
    pub fn optional(&self, ty: Idx) -> Idx {
        self.pool.union(vec![self.builtins.nothing_ty, ty])
    }

    /// The type of `this` inside `decl`: the declaration applied to its own
    /// type parameters, qualified by the container's own type for members.
    pub fn declared_type(&self, decl: DeclId) -> Idx {
        let data = self.decl(decl);
        let args = data.type_params.iter().map(|&p| self.param_type(p)).collect();
        match data.container {
            Some(container) if self.decl(container).is_class_or_interface() => {
                let outer = self.declared_type(container);
                self.qualified(outer, decl, args)
            }
            _ => self.nominal(decl, args),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
