//! Declarations and type parameters.

use bitflags::bitflags;
use std::fmt;
use vela_ir::Name;

use crate::{Idx, Variance};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index of a [`Declaration`] in the model.
    DeclId
);
define_id!(
    /// Index of a [`TypeParamData`] in the model.
    TypeParamId
);

/// What sort of thing a declaration is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Class,
    Interface,
    /// Anonymous class with a single instance (`object true`).
    Object,
    Method,
    Attribute,
}

bitflags! {
    /// Modifiers and properties of a declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclFlags: u16 {
        const SHARED = 1 << 0;
        const FORMAL = 1 << 1;
        const ACTUAL = 1 << 2;
        const DEFAULT = 1 << 3;
        const VARIABLE = 1 << 4;
        const LOCAL = 1 << 5;
        const STATIC = 1 << 6;
        const ABSTRACT = 1 << 7;
    }
}

/// A formal parameter of a method or function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parameter {
    pub name: Name,
    pub ty: Idx,
    /// Representation the callee expects: `Some(true)` raw value,
    /// `Some(false)` boxed, `None` either.
    pub unboxed: Option<bool>,
}

impl Parameter {
    pub fn new(name: Name, ty: Idx) -> Self {
        Parameter {
            name,
            ty,
            unboxed: None,
        }
    }

    #[must_use]
    pub fn unboxed(mut self, unboxed: bool) -> Self {
        self.unboxed = Some(unboxed);
        self
    }
}

pub type ParamList = Vec<Parameter>;

/// A type parameter: name, variance, upper bounds, owner.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeParamData {
    pub name: Name,
    pub variance: Variance,
    pub bounds: Vec<Idx>,
    pub owner: DeclId,
    /// Accepts any number of arguments (`Arguments...`).
    pub sequenced: bool,
}

/// A resolved declaration.
///
/// Built by the front end and only read by the backend.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Declaration {
    pub name: Name,
    pub kind: DeclKind,
    /// Dotted package name, e.g. `vela.language`.
    pub package: Name,
    pub container: Option<DeclId>,
    pub type_params: Vec<TypeParamId>,
    pub extended: Option<Idx>,
    /// Satisfied interfaces, in source order.
    pub satisfied: Vec<Idx>,
    /// Direct members, in source order.
    pub members: Vec<DeclId>,
    /// Value type of an attribute, return type of a method.
    pub ty: Option<Idx>,
    pub param_lists: Vec<ParamList>,
    /// Topmost declaration this member refines, if any.
    pub refined: Option<DeclId>,
    pub flags: DeclFlags,
}

impl Declaration {
    pub fn new(name: Name, kind: DeclKind, package: Name, container: Option<DeclId>) -> Self {
        Declaration {
            name,
            kind,
            package,
            container,
            type_params: Vec::new(),
            extended: None,
            satisfied: Vec::new(),
            members: Vec::new(),
            ty: None,
            param_lists: Vec::new(),
            refined: None,
            flags: DeclFlags::empty(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclKind::Interface
    }

    pub fn is_class_or_interface(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Class | DeclKind::Interface | DeclKind::Object
        )
    }

    pub fn is_method(&self) -> bool {
        self.kind == DeclKind::Method
    }

    pub fn is_shared(&self) -> bool {
        self.flags.contains(DeclFlags::SHARED)
    }

    pub fn is_formal(&self) -> bool {
        self.flags.contains(DeclFlags::FORMAL)
    }

    pub fn is_variable(&self) -> bool {
        self.flags.contains(DeclFlags::VARIABLE)
    }

    pub fn is_local(&self) -> bool {
        self.flags.contains(DeclFlags::LOCAL)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(DeclFlags::STATIC)
    }
}
