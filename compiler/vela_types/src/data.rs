//! Semantic type data stored in the pool.

use crate::{DeclId, Idx, TypeParamId};

/// Declaration-site variance of a type parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Variance {
    #[default]
    Invariant,
    /// `out T`
    Covariant,
    /// `in T`
    Contravariant,
}

/// Preferred platform representation for a basic value type.
///
/// Supplied by the front end for declarations annotated with a narrower
/// representation, such as a small integer field. Only meaningful on
/// `Integer`, `Float`, `Character` and `String` occurrences.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Repr {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    /// A `String` that should stay a platform string even when optional.
    PlatformString,
}

/// A reference to a class or interface, with its type arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NominalType {
    pub decl: DeclId,
    pub args: Vec<Idx>,
    /// Instantiation of the enclosing type, for member classes and interfaces.
    pub qualifying: Option<Idx>,
    pub repr: Option<Repr>,
}

/// A semantic type.
///
/// Unions and intersections keep their members in source order and are not
/// simplified on construction: a one-member union is a distinct pool entry
/// from its member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Nominal(NominalType),
    Union(Vec<Idx>),
    Intersection(Vec<Idx>),
    Param(TypeParamId),
    Bottom,
    Error,
}

/// Discriminant of a [`TypeKind`], for cheap dispatch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Tag {
    Nominal,
    Union,
    Intersection,
    Param,
    Bottom,
    Error,
}

impl TypeKind {
    pub fn tag(&self) -> Tag {
        match self {
            TypeKind::Nominal(_) => Tag::Nominal,
            TypeKind::Union(_) => Tag::Union,
            TypeKind::Intersection(_) => Tag::Intersection,
            TypeKind::Param(_) => Tag::Param,
            TypeKind::Bottom => Tag::Bottom,
            TypeKind::Error => Tag::Error,
        }
    }
}
