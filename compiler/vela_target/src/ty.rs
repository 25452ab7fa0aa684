//! Target type expressions.

use vela_ir::Name;

/// Platform primitive types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    /// Method result only.
    Void,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::Void => "void",
        }
    }
}

/// Type argument wildcard.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Wildcard {
    /// `?`
    Unbounded,
    /// `? extends T`
    Extends(Box<JType>),
    /// `? super T`
    Super(Box<JType>),
}

/// A target type expression.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum JType {
    Primitive(Primitive),
    /// A top-level class or interface by fully qualified name.
    Class(Name),
    /// A member type selected from an outer type: `Outer<A>.Inner`.
    Member { outer: Box<JType>, name: Name },
    /// Generic application: `Base<args>`.
    Apply { base: Box<JType>, args: Vec<JType> },
    Wildcard(Wildcard),
    /// A type variable.
    Var(Name),
    Array(Box<JType>),
    /// Placeholder for a type with no representation; the front end has
    /// already reported why.
    Erroneous,
}

impl JType {
    pub fn apply(base: JType, args: Vec<JType>) -> JType {
        if args.is_empty() {
            return base;
        }
        JType::Apply {
            base: Box::new(base),
            args,
        }
    }

    pub fn array(element: JType) -> JType {
        JType::Array(Box::new(element))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JType::Primitive(p) if *p != Primitive::Void)
    }

    pub fn is_erroneous(&self) -> bool {
        matches!(self, JType::Erroneous)
    }

    /// The type without generic arguments.
    #[must_use]
    pub fn erase_args(&self) -> JType {
        match self {
            JType::Apply { base, .. } => base.erase_args(),
            JType::Member { outer, name } => JType::Member {
                outer: Box::new(outer.erase_args()),
                name: *name,
            },
            other => other.clone(),
        }
    }
}
