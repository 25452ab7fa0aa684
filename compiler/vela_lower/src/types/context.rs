//! Emission contexts for type lowering.

use bitflags::bitflags;

const TP_BOUND_BIT: u16 = 1 << 9;
const TYPE_ARGUMENT_BIT: u16 = 1 << 10;

bitflags! {
    /// Where a lowered type will appear.
    ///
    /// Composite contexts carry their implications in their bits:
    /// `RAW_TP_BOUND` includes `RAW` and `TYPE_ARGUMENT` includes
    /// `NO_PRIMITIVES`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeContext: u16 {
        /// An `implements` clause.
        const SATISFIES = 1 << 0;
        /// An `extends` clause.
        const EXTENDS = 1 << 1;
        /// A position where a primitive will not do.
        const NO_PRIMITIVES = 1 << 2;
        /// Without type arguments.
        const RAW = 1 << 3;
        /// A `catch` clause.
        const CATCH = 1 << 4;
        /// The small primitive variant, where one exists.
        const SMALL = 1 << 5;
        /// A `new` expression.
        const CLASS_NEW = 1 << 6;
        /// The companion class of the type.
        const COMPANION = 1 << 7;
        /// The simple name only.
        const NON_QUALIFIED = 1 << 8;
        /// A type parameter lowers to its first upper bound. Implies `RAW`.
        const RAW_TP_BOUND = Self::RAW.bits() | TP_BOUND_BIT;
        /// A generic type argument. Implies `NO_PRIMITIVES`.
        const TYPE_ARGUMENT = Self::NO_PRIMITIVES.bits() | TYPE_ARGUMENT_BIT;
    }
}

impl TypeContext {
    /// Whether this is (or includes) a type argument position.
    pub fn in_type_argument(self) -> bool {
        self.bits() & TYPE_ARGUMENT_BIT != 0
    }

    /// Whether type parameters resolve to their first bound.
    pub fn resolves_bound(self) -> bool {
        self.bits() & TP_BOUND_BIT != 0
    }

    /// An `extends` or `implements` clause.
    pub fn in_supertype_clause(self) -> bool {
        self.intersects(TypeContext::SATISFIES | TypeContext::EXTENDS)
    }

    /// A type argument or supertype clause, where an erased argument is
    /// better expressed as a wildcard than by dropping all arguments.
    pub fn nests_arguments(self) -> bool {
        self.in_type_argument() || self.in_supertype_clause()
    }

    /// Whether basic types may lower to platform primitives here.
    pub fn allows_primitives(self) -> bool {
        !self.intersects(
            TypeContext::SATISFIES
                | TypeContext::EXTENDS
                | TypeContext::NO_PRIMITIVES
                | TypeContext::CLASS_NEW,
        )
    }
}
