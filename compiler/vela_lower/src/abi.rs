//! Runtime library names emitted by the lowering core.
//!
//! Generated code links against a runtime whose class and method names are
//! fixed per ABI version. Everything the core emits by name lives here.

/// Runtime ABI version this table describes.
pub const RUNTIME_ABI: (u16, u16) = (3, 0);

// Platform classes

pub const PLATFORM_OBJECT: &str = "java.lang.Object";
pub const PLATFORM_STRING: &str = "java.lang.String";
/// Catch-all for `catch` clauses.
pub const PLATFORM_EXCEPTION: &str = "java.lang.Exception";
/// Root of everything throwable.
pub const PLATFORM_THROWABLE: &str = "java.lang.Throwable";

// Runtime classes

/// Helper class with static predicates and array conversions.
pub const UTIL: &str = "vela.runtime.Util";
/// Base class of every lowered function value.
pub const ABSTRACT_CALLABLE: &str = "vela.runtime.AbstractCallable";
/// Base class of user exceptions.
pub const RUNTIME_EXCEPTION: &str = "vela.language.Exception";
/// Holder of the `empty` language value.
pub const EMPTY_VALUE: &str = "vela.language.empty_";
/// Accessor of a language value holder.
pub const VALUE_GETTER: &str = "get_";

// Boxing

/// Static factory on each boxed class: `Integer.instance(x)`.
pub const BOX: &str = "instance";
pub const UNBOX_INTEGER: &str = "longValue";
pub const UNBOX_FLOAT: &str = "doubleValue";
pub const UNBOX_STRING: &str = "toString";
/// Unboxing a character with a platform `char` representation.
pub const UNBOX_CHAR: &str = "charValue";
/// Unboxing a character to its code point.
pub const UNBOX_CODE_POINT: &str = "intValue";
pub const UNBOX_BOOLEAN: &str = "booleanValue";
pub const UNBOX_ARRAY: &str = "toArray";

/// Value equality on boxed objects and platform strings.
pub const EQUALS: &str = "equals";

// Iteration

pub const ITERATOR: &str = "iterator";
pub const HEAD: &str = "getHead";
pub const TAIL: &str = "getTail";
pub const ENTRY_KEY: &str = "getKey";
pub const ENTRY_ITEM: &str = "getElement";
pub const GET_EMPTY: &str = "getEmpty";
pub const GET_SIZE: &str = "getSize";

// Util predicates

pub const IS_IDENTIFIABLE: &str = "isIdentifiable";
pub const IS_IDENTIFIABLE_OBJECT: &str = "isIdentifiableObject";

// Util array conversions

pub const TO_ARRAY: &str = "toArray";
pub const TO_LONG_ARRAY: &str = "toLongArray";
pub const TO_INT_ARRAY: &str = "toIntArray";
pub const TO_SHORT_ARRAY: &str = "toShortArray";
pub const TO_BYTE_ARRAY: &str = "toByteArray";
pub const TO_DOUBLE_ARRAY: &str = "toDoubleArray";
pub const TO_FLOAT_ARRAY: &str = "toFloatArray";
pub const TO_CHAR_ARRAY: &str = "toCharArray";
pub const TO_BOOLEAN_ARRAY: &str = "toBooleanArray";
pub const TO_PLATFORM_STRING_ARRAY: &str = "toJavaStringArray";

// Callables

/// The method every function value implements.
pub const CALL: &str = "call";
/// Parameter name prefix of `call`: `arg0`, `arg1`, ...
pub const CALL_ARG_PREFIX: &str = "arg";
/// Highest arity with a dedicated `call` overload.
pub const MAX_FIXED_ARITY: usize = 3;

// Synthetic name bases

pub const LOOP_GUARD: &str = "doforelse";
pub const ITERATOR_SUFFIX: &str = "$iter";
pub const TEMP: &str = "tmp";

/// Suffix of an interface's companion class.
pub const COMPANION_SUFFIX: &str = "$impl";
/// Separator between an outer declaration and a lifted member interface.
pub const LIFTED_SEPARATOR: char = '$';
