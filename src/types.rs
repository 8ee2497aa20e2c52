//! The declared-type algebra.
//!
//! Every type that can appear in a parameter, return or property declaration
//! is one [`Type`] variant. Values are immutable; the only interesting
//! operation is [`Type::is_assignable`], which asks whether a candidate can
//! stand in wherever the receiver is declared.
//!
//! Rules that need to look at a class by name go through a
//! [`ClassResolver`]. A class that does not resolve is reported as
//! [`TypeError::UnresolvableClass`] rather than as "not assignable".
pub mod name;
pub mod simple;
pub mod object;
pub mod union;
mod iterable;
mod callable;

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::TypeError;
use crate::reflect::ClassResolver;

pub use name::TypeName;
pub use object::ObjectType;
pub use simple::SimpleType;
pub use union::UnionType;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Exactly `null`.
    Null,
    /// Anything but `void`; always nullable.
    Mixed,
    /// No return value; never nullable.
    Void,
    /// No declared type at all.
    Unknown,
    Iterable { allows_null: bool },
    Callable { allows_null: bool },
    /// The `object` declaration: any class instance.
    GenericObject { allows_null: bool },
    Simple(SimpleType),
    Object(ObjectType),
    Union(UnionType),
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTION
// ————————————————————————————————————————————————————————————————————————————

impl Type {
    pub fn iterable(allows_null: bool) -> Self {
        Type::Iterable { allows_null }
    }

    pub fn callable(allows_null: bool) -> Self {
        Type::Callable { allows_null }
    }

    pub fn generic_object(allows_null: bool) -> Self {
        Type::GenericObject { allows_null }
    }

    pub fn simple(name: &str, allows_null: bool) -> Self {
        Type::Simple(SimpleType::new(name, allows_null))
    }

    pub fn object(class_name: &str, allows_null: bool) -> Result<Self, TypeError> {
        Ok(Type::Object(ObjectType::new(TypeName::new(class_name)?, allows_null)))
    }

    pub fn union(types: Vec<Type>) -> Result<Self, TypeError> {
        UnionType::new(types).map(Type::Union)
    }

    /// The type of a concrete sample value; simple variants carry the value.
    pub fn from_value(value: &Value, allows_null: bool) -> Self {
        let name = match value {
            Value::Null => return Type::Null,
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_i64() || n.is_u64() => "int",
            Value::Number(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) | Value::Object(_) => "array",
        };
        Type::Simple(SimpleType::with_value(name, allows_null, value.clone()))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONTRACT
// ————————————————————————————————————————————————————————————————————————————

impl Type {
    /// Whether `other` can stand in wherever `self` is declared.
    pub fn is_assignable(
        &self,
        other: &Type,
        classes: &dyn ClassResolver,
    ) -> Result<bool, TypeError> {
        match self {
            Type::Null => Ok(other.is_null()),
            Type::Void => Ok(other.is_void()),
            Type::Mixed => Ok(!other.is_void()),
            Type::Unknown => Ok(true),
            Type::Iterable { allows_null } => iterable::accepts(*allows_null, other, classes),
            Type::Callable { allows_null } => callable::accepts(*allows_null, other, classes),
            Type::GenericObject { allows_null } => Ok(match other {
                Type::Null => *allows_null,
                Type::Object(_) | Type::GenericObject { .. } => true,
                _ => false,
            }),
            Type::Simple(simple) => Ok(match other {
                Type::Null => simple.allows_null(),
                Type::Simple(candidate) => simple.accepts(candidate),
                _ => false,
            }),
            Type::Object(object) => match other {
                Type::Null => Ok(object.allows_null()),
                Type::Object(candidate) => object.accepts(candidate, classes),
                _ => Ok(false),
            },
            Type::Union(union) => union.is_assignable(other, classes),
        }
    }

    pub fn allows_null(&self) -> bool {
        match self {
            Type::Null | Type::Mixed | Type::Unknown => true,
            Type::Void => false,
            Type::Iterable { allows_null }
            | Type::Callable { allows_null }
            | Type::GenericObject { allows_null } => *allows_null,
            Type::Simple(simple) => simple.allows_null(),
            Type::Object(object) => object.allows_null(),
            Type::Union(union) => union.allows_null(),
        }
    }

    /// The bare name, without nullability marker.
    pub fn name(&self) -> String {
        match self {
            Type::Null => "null".to_string(),
            Type::Mixed => "mixed".to_string(),
            Type::Void => "void".to_string(),
            Type::Unknown => "unknown type".to_string(),
            Type::Iterable { .. } => "iterable".to_string(),
            Type::Callable { .. } => "callable".to_string(),
            Type::GenericObject { .. } => "object".to_string(),
            Type::Simple(simple) => simple.name().to_string(),
            Type::Object(object) => object.class_name().qualified_name().to_string(),
            Type::Union(union) => union.as_string(),
        }
    }

    /// Declaration syntax, e.g. `?int`, `App\User`, `int|null`.
    pub fn as_string(&self) -> String {
        match self {
            Type::Null | Type::Mixed | Type::Void | Type::Unknown => self.name(),
            Type::Union(union) => union.as_string(),
            Type::Iterable { .. }
            | Type::Callable { .. }
            | Type::GenericObject { .. }
            | Type::Simple(_)
            | Type::Object(_) => {
                if self.allows_null() {
                    format!("?{}", self.name())
                } else {
                    self.name()
                }
            }
        }
    }

    /// `": " + as_string()`, as written after a parameter list.
    pub fn as_return_type_declaration(&self) -> String {
        format!(": {}", self.as_string())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NARROWING
// ————————————————————————————————————————————————————————————————————————————

impl Type {
    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Type::Mixed)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn is_iterable(&self) -> bool {
        matches!(self, Type::Iterable { .. })
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Type::Callable { .. })
    }

    pub fn is_generic_object(&self) -> bool {
        matches!(self, Type::GenericObject { .. })
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Type::Simple(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Type::Object(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            Type::Simple(simple) => Some(simple),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Type::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(union) => Some(union),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

/// Serialized as its declaration syntax.
impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
