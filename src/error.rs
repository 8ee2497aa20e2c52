//! Error taxonomy for the type algebra.
use thiserror::Error;

/// Failures raised by the core: either a value could not be constructed, or
/// an assignability check hit a class the resolver does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error("A union type must be composed of at least two types (got {count})")]
    UnionTooFewMembers { count: usize },

    #[error("A union type must not be composed of an unknown type")]
    UnionContainsUnknown,

    #[error("A union type must not be composed of a void type")]
    UnionContainsVoid,

    #[error("A type name must not be empty")]
    EmptyTypeName,

    /// The class loading environment disagrees with a type it declared itself.
    #[error("class `{name}` could not be resolved; is it declared in the class registry?")]
    UnresolvableClass { name: String },
}

impl TypeError {
    /// True for the errors that reject a union at construction time.
    pub fn is_construction_violation(&self) -> bool {
        matches!(
            self,
            TypeError::UnionTooFewMembers { .. }
                | TypeError::UnionContainsUnknown
                | TypeError::UnionContainsVoid
        )
    }
}
