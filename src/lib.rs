//! Declared types of a host language's signatures, modeled as a closed
//! algebra, with one question answered precisely: is a candidate type
//! assignable to a target type?
pub mod error;
pub mod types;
pub mod reflect;
pub mod decl;
pub mod path_de;
pub mod suite;

pub use error::TypeError;
pub use reflect::{ClassInfo, ClassRegistry, ClassResolver, NoClasses};
pub use types::{ObjectType, SimpleType, Type, TypeName, UnionType};
