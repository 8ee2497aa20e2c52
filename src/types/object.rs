use super::name::TypeName;
use crate::error::TypeError;
use crate::reflect::ClassResolver;

/// A declared class or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectType {
    class_name: TypeName,
    allows_null: bool,
}

impl ObjectType {
    pub fn new(class_name: TypeName, allows_null: bool) -> Self {
        Self { class_name, allows_null }
    }

    pub fn class_name(&self) -> &TypeName {
        &self.class_name
    }

    pub fn allows_null(&self) -> bool {
        self.allows_null
    }

    /// Same class (case-insensitively), or a descendant of it.
    pub(super) fn accepts(
        &self,
        other: &ObjectType,
        classes: &dyn ClassResolver,
    ) -> Result<bool, TypeError> {
        if self.class_name.matches(other.class_name.qualified_name()) {
            return Ok(true);
        }
        classes.is_subclass_of(
            other.class_name.qualified_name(),
            self.class_name.qualified_name(),
        )
    }
}
