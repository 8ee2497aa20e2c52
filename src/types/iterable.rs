use super::Type;
use crate::error::TypeError;
use crate::reflect::ClassResolver;

/// Assignability rule for `iterable` / `?iterable`.
pub(super) fn accepts(
    allows_null: bool,
    other: &Type,
    classes: &dyn ClassResolver,
) -> Result<bool, TypeError> {
    match other {
        Type::Null => Ok(allows_null),
        Type::Iterable { .. } => Ok(true),
        Type::Simple(simple) => Ok(simple.value_is_iterable()),
        Type::Object(object) => {
            let name = object.class_name().qualified_name();
            classes
                .resolve_class(name)
                .map(|class| class.iterable)
                .ok_or_else(|| TypeError::UnresolvableClass { name: name.to_string() })
        }
        Type::Mixed
        | Type::Void
        | Type::Unknown
        | Type::Callable { .. }
        | Type::GenericObject { .. }
        | Type::Union(_) => Ok(false),
    }
}
