use serde_json::Value;

use super::Type;
use crate::error::TypeError;
use crate::reflect::ClassResolver;

/// Assignability rule for `callable` / `?callable`.
pub(super) fn accepts(
    allows_null: bool,
    other: &Type,
    classes: &dyn ClassResolver,
) -> Result<bool, TypeError> {
    match other {
        Type::Null => Ok(allows_null),
        Type::Callable { .. } => Ok(true),
        Type::Object(object) => {
            let name = object.class_name();
            if name.matches("Closure") {
                return Ok(true);
            }
            classes
                .resolve_class(name.qualified_name())
                .map(|class| class.has_method("__invoke"))
                .ok_or_else(|| TypeError::UnresolvableClass {
                    name: name.qualified_name().to_string(),
                })
        }
        Type::Simple(simple) => Ok(is_callback(simple.value(), classes)),
        Type::Mixed
        | Type::Void
        | Type::Unknown
        | Type::Iterable { .. }
        | Type::GenericObject { .. }
        | Type::Union(_) => Ok(false),
    }
}

// A sample value is data, not a declaration: a name that does not resolve
// just means the value is not a callback.
fn is_callback(value: &Value, classes: &dyn ClassResolver) -> bool {
    match value {
        Value::String(callback) => match callback.split_once("::") {
            Some((class, method)) => has_method(classes, class, method),
            None => classes.function_exists(callback),
        },
        Value::Array(pair) if pair.len() == 2 => match (&pair[0], &pair[1]) {
            (Value::String(class), Value::String(method)) => has_method(classes, class, method),
            _ => false,
        },
        _ => false,
    }
}

fn has_method(classes: &dyn ClassResolver, class: &str, method: &str) -> bool {
    let class = class.strip_prefix('\\').unwrap_or(class);
    classes
        .resolve_class(class)
        .is_some_and(|info| info.has_method(method))
}

#[cfg(test)]
mod tests {
    use super::super::{ObjectType, SimpleType, TypeName};
    use super::*;
    use crate::reflect::{ClassInfo, ClassRegistry, NoClasses};
    use serde_json::json;

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::builtin();
        registry.insert(ClassInfo::new("App\\Handler").method("__invoke"));
        registry.insert(ClassInfo::new("App\\Mailer").method("send"));
        registry.insert_function("strlen");
        registry
    }

    fn object(name: &str) -> Type {
        Type::Object(ObjectType::new(TypeName::new(name).unwrap(), false))
    }

    fn string_value(value: Value) -> Type {
        Type::Simple(SimpleType::with_value("string", false, value))
    }

    #[test]
    fn closures_and_invokables() {
        let classes = registry();
        let target = Type::callable(false);
        assert_eq!(target.is_assignable(&object("Closure"), &NoClasses), Ok(true));
        assert_eq!(target.is_assignable(&object("App\\Handler"), &classes), Ok(true));
        assert_eq!(target.is_assignable(&object("App\\Mailer"), &classes), Ok(false));
    }

    #[test]
    fn unresolvable_object_is_an_error() {
        let result = Type::callable(false).is_assignable(&object("App\\Ghost"), &registry());
        assert_eq!(result, Err(TypeError::UnresolvableClass { name: "App\\Ghost".into() }));
    }

    #[test]
    fn callback_values() {
        let classes = registry();
        let target = Type::callable(false);
        assert_eq!(target.is_assignable(&string_value(json!("strlen")), &classes), Ok(true));
        assert_eq!(target.is_assignable(&string_value(json!("strrev")), &classes), Ok(false));
        assert_eq!(
            target.is_assignable(&string_value(json!("App\\Mailer::send")), &classes),
            Ok(true)
        );
        assert_eq!(
            target.is_assignable(&string_value(json!("App\\Ghost::send")), &classes),
            Ok(false)
        );
        let pair = Type::Simple(SimpleType::with_value("array", false, json!(["App\\Mailer", "send"])));
        assert_eq!(target.is_assignable(&pair, &classes), Ok(true));
        let triple = Type::Simple(SimpleType::with_value("array", false, json!(["a", "b", "c"])));
        assert_eq!(target.is_assignable(&triple, &classes), Ok(false));
    }

    #[test]
    fn null_only_when_nullable() {
        assert_eq!(Type::callable(true).is_assignable(&Type::Null, &NoClasses), Ok(true));
        assert_eq!(Type::callable(false).is_assignable(&Type::Null, &NoClasses), Ok(false));
        assert_eq!(Type::callable(false).is_assignable(&Type::callable(true), &NoClasses), Ok(true));
    }
}
