//! Declaration text → [`Type`].
//!
//! Accepts what a signature would contain after the colon or before a
//! parameter name: `?int`, `int|string|null`, `\App\Collection`, `mixed`.
//! An empty declaration is the undeclared type.
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::TypeError;
use crate::types::simple::SCALAR_NAMES;
use crate::types::Type;

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\\?[A-Za-z_[^\x00-\x7f]][A-Za-z0-9_[^\x00-\x7f]]*(\\[A-Za-z_[^\x00-\x7f]][A-Za-z0-9_[^\x00-\x7f]]*)*$")
        .expect("qualified name pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclError {
    #[error("`{0}` is not a valid type name")]
    InvalidName(String),

    #[error("empty member in union declaration `{0}`")]
    EmptyMember(String),

    #[error("`?` cannot be applied to `{0}`")]
    InvalidNullable(String),

    #[error(transparent)]
    Type(#[from] TypeError),
}

pub fn parse(decl: &str) -> Result<Type, DeclError> {
    let decl = decl.trim();
    if decl.is_empty() {
        return Ok(Type::Unknown);
    }
    if decl.contains('|') {
        return parse_union(decl);
    }
    match decl.strip_prefix('?') {
        Some(rest) => parse_single(rest.trim(), true),
        None => parse_single(decl, false),
    }
}

// Union members spell nullability with a `null` member, never with `?`.
fn parse_union(decl: &str) -> Result<Type, DeclError> {
    let mut members = Vec::new();
    for part in decl.split('|') {
        let part = part.trim();
        if part.is_empty() {
            return Err(DeclError::EmptyMember(decl.to_string()));
        }
        if part.starts_with('?') {
            return Err(DeclError::InvalidNullable(decl.to_string()));
        }
        members.push(parse_single(part, false)?);
    }
    Ok(Type::union(members)?)
}

fn parse_single(name: &str, nullable: bool) -> Result<Type, DeclError> {
    let lower = name.to_ascii_lowercase();
    let ty = match lower.as_str() {
        "null" | "mixed" | "void" if nullable => {
            return Err(DeclError::InvalidNullable(name.to_string()));
        }
        "null" => Type::Null,
        "mixed" => Type::Mixed,
        "void" => Type::Void,
        "iterable" => Type::iterable(nullable),
        "callable" => Type::callable(nullable),
        "object" => Type::generic_object(nullable),
        scalar if SCALAR_NAMES.contains(&scalar) => Type::simple(scalar, nullable),
        _ => {
            if !QUALIFIED_NAME.is_match(name) {
                return Err(DeclError::InvalidName(name.to_string()));
            }
            let name = name.strip_prefix('\\').unwrap_or(name);
            Type::object(name, nullable)?
        }
    };
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(decl: &str) -> String {
        parse(decl).unwrap().as_string()
    }

    #[test]
    fn keywords_and_scalars() {
        assert_eq!(parse("mixed").unwrap(), Type::Mixed);
        assert_eq!(parse("VOID").unwrap(), Type::Void);
        assert_eq!(parse("  ").unwrap(), Type::Unknown);
        assert_eq!(canonical("?Iterable"), "?iterable");
        assert_eq!(canonical("object"), "object");
        assert_eq!(canonical("boolean"), "bool");
        assert_eq!(canonical("?integer"), "?int");
    }

    #[test]
    fn class_names() {
        assert_eq!(canonical("\\App\\Model\\User"), "App\\Model\\User");
        assert_eq!(canonical("?Closure"), "?Closure");
        assert!(parse("App\\Model\\User").unwrap().is_object());
        assert_eq!(parse("App\\\\User"), Err(DeclError::InvalidName("App\\\\User".into())));
        assert_eq!(parse("9lives"), Err(DeclError::InvalidName("9lives".into())));
    }

    #[test]
    fn non_ascii_class_names() {
        assert_eq!(canonical("\\App\\Заказ"), "App\\Заказ");
        assert_eq!(canonical("?Ünïcode\\Straße"), "?Ünïcode\\Straße");
        assert!(parse("App\\Заказ").unwrap().is_object());
        assert_eq!(parse("App\\9Заказ"), Err(DeclError::InvalidName("App\\9Заказ".into())));
    }

    #[test]
    fn unions() {
        assert_eq!(canonical("string|int"), "int|string");
        assert_eq!(canonical("string | null"), "null|string");
        assert!(parse("int|null").unwrap().allows_null());
        assert_eq!(canonical("\\App\\User|array|null"), "App\\User|array|null");
    }

    #[test]
    fn union_violations_surface_as_type_errors() {
        assert_eq!(
            parse("int|void"),
            Err(DeclError::Type(TypeError::UnionContainsVoid))
        );
        assert_eq!(parse("int||string"), Err(DeclError::EmptyMember("int||string".into())));
        assert_eq!(parse("?int|string"), Err(DeclError::InvalidNullable("?int|string".into())));
        assert_eq!(parse("int|?string"), Err(DeclError::InvalidNullable("int|?string".into())));
    }

    #[test]
    fn nullable_marker_on_keywords() {
        assert_eq!(parse("?mixed"), Err(DeclError::InvalidNullable("mixed".into())));
        assert_eq!(parse("?void"), Err(DeclError::InvalidNullable("void".into())));
    }
}
