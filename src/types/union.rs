use super::Type;
use crate::error::TypeError;
use crate::reflect::ClassResolver;

/// `A|B|...`: satisfied when any member accepts the candidate.
///
/// Members are fixed at construction. Nested unions and duplicate members
/// are kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    types: Vec<Type>,
}

impl UnionType {
    /// Fails on fewer than two members, or on any `unknown`/`void` member.
    pub fn new(types: Vec<Type>) -> Result<Self, TypeError> {
        if types.len() < 2 {
            return Err(TypeError::UnionTooFewMembers { count: types.len() });
        }
        for ty in &types {
            match ty {
                Type::Unknown => return Err(TypeError::UnionContainsUnknown),
                Type::Void => return Err(TypeError::UnionContainsVoid),
                _ => {}
            }
        }
        Ok(Self { types })
    }

    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn is_assignable(
        &self,
        other: &Type,
        classes: &dyn ClassResolver,
    ) -> Result<bool, TypeError> {
        for ty in &self.types {
            if ty.is_assignable(other, classes)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Derived from membership: some member is `null`.
    pub fn allows_null(&self) -> bool {
        self.types.iter().any(Type::is_null)
    }

    /// Members sorted by their rendering, so construction order never shows.
    pub fn as_string(&self) -> String {
        let mut rendered = self.types.iter().map(Type::as_string).collect::<Vec<_>>();
        rendered.sort();
        rendered.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::NoClasses;

    fn int() -> Type {
        Type::simple("int", false)
    }

    fn string() -> Type {
        Type::simple("string", false)
    }

    #[test]
    fn needs_two_members() {
        assert_eq!(
            UnionType::new(vec![]),
            Err(TypeError::UnionTooFewMembers { count: 0 })
        );
        assert_eq!(
            UnionType::new(vec![int()]),
            Err(TypeError::UnionTooFewMembers { count: 1 })
        );
    }

    #[test]
    fn rejects_unknown_and_void_anywhere() {
        for position in 0..3 {
            let mut members = vec![int(), string()];
            members.insert(position, Type::Unknown);
            assert_eq!(UnionType::new(members), Err(TypeError::UnionContainsUnknown));

            let mut members = vec![int(), string()];
            members.insert(position, Type::Void);
            assert_eq!(UnionType::new(members), Err(TypeError::UnionContainsVoid));
        }
    }

    #[test]
    fn count_is_checked_before_members() {
        assert_eq!(
            UnionType::new(vec![Type::Void]),
            Err(TypeError::UnionTooFewMembers { count: 1 })
        );
    }

    #[test]
    fn rendering_is_sorted() {
        let a = UnionType::new(vec![string(), int()]).unwrap();
        let b = UnionType::new(vec![int(), string()]).unwrap();
        assert_eq!(a.as_string(), "int|string");
        assert_eq!(a.as_string(), b.as_string());

        let nullable = UnionType::new(vec![string(), Type::Null]).unwrap();
        assert_eq!(nullable.as_string(), "null|string");
        assert!(nullable.allows_null());
    }

    #[test]
    fn nullable_members_render_inline() {
        let union = UnionType::new(vec![Type::simple("string", true), int()]).unwrap();
        assert_eq!(union.as_string(), "?string|int");
        // nullability of the whole comes from a `null` member only
        assert!(!union.allows_null());
    }

    #[test]
    fn duplicates_are_kept() {
        let union = UnionType::new(vec![int(), Type::simple("integer", false)]).unwrap();
        assert_eq!(union.as_string(), "int|int");
        assert_eq!(union.types().len(), 2);
    }

    #[test]
    fn any_member_may_accept() {
        let union = UnionType::new(vec![int(), Type::Null]).unwrap();
        assert_eq!(union.is_assignable(&Type::Null, &NoClasses), Ok(true));
        assert_eq!(union.is_assignable(&int(), &NoClasses), Ok(true));
        assert_eq!(union.is_assignable(&string(), &NoClasses), Ok(false));
        assert_eq!(int().is_assignable(&Type::Null, &NoClasses), Ok(false));
    }

    #[test]
    fn short_circuits_before_a_failing_member() {
        let union = UnionType::new(vec![Type::Mixed, Type::iterable(false)]).unwrap();
        let ghost = Type::object("App\\Ghost", false).unwrap();
        assert_eq!(union.is_assignable(&ghost, &NoClasses), Ok(true));

        let union = UnionType::new(vec![Type::iterable(false), Type::Mixed]).unwrap();
        assert!(union.is_assignable(&ghost, &NoClasses).is_err());
    }
}
