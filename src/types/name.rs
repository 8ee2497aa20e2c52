use std::fmt;

use crate::error::TypeError;

/// A fully-qualified class or interface name, e.g. `App\Model\User`.
///
/// Stripping a leading `\` is the job of whoever builds the name; see
/// [`crate::decl`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    qualified: String,
}

impl TypeName {
    pub fn new(qualified: impl Into<String>) -> Result<Self, TypeError> {
        let qualified = qualified.into();
        if qualified.is_empty() {
            return Err(TypeError::EmptyTypeName);
        }
        Ok(Self { qualified })
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified
    }

    /// Everything before the last `\`, if the name is namespaced.
    pub fn namespace_name(&self) -> Option<&str> {
        self.qualified.rsplit_once('\\').map(|(ns, _)| ns)
    }

    pub fn simple_name(&self) -> &str {
        match self.qualified.rsplit_once('\\') {
            Some((_, simple)) => simple,
            None => &self.qualified,
        }
    }

    /// Class names in the host language compare case-insensitively.
    pub fn matches(&self, other: &str) -> bool {
        self.qualified.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified)
    }
}
