//! The reflection boundary.
//!
//! The type algebra never loads classes itself. Whenever a rule needs to know
//! something about a named class (is it iterable? does it extend `Foo`?), it
//! asks a [`ClassResolver`]. Tests use [`ClassRegistry`], an in-memory table
//! that can also be loaded from JSON.
use std::collections::HashSet;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::path_de::{self, PathError};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// What reflection knows about one class or interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClassInfo {
    pub name: String,
    /// Implements the host language's iteration capability (`Traversable`).
    #[serde(default)]
    pub iterable: bool,
    /// Direct superclass and implemented interfaces.
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn iterable(mut self) -> Self {
        self.iterable = true;
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.methods.push(method.into());
        self
    }

    pub fn has_method(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }
}

/// Capability the core uses to look up classes by qualified name.
pub trait ClassResolver {
    /// `None` means the class is not reflectable.
    fn resolve_class(&self, name: &str) -> Option<&ClassInfo>;

    fn function_exists(&self, _name: &str) -> bool {
        false
    }

    /// Whether `child` extends or implements `ancestor`, directly or not.
    ///
    /// `child` itself must resolve. Ancestors that do not resolve still count
    /// when named directly; the walk just cannot continue past them.
    fn is_subclass_of(&self, child: &str, ancestor: &str) -> Result<bool, TypeError> {
        let start = self
            .resolve_class(child)
            .ok_or_else(|| TypeError::UnresolvableClass { name: child.to_string() })?;

        let mut seen = HashSet::new();
        let mut pending: Vec<&ClassInfo> = vec![start];
        while let Some(class) = pending.pop() {
            for parent in &class.parents {
                if parent.eq_ignore_ascii_case(ancestor) {
                    return Ok(true);
                }
                if seen.insert(parent.to_ascii_lowercase()) {
                    if let Some(info) = self.resolve_class(parent) {
                        pending.push(info);
                    }
                }
            }
        }
        Ok(false)
    }
}

/// A resolver that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClasses;

impl ClassResolver for NoClasses {
    fn resolve_class(&self, _name: &str) -> Option<&ClassInfo> {
        None
    }
}

/// In-memory class table, case-insensitive on names.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: IndexMap<String, ClassInfo>,
    functions: IndexSet<String>,
}

/// On-disk shape of a registry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub functions: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl RegistryFile {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read class registry {}", path.display()))?;
        path_de::from_str_with_path(&src)
            .with_context(|| format!("failed to parse class registry {}", path.display()))
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The runtime's own iteration and invocation types.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(ClassInfo::new("Traversable").iterable());
        registry.insert(ClassInfo::new("Iterator").iterable().extends("Traversable"));
        registry.insert(ClassInfo::new("IteratorAggregate").iterable().extends("Traversable"));
        registry.insert(
            ClassInfo::new("ArrayIterator")
                .iterable()
                .extends("SeekableIterator")
                .extends("ArrayAccess")
                .extends("Countable"),
        );
        registry.insert(ClassInfo::new("SeekableIterator").iterable().extends("Iterator"));
        registry.insert(ClassInfo::new("Generator").iterable().extends("Iterator"));
        registry.insert(ClassInfo::new("ArrayAccess"));
        registry.insert(ClassInfo::new("Countable"));
        registry.insert(ClassInfo::new("Stringable").method("__toString"));
        registry.insert(ClassInfo::new("Closure").method("__invoke").method("bind"));
        registry.insert(ClassInfo::new("stdClass"));
        registry
    }

    pub fn insert(&mut self, class: ClassInfo) {
        self.classes.insert(class.name.to_ascii_lowercase(), class);
    }

    pub fn insert_function(&mut self, name: impl AsRef<str>) {
        self.functions.insert(name.as_ref().to_ascii_lowercase());
    }

    /// Later entries replace earlier ones with the same name.
    pub fn extend(&mut self, file: RegistryFile) {
        for class in file.classes {
            self.insert(class);
        }
        for function in file.functions {
            self.insert_function(function);
        }
    }

    pub fn from_json_str(src: &str) -> Result<Self, PathError> {
        let file = path_de::from_str_with_path::<RegistryFile>(src)?;
        let mut registry = Self::new();
        registry.extend(file);
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassResolver for ClassRegistry {
    fn resolve_class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&name.to_ascii_lowercase())
    }

    fn function_exists(&self, name: &str) -> bool {
        self.functions.contains(&name.to_ascii_lowercase())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
