use serde_json::Value;

/// A scalar-family type known by name (`int`, `string`, `array`, ...).
///
/// `value` is a sample of the family. It is what iterable and callable rules
/// look at, since the name alone cannot tell `"strlen"` from `"hello"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    name: String,
    allows_null: bool,
    value: Value,
}

impl SimpleType {
    /// Builds the type with a representative value for its family.
    pub fn new(name: &str, allows_null: bool) -> Self {
        let name = normalize(name);
        let value = representative_value(&name);
        Self { name, allows_null, value }
    }

    pub fn with_value(name: &str, allows_null: bool, value: Value) -> Self {
        Self { name: normalize(name), allows_null, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allows_null(&self) -> bool {
        self.allows_null
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Arrays (lists or maps) are the only native iterables.
    pub fn value_is_iterable(&self) -> bool {
        matches!(self.value, Value::Array(_) | Value::Object(_))
    }

    pub(super) fn accepts(&self, other: &SimpleType) -> bool {
        self.name == other.name
    }
}

/// Names every scalar family is known by.
pub const SCALAR_NAMES: &[&str] = &[
    "array", "bool", "boolean", "double", "float", "int", "integer", "real", "resource",
    "resource (closed)", "string",
];

fn normalize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.as_str() {
        "boolean" => "bool".to_string(),
        "real" | "double" => "float".to_string(),
        "integer" => "int".to_string(),
        "[]" => "array".to_string(),
        _ => lower,
    }
}

fn representative_value(name: &str) -> Value {
    match name {
        "bool" => Value::Bool(false),
        "int" => Value::from(0),
        "float" => Value::from(0.0),
        "string" => Value::String(String::new()),
        "array" => Value::Array(Vec::new()),
        _ => Value::Null,
    }
}
