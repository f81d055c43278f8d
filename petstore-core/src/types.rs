use std::fmt::Display;

use serde_json::Value;

/**
representation of the kinds of JSON data items a schema can expect or encounter,
following the [type](https://datatracker.ietf.org/doc/html/draft-wright-json-schema-validation-00#section-5.21)
keyword.
Note that we do not distinguish between `number` and `integer` here; integrality
is a separate check on top of `Number`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
}

impl Type {
    /// The type of an actual JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Type::Null,
            Value::Bool(_) => Type::Boolean,
            Value::Number(_) => Type::Number,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::Array,
            Value::Object(_) => Type::Object,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Type::Null => "null",
            Type::Boolean => "boolean",
            Type::Object => "object",
            Type::Array => "array",
            Type::Number => "number",
            Type::String => "string",
        };
        f.write_str(s)
    }
}

/// Where an operation parameter travels in the outbound request.
/// `Body` stands for the request payload, which is modeled as a parameter named `body`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "params",
            ParameterLocation::Query => "queries",
            ParameterLocation::Header => "headers",
            ParameterLocation::Body => "body",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_of() {
        assert_eq!(Type::of(&json!(null)), Type::Null);
        assert_eq!(Type::of(&json!(1.5)), Type::Number);
        assert_eq!(Type::of(&json!({})), Type::Object);
        assert_eq!(Type::of(&json!(["a"])), Type::Array);
        assert_eq!(Type::String.to_string(), "string");
    }
}
