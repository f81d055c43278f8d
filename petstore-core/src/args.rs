use serde_json::{Map, Value};

use crate::file_like::BinaryPayload;
use crate::types::ParameterLocation;

/// A single argument: either structured data or a binary payload
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Json(Value),
    Binary(BinaryPayload),
}

impl From<Value> for ArgValue {
    fn from(value: Value) -> Self {
        ArgValue::Json(value)
    }
}

impl From<BinaryPayload> for ArgValue {
    fn from(payload: BinaryPayload) -> Self {
        ArgValue::Binary(payload)
    }
}

/// The arguments of one operation call, grouped by where they travel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub params: Map<String, Value>,
    pub queries: Map<String, Value>,
    pub headers: Map<String, Value>,
    pub body: Option<ArgValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// path parameter, substituted into the path template
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn query(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.queries.insert(name.to_string(), value.into());
        self
    }

    /// sets the query parameter only if a value is given
    pub fn query_opt(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn header_opt(self, name: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.header(name, v),
            None => self,
        }
    }

    pub fn body(mut self, body: impl Into<ArgValue>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn slot(&self, location: ParameterLocation) -> Option<&Map<String, Value>> {
        match location {
            ParameterLocation::Path => Some(&self.params),
            ParameterLocation::Query => Some(&self.queries),
            ParameterLocation::Header => Some(&self.headers),
            ParameterLocation::Body => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, location: ParameterLocation) -> Option<&mut Map<String, Value>> {
        match location {
            ParameterLocation::Path => Some(&mut self.params),
            ParameterLocation::Query => Some(&mut self.queries),
            ParameterLocation::Header => Some(&mut self.headers),
            ParameterLocation::Body => None,
        }
    }
}

/// Plain string form of a parameter value as it goes into a URL or header.
/// Strings are taken verbatim, everything else in its JSON notation.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_slots() {
        let args = Args::new()
            .param("petId", 7)
            .query("status", "sold")
            .query_opt("name", None::<String>)
            .header_opt("api_key", Some("secret"));
        assert_eq!(args.params.get("petId"), Some(&json!(7)));
        assert_eq!(args.queries.len(), 1);
        assert_eq!(args.headers.get("api_key"), Some(&json!("secret")));
        assert!(args.body.is_none());
    }

    #[test]
    fn test_stringify() {
        assert_eq!(stringify(&json!("doggie")), "doggie");
        assert_eq!(stringify(&json!(1)), "1");
        assert_eq!(stringify(&json!(true)), "true");
    }
}
