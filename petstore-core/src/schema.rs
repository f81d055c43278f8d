use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::args::ArgValue;
use crate::error::{Issue, IssueKind, IssuePath, SchemaBuilderError, ValidationError};
use crate::file_like::{self, ExecutionContext};
use crate::types::Type;

// seconds are mandatory, fractions optional, offset either 'Z' or +hh[[:]mm]
const DATETIME_WITH_OFFSET_STR: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(([+-]\d{2}(:?\d{2})?)|Z)$";

lazy_static! {
    static ref DATETIME_WITH_OFFSET: Regex = Regex::new(DATETIME_WITH_OFFSET_STR).unwrap();
}

/**
A validator for one data item. Schemas are plain data; they are assembled once
into the registry and then only read.

Objects are open records: keys not declared in the schema are passed through
into the validated value untouched.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Boolean,
    /// any JSON number without a fractional part
    Integer,
    String,
    /// ISO-8601 datetime string that carries a timezone offset
    DateTime,
    Enum(&'static [&'static str]),
    Array(Box<Schema>),
    Object(ObjectSchema),
    /// absence is valid
    Optional(Box<Schema>),
    /// absence is valid and replaced by the given value
    Default(Box<Schema>, Value),
    /// a binary payload, file-like according to the execution context
    FileLike,
}

impl Schema {
    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn optional(self) -> Self {
        match self {
            Schema::Optional(_) | Schema::Default(..) => self,
            s => Schema::Optional(Box::new(s)),
        }
    }

    pub fn with_default(self, value: impl Into<Value>) -> Self {
        let inner = match self {
            Schema::Optional(inner) | Schema::Default(inner, _) => *inner,
            s => s,
        };
        Schema::Default(Box::new(inner), value.into())
    }

    /// whether an absent value passes this schema
    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_) | Schema::Default(..))
    }

    /// the schema with optionality and defaults stripped off
    pub fn unwrap_modifiers(&self) -> &Schema {
        match self {
            Schema::Optional(inner) | Schema::Default(inner, _) => inner.unwrap_modifiers(),
            s => s,
        }
    }

    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Schema::Default(_, value) => Some(value),
            _ => None,
        }
    }

    /// The JSON type a conforming value has; `None` for binary payloads
    pub fn json_type(&self) -> Option<Type> {
        let t = match self.unwrap_modifiers() {
            Schema::Boolean => Type::Boolean,
            Schema::Integer => Type::Number,
            Schema::String | Schema::DateTime | Schema::Enum(_) => Type::String,
            Schema::Array(_) => Type::Array,
            Schema::Object(_) => Type::Object,
            Schema::FileLike => return None,
            Schema::Optional(_) | Schema::Default(..) => unreachable!("modifiers were unwrapped"),
        };
        Some(t)
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self.unwrap_modifiers() {
            Schema::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Validates `value`, returning its canonical form. Binary checks run in the
    /// default (server) execution context.
    pub fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate_in(ExecutionContext::default(), value)
    }

    pub fn validate_in(&self, ctx: ExecutionContext, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        let out = self.check(ctx, Some(value), &mut IssuePath::root(), &mut issues);
        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }
        Ok(out.unwrap_or(Value::Null))
    }

    /// Validates an argument that may be structured or binary
    pub fn validate_arg(&self, ctx: ExecutionContext, arg: ArgValue) -> Result<ArgValue, ValidationError> {
        let mut issues = Vec::new();
        let out = self.check_arg(ctx, Some(arg), &mut IssuePath::root(), &mut issues);
        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }
        Ok(out.unwrap_or(ArgValue::Json(Value::Null)))
    }

    /// Returns `None` when the value is absent and may stay absent, or when it failed.
    /// Failures are appended to `issues`.
    pub(crate) fn check(
        &self,
        ctx: ExecutionContext,
        value: Option<&Value>,
        path: &mut IssuePath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        match (self, value) {
            (Schema::Optional(_), None) => None,
            (Schema::Default(_, default), None) => Some(default.clone()),
            (Schema::Optional(inner) | Schema::Default(inner, _), Some(v)) => {
                inner.check(ctx, Some(v), path, issues)
            }
            (_, None) => {
                issues.push(Issue {
                    path: path.clone(),
                    kind: IssueKind::Required,
                });
                None
            }
            (_, Some(v)) => self.check_present(ctx, v, path, issues),
        }
    }

    pub(crate) fn check_arg(
        &self,
        ctx: ExecutionContext,
        arg: Option<ArgValue>,
        path: &mut IssuePath,
        issues: &mut Vec<Issue>,
    ) -> Option<ArgValue> {
        let arg = match arg {
            Some(arg) => arg,
            None => return self.check(ctx, None, path, issues).map(ArgValue::Json),
        };
        match (self.unwrap_modifiers(), arg) {
            (Schema::FileLike, arg) => match file_like::check_at(ctx, arg, path) {
                Ok(payload) => Some(ArgValue::Binary(payload)),
                Err(e) => {
                    issues.extend(e.into_issues());
                    None
                }
            },
            (_, ArgValue::Json(v)) => self.check(ctx, Some(&v), path, issues).map(ArgValue::Json),
            (schema, ArgValue::Binary(_)) => {
                issues.push(Issue {
                    path: path.clone(),
                    kind: IssueKind::UnexpectedBinary {
                        expected: schema.json_type().unwrap_or(Type::Object),
                    },
                });
                None
            }
        }
    }

    fn check_present(
        &self,
        ctx: ExecutionContext,
        value: &Value,
        path: &mut IssuePath,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        let type_mismatch = |expected: Type| IssueKind::InvalidType {
            expected,
            received: Type::of(value),
        };

        match self {
            Schema::Boolean => match value {
                Value::Bool(_) => Some(value.clone()),
                _ => report(issues, path, type_mismatch(Type::Boolean)),
            },
            Schema::Integer => match value {
                Value::Number(n) => match canonical_integer(n) {
                    Some(i) => Some(i),
                    None => report(issues, path, IssueKind::NotInteger),
                },
                _ => report(issues, path, type_mismatch(Type::Number)),
            },
            Schema::String => match value {
                Value::String(_) => Some(value.clone()),
                _ => report(issues, path, type_mismatch(Type::String)),
            },
            Schema::DateTime => match value {
                Value::String(s) if DATETIME_WITH_OFFSET.is_match(s) => Some(value.clone()),
                Value::String(s) => report(issues, path, IssueKind::InvalidDateTime {
                    received: s.clone(),
                }),
                _ => report(issues, path, type_mismatch(Type::String)),
            },
            Schema::Enum(options) => match value {
                Value::String(s) if options.iter().any(|o| *o == s.as_str()) => Some(value.clone()),
                Value::String(s) => report(issues, path, IssueKind::InvalidEnumValue {
                    options: options.iter().map(|o| o.to_string()).collect(),
                    received: s.clone(),
                }),
                _ => report(issues, path, type_mismatch(Type::String)),
            },
            Schema::Array(items) => match value {
                Value::Array(elements) => {
                    let mut out = Vec::with_capacity(elements.len());
                    for (n, element) in elements.iter().enumerate() {
                        path.push_index(n);
                        if let Some(v) = items.check(ctx, Some(element), path, issues) {
                            out.push(v);
                        }
                        path.pop();
                    }
                    Some(Value::Array(out))
                }
                _ => report(issues, path, type_mismatch(Type::Array)),
            },
            Schema::Object(object) => match value {
                Value::Object(map) => Some(Value::Object(object.check_object(ctx, map, path, issues))),
                _ => report(issues, path, type_mismatch(Type::Object)),
            },
            Schema::FileLike => {
                match file_like::check_at(ctx, ArgValue::Json(value.clone()), path) {
                    Err(e) => issues.extend(e.into_issues()),
                    // structured data is never file-like
                    Ok(payload) => issues.push(Issue {
                        path: path.clone(),
                        kind: IssueKind::NotFileLike {
                            expected: ctx.expected_kind(),
                            received: payload.kind().to_string(),
                        },
                    }),
                }
                None
            }
            Schema::Optional(inner) | Schema::Default(inner, _) => {
                inner.check_present(ctx, value, path, issues)
            }
        }
    }
}

fn report(issues: &mut Vec<Issue>, path: &IssuePath, kind: IssueKind) -> Option<Value> {
    issues.push(Issue {
        path: path.clone(),
        kind,
    });
    None
}

fn canonical_integer(n: &serde_json::Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    let canonical = if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Value::from(f as i64)
    } else if f >= 0.0 && f < u64::MAX as f64 {
        Value::from(f as u64)
    } else {
        // whole, but beyond the 64-bit range: kept as sent
        Value::Number(n.clone())
    };
    Some(canonical)
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Schema::Object(object)
    }
}

/// Object schema with named, ordered fields. Undeclared keys pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    name: String,
    fields: IndexMap<String, Schema>,
}

impl ObjectSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields.get(name)
    }

    pub fn field_iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.field_iter()
            .filter(|(_, s)| !s.is_optional())
            .map(|(k, _)| k)
    }

    /// Makes every field optional
    pub fn partial(mut self) -> Self {
        self.fields = self
            .fields
            .into_iter()
            .map(|(k, v)| (k, v.optional()))
            .collect();
        self
    }

    fn check_object(
        &self,
        ctx: ExecutionContext,
        map: &Map<String, Value>,
        path: &mut IssuePath,
        issues: &mut Vec<Issue>,
    ) -> Map<String, Value> {
        // start from the input so unknown keys survive
        let mut out = map.clone();
        for (name, schema) in &self.fields {
            path.push_key(name);
            match schema.check(ctx, map.get(name), path, issues) {
                Some(v) => {
                    out.insert(name.clone(), v);
                }
                None => {
                    out.remove(name);
                }
            }
            path.pop();
        }
        out
    }
}

#[derive(Debug)]
pub struct ObjectBuilder {
    name: String,
    fields: IndexMap<String, Schema>,
}

impl ObjectBuilder {
    pub fn new(name: &str) -> Self {
        ObjectBuilder {
            name: name.to_string(),
            fields: IndexMap::new(),
        }
    }

    /** Add a field with the given name and schema */
    pub fn field(mut self, name: &str, schema: impl Into<Schema>) -> Result<Self, SchemaBuilderError> {
        if self.fields.contains_key(name) {
            return Err(SchemaBuilderError::DuplicateFieldName(name.to_string()));
        }
        self.fields.insert(name.to_string(), schema.into());
        Ok(self)
    }

    pub fn build(self) -> ObjectSchema {
        ObjectSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_like::{BinaryKind, BinaryPayload, FileHandle};
    use serde_json::json;

    fn thing() -> Schema {
        ObjectBuilder::new("Thing")
            .field("id", Schema::Integer.optional())
            .unwrap()
            .field("label", Schema::String)
            .unwrap()
            .field("tags", Schema::array(Schema::String).optional())
            .unwrap()
            .build()
            .into()
    }

    #[test]
    fn test_duplicate_field() {
        let result = ObjectBuilder::new("Dup")
            .field("a", Schema::String)
            .unwrap()
            .field("a", Schema::Integer);
        assert!(matches!(result, Err(SchemaBuilderError::DuplicateFieldName(n)) if n == "a"));
    }

    #[test]
    fn test_optional_absent_and_passthrough() {
        let out = thing()
            .validate(&json!({"label": "x", "extra": {"deep": [1, 2]}}))
            .unwrap();
        assert_eq!(out, json!({"label": "x", "extra": {"deep": [1, 2]}}));
    }

    #[test]
    fn test_integer_canonicalization() {
        assert_eq!(Schema::Integer.validate(&json!(3.0)).unwrap(), json!(3));
        assert_eq!(Schema::Integer.validate(&json!(-4)).unwrap(), json!(-4));
        // whole numbers past the i64 range are integers too
        assert_eq!(
            Schema::Integer.validate(&json!(1e19)).unwrap(),
            json!(10_000_000_000_000_000_000u64)
        );
        assert_eq!(
            Schema::Integer.validate(&json!(9.3e18)).unwrap(),
            json!(9_300_000_000_000_000_000u64)
        );
        assert_eq!(Schema::Integer.validate(&json!(-1e19)).unwrap(), json!(-1e19));
        assert_eq!(Schema::Integer.validate(&json!(1e300)).unwrap(), json!(1e300));
        let e = Schema::Integer.validate(&json!(1.5)).unwrap_err();
        assert_eq!(e.issues()[0].kind, IssueKind::NotInteger);
        let e = Schema::Integer.validate(&json!("1")).unwrap_err();
        assert_eq!(
            e.issues()[0].kind,
            IssueKind::InvalidType {
                expected: Type::Number,
                received: Type::String
            }
        );
    }

    #[test]
    fn test_null_is_not_absent() {
        let e = thing().validate(&json!({"label": "x", "id": null})).unwrap_err();
        assert_eq!(e.issues()[0].path.to_string(), "id");
        assert_eq!(
            e.issues()[0].kind,
            IssueKind::InvalidType {
                expected: Type::Number,
                received: Type::Null
            }
        );
    }

    #[test]
    fn test_collects_all_issues() {
        let e = thing()
            .validate(&json!({"id": "seven", "tags": ["ok", 3, false]}))
            .unwrap_err();
        let paths: Vec<String> = e.issues().iter().map(|i| i.path.to_string()).collect();
        assert_eq!(paths, vec!["id", "label", "tags[1]", "tags[2]"]);
        assert_eq!(e.issue_at("label").unwrap().kind, IssueKind::Required);
    }

    #[test]
    fn test_default_applied_only_when_absent() {
        let s = Schema::Enum(&["a", "b"]).optional().with_default("a");
        assert!(s.is_optional());
        assert_eq!(s.default_value(), Some(&json!("a")));
        let mut issues = Vec::new();
        let out = s.check(ExecutionContext::Server, None, &mut IssuePath::root(), &mut issues);
        assert_eq!(out, Some(json!("a")));
        assert_eq!(s.validate(&json!("b")).unwrap(), json!("b"));
        assert!(s.validate(&json!("c")).is_err());
    }

    #[test]
    fn test_datetime() {
        for ok in [
            "2023-11-05T10:15:00Z",
            "2023-11-05T10:15:00.123+02:00",
            "2023-11-05T10:15:00-0530",
            "2023-11-05T10:15:00+01",
        ] {
            assert!(Schema::DateTime.validate(&json!(ok)).is_ok(), "{ok} should pass");
        }
        for bad in ["2023-11-05", "2023-11-05T10:15:00", "yesterday", "2023-11-05 10:15:00Z"] {
            let e = Schema::DateTime.validate(&json!(bad)).unwrap_err();
            assert_eq!(
                e.issues()[0].kind,
                IssueKind::InvalidDateTime {
                    received: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn test_file_like_args() {
        let buffer = ArgValue::Binary(BinaryPayload::Buffer(vec![1, 2]));
        assert_eq!(
            Schema::FileLike
                .validate_arg(ExecutionContext::Server, buffer.clone())
                .unwrap(),
            buffer
        );
        let file = ArgValue::Binary(BinaryPayload::File(FileHandle::new("f", vec![1])));
        assert!(Schema::FileLike.validate_arg(ExecutionContext::Client, file).is_ok());

        let e = Schema::FileLike
            .validate_arg(ExecutionContext::Server, ArgValue::Json(json!({})))
            .unwrap_err();
        assert_eq!(
            e.issues()[0].kind,
            IssueKind::NotFileLike {
                expected: BinaryKind::Buffer,
                received: "object".into()
            }
        );

        // plain validation of structured data against a binary schema fails as well
        let e = Schema::FileLike.validate(&json!({})).unwrap_err();
        assert_eq!(e.issues().len(), 1);
        assert!(matches!(e.issues()[0].kind, IssueKind::NotFileLike { .. }));
    }

    #[test]
    fn test_binary_for_structured_schema() {
        let e = thing()
            .validate_arg(
                ExecutionContext::Server,
                ArgValue::Binary(BinaryPayload::Buffer(vec![])),
            )
            .unwrap_err();
        assert_eq!(
            e.issues()[0].kind,
            IssueKind::UnexpectedBinary {
                expected: Type::Object
            }
        );
    }

    #[test]
    fn test_partial() {
        let s = ObjectBuilder::new("P")
            .field("a", Schema::String)
            .unwrap()
            .build()
            .partial();
        assert_eq!(s.required_fields().count(), 0);
        assert!(Schema::from(s).validate(&json!({})).is_ok());
    }
}
