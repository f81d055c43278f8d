//! Request/response contracts of the pet-store API: entity schemas, the
//! per-operation parameter table, and the validation that runs on both.

use serde_json::Value;

mod args;
mod endpoints;
mod entities;
mod error;
mod file_like;
mod operation;
mod registry;
mod schema;
mod template;
mod types;

#[cfg(test)]
mod test;

pub use args::{ArgValue, Args, stringify};
pub use endpoints::{BODY, ContractBuilder, EndpointContract, ParamSpec, define_endpoint_schemas};
pub use entities::{EntityName, ORDER_STATUS, PET_STATUS, UnknownEntity, define_entity_schemas};
pub use error::{Issue, IssueKind, IssuePath, PathSegment, SchemaBuilderError, ValidationError};
pub use file_like::{
    BinaryKind, BinaryPayload, ExecutionContext, FileHandle, check_is_file_like,
};
pub use operation::{Operation, UnknownOperation};
pub use registry::{ParseEntityError, Registry, registry};
pub use schema::{ObjectBuilder, ObjectSchema, Schema};
pub use template::{PathTemplate, Segment};
pub use types::{ParameterLocation, Type};

/// Validates `value` against `schema` and returns the canonical value
pub fn validate(schema: &Schema, value: &Value) -> Result<Value, ValidationError> {
    schema.validate(value)
}
