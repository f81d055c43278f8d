use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoints::{EndpointContract, define_endpoint_schemas};
use crate::entities::{EntityName, define_entity_schemas};
use crate::error::ValidationError;
use crate::operation::Operation;
use crate::schema::Schema;

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();
}

/// The process-wide registry. Built on first use, never modified afterwards.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[derive(Debug, thiserror::Error)]
pub enum ParseEntityError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("validated value does not decode into the target type")]
    Decode(#[from] serde_json::Error),
}

/** Holds the entity schemas and the endpoint contracts */
#[derive(Debug)]
pub struct Registry {
    entities: IndexMap<EntityName, Schema>,
    endpoints: IndexMap<Operation, EndpointContract>,
}

impl Registry {
    pub fn new() -> Self {
        let registry = Registry {
            entities: define_entity_schemas(),
            endpoints: define_endpoint_schemas(),
        };
        log::debug!(
            "schema registry built: {} entities, {} endpoints",
            registry.entities.len(),
            registry.endpoints.len()
        );
        registry
    }

    // both tables are total over their key enums
    pub fn entity(&self, name: EntityName) -> &Schema {
        &self.entities[&name]
    }

    pub fn endpoint(&self, op: Operation) -> &EndpointContract {
        &self.endpoints[&op]
    }

    /// Looks up a contract by its textual key, e.g. `"get /pet/:petId"`
    pub fn endpoint_by_key(&self, key: &str) -> Option<(Operation, &EndpointContract)> {
        let op = key.parse::<Operation>().ok()?;
        Some((op, self.endpoint(op)))
    }

    pub fn entity_iter(&self) -> impl Iterator<Item = (EntityName, &Schema)> {
        self.entities.iter().map(|(k, v)| (*k, v))
    }

    pub fn endpoint_iter(&self) -> impl Iterator<Item = (Operation, &EndpointContract)> {
        self.endpoints.iter().map(|(k, v)| (*k, v))
    }

    pub fn validate_entity(&self, name: EntityName, value: &Value) -> Result<Value, ValidationError> {
        self.entity(name).validate(value)
    }

    /// Validates `value` against the entity schema, then decodes it into `T`
    pub fn parse_entity<T: DeserializeOwned>(
        &self,
        name: EntityName,
        value: &Value,
    ) -> Result<T, ParseEntityError> {
        let validated = self.validate_entity(name, value)?;
        Ok(serde_json::from_value(validated)?)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
