use std::{fmt::Display, str::FromStr};

use indexmap::IndexMap;

use crate::error::SchemaBuilderError;
use crate::schema::{ObjectBuilder, Schema};

pub const PET_STATUS: &[&str] = &["available", "pending", "sold"];
pub const ORDER_STATUS: &[&str] = &["placed", "approved", "delivered"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityName {
    Category,
    Tag,
    Pet,
    ApiResponse,
    Order,
    User,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown entity '{0}'")]
pub struct UnknownEntity(pub String);

impl EntityName {
    pub const ALL: [EntityName; 6] = [
        EntityName::Category,
        EntityName::Tag,
        EntityName::Pet,
        EntityName::ApiResponse,
        EntityName::Order,
        EntityName::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityName::Category => "Category",
            EntityName::Tag => "Tag",
            EntityName::Pet => "Pet",
            EntityName::ApiResponse => "ApiResponse",
            EntityName::Order => "Order",
            EntityName::User => "User",
        }
    }
}

impl Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityName {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityName::ALL
            .iter()
            .find(|e| e.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownEntity(s.to_string()))
    }
}

/// The schema of every entity, in declaration order. Entities referring to
/// other entities embed a copy of their schema.
pub fn define_entity_schemas() -> IndexMap<EntityName, Schema> {
    build_entity_schemas().expect("entity schema table must not declare a field twice")
}

pub(crate) fn build_entity_schemas() -> Result<IndexMap<EntityName, Schema>, SchemaBuilderError> {
    let mut m = IndexMap::new();

    let category = ObjectBuilder::new("Category")
        .field("id", Schema::Integer)?
        .field("name", Schema::String)?
        .build()
        .partial();
    m.insert(EntityName::Category, Schema::from(category.clone()));

    let tag = ObjectBuilder::new("Tag")
        .field("id", Schema::Integer)?
        .field("name", Schema::String)?
        .build()
        .partial();
    m.insert(EntityName::Tag, Schema::from(tag.clone()));

    let pet = ObjectBuilder::new("Pet")
        .field("id", Schema::Integer.optional())?
        .field("name", Schema::String)?
        .field("category", Schema::from(category).optional())?
        .field("photoUrls", Schema::array(Schema::String))?
        .field("tags", Schema::array(tag.into()).optional())?
        .field("status", Schema::Enum(PET_STATUS).optional())?
        .build();
    m.insert(EntityName::Pet, pet.into());

    let api_response = ObjectBuilder::new("ApiResponse")
        .field("code", Schema::Integer)?
        .field("type", Schema::String)?
        .field("message", Schema::String)?
        .build()
        .partial();
    m.insert(EntityName::ApiResponse, api_response.into());

    let order = ObjectBuilder::new("Order")
        .field("id", Schema::Integer)?
        .field("petId", Schema::Integer)?
        .field("quantity", Schema::Integer)?
        .field("shipDate", Schema::DateTime)?
        .field("status", Schema::Enum(ORDER_STATUS))?
        .field("complete", Schema::Boolean)?
        .build()
        .partial();
    m.insert(EntityName::Order, order.into());

    let user = ObjectBuilder::new("User")
        .field("id", Schema::Integer)?
        .field("username", Schema::String)?
        .field("firstName", Schema::String)?
        .field("lastName", Schema::String)?
        .field("email", Schema::String)?
        .field("password", Schema::String)?
        .field("phone", Schema::String)?
        .field("userStatus", Schema::Integer)?
        .build()
        .partial();
    m.insert(EntityName::User, user.into());

    Ok(m)
}
