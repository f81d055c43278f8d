//! Typed records for the pet-store entities.
//!
//! All records are open: keys the API sends that are not modeled here end up in
//! `extra` and are written back out on serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub photo_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Pet {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Approved,
    Delivered,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// ISO-8601 datetime with offset, kept as sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstore_core::{EntityName, registry};
    use serde_json::json;

    #[test]
    pub fn test_pet_serialization() {
        let pet = Pet {
            id: Some(1),
            name: "Doggy".to_string(),
            category: Some(Category {
                id: Some(1000),
                name: Some("Dogs".to_string()),
                ..Default::default()
            }),
            status: Some(PetStatus::Available),
            ..Default::default()
        };

        let value = serde_json::to_value(&pet).unwrap();
        let expected_value = json!({
            "id": 1,
            "name": "Doggy",
            "category": {
                "id": 1000,
                "name": "Dogs"
            },
            "status": "available",
            "photoUrls": [],
        });
        assert_eq!(expected_value, value);

        // what we send must pass our own contract
        registry()
            .validate_entity(EntityName::Pet, &value)
            .expect("serialized pet should be valid");
    }

    #[test]
    pub fn test_unknown_fields_survive() {
        let value = json!({
            "id": 5,
            "name": "Kitty",
            "photoUrls": ["http://example.com/kitty.png"],
            "tags": [{"id": 1, "name": "fluffy", "weight": 3}],
            "nickname": "K",
        });
        let pet: Pet = registry().parse_entity(EntityName::Pet, &value).unwrap();
        assert_eq!(pet.extra.get("nickname"), Some(&json!("K")));
        assert_eq!(pet.tags.as_ref().unwrap()[0].extra.get("weight"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&pet).unwrap(), value);
    }

    #[test]
    pub fn test_order_and_user() {
        let order: Order = registry()
            .parse_entity(
                EntityName::Order,
                &json!({"id": 3, "petId": 9, "shipDate": "2024-01-01T00:00:00Z", "status": "delivered"}),
            )
            .unwrap();
        assert_eq!(order.pet_id, Some(9));
        assert_eq!(order.status, Some(OrderStatus::Delivered));

        let user = User {
            username: Some("theUser".into()),
            first_name: Some("John".into()),
            user_status: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"username": "theUser", "firstName": "John", "userStatus": 1})
        );

        let r: ApiResponse = serde_json::from_value(json!({"code": 200, "type": "ok"})).unwrap();
        assert_eq!(r.type_.as_deref(), Some("ok"));
    }
}
