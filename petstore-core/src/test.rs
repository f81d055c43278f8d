use serde::Deserialize;
use serde_json::{Value, json};
use test_log::test;

use super::*;

fn minimal(name: EntityName) -> Value {
    match name {
        EntityName::Pet => json!({"name": "doggie", "photoUrls": []}),
        _ => json!({}),
    }
}

#[test]
fn test_every_entity_passes_unknown_fields_through() {
    let registry = registry();
    for (name, _) in registry.entity_iter() {
        let mut value = minimal(name);
        let obj = value.as_object_mut().unwrap();
        obj.insert("x-extra".to_string(), json!({"nested": [1, "two"]}));
        obj.insert("legacyFlag".to_string(), json!(true));

        let out = registry.validate_entity(name, &value).unwrap();
        assert_eq!(out["x-extra"], json!({"nested": [1, "two"]}), "{name}");
        assert_eq!(out["legacyFlag"], json!(true), "{name}");
    }
}

#[test]
fn test_pet_required_fields() {
    let registry = registry();
    let e = registry
        .validate_entity(EntityName::Pet, &json!({"photoUrls": []}))
        .unwrap_err();
    assert_eq!(e.issues().len(), 1);
    assert_eq!(e.issue_at("name").unwrap().kind, IssueKind::Required);

    let e = registry
        .validate_entity(EntityName::Pet, &json!({"name": "doggie"}))
        .unwrap_err();
    assert_eq!(e.issue_at("photoUrls").unwrap().kind, IssueKind::Required);
    assert!(e.to_string().contains("photoUrls"));
}

#[test]
fn test_pet_status() {
    let registry = registry();
    for status in PET_STATUS {
        let pet = json!({"name": "doggie", "photoUrls": [], "status": status});
        assert!(registry.validate_entity(EntityName::Pet, &pet).is_ok());
    }
    let pet = json!({"name": "doggie", "photoUrls": [], "status": "placed"});
    let e = registry.validate_entity(EntityName::Pet, &pet).unwrap_err();
    assert_eq!(
        e.issue_at("status").unwrap().kind,
        IssueKind::InvalidEnumValue {
            options: vec!["available".into(), "pending".into(), "sold".into()],
            received: "placed".into(),
        }
    );
}

#[test]
fn test_order_ship_date() {
    let registry = registry();
    let ok = json!({"id": 10, "petId": 198772, "quantity": 7,
        "shipDate": "2024-05-01T12:30:00.000+00:00", "status": "approved", "complete": true});
    assert_eq!(registry.validate_entity(EntityName::Order, &ok).unwrap(), ok);

    let e = registry
        .validate_entity(EntityName::Order, &json!({"shipDate": "2024-05-01"}))
        .unwrap_err();
    assert!(matches!(
        e.issue_at("shipDate").unwrap().kind,
        IssueKind::InvalidDateTime { .. }
    ));

    let e = registry
        .validate_entity(EntityName::Order, &json!({"status": "sold", "complete": "yes"}))
        .unwrap_err();
    assert_eq!(e.issues().len(), 2);
}

#[test]
fn test_user_and_api_response_types() {
    let registry = registry();
    let e = registry
        .validate_entity(EntityName::User, &json!({"userStatus": "active", "phone": 555}))
        .unwrap_err();
    assert!(e.issue_at("userStatus").is_some());
    assert!(e.issue_at("phone").is_some());

    let r = json!({"code": 200, "type": "unknown", "message": "additionalMetadata: x"});
    assert_eq!(registry.validate_entity(EntityName::ApiResponse, &r).unwrap(), r);
}

#[test]
fn test_free_validate_fn() {
    let schema = registry().entity(EntityName::Tag);
    assert_eq!(validate(schema, &json!({"id": 1.0})).unwrap(), json!({"id": 1}));
    assert!(validate(schema, &json!([])).is_err());
}

#[test]
fn test_endpoint_by_key() {
    let (op, contract) = registry().endpoint_by_key("get /pet/:petId").unwrap();
    assert_eq!(op, Operation::GetPetById);
    assert_eq!(
        contract.param("petId").unwrap().location(),
        ParameterLocation::Path
    );
    assert!(registry().endpoint_by_key("get /pets").is_none());
    assert_eq!(registry().endpoint_iter().count(), 19);
}

#[test]
fn test_parse_entity() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Tag {
        id: i64,
        name: String,
    }

    let tag: Tag = registry()
        .parse_entity(EntityName::Tag, &json!({"id": 2.0, "name": "cute"}))
        .unwrap();
    assert_eq!(
        tag,
        Tag {
            id: 2,
            name: "cute".into()
        }
    );

    // valid for the schema (all optional), but the target type requires a name
    let e = registry()
        .parse_entity::<Tag>(EntityName::Tag, &json!({"id": 2}))
        .unwrap_err();
    assert!(matches!(e, ParseEntityError::Decode(_)));

    let e = registry()
        .parse_entity::<Tag>(EntityName::Tag, &json!({"id": "2"}))
        .unwrap_err();
    assert!(matches!(e, ParseEntityError::Validation(_)));
}
