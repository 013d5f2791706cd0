//! decodes server payloads through the checked-in data models, covering
//! the runtime nullability, enum, and discriminator contracts.

use gqlgen::{from_str, from_value, DecodeError, GraphQlResponse};
use gqlgen_test_client::models::{Color, Node, NodeResponse, User, UserResponse};
use serde_json::json;

fn user_json() -> serde_json::Value {
    json!({
        "id": "42",
        "name": "Ada",
        "nicknames": [null, "countess"],
        "favoriteColor": "GREEN",
        "bestFriend": null,
        "posts": [],
    })
}

#[test]
fn decodes_nested_user_payload() {
    let response: UserResponse = from_value(json!({ "user": user_json() })).unwrap();
    let user = response.user.unwrap();
    assert_eq!(user.id, "42");
    assert_eq!(user.name.as_deref(), Some("Ada"));
    assert_eq!(user.nicknames, vec![None, Some("countess".to_string())]);
    assert_eq!(user.favorite_color, Some(Color::Green));
    assert!(user.best_friend.is_none());
}

#[test]
fn missing_required_field_is_reported() {
    let err = from_value::<User>(json!({
        "name": "Ada",
        "nicknames": [],
        "posts": [],
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::RequiredFieldMissing { field, .. } if field == "id"
    ));
}

#[test]
fn null_for_required_list_is_rejected_but_null_entries_pass() {
    // [String]! rejects null for the whole field
    let err = from_value::<User>(json!({
        "id": "42",
        "name": null,
        "nicknames": null,
        "posts": [],
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        DecodeError::RequiredFieldMissing { field, .. } if field == "nicknames"
    ));

    // while entries inside a present list may be null
    let user: User = from_value(json!({
        "id": "42",
        "nicknames": [null],
        "posts": [],
    }))
    .unwrap();
    assert_eq!(user.nicknames, vec![None]);
}

#[test]
fn unknown_enum_value_is_rejected() {
    let err = from_value::<User>(json!({
        "id": "42",
        "nicknames": [],
        "favoriteColor": "PURPLE",
        "posts": [],
    }))
    .unwrap_err();
    match err {
        DecodeError::UnknownEnumValue { value, path, .. } => {
            assert_eq!(value, "PURPLE");
            assert_eq!(path, "favoriteColor");
        }
        other => panic!("expected unknown enum value, got {other:?}"),
    }
}

#[test]
fn interface_discriminator_covers_exactly_the_implementors() {
    let node: Node = from_value(json!({
        "__typename": "Post",
        "id": "p1",
        "title": "hello",
        "publishedAt": null,
        "author": user_json(),
    }))
    .unwrap();
    assert_eq!(node.id(), "p1");
    assert!(matches!(node, Node::Post(_)));

    let err = from_value::<Node>(json!({"__typename": "Comment", "id": "c1"})).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnknownEnumValue { value, .. } if value == "Comment"
    ));
}

#[test]
fn decodes_from_text() {
    let response: NodeResponse = from_str(r#"{"node": null}"#).unwrap();
    assert!(response.node.is_none());
}

#[test]
fn response_envelope_routes_through_decode() {
    let response: GraphQlResponse = serde_json::from_value(json!({
        "data": { "user": user_json() },
    }))
    .unwrap();
    assert!(!response.has_errors());
    let payload: UserResponse = response.decode_data().unwrap();
    assert_eq!(payload.user.unwrap().id, "42");
}
