//! response decoding
//!
//! runtime validation for generated data models. deserialization runs
//! through `serde_path_to_error` so every failure carries the json path,
//! then classifies into the closed error set generated code documents:
//! a required field absent or null, an unknown value for a closed enum or
//! `__typename` discriminator, or any other shape mismatch.

use serde::de::DeserializeOwned;

/// validation failure while decoding a server payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("required field `{field}` missing or null at `{path}`")]
    RequiredFieldMissing { path: String, field: String },

    #[error("unknown value `{value}` at `{path}`, expected {expected}")]
    UnknownEnumValue {
        path: String,
        value: String,
        expected: String,
    },

    #[error("invalid payload at `{path}`: {message}")]
    Json { path: String, message: String },
}

/// decode a json value into a generated model type
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DecodeError> {
    serde_path_to_error::deserialize(value).map_err(classify)
}

/// decode json text into a generated model type
pub fn from_str<T: DeserializeOwned>(src: &str) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize(de).map_err(classify)
}

fn classify(err: serde_path_to_error::Error<serde_json::Error>) -> DecodeError {
    let path = err.path().to_string();
    let mut message = err.into_inner().to_string();
    // strip serde_json's trailing position for text input
    if let Some(idx) = message.find(" at line ") {
        message.truncate(idx);
    }

    if let Some(rest) = message.strip_prefix("missing field `") {
        let field = rest.split('`').next().unwrap_or(rest).to_string();
        return DecodeError::RequiredFieldMissing { path, field };
    }

    if let Some(rest) = message.strip_prefix("unknown variant `") {
        let value = rest.split('`').next().unwrap_or(rest).to_string();
        let expected = rest
            .split(", expected ")
            .nth(1)
            .unwrap_or("a known value")
            .to_string();
        return DecodeError::UnknownEnumValue {
            path,
            value,
            expected,
        };
    }

    if message.starts_with("invalid type: null") {
        let field = field_from_path(&path);
        return DecodeError::RequiredFieldMissing { path, field };
    }

    DecodeError::Json { path, message }
}

/// last path segment without its list index, e.g. `nicknames` from
/// `user.nicknames[2]`
fn field_from_path(path: &str) -> String {
    let last = path.rsplit('.').next().unwrap_or(path);
    let trimmed = match last.find('[') {
        Some(idx) => &last[..idx],
        None => last,
    };
    if trimmed.is_empty() {
        "value".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    enum Color {
        #[serde(rename = "RED")]
        Red,
        #[serde(rename = "GREEN")]
        Green,
        #[serde(rename = "BLUE")]
        Blue,
    }

    #[derive(Debug, Deserialize)]
    struct User {
        id: String,
        name: Option<String>,
        nicknames: Vec<Option<String>>,
        #[serde(rename = "favoriteColor")]
        favorite_color: Option<Color>,
    }

    #[test]
    fn test_decode_ok() {
        let user: User = from_value(json!({
            "id": "1",
            "name": null,
            "nicknames": [null, "ace"],
            "favoriteColor": "RED",
        }))
        .unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.name, None);
        assert_eq!(user.nicknames, vec![None, Some("ace".to_string())]);
        assert_eq!(user.favorite_color, Some(Color::Red));
    }

    #[test]
    fn test_missing_required_field() {
        let err = from_value::<User>(json!({
            "name": "x",
            "nicknames": [],
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::RequiredFieldMissing { field, .. } if field == "id"
        ));
    }

    #[test]
    fn test_null_for_required_list() {
        // a required list of nullable entries rejects null for the whole
        // field but accepts null entries
        let err = from_value::<User>(json!({
            "id": "1",
            "nicknames": null,
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::RequiredFieldMissing { field, path } if field == "nicknames" && path == "nicknames"
        ));
    }

    #[test]
    fn test_unknown_enum_value() {
        let err = from_value::<User>(json!({
            "id": "1",
            "nicknames": [],
            "favoriteColor": "PURPLE",
        }))
        .unwrap_err();
        match err {
            DecodeError::UnknownEnumValue { value, expected, path } => {
                assert_eq!(value, "PURPLE");
                assert!(expected.contains("RED"));
                assert_eq!(path, "favoriteColor");
            }
            other => panic!("expected unknown enum value, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str_strips_position() {
        let err = from_str::<User>(r#"{"id": 7, "nicknames": []}"#).unwrap_err();
        match err {
            DecodeError::Json { message, path } => {
                assert!(!message.contains("at line"));
                assert_eq!(path, "id");
            }
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn test_discriminated_union() {
        #[derive(Debug, Deserialize)]
        #[serde(tag = "__typename")]
        enum Node {
            User { id: String },
            Post { id: String },
        }

        let node: Node = from_value(json!({"__typename": "Post", "id": "p1"})).unwrap();
        assert!(matches!(node, Node::Post { id } if id == "p1"));

        let err = from_value::<Node>(json!({"__typename": "Comment", "id": "c1"})).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnknownEnumValue { value, .. } if value == "Comment"
        ));
    }

    #[test]
    fn test_field_from_path() {
        assert_eq!(field_from_path("user.nicknames[2]"), "nicknames");
        assert_eq!(field_from_path("id"), "id");
        assert_eq!(field_from_path("."), "value");
    }
}
