//! User domain types.

use serde::{Deserialize, Deserializer, Serialize};

use restaurant_orders_core::UserId;

/// A stored user.
///
/// Both fields are free text with no validation; an absent field stays absent
/// in the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Store-generated id, exposed as `_id`.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email (not validated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request body for creating or replacing a user.
///
/// Accepted as JSON or as an HTML form. Numbers and booleans are stored as
/// their text form. Updates are a full replace: a field left out of a PUT
/// body clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInput {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub email: Option<String>,
}

/// A scalar accepted where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}
