//! Incoming request bodies and query strings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use filestash_service::{CreateFileRequest, CreateUserRequest};

/// A parent reference as clients send it: `0`, `"0"`, or a folder id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParentId {
    Number(i64),
    Text(String),
}

impl RawParentId {
    pub fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// Body of `POST /files`.
///
/// Every field accepts any JSON value. A value of the wrong kind reads as
/// absent, so the service reports which field is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileBody {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_opt_string")]
    pub file_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_parent")]
    pub parent_id: Option<RawParentId>,
    #[serde(default, deserialize_with = "deserialize_opt_bool")]
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub data: Option<String>,
}

/// Keep strings only.
fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn deserialize_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// `null` means root. Anything that is not a number or string is kept as
/// text so that it fails parent resolution instead of landing at root.
fn deserialize_opt_parent<'de, D>(deserializer: D) -> Result<Option<RawParentId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(match n.as_i64() {
            Some(n) => RawParentId::Number(n),
            None => RawParentId::Text(n.to_string()),
        }),
        Value::String(s) => Some(RawParentId::Text(s)),
        other => Some(RawParentId::Text(other.to_string())),
    })
}

impl From<CreateFileBody> for CreateFileRequest {
    fn from(body: CreateFileBody) -> Self {
        Self {
            name: body.name,
            file_type: body.file_type,
            parent_id: body.parent_id.map(RawParentId::into_string),
            is_public: body.is_public,
            data: body.data,
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserBody {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub password: Option<String>,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

/// Query of `GET /files`.
///
/// Values stay raw so that malformed input falls back instead of failing
/// the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

/// Query of `GET /files/{id}/data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataQuery {
    pub size: Option<String>,
}
