use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use crate::parties::domain::model::PartyEntity;
use crate::utils::date::serializer;

// PartyInput is the create/update payload. Missing or null strings read as empty so the
// validator reports them, and a missing number reads as None.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyInput {
    #[serde(deserialize_with = "empty_if_null")]
    pub code: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub name: String,
    pub number: Option<i64>,
}

impl PartyInput {
    pub fn new(code: &str, name: &str, number: Option<i64>) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            number,
        }
    }
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyDto {
    pub id: String,
    pub code: String,
    pub name: String,
    pub number: i64,
    pub version: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl From<&PartyEntity> for PartyDto {
    fn from(other: &PartyEntity) -> Self {
        Self {
            id: other.party_id.to_string(),
            code: other.code.to_string(),
            name: other.name.to_string(),
            number: other.number,
            version: other.version,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// GenericOutput carries both confirmations and failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericOutput {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl GenericOutput {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            reason: None,
        }
    }

    pub fn failure(message: &str, reason: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            reason,
        }
    }
}
