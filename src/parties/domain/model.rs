use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

pub(crate) const PARTY_KIND: &str = "Party";

// Party is a political party registered for the ballot; code and number are unique across parties.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PartyEntity {
    pub party_id: String,
    pub version: i64,
    pub kind: String,
    pub code: String,
    pub name: String,
    pub number: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PartyEntity {
    pub fn new(code: &str, name: &str, number: i64) -> Self {
        Self {
            party_id: Uuid::new_v4().to_string(),
            version: 0,
            kind: PARTY_KIND.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            number,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // key of the item reserving this party's code
    pub fn code_key(&self) -> String {
        code_key(self.code.as_str())
    }

    // key of the item reserving this party's ballot number
    pub fn number_key(&self) -> String {
        number_key(self.number)
    }
}

pub(crate) fn code_key(code: &str) -> String {
    format!("code#{}", code)
}

pub(crate) fn number_key(number: i64) -> String {
    format!("number#{}", number)
}

impl Identifiable for PartyEntity {
    fn id(&self) -> String {
        self.party_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
