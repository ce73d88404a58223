use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

// CandidateDto is the read-only view of a candidate owned by the candidate service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CandidateDto {
    pub candidate_id: String,
    pub name: Option<String>,
    pub number_election: Option<i64>,
    pub party_id: Option<String>,
}

impl CandidateDto {
    pub fn new(candidate_id: &str, party_id: Option<&str>) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            name: None,
            number_election: None,
            party_id: party_id.map(str::to_string),
        }
    }

    pub fn belongs_to(&self, party_id: &str) -> bool {
        self.party_id.as_deref() == Some(party_id)
    }
}

// Ids arrive as JSON numbers from older deployments and as strings from newer ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RemoteId {
    Number(i64),
    Text(String),
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RemoteId::Number(n) => write!(f, "{}", n),
            RemoteId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartyReference {
    pub id: Option<RemoteId>,
}

// CandidateOutput is the wire shape returned by the candidate service; the party is referenced
// either through `partyId` or a nested `partyOutput`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandidateOutput {
    pub id: RemoteId,
    pub name: Option<String>,
    pub number_election: Option<i64>,
    pub party_id: Option<RemoteId>,
    pub party_output: Option<PartyReference>,
}

impl From<CandidateOutput> for CandidateDto {
    fn from(other: CandidateOutput) -> Self {
        let party_id = other.party_id
            .or_else(|| other.party_output.and_then(|p| p.id))
            .map(|id| id.to_string());
        Self {
            candidate_id: other.id.to_string(),
            name: other.name,
            number_election: other.number_election,
            party_id,
        }
    }
}
