use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::registry::domain::PartyService;
use crate::registry::dto::PartyDto;

pub(crate) struct GetPartyCommand {
    party_service: Arc<dyn PartyService>,
}

impl GetPartyCommand {
    pub(crate) fn new(party_service: Arc<dyn PartyService>) -> Self {
        Self {
            party_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetPartyCommandRequest {
    pub(crate) party_id: String,
}

impl GetPartyCommandRequest {
    pub fn new(party_id: &str) -> Self {
        Self {
            party_id: party_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetPartyCommandResponse {
    pub party: PartyDto,
}

impl GetPartyCommandResponse {
    pub fn new(party: PartyDto) -> Self {
        Self {
            party,
        }
    }
}

#[async_trait]
impl Command<GetPartyCommandRequest, GetPartyCommandResponse> for GetPartyCommand {
    async fn execute(&self, req: GetPartyCommandRequest) -> Result<GetPartyCommandResponse, CommandError> {
        self.party_service.get_by_id(req.party_id.as_str())
            .await.map_err(CommandError::from).map(GetPartyCommandResponse::new)
    }
}
