use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::registry::domain::PartyService;
use crate::registry::dto::{PartyDto, PartyInput};

pub(crate) struct UpdatePartyCommand {
    party_service: Arc<dyn PartyService>,
}

impl UpdatePartyCommand {
    pub(crate) fn new(party_service: Arc<dyn PartyService>) -> Self {
        Self {
            party_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatePartyCommandRequest {
    pub(crate) party_id: String,
    pub(crate) party: PartyInput,
}

impl UpdatePartyCommandRequest {
    pub fn new(party_id: &str, party: PartyInput) -> Self {
        Self {
            party_id: party_id.to_string(),
            party,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct UpdatePartyCommandResponse {
    pub party: PartyDto,
}

impl UpdatePartyCommandResponse {
    pub fn new(party: PartyDto) -> Self {
        Self {
            party,
        }
    }
}

#[async_trait]
impl Command<UpdatePartyCommandRequest, UpdatePartyCommandResponse> for UpdatePartyCommand {
    async fn execute(&self, req: UpdatePartyCommandRequest) -> Result<UpdatePartyCommandResponse, CommandError> {
        self.party_service.update(req.party_id.as_str(), &req.party)
            .await.map_err(CommandError::from).map(UpdatePartyCommandResponse::new)
    }
}
