use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::registry::domain::PartyService;
use crate::registry::dto::{PartyDto, PartyInput};

pub(crate) struct AddPartyCommand {
    party_service: Arc<dyn PartyService>,
}

impl AddPartyCommand {
    pub(crate) fn new(party_service: Arc<dyn PartyService>) -> Self {
        Self {
            party_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct AddPartyCommandRequest {
    pub(crate) party: PartyInput,
}

impl AddPartyCommandRequest {
    pub fn new(party: PartyInput) -> Self {
        Self {
            party,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct AddPartyCommandResponse {
    pub party: PartyDto,
}

impl AddPartyCommandResponse {
    pub fn new(party: PartyDto) -> Self {
        Self {
            party,
        }
    }
}

#[async_trait]
impl Command<AddPartyCommandRequest, AddPartyCommandResponse> for AddPartyCommand {
    async fn execute(&self, req: AddPartyCommandRequest) -> Result<AddPartyCommandResponse, CommandError> {
        self.party_service.create(&req.party).await.map_err(CommandError::from).map(AddPartyCommandResponse::new)
    }
}
