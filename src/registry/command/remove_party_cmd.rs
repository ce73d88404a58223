use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::registry::domain::PartyService;
use crate::registry::dto::GenericOutput;

pub(crate) struct RemovePartyCommand {
    party_service: Arc<dyn PartyService>,
}

impl RemovePartyCommand {
    pub(crate) fn new(party_service: Arc<dyn PartyService>) -> Self {
        Self {
            party_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemovePartyCommandRequest {
    pub(crate) party_id: String,
}

impl RemovePartyCommandRequest {
    pub fn new(party_id: &str) -> Self {
        Self {
            party_id: party_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct RemovePartyCommandResponse {
    pub output: GenericOutput,
}

impl RemovePartyCommandResponse {
    pub fn new(output: GenericOutput) -> Self {
        Self {
            output,
        }
    }
}

#[async_trait]
impl Command<RemovePartyCommandRequest, RemovePartyCommandResponse> for RemovePartyCommand {
    async fn execute(&self, req: RemovePartyCommandRequest) -> Result<RemovePartyCommandResponse, CommandError> {
        self.party_service.delete(req.party_id.as_str())
            .await.map_err(CommandError::from).map(RemovePartyCommandResponse::new)
    }
}
