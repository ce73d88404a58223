use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::registry::domain::PartyService;
use crate::registry::dto::PartyDto;

pub(crate) struct GetAllPartiesCommand {
    party_service: Arc<dyn PartyService>,
}

impl GetAllPartiesCommand {
    pub(crate) fn new(party_service: Arc<dyn PartyService>) -> Self {
        Self {
            party_service,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct GetAllPartiesCommandRequest {}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct GetAllPartiesCommandResponse {
    pub parties: Vec<PartyDto>,
}

impl GetAllPartiesCommandResponse {
    pub fn new(parties: Vec<PartyDto>) -> Self {
        Self {
            parties,
        }
    }
}

#[async_trait]
impl Command<GetAllPartiesCommandRequest, GetAllPartiesCommandResponse> for GetAllPartiesCommand {
    async fn execute(&self, _req: GetAllPartiesCommandRequest) -> Result<GetAllPartiesCommandResponse, CommandError> {
        self.party_service.get_all().await.map_err(CommandError::from).map(GetAllPartiesCommandResponse::new)
    }
}
