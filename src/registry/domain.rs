pub mod service;
pub mod validator;

use async_trait::async_trait;
use crate::core::election::ElectionResult;
use crate::registry::dto::{GenericOutput, PartyDto, PartyInput};

// Topic of the events published on every party mutation
pub(crate) const PARTY_TOPIC: &str = "parties";

#[async_trait]
pub trait PartyService: Sync + Send {
    async fn get_all(&self) -> ElectionResult<Vec<PartyDto>>;
    async fn get_by_id(&self, id: &str) -> ElectionResult<PartyDto>;
    async fn create(&self, input: &PartyInput) -> ElectionResult<PartyDto>;
    async fn update(&self, id: &str, input: &PartyInput) -> ElectionResult<PartyDto>;
    async fn delete(&self, id: &str) -> ElectionResult<GenericOutput>;
}
