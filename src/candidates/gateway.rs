pub(crate) mod http_candidate_gateway;
#[cfg(test)]
pub(crate) mod static_candidate_gateway;

use async_trait::async_trait;
use crate::candidates::dto::CandidateDto;
use crate::core::election::ElectionResult;

// CandidateGateway reads candidates from the remote candidate service. Failures surface as
// ElectionError::Remote; mapping them to party reasons is left to the caller.
#[async_trait]
pub(crate) trait CandidateGateway: Sync + Send {
    async fn get_all(&self) -> ElectionResult<Vec<CandidateDto>>;
    async fn get_by_id(&self, id: &str) -> ElectionResult<CandidateDto>;
}
