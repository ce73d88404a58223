use std::sync::RwLock;

use async_trait::async_trait;

use crate::candidates::dto::CandidateDto;
use crate::candidates::gateway::CandidateGateway;
use crate::core::election::{ElectionError, ElectionResult};

// Fixed candidate list used by service and controller tests in place of the remote service.
#[derive(Debug, Default)]
pub(crate) struct StaticCandidateGateway {
    candidates: RwLock<Vec<CandidateDto>>,
    failure_status: RwLock<Option<u16>>,
}

impl StaticCandidateGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_candidates(candidates: Vec<CandidateDto>) -> Self {
        Self {
            candidates: RwLock::new(candidates),
            failure_status: RwLock::new(None),
        }
    }

    pub(crate) fn add(&self, candidate: CandidateDto) {
        if let Ok(mut candidates) = self.candidates.write() {
            candidates.push(candidate);
        }
    }

    pub(crate) fn remove(&self, candidate_id: &str) {
        if let Ok(mut candidates) = self.candidates.write() {
            candidates.retain(|c| c.candidate_id != candidate_id);
        }
    }

    // Some(status) makes every call fail as if the remote service answered with that status;
    // status 0 simulates a transport failure.
    pub(crate) fn fail_with(&self, status: Option<u16>) {
        if let Ok(mut failure) = self.failure_status.write() {
            *failure = status;
        }
    }

    fn check_failure(&self) -> ElectionResult<()> {
        let failure = *self.failure_status.read().map_err(|e| ElectionError::runtime(e.to_string().as_str(), None))?;
        match failure {
            Some(0) => Err(ElectionError::remote("connection refused", None, true)),
            Some(status) => Err(ElectionError::remote(
                format!("candidate service returned {}", status).as_str(), Some(status), status >= 500)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CandidateGateway for StaticCandidateGateway {
    async fn get_all(&self) -> ElectionResult<Vec<CandidateDto>> {
        self.check_failure()?;
        let candidates = self.candidates.read().map_err(|e| ElectionError::runtime(e.to_string().as_str(), None))?;
        Ok(candidates.clone())
    }

    async fn get_by_id(&self, id: &str) -> ElectionResult<CandidateDto> {
        self.check_failure()?;
        let candidates = self.candidates.read().map_err(|e| ElectionError::runtime(e.to_string().as_str(), None))?;
        candidates.iter().find(|c| c.candidate_id == id).cloned()
            .ok_or_else(|| ElectionError::remote(format!("candidate {} not found", id).as_str(), Some(404), false))
    }
}
