use std::time::Duration;

use crate::candidates::gateway::CandidateGateway;
use crate::candidates::gateway::http_candidate_gateway::HttpCandidateGateway;
use crate::core::domain::Configuration;
use crate::core::election::ElectionResult;

pub(crate) fn create_candidate_gateway(config: &Configuration) -> ElectionResult<Box<dyn CandidateGateway>> {
    let gateway = HttpCandidateGateway::new(
        config.candidate_service_url.as_str(), Duration::from_secs(config.candidate_timeout_secs))?;
    Ok(Box::new(gateway))
}

#[cfg(test)]
mod tests {
    use crate::candidates::factory::create_candidate_gateway;
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_create_candidate_gateway() {
        let config = Configuration::new("test");
        assert!(create_candidate_gateway(&config).is_ok());
    }
}
