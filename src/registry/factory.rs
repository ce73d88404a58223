use std::sync::Arc;
use crate::candidates::factory::create_candidate_gateway;
use crate::core::domain::Configuration;
use crate::core::election::ElectionResult;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::parties::factory;
use crate::registry::domain::{PARTY_TOPIC, PartyService};
use crate::registry::domain::service::PartyServiceImpl;

pub(crate) async fn create_party_service(config: &Configuration, store: RepositoryStore) -> ElectionResult<Arc<dyn PartyService>> {
    let party_repo = factory::create_party_repository(store).await;
    let candidate_gateway = create_candidate_gateway(config)?;
    let mut publisher = create_publisher(store.gateway_publisher()).await;
    let _ = publisher.create_topic(PARTY_TOPIC).await?;
    Ok(Arc::new(PartyServiceImpl::new(config, party_repo, Arc::from(candidate_gateway), publisher)))
}

// in-memory service wired to a stub candidate gateway
#[cfg(test)]
pub(crate) async fn create_test_party_service(
    gateway: Arc<crate::candidates::gateway::static_candidate_gateway::StaticCandidateGateway>) -> Arc<dyn PartyService> {
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;
    use crate::parties::repository::mem_party_repository::MemPartyRepository;

    let mut publisher = LogPublisher::new();
    let _ = publisher.create_topic(PARTY_TOPIC).await;
    Arc::new(PartyServiceImpl::new(&Configuration::new("test"), Box::new(MemPartyRepository::new()),
                                   gateway, Box::new(publisher)))
}
