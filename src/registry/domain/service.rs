use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{info, warn};
use crate::candidates::gateway::CandidateGateway;
use crate::core::domain::Configuration;
use crate::core::election::{ElectionError, ElectionResult, FailureReason};
use crate::core::events::DomainEvent;
use crate::gateway::events::EventPublisher;
use crate::parties::domain::model::PartyEntity;
use crate::parties::repository::PartyRepository;
use crate::registry::domain::{PARTY_TOPIC, PartyService};
use crate::registry::domain::validator::{check_id, PartyValidator};
use crate::registry::dto::{GenericOutput, PartyDto, PartyInput};

pub(crate) const PARTY_DELETED: &str = "Party deleted";

pub(crate) struct PartyServiceImpl {
    party_repository: Box<dyn PartyRepository>,
    candidate_gateway: Arc<dyn CandidateGateway>,
    events_publisher: Box<dyn EventPublisher>,
    metadata: HashMap<String, String>,
}

impl PartyServiceImpl {
    pub(crate) fn new(config: &Configuration, party_repository: Box<dyn PartyRepository>,
                      candidate_gateway: Arc<dyn CandidateGateway>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            party_repository,
            candidate_gateway,
            events_publisher,
            metadata: HashMap::from([("env".to_string(), config.env.to_string())]),
        }
    }

    // Blocks deletion while any candidate still references the party. A 5xx from the
    // candidate service reads as InvalidCandidate; other remote failures pass through.
    async fn verify_party_candidates(&self, party_id: &str) -> ElectionResult<()> {
        let candidates = match self.candidate_gateway.get_all().await {
            Ok(candidates) => candidates,
            Err(ElectionError::Remote { status: Some(status), message, .. }) if status >= 500 => {
                warn!(party_id, status, message = message.as_str(), "candidate service failed");
                return Err(ElectionError::rejected(FailureReason::InvalidCandidate));
            }
            Err(err) => return Err(err),
        };
        if let Some(candidate) = candidates.iter().find(|c| c.belongs_to(party_id)) {
            info!(party_id, candidate_id = candidate.candidate_id.as_str(), "party still has candidates");
            return Err(ElectionError::rejected(FailureReason::PartyHasCandidates));
        }
        Ok(())
    }
}

#[async_trait]
impl PartyService for PartyServiceImpl {
    async fn get_all(&self) -> ElectionResult<Vec<PartyDto>> {
        let parties = self.party_repository.find_all().await?;
        Ok(parties.iter().map(PartyDto::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> ElectionResult<PartyDto> {
        let id = check_id(id)?;
        self.party_repository.get(id).await.map(|p| PartyDto::from(&p))
    }

    async fn create(&self, input: &PartyInput) -> ElectionResult<PartyDto> {
        PartyValidator::new(self.party_repository.as_ref()).validate(input, None).await?;
        let number = input.number.unwrap_or_default();
        let party = PartyEntity::new(input.code.as_str(), input.name.as_str(), number);
        let _ = self.party_repository.create(&party).await?;
        let dto = PartyDto::from(&party);
        // the store change is already committed; a publish failure still fails the call
        let _ = self.events_publisher.publish(&DomainEvent::added(
            PARTY_TOPIC, "party", dto.id.as_str(), &self.metadata, &dto)?).await?;
        info!(party_id = dto.id.as_str(), code = dto.code.as_str(), number = dto.number, "party created");
        Ok(dto)
    }

    async fn update(&self, id: &str, input: &PartyInput) -> ElectionResult<PartyDto> {
        let id = check_id(id)?;
        PartyValidator::new(self.party_repository.as_ref()).validate(input, Some(id)).await?;
        let mut party = self.party_repository.get(id).await?;
        party.code = input.code.to_string();
        party.name = input.name.to_string();
        party.number = input.number.unwrap_or(party.number);
        let _ = self.party_repository.update(&party).await?;
        let dto = PartyDto::from(&self.party_repository.get(id).await?);
        // the store change is already committed; a publish failure still fails the call
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            PARTY_TOPIC, "party", id, &self.metadata, &dto)?).await?;
        info!(party_id = id, version = dto.version, "party updated");
        Ok(dto)
    }

    async fn delete(&self, id: &str) -> ElectionResult<GenericOutput> {
        let id = check_id(id)?;
        let party = self.party_repository.get(id).await?;
        self.verify_party_candidates(id).await?;
        let deleted = self.party_repository.delete(id).await?;
        if deleted == 0 {
            return Err(ElectionError::rejected(FailureReason::PartyNotFound));
        }
        // the store change is already committed; a publish failure still fails the call
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            PARTY_TOPIC, "party", id, &self.metadata, &PartyDto::from(&party))?).await?;
        info!(party_id = id, "party deleted");
        Ok(GenericOutput::new(PARTY_DELETED))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::candidates::dto::CandidateDto;
    use crate::candidates::gateway::static_candidate_gateway::StaticCandidateGateway;
    use crate::core::domain::Configuration;
    use crate::core::election::{ElectionError, FailureReason};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;
    use crate::parties::repository::mem_party_repository::MemPartyRepository;
    use crate::registry::domain::{PARTY_TOPIC, PartyService};
    use crate::registry::domain::service::{PARTY_DELETED, PartyServiceImpl};
    use crate::registry::dto::PartyInput;

    async fn create_test_service(gateway: Arc<StaticCandidateGateway>) -> PartyServiceImpl {
        let mut publisher = LogPublisher::new();
        publisher.create_topic(PARTY_TOPIC).await.expect("should create topic");
        PartyServiceImpl::new(&Configuration::new("test"), Box::new(MemPartyRepository::new()),
                              gateway, Box::new(publisher))
    }

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<PartyServiceImpl> = AsyncOnce::new(async {
                create_test_service(Arc::new(StaticCandidateGateway::new())).await
            });
    }

    fn reason(err: ElectionError) -> Option<FailureReason> {
        err.reason()
    }

    #[tokio::test]
    async fn test_should_create_and_get_party() {
        let svc = SUT_SVC.get().await;
        let party = svc.create(&PartyInput::new("PSOL", "Socialism and Liberty", Some(50))).await.expect("should create party");
        assert!(!party.id.is_empty());
        let loaded = svc.get_by_id(party.id.as_str()).await.expect("should get party");
        assert_eq!(party, loaded);
        let all = svc.get_all().await.expect("should list parties");
        assert!(all.iter().any(|p| p.id == party.id));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_ids() {
        let svc = SUT_SVC.get().await;
        assert_eq!(Some(FailureReason::InvalidId), reason(svc.get_by_id("").await.unwrap_err()));
        assert_eq!(Some(FailureReason::PartyNotFound), reason(svc.get_by_id("missing").await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidId),
                   reason(svc.update(" ", &PartyInput::new("AB", "Valid Name", Some(20))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::PartyNotFound),
                   reason(svc.update("missing", &PartyInput::new("ZZ", "Valid Name", Some(21))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::PartyNotFound), reason(svc.delete("missing").await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_input() {
        let svc = create_test_service(Arc::new(StaticCandidateGateway::new())).await;
        assert_eq!(Some(FailureReason::InvalidNumber),
                   reason(svc.create(&PartyInput::new("PT", "Workers Party", Some(100))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidNumber),
                   reason(svc.create(&PartyInput::new("PT", "Workers Party", None)).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidNameLength),
                   reason(svc.create(&PartyInput::new("PT", " Work ", Some(13))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidName),
                   reason(svc.create(&PartyInput::new("PT", "", Some(13))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidCode),
                   reason(svc.create(&PartyInput::new(" ", "Workers Party", Some(13))).await.unwrap_err()));
        assert!(svc.get_all().await.expect("should list parties").is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_duplicates() {
        let svc = create_test_service(Arc::new(StaticCandidateGateway::new())).await;
        svc.create(&PartyInput::new("PT", "Workers Party", Some(13))).await.expect("should create party");
        assert_eq!(Some(FailureReason::DuplicateCode),
                   reason(svc.create(&PartyInput::new("PT", "Other", Some(14))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::DuplicateNumber),
                   reason(svc.create(&PartyInput::new("X2", "Another Party", Some(13))).await.unwrap_err()));
        assert_eq!(1, svc.get_all().await.expect("should list parties").len());
    }

    #[tokio::test]
    async fn test_should_update_party() {
        let svc = create_test_service(Arc::new(StaticCandidateGateway::new())).await;
        let party = svc.create(&PartyInput::new("PT", "Workers Party", Some(13))).await.expect("should create party");
        let other = svc.create(&PartyInput::new("X2", "Another Party", Some(22))).await.expect("should create party");

        let updated = svc.update(party.id.as_str(), &PartyInput::new("PT", "Workers Party of Brazil", Some(13)))
            .await.expect("should update with own code and number");
        assert_eq!("Workers Party of Brazil", updated.name.as_str());
        assert_eq!(party.version + 1, updated.version);

        assert_eq!(Some(FailureReason::InvalidNumber),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("PT", "Workers Party", Some(5))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::DuplicateNumber),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("PT", "Workers Party", Some(22))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::DuplicateCode),
                   reason(svc.update(other.id.as_str(), &PartyInput::new("PT", "Another Party", Some(22))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidName),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("PT", "  ", Some(13))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidNameLength),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("PT", " Work ", Some(13))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidCode),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("", "Workers Party", Some(13))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::InvalidNumber),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("X2", "Workers Party", Some(5))).await.unwrap_err()));
        assert_eq!(Some(FailureReason::DuplicateCode),
                   reason(svc.update(party.id.as_str(), &PartyInput::new("X2", "Workers Party", Some(13))).await.unwrap_err()));
        assert_eq!(13, svc.get_by_id(party.id.as_str()).await.expect("should get party").number);

        let moved = svc.update(party.id.as_str(), &PartyInput::new("PTB", "Workers Party", Some(14)))
            .await.expect("should move to a free code and number");
        assert_eq!(14, moved.number);
        svc.create(&PartyInput::new("PT", "Reborn Party", Some(13))).await.expect("freed code and number are reusable");
    }

    #[tokio::test]
    async fn test_should_delete_party_without_candidates() {
        let gateway = Arc::new(StaticCandidateGateway::with_candidates(vec![CandidateDto::new("1", Some("someone-else"))]));
        let svc = create_test_service(gateway).await;
        let party = svc.create(&PartyInput::new("PT", "Workers Party", Some(13))).await.expect("should create party");
        let res = svc.delete(party.id.as_str()).await.expect("should delete party");
        assert_eq!(PARTY_DELETED, res.message.as_str());
        assert_eq!(Some(FailureReason::PartyNotFound), reason(svc.get_by_id(party.id.as_str()).await.unwrap_err()));
    }

    #[tokio::test]
    async fn test_should_block_delete_with_candidates() {
        let gateway = Arc::new(StaticCandidateGateway::new());
        let svc = create_test_service(gateway.clone()).await;
        let party = svc.create(&PartyInput::new("PT", "Workers Party", Some(13))).await.expect("should create party");
        gateway.add(CandidateDto::new("7", Some(party.id.as_str())));

        assert_eq!(Some(FailureReason::PartyHasCandidates), reason(svc.delete(party.id.as_str()).await.unwrap_err()));
        assert!(svc.get_by_id(party.id.as_str()).await.is_ok());

        gateway.remove("7");
        svc.delete(party.id.as_str()).await.expect("should delete once candidate is gone");
    }

    #[tokio::test]
    async fn test_should_map_remote_failures() {
        let gateway = Arc::new(StaticCandidateGateway::new());
        let svc = create_test_service(gateway.clone()).await;
        let party = svc.create(&PartyInput::new("PT", "Workers Party", Some(13))).await.expect("should create party");

        gateway.fail_with(Some(503));
        assert_eq!(Some(FailureReason::InvalidCandidate), reason(svc.delete(party.id.as_str()).await.unwrap_err()));

        gateway.fail_with(Some(404));
        let err = svc.delete(party.id.as_str()).await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: Some(404), .. }));

        gateway.fail_with(Some(0));
        let err = svc.delete(party.id.as_str()).await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: None, .. }));
        assert!(svc.get_by_id(party.id.as_str()).await.is_ok());
    }
}
