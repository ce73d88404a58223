use crate::core::election::{ElectionError, ElectionResult, FailureReason};
use crate::parties::repository::PartyRepository;
use crate::registry::dto::PartyInput;

pub(crate) const MIN_NAME_LENGTH: usize = 5;
pub(crate) const MIN_NUMBER: i64 = 10;
pub(crate) const MAX_NUMBER: i64 = 99;

// PartyValidator checks format rules and uniqueness against the store, failing on the first
// broken rule. On create the duplicate-code lookup runs before the number check; on update
// (`excluded_id` set) every format rule runs first and the party never collides with itself.
pub(crate) struct PartyValidator<'a> {
    party_repository: &'a dyn PartyRepository,
}

impl<'a> PartyValidator<'a> {
    pub(crate) fn new(party_repository: &'a dyn PartyRepository) -> Self {
        Self {
            party_repository,
        }
    }

    pub(crate) async fn validate(&self, input: &PartyInput, excluded_id: Option<&str>) -> ElectionResult<()> {
        check_name(input.name.as_str())?;
        check_code(input.code.as_str())?;
        let number = if excluded_id.is_none() {
            self.check_code_free(input.code.as_str(), None).await?;
            check_number(input.number)?
        } else {
            let number = check_number(input.number)?;
            self.check_code_free(input.code.as_str(), excluded_id).await?;
            number
        };
        if let Some(other) = self.party_repository.find_by_number(number).await? {
            if excluded_id != Some(other.party_id.as_str()) {
                return Err(ElectionError::rejected(FailureReason::DuplicateNumber));
            }
        }
        Ok(())
    }

    async fn check_code_free(&self, code: &str, excluded_id: Option<&str>) -> ElectionResult<()> {
        if let Some(other) = self.party_repository.find_by_code(code).await? {
            if excluded_id != Some(other.party_id.as_str()) {
                return Err(ElectionError::rejected(FailureReason::DuplicateCode));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_id(id: &str) -> ElectionResult<&str> {
    if id.trim().is_empty() {
        return Err(ElectionError::rejected(FailureReason::InvalidId));
    }
    Ok(id)
}

pub(crate) fn check_name(name: &str) -> ElectionResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ElectionError::rejected(FailureReason::InvalidName));
    }
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(ElectionError::rejected(FailureReason::InvalidNameLength));
    }
    Ok(())
}

pub(crate) fn check_code(code: &str) -> ElectionResult<()> {
    if code.trim().is_empty() {
        return Err(ElectionError::rejected(FailureReason::InvalidCode));
    }
    Ok(())
}

pub(crate) fn check_number(number: Option<i64>) -> ElectionResult<i64> {
    match number {
        Some(n) if (MIN_NUMBER..=MAX_NUMBER).contains(&n) => Ok(n),
        _ => Err(ElectionError::rejected(FailureReason::InvalidNumber)),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::election::FailureReason;
    use crate::core::repository::Repository;
    use crate::parties::domain::model::PartyEntity;
    use crate::parties::repository::mem_party_repository::MemPartyRepository;
    use crate::registry::domain::validator::{check_id, check_name, check_number, PartyValidator};
    use crate::registry::dto::PartyInput;

    #[tokio::test]
    async fn test_should_check_number_range() {
        assert_eq!(10, check_number(Some(10)).expect("10 is valid"));
        assert_eq!(99, check_number(Some(99)).expect("99 is valid"));
        for number in [None, Some(9), Some(100), Some(5), Some(-13)] {
            let err = check_number(number).unwrap_err();
            assert_eq!(Some(FailureReason::InvalidNumber), err.reason());
        }
    }

    #[tokio::test]
    async fn test_should_check_trimmed_name() {
        assert_eq!(Some(FailureReason::InvalidName), check_name("   ").unwrap_err().reason());
        assert_eq!(Some(FailureReason::InvalidNameLength), check_name("  Abcd  ").unwrap_err().reason());
        assert!(check_name(" Abcde ").is_ok());
        assert_eq!(Some(FailureReason::InvalidId), check_id(" ").unwrap_err().reason());
    }

    #[tokio::test]
    async fn test_should_fail_on_first_rule() {
        let repo = MemPartyRepository::new();
        let validator = PartyValidator::new(&repo);
        let err = validator.validate(&PartyInput::new("", "abc", Some(5)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::InvalidNameLength), err.reason());
        let err = validator.validate(&PartyInput::new("", "Workers Party", Some(5)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::InvalidCode), err.reason());
        let err = validator.validate(&PartyInput::new("PT", "Workers Party", Some(5)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::InvalidNumber), err.reason());
    }

    #[tokio::test]
    async fn test_should_detect_duplicates_except_self() {
        let repo = MemPartyRepository::new();
        let party = PartyEntity::new("PT", "Workers Party", 13);
        repo.create(&party).await.expect("should create party");
        let validator = PartyValidator::new(&repo);

        let err = validator.validate(&PartyInput::new("PT", "Other Party", Some(14)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::DuplicateCode), err.reason());
        let err = validator.validate(&PartyInput::new("X2", "Another Party", Some(13)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::DuplicateNumber), err.reason());
        let err = validator.validate(&PartyInput::new("X2", "Another Party", Some(13)), Some("other-id")).await.unwrap_err();
        assert_eq!(Some(FailureReason::DuplicateNumber), err.reason());

        validator.validate(&PartyInput::new("PT", "Workers Party", Some(13)), Some(party.party_id.as_str()))
            .await.expect("own code and number should pass");
    }

    #[tokio::test]
    async fn test_should_check_number_before_duplicates_on_update() {
        let repo = MemPartyRepository::new();
        let party = PartyEntity::new("PT", "Workers Party", 13);
        let other = PartyEntity::new("X2", "Another Party", 22);
        repo.create(&party).await.expect("should create party");
        repo.create(&other).await.expect("should create party");
        let validator = PartyValidator::new(&repo);

        let err = validator.validate(&PartyInput::new("X2", "Workers Party", Some(5)), Some(party.party_id.as_str()))
            .await.unwrap_err();
        assert_eq!(Some(FailureReason::InvalidNumber), err.reason());
        let err = validator.validate(&PartyInput::new("X2", "Workers Party", Some(5)), None).await.unwrap_err();
        assert_eq!(Some(FailureReason::DuplicateCode), err.reason());
        let err = validator.validate(&PartyInput::new("X2", "Workers Party", Some(22)), Some(party.party_id.as_str()))
            .await.unwrap_err();
        assert_eq!(Some(FailureReason::DuplicateCode), err.reason());
    }
}
