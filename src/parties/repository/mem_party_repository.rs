use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::election::{ElectionError, ElectionResult, FailureReason, PaginatedResult};
use crate::core::repository::Repository;
use crate::parties::domain::model::PartyEntity;
use crate::parties::repository::{MAX_PAGE_SIZE, PartyRepository};

// In-process party store. Uniqueness and version checks run under the same write lock as the
// mutation, so two racing writers cannot both claim a code or number.
#[derive(Debug, Default)]
pub(crate) struct MemPartyRepository {
    parties: RwLock<HashMap<String, PartyEntity>>,
}

impl MemPartyRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

fn lock_error() -> ElectionError {
    ElectionError::runtime("party store lock poisoned", None)
}

fn check_unique(parties: &HashMap<String, PartyEntity>, entity: &PartyEntity) -> ElectionResult<()> {
    let mut others = parties.values().filter(|other| other.party_id != entity.party_id);
    if others.clone().any(|other| other.code == entity.code) {
        return Err(ElectionError::rejected(FailureReason::DuplicateCode));
    }
    if others.any(|other| other.number == entity.number) {
        return Err(ElectionError::rejected(FailureReason::DuplicateNumber));
    }
    Ok(())
}

fn matches(entity: &PartyEntity, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| match k.as_str() {
        "party_id" => entity.party_id == *v,
        "kind" => entity.kind == *v,
        "code" => entity.code == *v,
        "name" => entity.name == *v,
        "number" => entity.number.to_string() == *v,
        _ => false,
    })
}

#[async_trait]
impl Repository<PartyEntity> for MemPartyRepository {
    async fn create(&self, entity: &PartyEntity) -> ElectionResult<usize> {
        let mut parties = self.parties.write().map_err(|_| lock_error())?;
        if parties.contains_key(&entity.party_id) {
            return Err(ElectionError::duplicate_key(
                format!("party {} already exists", entity.party_id).as_str(), None));
        }
        check_unique(&parties, entity)?;
        parties.insert(entity.party_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &PartyEntity) -> ElectionResult<usize> {
        let mut parties = self.parties.write().map_err(|_| lock_error())?;
        let existing_version = match parties.get(&entity.party_id) {
            Some(existing) => existing.version,
            None => return Err(ElectionError::rejected(FailureReason::PartyNotFound)),
        };
        if existing_version != entity.version {
            return Err(ElectionError::database(
                format!("stale version {} for party {}, stored {}",
                        entity.version, entity.party_id, existing_version).as_str(), None, false));
        }
        check_unique(&parties, entity)?;
        let mut stored = entity.clone();
        stored.version = entity.version + 1;
        stored.updated_at = Utc::now().naive_utc();
        parties.insert(stored.party_id.clone(), stored);
        Ok(1)
    }

    async fn get(&self, id: &str) -> ElectionResult<PartyEntity> {
        let parties = self.parties.read().map_err(|_| lock_error())?;
        parties.get(id).cloned().ok_or_else(|| ElectionError::rejected(FailureReason::PartyNotFound))
    }

    async fn delete(&self, id: &str) -> ElectionResult<usize> {
        let mut parties = self.parties.write().map_err(|_| lock_error())?;
        Ok(parties.remove(id).map(|_| 1).unwrap_or(0))
    }

    // pages are offsets into the records sorted by ballot number
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ElectionResult<PaginatedResult<PartyEntity>> {
        let parties = self.parties.read().map_err(|_| lock_error())?;
        let mut records: Vec<PartyEntity> = parties.values()
            .filter(|p| matches(p, predicate)).cloned().collect();
        records.sort_by_key(|p| p.number);
        let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let size = page_size.clamp(1, MAX_PAGE_SIZE);
        let end = records.len().min(offset.saturating_add(size));
        let next_page = if end < records.len() { Some(end.to_string()) } else { None };
        let records = if offset < end { records[offset..end].to_vec() } else { vec![] };
        Ok(PaginatedResult::new(page, size, next_page, records))
    }
}

#[async_trait]
impl PartyRepository for MemPartyRepository {
    async fn find_by_code(&self, code: &str) -> ElectionResult<Option<PartyEntity>> {
        let parties = self.parties.read().map_err(|_| lock_error())?;
        Ok(parties.values().find(|p| p.code == code).cloned())
    }

    async fn find_by_number(&self, number: i64) -> ElectionResult<Option<PartyEntity>> {
        let parties = self.parties.read().map_err(|_| lock_error())?;
        Ok(parties.values().find(|p| p.number == number).cloned())
    }
}
