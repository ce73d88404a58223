pub(crate) mod ddb_party_repository;
pub(crate) mod mem_party_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::election::ElectionResult;
use crate::core::repository::Repository;
use crate::parties::domain::model::PartyEntity;

pub(crate) const MAX_PAGE_SIZE: usize = 500;

// PartyRepository rejects create/update that would give two parties the same code or number,
// reporting DuplicateCode/DuplicateNumber as the reason.
#[async_trait]
pub(crate) trait PartyRepository: Repository<PartyEntity> {
    async fn find_by_code(&self, code: &str) -> ElectionResult<Option<PartyEntity>>;

    async fn find_by_number(&self, number: i64) -> ElectionResult<Option<PartyEntity>>;

    async fn find_all(&self) -> ElectionResult<Vec<PartyEntity>> {
        let predicate = HashMap::new();
        let mut next_page: Option<String> = None;
        let mut all = vec![];
        loop {
            let res = self.query(&predicate, next_page.as_deref(), MAX_PAGE_SIZE).await?;
            all.extend(res.records);
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        Ok(all)
    }
}
