use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;
use aws_sdk_dynamodb::types::{AttributeValue, Delete, Put, TransactWriteItem, Update};
use chrono::Utc;

use crate::core::election::{ElectionError, ElectionResult, FailureReason, PaginatedResult};
use crate::core::repository::Repository;
use crate::parties::domain::model::{code_key, number_key, PARTY_KIND, PartyEntity};
use crate::parties::repository::{MAX_PAGE_SIZE, PartyRepository};
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

const CODE_GUARD_KIND: &str = "PartyCode";
const NUMBER_GUARD_KIND: &str = "PartyNumber";

// Parties and their guard items share one table. A guard item is keyed `code#<code>` or
// `number#<number>` and names its owner; it carries no `code` attribute so it stays out of
// the (kind, code) index. Every write touching code or number goes through one transaction
// with the matching guard puts/deletes, so uniqueness is decided by DynamoDB.
#[derive(Debug)]
pub(crate) struct DDBPartyRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBPartyRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    fn put_guard(&self, key: String, kind: &str, owner_id: &str) -> TransactWriteItem {
        TransactWriteItem::builder()
            .put(Put::builder()
                .table_name(self.table_name.as_str())
                .item("party_id", AttributeValue::S(key))
                .item("kind", AttributeValue::S(kind.to_string()))
                .item("owner_id", AttributeValue::S(owner_id.to_string()))
                .condition_expression("attribute_not_exists(party_id)")
                .build())
            .build()
    }

    fn delete_guard(&self, key: String, owner_id: &str) -> TransactWriteItem {
        TransactWriteItem::builder()
            .delete(Delete::builder()
                .table_name(self.table_name.as_str())
                .key("party_id", AttributeValue::S(key))
                .condition_expression("owner_id = :owner_id")
                .expression_attribute_values(":owner_id", AttributeValue::S(owner_id.to_string()))
                .build())
            .build()
    }

    // `guards[i]` is the reason reported when item i fails its condition
    async fn transact(&self, items: Vec<TransactWriteItem>, guards: &[Option<FailureReason>]) -> ElectionResult<usize> {
        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await.map(|_| 1).map_err(|err| transaction_error(err, guards))
    }

    async fn find_owner(&self, key: String) -> ElectionResult<Option<PartyEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .key("party_id", AttributeValue::S(key))
            .consistent_read(true)
            .send()
            .await?;
        let owner_id = res.item().and_then(|item| parse_string_attribute("owner_id", item));
        if let Some(owner_id) = owner_id {
            match self.get(owner_id.as_str()).await {
                Ok(party) => Ok(Some(party)),
                Err(ElectionError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            }
        } else {
            Ok(None)
        }
    }
}

fn transaction_error(err: SdkError<TransactWriteItemsError>, guards: &[Option<FailureReason>]) -> ElectionError {
    if let SdkError::ServiceError(ctx) = &err {
        if let TransactWriteItemsError::TransactionCanceledException(ex) = ctx.err() {
            let reasons = ex.cancellation_reasons().unwrap_or_default();
            for (i, reason) in reasons.iter().enumerate() {
                if reason.code() != Some("ConditionalCheckFailed") {
                    continue;
                }
                if let Some(Some(failure)) = guards.get(i) {
                    return ElectionError::rejected(*failure);
                }
                return ElectionError::database(
                    format!("conditional check failed for party transaction item {}", i).as_str(),
                    Some("ConditionalCheckFailed".to_string()), false);
            }
        }
    }
    ElectionError::from(err)
}

#[async_trait]
impl Repository<PartyEntity> for DDBPartyRepository {
    async fn create(&self, entity: &PartyEntity) -> ElectionResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        let record = TransactWriteItem::builder()
            .put(Put::builder()
                .table_name(table_name)
                .set_item(Some(parse_item(val)?))
                .condition_expression("attribute_not_exists(party_id)")
                .build())
            .build();
        let items = vec![
            record,
            self.put_guard(entity.code_key(), CODE_GUARD_KIND, entity.party_id.as_str()),
            self.put_guard(entity.number_key(), NUMBER_GUARD_KIND, entity.party_id.as_str()),
        ];
        self.transact(items, &[None, Some(FailureReason::DuplicateCode), Some(FailureReason::DuplicateNumber)]).await
    }

    async fn update(&self, entity: &PartyEntity) -> ElectionResult<usize> {
        let existing = self.get(entity.party_id.as_str()).await?;
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let record = TransactWriteItem::builder()
            .update(Update::builder()
                .table_name(table_name)
                .key("party_id", AttributeValue::S(entity.party_id.clone()))
                .update_expression("SET version = :version, #code = :code, #name = :name, #number = :number, updated_at = :updated_at")
                .expression_attribute_names("#code", "code")
                .expression_attribute_names("#name", "name")
                .expression_attribute_names("#number", "number")
                .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
                .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
                .expression_attribute_values(":code", AttributeValue::S(entity.code.to_string()))
                .expression_attribute_values(":name", AttributeValue::S(entity.name.to_string()))
                .expression_attribute_values(":number", AttributeValue::N(entity.number.to_string()))
                .expression_attribute_values(":updated_at", string_date(now))
                .condition_expression("attribute_exists(version) AND version = :old_version")
                .build())
            .build();
        let mut items = vec![record];
        let mut guards = vec![None];
        if existing.code != entity.code {
            items.push(self.delete_guard(existing.code_key(), entity.party_id.as_str()));
            guards.push(None);
            items.push(self.put_guard(entity.code_key(), CODE_GUARD_KIND, entity.party_id.as_str()));
            guards.push(Some(FailureReason::DuplicateCode));
        }
        if existing.number != entity.number {
            items.push(self.delete_guard(existing.number_key(), entity.party_id.as_str()));
            guards.push(None);
            items.push(self.put_guard(entity.number_key(), NUMBER_GUARD_KIND, entity.party_id.as_str()));
            guards.push(Some(FailureReason::DuplicateNumber));
        }
        self.transact(items, guards.as_slice()).await
    }

    async fn get(&self, id: &str) -> ElectionResult<PartyEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "party_id = :party_id",
            )
            .expression_attribute_values(
                ":party_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(ElectionError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(ElectionError::database(format!("too many parties for {}", id).as_str(), None, false));
                }
                // guard items share the key space but are not parties
                if let Some(map) = items.first() {
                    if parse_string_attribute("kind", map).as_deref() == Some(PARTY_KIND) {
                        return Ok(PartyEntity::from(map));
                    }
                }
            }
            Err(ElectionError::rejected(FailureReason::PartyNotFound))
        })
    }

    async fn delete(&self, id: &str) -> ElectionResult<usize> {
        let existing = match self.get(id).await {
            Ok(party) => party,
            Err(ElectionError::NotFound { .. }) => return Ok(0),
            Err(err) => return Err(err),
        };
        let table_name: &str = self.table_name.as_ref();
        let record = TransactWriteItem::builder()
            .delete(Delete::builder()
                .table_name(table_name)
                .key("party_id", AttributeValue::S(id.to_string()))
                .condition_expression("attribute_exists(party_id)")
                .build())
            .build();
        let items = vec![
            record,
            self.delete_guard(existing.code_key(), id),
            self.delete_guard(existing.number_key(), id),
        ];
        self.transact(items, &[None, None, None]).await
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ElectionResult<PaginatedResult<PartyEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, MAX_PAGE_SIZE) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .expression_attribute_values(":kind", AttributeValue::S(
                predicate.get("kind").map(String::as_str).unwrap_or(PARTY_KIND).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("kind = :kind");

        if let Some(code) = predicate.get("code") {
            key_cond.push_str(" AND #code = :code");
            request = request
                .expression_attribute_names("#code", "code")
                .expression_attribute_values(":code", AttributeValue::S(code.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "kind" && k != "code" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                let value = if ks == "number" || ks == "version" {
                    AttributeValue::N(v.to_string())
                } else {
                    AttributeValue::S(v.to_string())
                };
                request = request
                    .expression_attribute_names(format!("#{}", ks).as_str(), ks.as_str())
                    .expression_attribute_values(format!(":{}", ks).as_str(), value);
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(ElectionError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(PartyEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl PartyRepository for DDBPartyRepository {
    async fn find_by_code(&self, code: &str) -> ElectionResult<Option<PartyEntity>> {
        self.find_owner(code_key(code)).await
    }

    async fn find_by_number(&self, number: i64) -> ElectionResult<Option<PartyEntity>> {
        self.find_owner(number_key(number)).await
    }
}


impl From<&HashMap<String, AttributeValue>> for PartyEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        PartyEntity {
            party_id: parse_string_attribute("party_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            kind: parse_string_attribute("kind", map).unwrap_or(PARTY_KIND.to_string()),
            code: parse_string_attribute("code", map).unwrap_or(String::from("")),
            name: parse_string_attribute("name", map).unwrap_or(String::from("")),
            number: parse_number_attribute("number", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
