use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::election::{ElectionResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> ElectionResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> ElectionResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> ElectionResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> ElectionResult<usize>;

    // find by attributes
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> ElectionResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia  {
        match self {
            RepositoryStore::DynamoDB => {GatewayPublisherVia::Sns},
            RepositoryStore::LocalDynamoDB => {GatewayPublisherVia::LocalDynamoDB},
            RepositoryStore::InMemory => {GatewayPublisherVia::Logs},
        }
    }
}

impl From<String> for RepositoryStore {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "dynamodb" => RepositoryStore::DynamoDB,
            "local" | "localdynamodb" => RepositoryStore::LocalDynamoDB,
            "memory" | "inmemory" => RepositoryStore::InMemory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local"),
            RepositoryStore::InMemory => write!(f, "memory"),
        }
    }
}
