use async_trait::async_trait;
use crate::core::election::ElectionResult;
use crate::core::events::DomainEvent;

// EventPublisher delivers domain events; a topic must be created before events named after it
// can be published.
#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn create_topic(&mut self, topic: &str) -> ElectionResult<String>;
    async fn get_topics(&mut self) -> ElectionResult<Vec<String>>;
    async fn publish(&self, event: &DomainEvent) -> ElectionResult<()>;
}
