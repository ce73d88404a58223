use async_trait::async_trait;
use tracing::info;
use crate::core::election::{ElectionError, ElectionResult};
use crate::core::events::DomainEvent;
use crate::gateway::events::EventPublisher;

// LogPublisher writes domain events to the tracing output instead of a message bus.
#[derive(Debug, Default)]
pub struct LogPublisher {
    topics: Vec<String>,
}

impl LogPublisher {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn create_topic(&mut self, topic: &str) -> ElectionResult<String> {
        if !self.topics.iter().any(|t| t == topic) {
            self.topics.push(topic.to_string());
        }
        Ok(topic.to_string())
    }

    async fn get_topics(&mut self) -> ElectionResult<Vec<String>> {
        Ok(self.topics.clone())
    }

    async fn publish(&self, event: &DomainEvent) -> ElectionResult<()> {
        if !self.topics.contains(&event.name) {
            return Err(ElectionError::runtime(format!("topic is not found {}", event.name).as_str(), None));
        }
        info!(topic = event.name.as_str(), kind = ?event.kind, key = event.key.as_str(),
            event_id = event.event_id.as_str(), data = event.json_data.as_str(), "domain event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let event = DomainEvent::deleted("parties", "party", "key", &HashMap::new(), &"data").expect("build event");
        let mut publisher = LogPublisher::new();
        assert!(publisher.publish(&event).await.is_err());
        publisher.create_topic("parties").await.expect("should create topic");
        publisher.create_topic("parties").await.expect("should create topic");
        assert_eq!(vec!["parties".to_string()], publisher.get_topics().await.expect("should get topics"));
        publisher.publish(&event).await.expect("should publish");
    }
}
