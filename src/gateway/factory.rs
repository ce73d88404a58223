use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::gateway::sns::publisher::SESPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client, create_table};

pub(crate) async fn create_publisher(via: GatewayPublisherVia) -> Box<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            Box::new(SESPublisher::new(client))
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, "events", "event_id", "group", "key").await;
            Box::new(DDBPublisher::new(client, "events", "events_ndx"))
        }
        GatewayPublisherVia::Logs => {
            Box::new(LogPublisher::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_log_publisher() {
        let mut publisher = create_publisher(GatewayPublisherVia::Logs).await;
        publisher.create_topic("parties").await.expect("should create topic");
        let event = DomainEvent::added("parties", "party", "id", &HashMap::new(), &"data").expect("build event");
        publisher.publish(&event).await.expect("should publish");
    }
}
