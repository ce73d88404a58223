use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::election::{ElectionError, ElectionResult};
use crate::gateway::events::EventPublisher;

// SESPublisher sends each event to the SNS topic named after it, keyed by the event key.
#[derive(Debug)]
pub struct SESPublisher {
    client: Client,
    topics: HashMap<String, String>,
}

impl SESPublisher {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            topics: HashMap::new(),
        }
    }
}

#[async_trait]
impl EventPublisher for SESPublisher {
    async fn create_topic(&mut self, topic: &str) -> ElectionResult<String> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        self.topics.insert(topic.to_string(), arn.to_string());
        info!(topic, arn, "created topic");
        Ok(arn.to_string())
    }

    async fn get_topics(&mut self) -> ElectionResult<Vec<String>> {
        let mut topics = vec![];
        let mut next_token: Option<String> = None;
        loop {
            let resp = self.client.list_topics().set_next_token(next_token.take()).send().await?;
            for topic in resp.topics().unwrap_or_default() {
                topics.push(topic.topic_arn().unwrap_or_default().to_string());
            }
            match resp.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> ElectionResult<()> {
        let topic = self.topics.get(event.name.as_str());
        if let Some(arn) = topic {
            let json = serde_json::to_string(event)?;
            self.client.publish()
                .topic_arn(arn)
                .subject(format!("{:?} {}", event.kind, event.group))
                .message(json)
                .send().await?;
            Ok(())
        } else {
            Err(ElectionError::runtime(format!("topic is not found {}", event.name).as_str(), None))
        }
    }
}

impl From<SdkError<CreateTopicError>> for ElectionError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        ElectionError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for ElectionError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        ElectionError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for ElectionError {
    fn from(err: SdkError<PublishError>) -> Self {
        ElectionError::runtime(format!("{:?}", err).as_str(), None)
    }
}
