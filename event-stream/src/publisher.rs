use std::collections::HashMap;
use std::time::Duration;

use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::ClientConfig;
use tokio::time;

use crate::{Envelope, Result, StreamError};

pub struct Publisher {
    topic: String,
    producer: FutureProducer,
}

impl Publisher {
    /// Connects a producer and ensures the destination topic exists,
    /// creating it when absent. Creation races with other instances are
    /// harmless: a concurrent `TopicAlreadyExists` counts as success.
    pub async fn new(brokers: Vec<String>, topic: String) -> Result<Self> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", brokers.join(","))
            .set("message.timeout.ms", "10000");

        Publisher::ensure_topic(&client_config, &topic).await?;

        let producer: FutureProducer = client_config.create()?;

        Ok(Self { topic, producer })
    }

    async fn ensure_topic(client_config: &ClientConfig, topic: &str) -> Result<()> {
        let admin: AdminClient<DefaultClientContext> = client_config.create()?;
        let new_topic = NewTopic::new(topic, 1, TopicReplication::Fixed(1));

        let results = admin.create_topics([&new_topic], &AdminOptions::new()).await?;
        for result in results {
            match result {
                Ok(_) => {}
                Err((_, RDKafkaErrorCode::TopicAlreadyExists)) => {}
                Err((topic, code)) => return Err(StreamError::TopicCreation(topic, code)),
            }
        }

        Ok(())
    }

    /// Delivers an envelope and waits for the broker acknowledgment, up to
    /// `timeout`. Returns the partition and offset of the delivered record.
    pub async fn send(&self, envelope: &Envelope, timeout: Duration) -> Result<(i32, i64)> {
        let headers = build_headers(&envelope.attributes);

        let record: FutureRecord<'_, String, Vec<u8>> = FutureRecord::to(&self.topic)
            .payload(&envelope.data)
            .headers(headers);

        match time::timeout(timeout, self.producer.send(record, timeout)).await {
            Ok(Ok((partition, offset))) => Ok((partition, offset)),
            Ok(Err((e, _))) => Err(e.into()),
            Err(_) => Err(StreamError::Timeout),
        }
    }
}

fn build_headers(attributes: &HashMap<String, String>) -> OwnedHeaders {
    let mut headers = OwnedHeaders::new_with_capacity(attributes.len());

    for (key, value) in attributes {
        headers = headers.insert(Header {
            key,
            value: Some(value),
        });
    }

    headers
}
