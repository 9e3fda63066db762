pub type Result<T> = std::result::Result<T, StreamError>;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("Kafka error: {0}")]
    KafkaError(#[from] rdkafka::error::KafkaError),

    #[error("failed to create topic {0}: {1}")]
    TopicCreation(String, rdkafka::types::RDKafkaErrorCode),

    #[error("publish timed out")]
    Timeout,
}

impl<T> From<StreamError> for Result<T> {
    fn from(e: StreamError) -> Self {
        Err(e)
    }
}
