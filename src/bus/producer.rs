use std::time::Duration;

use rdkafka::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use thiserror::Error;
use tracing::{debug, error};

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures on the publish path.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The producer could not be built at startup. Fatal to the process:
    /// the worker is useless without its bus connection.
    #[error("producer configuration rejected: {0}")]
    Config(#[from] rdkafka::error::KafkaError),

    /// The broker did not accept the message. Logged and contained to the
    /// current cycle.
    #[error("message delivery failed: {reason}")]
    Delivery { reason: String },
}

/// Transport seam for the publish step.
///
/// The orchestrator is generic over this trait so tests can substitute an
/// in-memory bus for the Kafka producer.
pub trait MessageBus {
    fn publish(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), PublishError>>;
}

impl<B: MessageBus> MessageBus for std::sync::Arc<B> {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        (**self).publish(topic, key, payload).await
    }
}

/// Kafka-backed bus over an `rdkafka` future producer.
pub struct KafkaBus {
    producer: FutureProducer,
}

impl KafkaBus {
    pub fn connect(brokers: &str) -> Result<Self, PublishError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "10000")
            .create()?;

        Ok(Self { producer })
    }
}

impl MessageBus for KafkaBus {
    async fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        match self
            .producer
            .send(record, Timeout::After(DELIVERY_TIMEOUT))
            .await
        {
            Ok((partition, offset)) => {
                debug!(
                    "Published {} byte(s) to {} (partition {}, offset {})",
                    payload.len(),
                    topic,
                    partition,
                    offset
                );
                Ok(())
            }
            Err((err, _message)) => {
                error!("Delivery to {} failed: {}", topic, err);
                Err(PublishError::Delivery {
                    reason: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory bus doubles for tests.

    use std::sync::Mutex;

    use super::{MessageBus, PublishError};

    /// A message captured by [`MemoryBus`].
    #[derive(Debug, Clone)]
    pub struct CapturedMessage {
        pub topic: String,
        pub key: String,
        pub payload: Vec<u8>,
    }

    /// Records every published message instead of sending it anywhere.
    #[derive(Default)]
    pub struct MemoryBus {
        pub messages: Mutex<Vec<CapturedMessage>>,
    }

    impl MessageBus for MemoryBus {
        async fn publish(
            &self,
            topic: &str,
            key: &str,
            payload: &[u8],
        ) -> Result<(), PublishError> {
            self.messages.lock().unwrap().push(CapturedMessage {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: payload.to_vec(),
            });
            Ok(())
        }
    }

    /// Fails every publish, for exercising the contained-failure path.
    pub struct FailingBus;

    impl MessageBus for FailingBus {
        async fn publish(&self, _: &str, _: &str, _: &[u8]) -> Result<(), PublishError> {
            Err(PublishError::Delivery {
                reason: "broker unreachable".to_string(),
            })
        }
    }
}
