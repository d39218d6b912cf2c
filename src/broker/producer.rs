//! Broker-backed producer: produce, then await the delivery report.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::error::KafkaError;
use rdkafka::message::{Header, OwnedHeaders};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::broker::client::{BrokerClient, BrokerRecord, ClientFactory, DeliveryReport};
use crate::config::BrokerConfig;
use crate::producer::{Backend, DeliveryError, DeliveryResult, Payload, Producer};

/// Flush timeout applied on close.
const CLOSE_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// The broker client could not be created at startup.
#[derive(Debug, Error)]
#[error("failed to create Kafka producer: {0}")]
pub struct ConnectError(#[from] KafkaError);

/// Producer over a partitioned log broker.
///
/// The topic is fixed at construction; partition assignment is left to
/// the broker client.
pub struct BrokerProducer {
    client: Arc<dyn BrokerClient>,
    topic: String,
}

impl BrokerProducer {
    /// Build a producer for `cfg`, creating the client through `factory`.
    ///
    /// An empty broker address is not a fault: messaging is simply off and
    /// the disabled producer is returned instead.
    pub fn connect(
        cfg: &BrokerConfig,
        factory: &dyn ClientFactory,
    ) -> Result<Producer, ConnectError> {
        if cfg.brokers.is_empty() {
            warn!("broker address is not configured; broker producer is disabled");
            return Ok(Producer::Disabled);
        }

        let client = factory.create(&cfg.brokers)?;
        info!(brokers = %cfg.brokers, topic = %cfg.topic, "created Kafka producer");

        Ok(Producer::active(BrokerProducer {
            client,
            topic: cfg.topic.clone(),
        }))
    }

    /// Producer over an already-created client.
    pub fn with_client(client: Arc<dyn BrokerClient>, topic: impl Into<String>) -> Self {
        Self {
            client,
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl Backend for BrokerProducer {
    /// Submit `payload` and wait for the broker's delivery report.
    ///
    /// The wait is a single-use channel receive with no internal timeout;
    /// dropping this future abandons the wait, so a caller that needs a
    /// bound puts its own timeout around the call.
    async fn send(&self, payload: Payload) -> DeliveryResult<()> {
        let mut headers = OwnedHeaders::new();
        for (key, value) in &payload.headers {
            headers = headers.insert(Header {
                key: key.as_str(),
                value: Some(value.as_bytes()),
            });
        }
        debug!(
            topic = %self.topic,
            key = %payload.key,
            bytes = payload.content.len(),
            "sending message to broker"
        );

        let (ack_tx, ack_rx) = oneshot::channel();
        self.client
            .produce(
                BrokerRecord {
                    topic: self.topic.clone(),
                    key: payload.key,
                    content: payload.content,
                    headers,
                },
                ack_tx,
            )
            .map_err(DeliveryError::Produce)?;

        match ack_rx.await {
            Ok(DeliveryReport::Delivered { partition, offset }) => {
                debug!(topic = %self.topic, partition, offset, "delivered message");
                Ok(())
            }
            Ok(DeliveryReport::Failed(err)) => Err(DeliveryError::Delivery(err)),
            // The client dropped the channel without reporting.
            Err(_) => Err(DeliveryError::Delivery(KafkaError::Canceled)),
        }
    }

    fn close(&self) {
        if let Err(err) = self.client.flush(CLOSE_FLUSH_TIMEOUT) {
            error!(error = %err, "failed to flush broker producer on close");
        }
    }
}
