//! Broker client capability and its Kafka implementation.

use std::sync::Arc;
use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::error::{KafkaError, KafkaResult};
use rdkafka::message::{Message, OwnedHeaders};
use rdkafka::producer::{BaseRecord, Producer as _, ProducerContext, ThreadedProducer};
use rdkafka::ClientContext;
use tokio::sync::oneshot;

/// One per-message acknowledgment from the broker.
#[derive(Debug)]
pub enum DeliveryReport {
    /// Durably accepted at the given partition and offset.
    Delivered { partition: i32, offset: i64 },

    /// Rejected after submission.
    Failed(KafkaError),
}

/// Broker-native message shape.
///
/// Header-map order from the originating [`Payload`](crate::producer::Payload)
/// is not preserved here.
#[derive(Debug)]
pub struct BrokerRecord {
    pub topic: String,
    pub key: String,
    pub content: Vec<u8>,
    pub headers: OwnedHeaders,
}

/// Client capability backing a [`BrokerProducer`](crate::broker::BrokerProducer).
///
/// `produce` must resolve `ack` exactly once. A synchronous `Err` means the
/// message never left the process and `ack` is dropped unresolved.
pub trait BrokerClient: Send + Sync {
    fn produce(
        &self,
        record: BrokerRecord,
        ack: oneshot::Sender<DeliveryReport>,
    ) -> Result<(), KafkaError>;

    fn flush(&self, timeout: Duration) -> KafkaResult<()>;
}

/// Creates broker clients.
///
/// Injected into producer construction so tests substitute a mock through
/// the constructor instead of a process-wide override.
pub trait ClientFactory: Send + Sync {
    fn create(&self, brokers: &str) -> KafkaResult<Arc<dyn BrokerClient>>;
}

/// Forwards librdkafka delivery callbacks onto per-message channels.
struct AckContext;

impl ClientContext for AckContext {}

impl ProducerContext for AckContext {
    type DeliveryOpaque = Box<oneshot::Sender<DeliveryReport>>;

    fn delivery(
        &self,
        result: &rdkafka::producer::DeliveryResult<'_>,
        ack: Self::DeliveryOpaque,
    ) {
        let report = match result {
            Ok(message) => DeliveryReport::Delivered {
                partition: message.partition(),
                offset: message.offset(),
            },
            Err((err, _)) => DeliveryReport::Failed(err.clone()),
        };
        // The waiting send may already have been dropped; nothing to notify then.
        let _ = ack.send(report);
    }
}

/// Kafka client over a polling producer thread.
///
/// Each produced message carries its oneshot sender as the delivery opaque,
/// so the poll thread resolves every completion channel exactly once.
pub struct KafkaClient {
    inner: ThreadedProducer<AckContext>,
}

impl KafkaClient {
    /// Connect to the given bootstrap servers.
    pub fn connect(brokers: &str) -> KafkaResult<Self> {
        let inner = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .create_with_context(AckContext)?;
        Ok(Self { inner })
    }
}

impl BrokerClient for KafkaClient {
    fn produce(
        &self,
        record: BrokerRecord,
        ack: oneshot::Sender<DeliveryReport>,
    ) -> Result<(), KafkaError> {
        let BrokerRecord {
            topic,
            key,
            content,
            headers,
        } = record;
        let record = BaseRecord::with_opaque_to(&topic, Box::new(ack))
            .key(&key)
            .payload(&content)
            .headers(headers);
        self.inner.send(record).map_err(|(err, _)| err)
    }

    fn flush(&self, timeout: Duration) -> KafkaResult<()> {
        self.inner.flush(timeout)
    }
}

/// Default factory producing real Kafka clients.
pub struct KafkaClientFactory;

impl ClientFactory for KafkaClientFactory {
    fn create(&self, brokers: &str) -> KafkaResult<Arc<dyn BrokerClient>> {
        Ok(Arc::new(KafkaClient::connect(brokers)?))
    }
}
