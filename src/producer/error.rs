//! Error taxonomy for outbound delivery.

use rdkafka::error::KafkaError;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`Backend`](crate::producer::Backend) implementations.
///
/// Every variant is returned to the immediate caller; nothing is swallowed
/// inside a producer. Retry policy, if any, is layered on top by callers.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The broker rejected the message synchronously (e.g. its internal
    /// queue was full); the message never left the process.
    #[error("failed to produce message: {0}")]
    Produce(#[source] KafkaError),

    /// The broker acknowledged the message with a per-message error.
    #[error("delivery failed: {0}")]
    Delivery(#[source] KafkaError),

    /// The destination URL could not be turned into a request; nothing
    /// was sent.
    #[error("failed to create request: {0}")]
    Request(#[source] url::ParseError),

    /// The request left the process but transport failed (DNS, connection
    /// refused, timeout).
    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a status other than 200.
    #[error("unexpected status code: {0}")]
    Status(StatusCode),
}

/// Result alias for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;
