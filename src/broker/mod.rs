//! Broker transport subsystem.
//!
//! # Data Flow
//! ```text
//! Payload
//!     → producer.rs (translate headers, build BrokerRecord)
//!     → client.rs (submit with a fresh oneshot completion channel)
//!         sync Err → "failed to produce message"
//!     → await the channel (librdkafka poll thread resolves it once)
//!         report Failed → "delivery failed"
//!         report Delivered → log partition/offset, Ok
//! ```
//!
//! # Design Decisions
//! - The client is a capability created through an injected factory;
//!   there is no process-wide producer singleton
//! - One completion channel per message, consumed once, never reused
//! - The await has no internal timeout; cancellation is the caller
//!   dropping the send future

pub mod client;
pub mod producer;

pub use client::{BrokerClient, BrokerRecord, ClientFactory, DeliveryReport, KafkaClient, KafkaClientFactory};
pub use producer::{BrokerProducer, ConnectError};
