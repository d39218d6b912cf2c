//! Outbound delivery relay library.
//!
//! A uniform producer contract over two transports — a partitioned log
//! broker (Kafka) and a bearer-authenticated HTTP gateway — plus an Axum
//! middleware that re-publishes server responses through the gateway after
//! the primary request/response cycle completes.

pub mod broker;
pub mod config;
pub mod forward;
pub mod gateway;
pub mod observability;
pub mod producer;

pub use config::RelayConfig;
pub use forward::{forward_response, ForwardState};
pub use gateway::{GatewayClient, GatewayProducer};
pub use producer::{Backend, DeliveryError, Payload, Producer};
