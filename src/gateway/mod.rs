//! HTTP gateway transport subsystem.
//!
//! # Data Flow
//! ```text
//! Payload (+ endpoint/token from config)
//!     → producer.rs (bind destination, classify status)
//!     → client.rs (build request: payload headers, then bearer auth;
//!                  execute once through the shared reqwest client)
//!     → raw response back to the caller
//! ```

pub mod client;
pub mod producer;

pub use client::{GatewayClient, HttpPayload};
pub use producer::GatewayProducer;
