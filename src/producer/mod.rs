//! Producer abstraction over outbound transports.
//!
//! # Data Flow
//! ```text
//! caller
//!     → Producer::send
//!         Disabled: warn + Ok, no I/O
//!         Active:   Backend::send (broker or gateway)
//!                       → transport acknowledgment
//!                       → Result<(), DeliveryError>
//! ```
//!
//! # Design Decisions
//! - "Not configured" is a named variant, not a null client: callers never
//!   branch on whether messaging is set up
//! - Backends return every error to the caller; best-effort semantics live
//!   in the forwarding middleware, nowhere else

pub mod error;
pub mod payload;

use async_trait::async_trait;
use tracing::warn;

pub use error::{DeliveryError, DeliveryResult};
pub use payload::Payload;

/// A concrete outbound transport.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Hand `payload` to the transport and wait until it is accepted
    /// or rejected.
    async fn send(&self, payload: Payload) -> DeliveryResult<()>;

    /// Flush buffered messages and release the transport handle.
    fn close(&self);
}

/// Uniform producer handle over an optional backend.
pub enum Producer {
    /// Messaging is not configured. Sends succeed without I/O and log a
    /// warning; close is a no-op.
    Disabled,

    /// Delegates to a concrete backend.
    Active(Box<dyn Backend>),
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Producer::Disabled => f.write_str("Producer::Disabled"),
            Producer::Active(_) => f.write_str("Producer::Active(..)"),
        }
    }
}

impl Producer {
    /// Wrap a backend in an active producer.
    pub fn active(backend: impl Backend + 'static) -> Self {
        Producer::Active(Box::new(backend))
    }

    /// Send `payload` through the underlying transport.
    pub async fn send(&self, payload: Payload) -> DeliveryResult<()> {
        match self {
            Producer::Disabled => {
                warn!("producer is disabled; dropping message");
                Ok(())
            }
            Producer::Active(backend) => backend.send(payload).await,
        }
    }

    /// Flush and release the transport. Safe to call more than once.
    pub fn close(&self) {
        if let Producer::Active(backend) = self {
            backend.close();
        }
    }

    /// True when sends are logged no-ops.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Producer::Disabled)
    }
}
