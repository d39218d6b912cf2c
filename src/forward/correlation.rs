//! Correlation identifiers threaded through the request lifecycle.

use axum::http::{HeaderMap, HeaderName};
use uuid::Uuid;

pub const X_CORRELATION_ID: HeaderName = HeaderName::from_static("x-correlation-id");
pub const X_ROUTING_ID: HeaderName = HeaderName::from_static("x-routing-id");
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The three identifiers carried through a request, passed by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationContext {
    /// Generated fresh when the inbound request did not supply one.
    pub request_id: String,

    /// Forwarded verbatim; empty when absent.
    pub correlation_id: String,

    /// Forwarded verbatim; empty when absent.
    pub routing_id: String,
}

impl CorrelationContext {
    /// Read the identifiers off the inbound headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let value = |name: &HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };

        let mut request_id = value(&X_REQUEST_ID);
        if request_id.is_empty() {
            request_id = Uuid::new_v4().to_string();
        }

        Self {
            request_id,
            correlation_id: value(&X_CORRELATION_ID),
            routing_id: value(&X_ROUTING_ID),
        }
    }
}
