//! Response forwarding middleware.
//!
//! After the primary handler finishes, the captured response bytes are
//! re-published to the configured endpoint with correlation headers.
//! Best effort: no forwarding failure may alter the response already owed
//! to the original caller.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{error, info};

use crate::config::ForwardConfig;
use crate::forward::correlation::{
    CorrelationContext, X_CORRELATION_ID, X_REQUEST_ID, X_ROUTING_ID,
};
use crate::gateway::client::{GatewayClient, HttpPayload};

/// Envelope wrapping forwarded response bytes.
/// Wire shape: `{"content":"<base64>"}`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope {
    #[serde(with = "content_encoding")]
    pub(crate) content: Vec<u8>,
}

mod content_encoding {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }
}

/// State shared by the forwarding middleware.
#[derive(Clone)]
pub struct ForwardState {
    pub config: Arc<ForwardConfig>,
    pub client: Arc<GatewayClient>,
}

impl ForwardState {
    pub fn new(config: ForwardConfig, client: GatewayClient) -> Self {
        Self {
            config: Arc::new(config),
            client: Arc::new(client),
        }
    }
}

/// Re-publish the captured response after the handler completes.
///
/// Wired with `axum::middleware::from_fn_with_state`. Disabled or ignored
/// requests pass through without any capture cost. Forwarding runs on the
/// request's own task after the handler, so it adds latency to the
/// request's completion but never changes what the caller receives.
pub async fn forward_response(
    State(state): State<ForwardState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.enabled {
        return next.run(req).await;
    }
    if state
        .config
        .ignore
        .iter()
        .any(|rule| rule.matches(req.method().as_str(), req.uri().path()))
    {
        return next.run(req).await;
    }

    // Identifiers come off the inbound request, before the handler
    // consumes it.
    let correlation = CorrelationContext::from_headers(req.headers());

    let response = next.run(req).await;

    // Buffer the outbound bytes, then hand the caller an identical response.
    let (parts, body) = response.into_parts();
    let captured = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, "failed to read response body for forwarding");
            return Response::from_parts(parts, Body::empty());
        }
    };
    let response = Response::from_parts(parts, Body::from(captured.clone()));

    forward(&state, &correlation, &captured).await;

    response
}

/// Dispatch the envelope. Every failure is logged and swallowed here; this
/// is the one place in the system where delivery errors do not propagate.
async fn forward(state: &ForwardState, correlation: &CorrelationContext, content: &[u8]) {
    let envelope = Envelope {
        content: content.to_vec(),
    };
    let body = match serde_json::to_vec(&envelope) {
        Ok(body) => body,
        Err(err) => {
            error!(error = %err, "failed to marshal response payload");
            return;
        }
    };

    let headers = HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            X_CORRELATION_ID.to_string(),
            correlation.correlation_id.clone(),
        ),
        (X_ROUTING_ID.to_string(), correlation.routing_id.clone()),
        (X_REQUEST_ID.to_string(), correlation.request_id.clone()),
    ]);

    let payload = HttpPayload {
        url: state.config.endpoint.clone(),
        token: state.config.token.clone(),
        headers,
        content: body,
    };

    let response = match state.client.post(&payload).await {
        Ok(response) => response,
        Err(err) => {
            error!(
                error = %err,
                request_id = %correlation.request_id,
                "failed to send response payload to gateway"
            );
            return;
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        error!(
            %status,
            body = %body,
            request_id = %correlation.request_id,
            "failed to send response payload to gateway"
        );
        return;
    }
    info!(request_id = %correlation.request_id, "response payload sent to gateway");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = Envelope {
            content: b"hello".to_vec(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({ "content": "aGVsbG8=" }));
    }

    #[test]
    fn test_envelope_empty_content() {
        let envelope = Envelope {
            content: Vec::new(),
        };
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"content":""}"#
        );
    }
}
