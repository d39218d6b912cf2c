//! HTTP backend bound to a fixed forwarding endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::gateway::client::{GatewayClient, HttpPayload};
use crate::producer::{Backend, DeliveryError, DeliveryResult, Payload};

/// Producer that POSTs every payload to one bearer-authenticated endpoint.
pub struct GatewayProducer {
    client: GatewayClient,
    endpoint: String,
    token: String,
}

impl GatewayProducer {
    pub fn new(
        client: GatewayClient,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl Backend for GatewayProducer {
    /// One POST per payload; anything but a 200 is an error.
    async fn send(&self, payload: Payload) -> DeliveryResult<()> {
        let response = self
            .client
            .post(&HttpPayload {
                url: self.endpoint.clone(),
                token: self.token.clone(),
                headers: payload.headers,
                content: payload.content,
            })
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DeliveryError::Status(status));
        }
        debug!(endpoint = %self.endpoint, "payload accepted");
        Ok(())
    }

    // The reqwest client needs no explicit teardown.
    fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_send_accepts_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer tkn"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let producer = GatewayProducer::new(GatewayClient::default(), server.uri(), "tkn");
        producer
            .send(Payload::new("", b"body".to_vec()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_rejects_other_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let producer = GatewayProducer::new(GatewayClient::default(), server.uri(), "tkn");
        let err = producer
            .send(Payload::new("", b"body".to_vec()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unexpected status code: 500"));
    }
}
