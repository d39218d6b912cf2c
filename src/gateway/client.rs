//! Bearer-authenticated HTTP transport.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

use crate::producer::DeliveryError;

/// Payload for the HTTP transport.
///
/// Carries its own destination URL and token, since HTTP has no fixed topic.
#[derive(Debug, Clone, Default)]
pub struct HttpPayload {
    pub url: String,
    pub token: String,
    pub headers: HashMap<String, String>,
    pub content: Vec<u8>,
}

/// HTTP client wrapper shared by all concurrent sends.
#[derive(Debug, Clone, Default)]
pub struct GatewayClient {
    client: Client,
}

impl GatewayClient {
    /// Wrap an existing reqwest client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// POST `payload.content` to `payload.url`.
    ///
    /// Payload headers are applied first; `Authorization: Bearer <token>` is
    /// set last and overrides any caller-supplied value. One attempt, no
    /// retries. The raw response is returned and the caller owns it,
    /// including status classification and the body.
    pub async fn post(&self, payload: &HttpPayload) -> Result<Response, DeliveryError> {
        let url = Url::parse(&payload.url).map_err(DeliveryError::Request)?;
        debug!(url = %url, bytes = payload.content.len(), "posting payload");

        let mut headers = HeaderMap::new();
        for (key, value) in &payload.headers {
            match (
                HeaderName::try_from(key.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %key, "skipping header that is not valid for HTTP"),
            }
        }
        match HeaderValue::try_from(format!("Bearer {}", payload.token)) {
            Ok(mut bearer) => {
                bearer.set_sensitive(true);
                headers.insert(AUTHORIZATION, bearer);
            }
            Err(_) => warn!("bearer token is not a valid header value; sending without it"),
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(payload.content.clone())
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        debug!(url = %payload.url, status = %response.status(), "endpoint answered");
        Ok(response)
    }
}
