//! Demo relay service.
//!
//! Wires the forwarding middleware into a minimal Axum app the way a host
//! service would: configuration from the environment, one sample route,
//! and the standard pipeline layers (request ID, tracing, CORS, panic
//! recovery, forwarding).

use std::time::Duration;

use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};

use relay_gateway::config::RelayConfig;
use relay_gateway::forward::{
    forward_response, ForwardState, X_CORRELATION_ID, X_REQUEST_ID, X_ROUTING_ID,
};
use relay_gateway::gateway::GatewayClient;
use relay_gateway::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::from_env();
    logging::init(&config.log_level);

    tracing::info!(
        forwarding_enabled = config.forwarding.enabled,
        endpoint = %config.forwarding.endpoint,
        "configuration loaded"
    );

    let state = ForwardState::new(config.forwarding.clone(), GatewayClient::default());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            X_ROUTING_ID,
            X_CORRELATION_ID,
            X_REQUEST_ID,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(Duration::from_secs(12 * 60 * 60));

    let app = Router::new()
        .route("/hello", get(|| async { Json(json!({"message": "world"})) }))
        .layer(middleware::from_fn_with_state(state, forward_response))
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!(address = %listener.local_addr()?, "relay demo listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("relay demo stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
