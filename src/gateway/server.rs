use super::AppState;
use super::handlers::{handle_chat, handle_edit, handle_health};
use crate::agent::{AgentRuntime, OpenAiAgentRuntime};
use crate::assistant::Assistant;
use crate::config::{Config, GatewayConfig};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, StatusCode},
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Wire the orchestrator from config. A missing credential leaves the
/// service up with the agent marked unavailable.
pub fn build_state(config: &Config) -> Result<AppState> {
    let runtime: Option<Arc<dyn AgentRuntime>> = match config.api_key() {
        Some(api_key) => {
            tracing::info!(model = %config.model, "agent runtime configured");
            Some(Arc::new(
                OpenAiAgentRuntime::new(api_key, &config.model)
                    .with_base_url(&config.agent_base_url)
                    .with_temperature(config.temperature)
                    .with_timeout_secs(config.agent_timeout_secs),
            ))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY missing; edit and chat will fail until it is set");
            None
        }
    };

    let sessions = Arc::new(SessionStore::new(config.session.max_items));
    let assistant = Assistant::new(runtime, sessions)
        .context("build assistant")?
        .with_agent_timeout(Duration::from_secs(config.agent_timeout_secs));
    Ok(AppState::new(assistant))
}

/// Bind `host:port` from config and serve until shutdown.
pub async fn run_gateway(config: Arc<Config>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port)
        .parse()
        .context("parse gateway bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind gateway socket")?;

    let state = build_state(&config)?;
    run_gateway_with_listener(listener, state, &config.gateway).await
}

/// Serve from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
    gateway: &GatewayConfig,
) -> Result<()> {
    let local_addr = listener
        .local_addr()
        .context("get gateway listener local address")?;
    tracing::info!(
        addr = %local_addr,
        agent_ready = state.assistant.is_available(),
        "gateway listening: POST /edit, POST /chat, GET /health"
    );

    let app = build_app(state, gateway);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn build_app(state: AppState, gateway: &GatewayConfig) -> Router {
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/edit", post(handle_edit))
        .route("/chat", post(handle_chat))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(gateway.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ));

    if gateway.cors_allow_origins.is_empty() {
        app
    } else {
        app.layer(cors_layer(&gateway.cors_allow_origins))
    }
}
