use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    routing::{any, get},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api;
use crate::config::AppConfig;
use crate::llm::{ChatCompletionsDriver, CompletionDriver, LlmSettings};
use crate::store::{RestStore, StoreClient, StoreSettings};

/// Start the axum server with the provided configuration.
///
/// # Errors
///
/// Returns an error when the listener cannot bind or the server loop fails.
pub async fn start_server(
    config: Arc<AppConfig>,
    llm_settings: LlmSettings,
    store_settings: StoreSettings,
) -> anyhow::Result<()> {
    info!(
        name: "llm.config.loaded",
        base_url = %llm_settings.base_url,
        model = %llm_settings.model,
        "Completion configuration loaded"
    );

    info!(
        name: "store.config.loaded",
        base_url = %store_settings.base_url,
        "Store configuration loaded"
    );

    let completion: Arc<dyn CompletionDriver> = Arc::new(ChatCompletionsDriver::new(llm_settings));
    let store: Arc<dyn StoreClient> = Arc::new(RestStore::new(store_settings));

    let state = AppState {
        completion,
        store,
        config: config.clone(),
    };

    let app = build_router(state, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
///
/// Split out from [`start_server`] so tests can drive the router directly.
#[must_use]
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    // A disabled timeout keeps the layer in place with an effectively
    // unreachable duration, so the router type stays the same.
    let timeout_duration = if config.resilience.timeout_disabled {
        Duration::from_secs(365 * 24 * 60 * 60)
    } else {
        Duration::from_secs(30)
    };

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/affinity",
            any(api::affinity::discover_affinities_handler),
        )
        .route("/api/memories/{id}", get(api::affinity::get_memory_handler))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB limit
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = timeout_duration;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
