//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{normalize_error_response, ObservabilityLayer};
use crate::migration;
use crate::service::{
    AccessControlService, AccountService, Aggregates, BootstrapService, GroupService,
    SessionService,
};
use crate::store::StoreBackend;
use anyhow::Result;
use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<StoreBackend>,
    pub access_service: Arc<AccessControlService<StoreBackend>>,
    pub bootstrap_service: Arc<BootstrapService<StoreBackend>>,
    pub group_service: Arc<GroupService<StoreBackend>>,
    pub account_service: Arc<AccountService<StoreBackend>>,
    pub session_service: Arc<SessionService<StoreBackend>>,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wire every service to one shared pair of aggregate cells
    pub fn new(
        config: Config,
        store: StoreBackend,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        let store = Arc::new(store);
        let aggregates = Arc::new(Aggregates::new(store.clone()));

        Self {
            access_service: Arc::new(AccessControlService::new(aggregates.clone())),
            bootstrap_service: Arc::new(BootstrapService::new(
                aggregates.clone(),
                config.bootstrap.clone(),
            )),
            group_service: Arc::new(GroupService::new(aggregates.clone(), config.access)),
            account_service: Arc::new(AccountService::new(aggregates.clone(), config.access)),
            session_service: Arc::new(SessionService::new(aggregates)),
            config: Arc::new(config),
            store,
            prometheus_handle,
        }
    }
}

/// Run the server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let store = migration::prepare_store(&config).await?;
    let state = AppState::new(config.clone(), store, prometheus_handle);

    if !state.bootstrap_service.initial_check().await {
        warn!("Initial check failed; POST /api/v1/initial-check can retry it");
    }

    let app = build_router(state);
    let http_addr = config.http_addr();
    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health and metrics
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        .route("/metrics", get(api::metrics::metrics_handler))
        // Bootstrap and caller level
        .route("/api/v1/initial-check", post(api::bootstrap::initial_check))
        .route("/api/v1/access-level", get(api::bootstrap::access_level))
        // Groups
        .route(
            "/api/v1/groups",
            get(api::group::list_groups).post(api::group::create_group),
        )
        .route("/api/v1/groups/{id}", delete(api::group::delete_group))
        // Accounts
        .route("/api/v1/accounts/register", post(api::account::register))
        .route("/api/v1/accounts/login", post(api::account::login))
        .route("/api/v1/accounts/search", get(api::account::search))
        .route("/api/v1/accounts/{id}/group", put(api::account::set_group))
        .layer(ObservabilityLayer)
        .layer(TimeoutLayer::new(timeout))
        .layer(from_fn(normalize_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
