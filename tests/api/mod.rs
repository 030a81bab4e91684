//! API integration tests infrastructure


use cms_core::config::Config;
use cms_core::server::{build_router, AppState};
use cms_core::store::{MemoryStore, StoreBackend};

/// App state over a fresh in-memory store
pub fn test_state() -> AppState {
    AppState::new(
        Config::default(),
        StoreBackend::Memory(MemoryStore::new()),
        None,
    )
}

/// Production router over a fresh in-memory store, already bootstrapped
pub async fn bootstrapped_app() -> axum::Router {
    let state = test_state();
    assert!(state.bootstrap_service.initial_check().await);
    build_router(state)
}
