//! Aggregate store: durable load/save of the two top-level collections
//!
//! The store only sees opaque byte payloads keyed by [`AggregateKey`];
//! encoding and single-writer access live in [`cell::AggregateCell`].

pub mod cell;
pub mod memory;
pub mod mysql;
pub mod redis;

pub use cell::{AggregateCell, AggregateGuard};
pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use redis::RedisStore;

use crate::config::{StoreConfig, StoreKind};
use crate::error::Result;
use async_trait::async_trait;
use tracing::info;

/// The persisted aggregates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKey {
    Accounts,
    Groups,
}

impl AggregateKey {
    /// Storage key name
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKey::Accounts => "cms:customer_manager",
            AggregateKey::Groups => "cms:group_manager",
        }
    }
}

impl std::fmt::Display for AggregateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregateStore: Send + Sync + 'static {
    /// Load the payload stored under `key`; `None` if never saved
    async fn load(&self, key: AggregateKey) -> Result<Option<Vec<u8>>>;

    /// Durably replace the payload under `key`. Returns once committed.
    async fn save(&self, key: AggregateKey, payload: &[u8]) -> Result<()>;

    /// Backend health check
    async fn ping(&self) -> Result<()>;
}

/// Store selected at startup from configuration
#[derive(Clone)]
pub enum StoreBackend {
    Memory(MemoryStore),
    MySql(MySqlStore),
    Redis(RedisStore),
}

impl StoreBackend {
    /// Connect to the configured backend
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let backend = match config.kind {
            StoreKind::Memory => StoreBackend::Memory(MemoryStore::new()),
            StoreKind::MySql => StoreBackend::MySql(MySqlStore::connect(&config.database).await?),
            StoreKind::Redis => StoreBackend::Redis(RedisStore::connect(&config.redis).await?),
        };
        info!("Aggregate store backend: {}", backend.name());
        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory(_) => "memory",
            StoreBackend::MySql(_) => "mysql",
            StoreBackend::Redis(_) => "redis",
        }
    }
}

#[async_trait]
impl AggregateStore for StoreBackend {
    async fn load(&self, key: AggregateKey) -> Result<Option<Vec<u8>>> {
        match self {
            StoreBackend::Memory(store) => store.load(key).await,
            StoreBackend::MySql(store) => store.load(key).await,
            StoreBackend::Redis(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: AggregateKey, payload: &[u8]) -> Result<()> {
        match self {
            StoreBackend::Memory(store) => store.save(key, payload).await,
            StoreBackend::MySql(store) => store.save(key, payload).await,
            StoreBackend::Redis(store) => store.save(key, payload).await,
        }
    }

    async fn ping(&self) -> Result<()> {
        match self {
            StoreBackend::Memory(store) => store.ping().await,
            StoreBackend::MySql(store) => store.ping().await,
            StoreBackend::Redis(store) => store.ping().await,
        }
    }
}
