//! Redis-backed aggregate store

use super::{AggregateKey, AggregateStore};
use crate::config::RedisConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

/// Stores each aggregate under its key with no expiry
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::Persistence(format!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Persistence(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl AggregateStore for RedisStore {
    async fn load(&self, key: AggregateKey) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key.as_str()).await?;
        Ok(value)
    }

    async fn save(&self, key: AggregateKey, payload: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key.as_str(), payload).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
