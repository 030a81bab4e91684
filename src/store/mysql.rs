//! MySQL-backed aggregate store

use super::{AggregateKey, AggregateStore};
use crate::config::DatabaseConfig;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

/// Stores each aggregate as one row of `cms_aggregates`
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl AggregateStore for MySqlStore {
    async fn load(&self, key: AggregateKey) -> Result<Option<Vec<u8>>> {
        let payload = sqlx::query_scalar::<_, Vec<u8>>(
            "SELECT payload FROM cms_aggregates WHERE aggregate_key = ?",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(payload)
    }

    async fn save(&self, key: AggregateKey, payload: &[u8]) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cms_aggregates (aggregate_key, payload)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE payload = VALUES(payload)
            "#,
        )
        .bind(key.as_str())
        .bind(payload)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
