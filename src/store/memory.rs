//! Process-local aggregate store

use super::{AggregateKey, AggregateStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store; contents are lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<AggregateKey, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AggregateStore for MemoryStore {
    async fn load(&self, key: AggregateKey) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn save(&self, key: AggregateKey, payload: &[u8]) -> Result<()> {
        self.entries.write().await.insert(key, payload.to_vec());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
