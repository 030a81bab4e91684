//! Single-writer access to one aggregate
//!
//! An [`AggregateCell`] owns the in-memory copy of one collection. The copy is
//! loaded from the store on first use and every mutation runs under the cell's
//! mutex, so a check-then-mutate-then-persist sequence is atomic with respect
//! to every other operation on the same aggregate.
//!
//! Mutations are only kept once [`AggregateGuard::commit`] has returned `Ok`.
//! A guard that is dropped dirty, or whose commit fails, invalidates the
//! cached copy and the next lock reloads the last durable state.

use super::{AggregateKey, AggregateStore};
use crate::error::Result;
use crate::telemetry::metrics::record_store_operation;
use serde::{de::DeserializeOwned, Serialize};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

struct Slot<T> {
    value: T,
    loaded: bool,
}

pub struct AggregateCell<T, S> {
    key: AggregateKey,
    store: Arc<S>,
    slot: Mutex<Slot<T>>,
}

impl<T, S> AggregateCell<T, S>
where
    T: Serialize + DeserializeOwned + Default + Send,
    S: AggregateStore,
{
    pub fn new(key: AggregateKey, store: Arc<S>) -> Self {
        Self {
            key,
            store,
            slot: Mutex::new(Slot {
                value: T::default(),
                loaded: false,
            }),
        }
    }

    /// Acquire exclusive access, loading the aggregate if needed.
    ///
    /// A key that was never saved loads as `T::default()`.
    pub async fn lock(&self) -> Result<AggregateGuard<'_, T, S>> {
        let mut slot = self.slot.lock().await;

        if !slot.loaded {
            let decoded: Result<T> = match self.store.load(self.key).await {
                Ok(Some(bytes)) => serde_json::from_slice(&bytes).map_err(Into::into),
                Ok(None) => Ok(T::default()),
                Err(e) => Err(e),
            };
            record_store_operation(self.key, "load", decoded.is_ok());
            slot.value = decoded?;
            slot.loaded = true;
            debug!(key = %self.key, "Aggregate loaded");
        }

        Ok(AggregateGuard {
            key: self.key,
            store: self.store.as_ref(),
            slot,
            dirty: false,
        })
    }
}

/// Exclusive handle on a loaded aggregate
pub struct AggregateGuard<'a, T, S> {
    key: AggregateKey,
    store: &'a S,
    slot: MutexGuard<'a, Slot<T>>,
    dirty: bool,
}

impl<T, S> AggregateGuard<'_, T, S>
where
    T: Serialize,
    S: AggregateStore,
{
    /// Persist the current state and wait for the store to confirm it.
    pub async fn commit(&mut self) -> Result<()> {
        let result = match serde_json::to_vec(&self.slot.value) {
            Ok(payload) => self.store.save(self.key, &payload).await,
            Err(e) => Err(e.into()),
        };
        record_store_operation(self.key, "save", result.is_ok());

        match result {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Aggregate save failed, discarding cached state");
                self.slot.loaded = false;
                self.dirty = false;
                Err(e)
            }
        }
    }
}

impl<T, S> Deref for AggregateGuard<'_, T, S> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.slot.value
    }
}

impl<T, S> DerefMut for AggregateGuard<'_, T, S> {
    fn deref_mut(&mut self) -> &mut T {
        self.dirty = true;
        &mut self.slot.value
    }
}

impl<T, S> Drop for AggregateGuard<'_, T, S> {
    fn drop(&mut self) {
        if self.dirty {
            self.slot.loaded = false;
        }
    }
}
