//! Access control engine

use super::Aggregates;
use crate::domain::{AccessLevel, AccountCollection, Caller, GroupCollection};
use crate::error::{AppError, Result};
use crate::store::AggregateStore;
use crate::telemetry::metrics::record_access_denied;
use std::sync::Arc;
use tracing::warn;

/// Resolve the permission level of a claimed identity.
///
/// The caller must present the exact name and current session token of an
/// account; that account's group level is returned. No matching account, no
/// group reference, or a dangling group reference all resolve to
/// [`AccessLevel::NONE`].
pub fn resolve_level(
    accounts: &AccountCollection,
    groups: &GroupCollection,
    caller: &Caller,
) -> AccessLevel {
    accounts
        .find_by_session(&caller.name, &caller.token)
        .and_then(|account| account.group_id)
        .and_then(|group_id| groups.find_by_id(group_id))
        .map(|group| group.level)
        .unwrap_or(AccessLevel::NONE)
}

/// Fail with [`AppError::PermissionDenied`] when `level` is below `required`.
pub fn require_level(
    level: AccessLevel,
    required: AccessLevel,
    operation: &'static str,
) -> Result<()> {
    if level.satisfies(required) {
        return Ok(());
    }
    warn!(
        operation,
        level = level.value(),
        required = required.value(),
        "Permission denied"
    );
    record_access_denied(operation);
    Err(AppError::PermissionDenied)
}

pub struct AccessControlService<S: AggregateStore> {
    aggregates: Arc<Aggregates<S>>,
}

impl<S: AggregateStore> AccessControlService<S> {
    pub fn new(aggregates: Arc<Aggregates<S>>) -> Self {
        Self { aggregates }
    }

    /// Resolve the caller's level against the current aggregates
    pub async fn resolve(&self, caller: &Caller) -> Result<AccessLevel> {
        let (accounts, groups) = self.aggregates.both().await?;
        Ok(resolve_level(&accounts, &groups, caller))
    }
}
