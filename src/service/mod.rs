//! Business logic layer

pub mod access;
pub mod account;
pub mod bootstrap;
pub mod group;
pub mod session;

pub use access::{require_level, resolve_level, AccessControlService};
pub use account::AccountService;
pub use bootstrap::BootstrapService;
pub use group::GroupService;
pub use session::SessionService;

use crate::domain::{AccountCollection, GroupCollection};
use crate::error::Result;
use crate::store::{AggregateCell, AggregateGuard, AggregateKey, AggregateStore};
use std::sync::Arc;

pub type AccountsGuard<'a, S> = AggregateGuard<'a, AccountCollection, S>;
pub type GroupsGuard<'a, S> = AggregateGuard<'a, GroupCollection, S>;

/// Handles on the two persisted aggregates, shared by every service.
pub struct Aggregates<S> {
    accounts: AggregateCell<AccountCollection, S>,
    groups: AggregateCell<GroupCollection, S>,
}

impl<S: AggregateStore> Aggregates<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            accounts: AggregateCell::new(AggregateKey::Accounts, store.clone()),
            groups: AggregateCell::new(AggregateKey::Groups, store),
        }
    }

    pub async fn accounts(&self) -> Result<AccountsGuard<'_, S>> {
        self.accounts.lock().await
    }

    pub async fn groups(&self) -> Result<GroupsGuard<'_, S>> {
        self.groups.lock().await
    }

    /// Lock both aggregates. Accounts are always locked before groups.
    pub async fn both(&self) -> Result<(AccountsGuard<'_, S>, GroupsGuard<'_, S>)> {
        let accounts = self.accounts.lock().await?;
        let groups = self.groups.lock().await?;
        Ok((accounts, groups))
    }
}
