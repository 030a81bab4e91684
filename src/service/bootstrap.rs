//! Root group and root account initialization

use super::Aggregates;
use crate::config::BootstrapConfig;
use crate::domain::{AccessLevel, Account, Group};
use crate::error::Result;
use crate::store::AggregateStore;
use std::sync::Arc;
use tracing::{error, info};

/// Root admin group configuration
const ROOT_GROUP_NAME: &str = "System Administrators";
const ROOT_GROUP_DESCRIPTION: &str =
    "Administrator group created by system initialization, holds the highest privilege";

pub struct BootstrapService<S: AggregateStore> {
    aggregates: Arc<Aggregates<S>>,
    config: BootstrapConfig,
}

impl<S: AggregateStore> BootstrapService<S> {
    pub fn new(aggregates: Arc<Aggregates<S>>, config: BootstrapConfig) -> Self {
        Self { aggregates, config }
    }

    /// Idempotent initialization check.
    ///
    /// Returns `false` only when the store could not be read or written.
    pub async fn initial_check(&self) -> bool {
        match self.ensure_root().await {
            Ok(()) => true,
            Err(e) => {
                error!("Initial check failed: {}", e);
                false
            }
        }
    }

    /// Seed the root group into an empty group aggregate and the root account
    /// into an empty account aggregate. Non-empty aggregates are left as-is.
    pub async fn ensure_root(&self) -> Result<()> {
        let (mut accounts, mut groups) = self.aggregates.both().await?;

        if groups.is_empty() {
            groups
                .groups
                .push(Group::new(ROOT_GROUP_NAME, ROOT_GROUP_DESCRIPTION, AccessLevel::ROOT));
            groups.commit().await?;
            info!("Seeded root admin group '{}'", ROOT_GROUP_NAME);
        }

        if accounts.is_empty() {
            let mut root = Account::new(&self.config.admin_name, &self.config.admin_secret);
            root.group_id = groups.find_by_level(AccessLevel::ROOT).map(|g| g.id);
            accounts.accounts.push(root);
            accounts.commit().await?;
            info!("Seeded root account '{}'", self.config.admin_name);
        }

        Ok(())
    }
}
