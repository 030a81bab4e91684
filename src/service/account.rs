//! Account registration, search and group assignment

use super::{access::resolve_level, require_level, Aggregates};
use crate::config::AccessConfig;
use crate::domain::{Account, AccountCredentials, AccountSummary, Caller, ObjectId};
use crate::error::{AppError, Result};
use crate::store::AggregateStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub struct AccountService<S: AggregateStore> {
    aggregates: Arc<Aggregates<S>>,
    access: AccessConfig,
}

impl<S: AggregateStore> AccountService<S> {
    pub fn new(aggregates: Arc<Aggregates<S>>, access: AccessConfig) -> Self {
        Self { aggregates, access }
    }

    /// Register a new account from a raw credential record.
    ///
    /// New accounts have no group and therefore no privileges.
    pub async fn register(&self, raw: &str) -> Result<AccountSummary> {
        let credentials = AccountCredentials::decode(raw)?;

        let mut accounts = self.aggregates.accounts().await?;
        if accounts.find_by_name(&credentials.name).is_some() {
            return Err(AppError::Conflict("Account already exists".to_string()));
        }

        let account = Account::new(credentials.name, credentials.secret);
        let summary = account.summary();
        accounts.accounts.push(account);
        accounts.commit().await?;

        info!(account_id = %summary.id, "Account '{}' registered", summary.name);
        Ok(summary)
    }

    /// Accounts whose name contains the trimmed search term
    pub async fn search_by_name(&self, term: &str, caller: &Caller) -> Result<Vec<AccountSummary>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation(
                "Search term must not be empty".to_string(),
            ));
        }

        let (accounts, groups) = self.aggregates.both().await?;
        let caller_level = resolve_level(&accounts, &groups, caller);
        require_level(caller_level, self.access.admin_level, "search_accounts")?;

        Ok(accounts.search_by_name(term))
    }

    /// Move an account into an existing group
    pub async fn set_account_group(
        &self,
        caller: &Caller,
        account_id: &str,
        group_id: &str,
    ) -> Result<()> {
        if account_id.trim().is_empty() || group_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Account id and group id are required".to_string(),
            ));
        }

        let (mut accounts, groups) = self.aggregates.both().await?;
        let caller_level = resolve_level(&accounts, &groups, caller);
        require_level(caller_level, self.access.admin_level, "set_account_group")?;

        let group_id = ObjectId::parse_str(group_id)
            .ok()
            .and_then(|id| groups.find_by_id(id))
            .map(|group| group.id)
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
        let account_id = ObjectId::parse_str(account_id)
            .map_err(|_| AppError::NotFound("Account not found".to_string()))?;

        // Look up before mutating so a miss leaves the guard clean
        if !accounts.accounts.iter().any(|a| a.id == account_id) {
            return Err(AppError::NotFound("Account not found".to_string()));
        }
        if let Some(account) = accounts.find_by_id_mut(account_id) {
            account.group_id = Some(group_id);
            account.updated_at = Utc::now();
        }
        accounts.commit().await?;

        info!(%account_id, %group_id, "Account group updated");
        Ok(())
    }
}
