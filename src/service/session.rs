//! Session issuance (login)

use super::Aggregates;
use crate::domain::{AccountCredentials, LoginSession};
use crate::error::{AppError, Result};
use crate::store::AggregateStore;
use crate::telemetry::metrics::record_login;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Mint an opaque bearer token (32 lowercase hex chars)
pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub struct SessionService<S: AggregateStore> {
    aggregates: Arc<Aggregates<S>>,
}

impl<S: AggregateStore> SessionService<S> {
    pub fn new(aggregates: Arc<Aggregates<S>>) -> Self {
        Self { aggregates }
    }

    /// Authenticate a raw credential record and issue a fresh session token.
    ///
    /// The previous token of the account, if any, stops resolving immediately.
    /// A failed match never says whether the name or the secret was wrong.
    pub async fn login(&self, raw: &str) -> Result<LoginSession> {
        let credentials = AccountCredentials::decode(raw)?;

        let (mut accounts, groups) = self.aggregates.both().await?;

        let matched = accounts.position_by_credentials(&credentials.name, &credentials.secret);
        let Some(index) = matched else {
            warn!("Login failed for '{}'", credentials.name);
            record_login(false);
            return Err(AppError::InvalidCredentials);
        };

        let token = generate_token();
        let account = &mut accounts.accounts[index];
        account.token = Some(token.clone());
        let name = account.name.clone();
        let group = account.group_id.and_then(|id| groups.find_by_id(id));
        let session = LoginSession {
            name,
            token,
            group_name: group.map(|g| g.name.clone()),
            group_level: group.map(|g| g.level),
        };

        accounts.commit().await?;
        record_login(true);

        info!("Account '{}' logged in", session.name);
        Ok(session)
    }
}
