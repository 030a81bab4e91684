//! Account domain model

use super::common::ObjectId;
use super::AccessLevel;
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static::lazy_static! {
    pub static ref ACCOUNT_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap();
}

/// Validate account name format (letters, digits, `_`, `.`, `-`)
fn validate_account_name(name: &str) -> std::result::Result<(), validator::ValidationError> {
    if ACCOUNT_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_account_name"))
    }
}

/// Account entity as persisted in the account aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: ObjectId,
    pub name: String,
    pub secret: String,
    /// Current session token; overwritten by every successful login
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub group_id: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Account {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new_v4(),
            name: String::new(),
            secret: String::new(),
            token: None,
            group_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Account {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            group_id: self.group_id,
            name: self.name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Compare a stored secret with a presented one.
///
/// Every credential check goes through here so a hashing scheme can be
/// introduced without touching call sites.
pub fn secrets_match(stored: &str, presented: &str) -> bool {
    stored == presented
}

/// Credentials submitted to register or login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountCredentials {
    #[serde(alias = "userName")]
    #[validate(
        length(min = 1, max = 64),
        custom(function = "validate_account_name")
    )]
    pub name: String,
    #[serde(alias = "userPwd")]
    #[validate(length(min = 3, max = 128))]
    pub secret: String,
}

impl AccountCredentials {
    /// Decode and validate a raw JSON credential record
    pub fn decode(raw: &str) -> Result<Self> {
        let credentials: AccountCredentials = serde_json::from_str(raw)
            .map_err(|e| AppError::Validation(format!("Malformed account credentials: {}", e)))?;
        credentials.validate()?;
        Ok(credentials)
    }
}

/// Account projection without secret or token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: ObjectId,
    pub group_id: Option<ObjectId>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub name: String,
    pub token: String,
    pub group_name: Option<String>,
    pub group_level: Option<AccessLevel>,
}

/// The account aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCollection {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl AccountCollection {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn find_by_id_mut(&mut self, id: ObjectId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Account whose name and live session token both match exactly
    pub fn find_by_session(&self, name: &str, token: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name == name && a.token.as_deref() == Some(token))
    }

    /// Position of the account whose name and secret both match
    pub fn position_by_credentials(&self, name: &str, secret: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|a| a.name == name && secrets_match(&a.secret, secret))
    }

    /// Accounts whose name contains `term`, case-sensitive
    pub fn search_by_name(&self, term: &str) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .filter(|a| a.name.contains(term))
            .map(Account::summary)
            .collect()
    }
}
