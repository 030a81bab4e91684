//! Common types for domain models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an account or group.
///
/// Serialized as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new_v4() -> Self {
        ObjectId(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        ObjectId(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parse an identifier, ignoring surrounding whitespace
    pub fn parse_str(s: &str) -> Result<Self, uuid::Error> {
        Ok(ObjectId(Uuid::parse_str(s.trim())?))
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ObjectId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
