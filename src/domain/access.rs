//! Permission levels

use serde::{Deserialize, Serialize};

/// Permission level of a group; higher is more privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(i32);

impl AccessLevel {
    /// Resolved level of a caller with no identity or no group.
    pub const NONE: AccessLevel = AccessLevel(-1);
    /// Level of the root admin group created by the bootstrap check.
    pub const ROOT: AccessLevel = AccessLevel(99);
    pub const ADMIN_DEFAULT: AccessLevel = AccessLevel(50);
    pub const CUSTOM_DEFAULT: AccessLevel = AccessLevel(90);

    pub const fn new(level: i32) -> Self {
        AccessLevel(level)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this level satisfies a minimum requirement
    pub fn satisfies(self, required: AccessLevel) -> bool {
        self >= required
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity claimed by the caller of a privileged operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub name: String,
    pub token: String,
}

impl Caller {
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: token.into(),
        }
    }

    /// A caller that presented no identity at all
    pub fn anonymous() -> Self {
        Self::default()
    }
}
