//! Permission group domain model

use super::common::ObjectId;
use super::AccessLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Group entity as persisted in the group aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: AccessLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Group {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new_v4(),
            name: String::new(),
            description: String::new(),
            level: AccessLevel::new(0),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Group {
    pub fn new(name: impl Into<String>, description: impl Into<String>, level: AccessLevel) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            level,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id,
            level: self.level,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating a group
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInput {
    #[validate(length(min = 1, max = 64))]
    pub group_name: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub description: String,
    #[validate(range(min = 0))]
    pub level: i32,
}

/// Group projection returned by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: ObjectId,
    pub level: AccessLevel,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The group aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCollection {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl GroupCollection {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn find_by_id(&self, id: ObjectId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn find_by_level(&self, level: AccessLevel) -> Option<&Group> {
        self.groups.iter().find(|g| g.level == level)
    }

    /// Remove a group by id, returning it if present
    pub fn remove(&mut self, id: ObjectId) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.id == id)?;
        Some(self.groups.remove(index))
    }

    /// Groups strictly below `ceiling`, in insertion order
    pub fn below(&self, ceiling: AccessLevel) -> Vec<GroupSummary> {
        self.groups
            .iter()
            .filter(|g| g.level < ceiling)
            .map(Group::summary)
            .collect()
    }
}
