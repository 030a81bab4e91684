//! Permission group management

use super::{access::resolve_level, require_level, Aggregates};
use crate::config::AccessConfig;
use crate::domain::{AccessLevel, Caller, CreateGroupInput, Group, GroupSummary, ObjectId};
use crate::error::{AppError, Result};
use crate::store::AggregateStore;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct GroupService<S: AggregateStore> {
    aggregates: Arc<Aggregates<S>>,
    access: AccessConfig,
}

impl<S: AggregateStore> GroupService<S> {
    pub fn new(aggregates: Arc<Aggregates<S>>, access: AccessConfig) -> Self {
        Self { aggregates, access }
    }

    /// Create a group below the escalation ceiling.
    ///
    /// Check order: ceiling, field rules, duplicate name, caller level.
    pub async fn create_group(&self, caller: &Caller, input: CreateGroupInput) -> Result<Group> {
        let level = AccessLevel::new(input.level);
        if level >= self.access.custom_level {
            return Err(AppError::Validation(
                "Cannot create a group with an elevated permission level".to_string(),
            ));
        }
        input.validate()?;

        let (accounts, mut groups) = self.aggregates.both().await?;
        if groups.find_by_name(&input.group_name).is_some() {
            return Err(AppError::Conflict(
                "A group with the same name already exists".to_string(),
            ));
        }

        let caller_level = resolve_level(&accounts, &groups, caller);
        require_level(caller_level, self.access.admin_level, "create_group")?;

        let group = Group::new(input.group_name, input.description, level);
        groups.groups.push(group.clone());
        groups.commit().await?;

        info!(group_id = %group.id, level = group.level.value(), "Group '{}' created", group.name);
        Ok(group)
    }

    /// Delete a group by id. The root admin group cannot be deleted.
    pub async fn delete_group(&self, caller: &Caller, group_id: &str) -> Result<Group> {
        let (accounts, mut groups) = self.aggregates.both().await?;

        let caller_level = resolve_level(&accounts, &groups, caller);
        require_level(caller_level, self.access.admin_level, "delete_group")?;

        let id = ObjectId::parse_str(group_id)
            .map_err(|_| AppError::NotFound("Group not found".to_string()))?;
        let group = groups
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
        if group.level == AccessLevel::ROOT {
            return Err(AppError::Conflict(
                "The root admin group cannot be deleted".to_string(),
            ));
        }

        let removed = groups
            .remove(id)
            .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
        groups.commit().await?;

        info!(group_id = %removed.id, "Group '{}' deleted", removed.name);
        Ok(removed)
    }

    /// Groups below the admin tier
    pub async fn list_groups(&self, caller: &Caller) -> Result<Vec<GroupSummary>> {
        let (accounts, groups) = self.aggregates.both().await?;

        let caller_level = resolve_level(&accounts, &groups, caller);
        require_level(caller_level, self.access.admin_level, "list_groups")?;

        Ok(groups.below(self.access.admin_level))
    }
}
