use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::contract::GroupStatus;

pub const HEALTHY_STATUS: &str = "Healthy";

/// One scaling group as listed by the fleet inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub desired_capacity: i32,
    pub min_size: i32,
    pub max_size: i32,
    pub instances: Vec<InstanceRecord>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceRecord {
    pub health_status: String,
}

impl InstanceRecord {
    pub fn is_healthy(&self) -> bool {
        self.health_status == HEALTHY_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupFilterError {
    #[error("tag filter '{0}' must have the form key=value")]
    MissingSeparator(String),
    #[error("tag filter '{0}' has an empty key")]
    EmptyKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub key: String,
    pub value: String,
}

impl TagMatch {
    pub fn parse(raw: &str) -> Result<Self, GroupFilterError> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(GroupFilterError::MissingSeparator(raw.to_string()));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(GroupFilterError::EmptyKey(raw.to_string()));
        }
        Ok(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Narrows the snapshot to a subset of scaling groups. The default keeps every
/// group the caller's credentials can list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    pub name_prefix: Option<String>,
    pub tag: Option<TagMatch>,
}

impl GroupFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.name_prefix.is_none() && self.tag.is_none()
    }

    pub fn matches(&self, group: &GroupRecord) -> bool {
        let name_matches = self
            .name_prefix
            .as_deref()
            .map(|prefix| group.name.starts_with(prefix))
            .unwrap_or(true);
        let tag_matches = self
            .tag
            .as_ref()
            .map(|tag| group.tags.get(&tag.key) == Some(&tag.value))
            .unwrap_or(true);
        name_matches && tag_matches
    }
}

pub fn summarize_group(group: &GroupRecord) -> GroupStatus {
    GroupStatus {
        name: group.name.clone(),
        desired_capacity: group.desired_capacity,
        min_size: group.min_size,
        max_size: group.max_size,
        total_instances: group.instances.len(),
        healthy_instances: group
            .instances
            .iter()
            .filter(|instance| instance.is_healthy())
            .count(),
    }
}

/// Summarizes the groups the filter keeps, preserving inventory order.
pub fn summarize_groups(groups: &[GroupRecord], filter: &GroupFilter) -> Vec<GroupStatus> {
    groups
        .iter()
        .filter(|group| filter.matches(group))
        .map(summarize_group)
        .collect()
}
