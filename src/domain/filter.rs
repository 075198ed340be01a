//! Filter for board issue listings.

use crate::domain::{id::EntityId, issue::Issue};

/// Conjunctive issue filter: an issue must satisfy every populated field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueFilter {
    pub status: Option<String>,
    pub assignee_id: Option<EntityId>,
    /// AND semantics: issue must have ALL these labels.
    pub labels: Vec<String>,
    /// Order results by ascending priority (stable).
    pub sort_by_priority: bool,
}

impl IssueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn assignee(mut self, assignee_id: EntityId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn sorted_by_priority(mut self) -> Self {
        self.sort_by_priority = true;
        self
    }

    pub fn matches(&self, issue: &Issue) -> bool {
        if let Some(status) = &self.status {
            if &issue.status != status {
                return false;
            }
        }
        if let Some(assignee_id) = self.assignee_id {
            if issue.assignee_id != Some(assignee_id) {
                return false;
            }
        }
        self.labels.iter().all(|l| issue.has_label(l))
    }
}
