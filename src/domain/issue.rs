use crate::domain::{comment::Comment, id::EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked issue on a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub status: String,
    pub assignee_id: Option<EntityId>,
    pub labels: Vec<String>,
    /// Lower values are more urgent
    pub priority: i64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub const DEFAULT_STATUS: &'static str = "todo";
    pub const DEFAULT_PRIORITY: i64 = 100;

    /// Creates a new issue with the given ID and title
    pub fn new(id: EntityId, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: String::new(),
            status: Self::DEFAULT_STATUS.to_string(),
            assignee_id: None,
            labels: Vec::new(),
            priority: Self::DEFAULT_PRIORITY,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_assignee(mut self, assignee_id: Option<EntityId>) -> Self {
        self.assignee_id = assignee_id;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = dedup_labels(labels);
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Refreshes `updated_at`; never moves it backwards
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Applies every populated slot of the patch, then refreshes `updated_at`
    pub fn apply(&mut self, patch: IssuePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(labels) = patch.labels {
            self.labels = dedup_labels(labels);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.touch();
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Adds a label; returns false if it was already present
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.has_label(label) {
            return false;
        }
        self.labels.push(label.to_string());
        self.touch();
        true
    }

    /// Removes a label; returns false if it was not present
    pub fn remove_label(&mut self, label: &str) -> bool {
        match self.labels.iter().position(|l| l == label) {
            Some(pos) => {
                self.labels.remove(pos);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Appends a comment to the thread and returns it
    pub fn push_comment(&mut self, comment: Comment) -> &Comment {
        self.touch();
        let index = self.comments.len();
        self.comments.push(comment);
        &self.comments[index]
    }

    /// Case-insensitive substring match against title or description
    pub fn matches_query(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        self.title.to_lowercase().contains(&query_lower)
            || self.description.to_lowercase().contains(&query_lower)
    }
}

/// Parameters for creating an issue.
///
/// Unset status and priority fall back to the manager's configured defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub assignee_id: Option<EntityId>,
    pub labels: Vec<String>,
    pub priority: Option<i64>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
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

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Explicit set of field updates for an issue.
///
/// `None` leaves a field untouched. `assignee_id` is doubly optional so that
/// `Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub assignee_id: Option<Option<EntityId>>,
    pub labels: Option<Vec<String>>,
    pub priority: Option<i64>,
}

impl IssuePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn assignee(mut self, assignee_id: Option<EntityId>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Collects labels keeping the first occurrence of each value
pub(crate) fn dedup_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.into();
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
