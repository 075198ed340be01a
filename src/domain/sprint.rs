use crate::domain::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-boxed iteration referencing issues on the same board.
///
/// `issues` holds ids only; the board owns the issues themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: EntityId,
    pub name: String,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub issues: Vec<EntityId>,
    pub active: bool,
}

impl Sprint {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            start_at: None,
            end_at: None,
            issues: Vec::new(),
            active: false,
        }
    }

    pub fn contains(&self, issue_id: EntityId) -> bool {
        self.issues.contains(&issue_id)
    }

    /// Appends an issue reference; returns false if already present
    pub fn add_issue(&mut self, issue_id: EntityId) -> bool {
        if self.contains(issue_id) {
            return false;
        }
        self.issues.push(issue_id);
        true
    }

    /// Drops an issue reference; returns false if it was not present
    pub fn remove_issue(&mut self, issue_id: EntityId) -> bool {
        let before = self.issues.len();
        self.issues.retain(|id| *id != issue_id);
        self.issues.len() != before
    }

    /// Activates the sprint. The first start time is kept on restart.
    pub fn start(&mut self) {
        self.active = true;
        if self.start_at.is_none() {
            self.start_at = Some(Utc::now());
        }
    }

    /// Deactivates the sprint and stamps `end_at`, overwriting any previous close
    pub fn close(&mut self) {
        self.active = false;
        self.end_at = Some(Utc::now());
    }
}
