use crate::domain::{id::EntityId, issue::Issue, sprint::Sprint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Board state: projects plus the issues and sprints it owns.
///
/// Issues and sprints are keyed by id in ordered maps, so iteration follows
/// ascending id, which is creation order for generator-assigned ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: EntityId,
    pub name: String,
    pub projects: Vec<String>,
    pub issues: BTreeMap<EntityId, Issue>,
    pub sprints: BTreeMap<EntityId, Sprint>,
}

impl Board {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            projects: Vec::new(),
            issues: BTreeMap::new(),
            sprints: BTreeMap::new(),
        }
    }

    /// Registers a project name; returns false if it was already present
    pub fn add_project(&mut self, name: &str) -> bool {
        if self.projects.iter().any(|p| p == name) {
            return false;
        }
        self.projects.push(name.to_string());
        true
    }

    pub fn insert_issue(&mut self, issue: Issue) {
        self.issues.insert(issue.id, issue);
    }

    pub fn insert_sprint(&mut self, sprint: Sprint) {
        self.sprints.insert(sprint.id, sprint);
    }

    /// Removes an issue and every sprint reference to it
    pub fn remove_issue(&mut self, issue_id: EntityId) -> Option<Issue> {
        let removed = self.issues.remove(&issue_id);
        for sprint in self.sprints.values_mut() {
            sprint.remove_issue(issue_id);
        }
        removed
    }

    /// Ids of the sprints that reference the given issue
    pub fn sprints_containing(&self, issue_id: EntityId) -> Vec<EntityId> {
        self.sprints
            .values()
            .filter(|s| s.contains(issue_id))
            .map(|s| s.id)
            .collect()
    }

    /// Largest identifier anywhere in the owned graph
    pub fn max_id(&self) -> EntityId {
        let issue_ids = self
            .issues
            .values()
            .flat_map(|i| std::iter::once(i.id).chain(i.comments.iter().map(|c| c.id)));
        let sprint_ids = self.sprints.keys().copied();

        issue_ids
            .chain(sprint_ids)
            .chain(std::iter::once(self.id))
            .max()
            .unwrap_or(self.id)
    }
}
