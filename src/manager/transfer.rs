//! Board export and import.
//!
//! Export writes the board and its owned graph as pretty-printed JSON. Import
//! reads the same shape but tolerates missing optional fields, filling them
//! from the manager configuration.

use super::BoardManager;
use crate::{
    domain::{issue::dedup_labels, Board, Comment, EntityId, Issue, Sprint},
    error::Result,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::{collections::BTreeMap, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct BoardRecord {
    #[serde(default)]
    id: Option<EntityId>,
    name: String,
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    issues: BTreeMap<String, IssueRecord>,
    #[serde(default)]
    sprints: BTreeMap<String, SprintRecord>,
}

#[derive(Debug, Deserialize)]
struct IssueRecord {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assignee_id: Option<EntityId>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    priority: Option<i64>,
    #[serde(default)]
    comments: Vec<CommentRecord>,
    #[serde(default, deserialize_with = "timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CommentRecord {
    id: EntityId,
    author_id: EntityId,
    body: String,
    #[serde(default, deserialize_with = "timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct SprintRecord {
    name: String,
    #[serde(default, deserialize_with = "timestamp")]
    start_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp")]
    end_at: Option<DateTime<Utc>>,
    #[serde(default)]
    issues: Vec<EntityId>,
    #[serde(default)]
    active: bool,
}

/// Reads an ISO-8601 timestamp. Values without an offset are taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_timestamp(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {value}"))),
        None => Ok(None),
    }
}

impl BoardManager {
    /// Serializes a board with its issues, comments and sprints
    pub fn export_board(&self, board_id: EntityId) -> Result<String> {
        let board = self.get_board(board_id)?;
        Ok(serde_json::to_string_pretty(board)?)
    }

    /// Rebuilds a board from exported text and registers it under its own id.
    ///
    /// The identifier sequence is advanced past every id in the imported
    /// graph. An existing board with the same id is replaced.
    pub fn import_board(&mut self, data: &str) -> Result<&Board> {
        let record: BoardRecord = serde_json::from_str(data)?;
        let now = Utc::now();

        let board_id = match record.id {
            Some(id) => id,
            None => self.ids.next_id(),
        };
        let mut board = Board::new(board_id, record.name);
        for project in &record.projects {
            board.add_project(project);
        }

        for (key, fields) in record.issues {
            let id = EntityId::from_str(&key)?;
            let created_at = fields.created_at.unwrap_or(now);
            let comments = fields
                .comments
                .into_iter()
                .map(|c| Comment {
                    id: c.id,
                    author_id: c.author_id,
                    body: c.body,
                    created_at: c.created_at.unwrap_or(now),
                })
                .collect();

            board.insert_issue(Issue {
                id,
                title: fields.title,
                description: fields.description.unwrap_or_default(),
                status: fields
                    .status
                    .unwrap_or_else(|| self.config.default_status.clone()),
                assignee_id: fields.assignee_id,
                labels: dedup_labels(fields.labels),
                priority: fields.priority.unwrap_or(self.config.default_priority),
                comments,
                created_at,
                updated_at: fields.updated_at.unwrap_or(created_at),
            });
        }

        for (key, fields) in record.sprints {
            let id = EntityId::from_str(&key)?;
            let mut sprint = Sprint::new(id, fields.name);
            sprint.start_at = fields.start_at;
            sprint.end_at = fields.end_at;
            sprint.active = fields.active;
            for issue_id in fields.issues {
                if !board.issues.contains_key(&issue_id) {
                    warn!(
                        sprint_id = %id,
                        issue_id = %issue_id,
                        "dropping sprint reference to unknown issue"
                    );
                    continue;
                }
                sprint.add_issue(issue_id);
            }
            board.insert_sprint(sprint);
        }

        self.ids.advance_past(board.max_id());
        if self.boards.contains_key(&board_id) {
            warn!(board_id = %board_id, "import replaces existing board");
        }
        info!(
            board_id = %board_id,
            issues = board.issues.len(),
            sprints = board.sprints.len(),
            "imported board"
        );

        self.boards.insert(board_id, board);
        self.get_board(board_id)
    }
}
