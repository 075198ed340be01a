//! The board manager: sole owner and mutator of boards, users, and the
//! identifier sequence.
//!
//! Every operation addresses entities by id. Looking up a board, issue, or
//! sprint that does not exist fails with [`MinimiError::NotFound`]; operations
//! whose goal is already satisfied (adding a present label, removing an absent
//! sprint entry) succeed without changes.
//!
//! The manager is a plain owned value. Callers that share it across threads
//! wrap it in a lock of their choosing.

use crate::{
    config::ManagerConfig,
    domain::{Board, EntityId, EntityKind, IdGenerator, Issue, Sprint, User},
    error::{MinimiError, Result},
};
use std::collections::BTreeMap;
use tracing::{debug, info};

mod issues;
mod sprints;
mod transfer;

/// In-memory manager for boards and users
#[derive(Debug)]
pub struct BoardManager {
    config: ManagerConfig,
    ids: IdGenerator,
    boards: BTreeMap<EntityId, Board>,
    users: BTreeMap<EntityId, User>,
}

impl BoardManager {
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            ids: IdGenerator::new(config.first_id),
            config,
            boards: BTreeMap::new(),
            users: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Creates an empty board
    pub fn create_board(&mut self, name: &str) -> &Board {
        let id = self.ids.next_id();
        info!(board_id = %id, name, "creating board");
        self.boards
            .entry(id)
            .or_insert_with(|| Board::new(id, name.to_string()))
    }

    pub fn get_board(&self, board_id: EntityId) -> Result<&Board> {
        self.boards
            .get(&board_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Board, board_id))
    }

    /// All boards in ascending id order
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    /// Adds a project name to a board; no-op if already present
    pub fn add_project(&mut self, board_id: EntityId, name: &str) -> Result<()> {
        if self.board_mut(board_id)?.add_project(name) {
            debug!(board_id = %board_id, project = name, "added project");
        }
        Ok(())
    }

    pub fn create_user(&mut self, name: &str) -> &User {
        let id = self.ids.next_id();
        debug!(user_id = %id, name, "creating user");
        self.users
            .entry(id)
            .or_insert_with(|| User::new(id, name.to_string()))
    }

    pub fn get_user(&self, user_id: EntityId) -> Result<&User> {
        self.users
            .get(&user_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::User, user_id))
    }

    /// All users in ascending id order
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    fn board_mut(&mut self, board_id: EntityId) -> Result<&mut Board> {
        self.boards
            .get_mut(&board_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Board, board_id))
    }

    fn issue_mut(&mut self, board_id: EntityId, issue_id: EntityId) -> Result<&mut Issue> {
        self.board_mut(board_id)?
            .issues
            .get_mut(&issue_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Issue, issue_id))
    }

    fn sprint_mut(&mut self, board_id: EntityId, sprint_id: EntityId) -> Result<&mut Sprint> {
        self.board_mut(board_id)?
            .sprints
            .get_mut(&sprint_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Sprint, sprint_id))
    }
}

impl Default for BoardManager {
    fn default() -> Self {
        Self::new()
    }
}
