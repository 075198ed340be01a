use super::BoardManager;
use crate::{
    domain::{EntityId, EntityKind, Sprint},
    error::{MinimiError, Result},
};
use tracing::debug;

impl BoardManager {
    pub fn create_sprint(&mut self, board_id: EntityId, name: &str) -> Result<&Sprint> {
        self.get_board(board_id)?;
        let id = self.ids.next_id();

        debug!(board_id = %board_id, sprint_id = %id, name, "creating sprint");
        self.board_mut(board_id)?
            .insert_sprint(Sprint::new(id, name.to_string()));
        self.get_sprint(board_id, id)
    }

    pub fn get_sprint(&self, board_id: EntityId, sprint_id: EntityId) -> Result<&Sprint> {
        self.get_board(board_id)?
            .sprints
            .get(&sprint_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Sprint, sprint_id))
    }

    /// Sprints on a board in creation order
    pub fn list_sprints(&self, board_id: EntityId) -> Result<Vec<&Sprint>> {
        Ok(self.get_board(board_id)?.sprints.values().collect())
    }

    /// Ids of the sprints on a board that reference the issue
    pub fn sprints_for_issue(
        &self,
        board_id: EntityId,
        issue_id: EntityId,
    ) -> Result<Vec<EntityId>> {
        Ok(self.get_board(board_id)?.sprints_containing(issue_id))
    }

    /// Adds an issue to a sprint.
    ///
    /// Silently does nothing when the issue is not on the board or is already
    /// in the sprint.
    pub fn add_issue_to_sprint(
        &mut self,
        board_id: EntityId,
        sprint_id: EntityId,
        issue_id: EntityId,
    ) -> Result<()> {
        let board = self.board_mut(board_id)?;
        let on_board = board.issues.contains_key(&issue_id);
        let sprint = board
            .sprints
            .get_mut(&sprint_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Sprint, sprint_id))?;

        if on_board && sprint.add_issue(issue_id) {
            debug!(
                board_id = %board_id,
                sprint_id = %sprint_id,
                issue_id = %issue_id,
                "added issue to sprint"
            );
        }
        Ok(())
    }

    /// Removes an issue from a sprint; no-op if it is not there
    pub fn remove_issue_from_sprint(
        &mut self,
        board_id: EntityId,
        sprint_id: EntityId,
        issue_id: EntityId,
    ) -> Result<()> {
        if self.sprint_mut(board_id, sprint_id)?.remove_issue(issue_id) {
            debug!(
                board_id = %board_id,
                sprint_id = %sprint_id,
                issue_id = %issue_id,
                "removed issue from sprint"
            );
        }
        Ok(())
    }

    /// Activates a sprint; restarting keeps the original start time
    pub fn start_sprint(&mut self, board_id: EntityId, sprint_id: EntityId) -> Result<&Sprint> {
        let sprint = self.sprint_mut(board_id, sprint_id)?;
        sprint.start();
        debug!(board_id = %board_id, sprint_id = %sprint_id, "started sprint");
        Ok(sprint)
    }

    /// Deactivates a sprint; every close stamps a fresh end time
    pub fn close_sprint(&mut self, board_id: EntityId, sprint_id: EntityId) -> Result<&Sprint> {
        let sprint = self.sprint_mut(board_id, sprint_id)?;
        sprint.close();
        debug!(board_id = %board_id, sprint_id = %sprint_id, "closed sprint");
        Ok(sprint)
    }
}
