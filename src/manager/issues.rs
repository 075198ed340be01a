use super::BoardManager;
use crate::{
    domain::{Comment, EntityId, EntityKind, Issue, IssueFilter, IssuePatch, NewIssue},
    error::{MinimiError, Result},
};
use tracing::debug;

impl BoardManager {
    /// Creates an issue on a board.
    ///
    /// `assignee_id` is stored as given; it is not checked against known users.
    pub fn create_issue(&mut self, board_id: EntityId, new: NewIssue) -> Result<&Issue> {
        self.get_board(board_id)?;
        let id = self.ids.next_id();

        let issue = Issue::new(id, new.title)
            .with_description(new.description)
            .with_status(new.status.unwrap_or_else(|| self.config.default_status.clone()))
            .with_assignee(new.assignee_id)
            .with_labels(new.labels)
            .with_priority(new.priority.unwrap_or(self.config.default_priority));

        debug!(board_id = %board_id, issue_id = %id, title = %issue.title, "creating issue");
        let board = self.board_mut(board_id)?;
        board.insert_issue(issue);
        self.get_issue(board_id, id)
    }

    pub fn get_issue(&self, board_id: EntityId, issue_id: EntityId) -> Result<&Issue> {
        self.get_board(board_id)?
            .issues
            .get(&issue_id)
            .ok_or_else(|| MinimiError::not_found(EntityKind::Issue, issue_id))
    }

    /// Applies a patch to an issue and refreshes `updated_at`
    pub fn update_issue(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        patch: IssuePatch,
    ) -> Result<&Issue> {
        debug!(board_id = %board_id, issue_id = %issue_id, ?patch, "updating issue");
        let issue = self.issue_mut(board_id, issue_id)?;
        issue.apply(patch);
        Ok(issue)
    }

    /// Removes an issue and drops it from every sprint on the board.
    /// Deleting an issue that does not exist is a no-op.
    pub fn delete_issue(&mut self, board_id: EntityId, issue_id: EntityId) -> Result<()> {
        if self.board_mut(board_id)?.remove_issue(issue_id).is_some() {
            debug!(board_id = %board_id, issue_id = %issue_id, "deleted issue");
        }
        Ok(())
    }

    /// Issues matching every populated filter field, in creation order unless
    /// the filter asks for priority order
    pub fn list_issues(&self, board_id: EntityId, filter: &IssueFilter) -> Result<Vec<&Issue>> {
        let mut issues: Vec<&Issue> = self
            .get_board(board_id)?
            .issues
            .values()
            .filter(|issue| filter.matches(issue))
            .collect();

        // stable: equal priorities keep creation order
        if filter.sort_by_priority {
            issues.sort_by_key(|issue| issue.priority);
        }
        Ok(issues)
    }

    /// Issues whose title or description contains `query`, ignoring case
    pub fn search_issues(&self, board_id: EntityId, query: &str) -> Result<Vec<&Issue>> {
        Ok(self
            .get_board(board_id)?
            .issues
            .values()
            .filter(|issue| issue.matches_query(query))
            .collect())
    }

    /// Sets or clears the assignee
    pub fn assign_issue(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        user_id: Option<EntityId>,
    ) -> Result<&Issue> {
        self.update_issue(board_id, issue_id, IssuePatch::new().assignee(user_id))
    }

    /// Sets the workflow status
    pub fn move_issue(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        status: &str,
    ) -> Result<&Issue> {
        self.update_issue(board_id, issue_id, IssuePatch::new().status(status))
    }

    pub fn prioritize_issue(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        priority: i64,
    ) -> Result<&Issue> {
        self.update_issue(board_id, issue_id, IssuePatch::new().priority(priority))
    }

    /// Adds a label; a label already present leaves the issue untouched
    pub fn add_label(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        label: &str,
    ) -> Result<&Issue> {
        let issue = self.issue_mut(board_id, issue_id)?;
        if issue.add_label(label) {
            debug!(board_id = %board_id, issue_id = %issue_id, label, "added label");
        }
        Ok(issue)
    }

    /// Removes a label; an absent label leaves the issue untouched
    pub fn remove_label(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        label: &str,
    ) -> Result<&Issue> {
        let issue = self.issue_mut(board_id, issue_id)?;
        if issue.remove_label(label) {
            debug!(board_id = %board_id, issue_id = %issue_id, label, "removed label");
        }
        Ok(issue)
    }

    /// Appends a comment. `author_id` is not checked against known users.
    pub fn add_comment(
        &mut self,
        board_id: EntityId,
        issue_id: EntityId,
        author_id: EntityId,
        body: &str,
    ) -> Result<&Comment> {
        self.get_issue(board_id, issue_id)?;
        let id = self.ids.next_id();

        debug!(board_id = %board_id, issue_id = %issue_id, comment_id = %id, "adding comment");
        let issue = self.issue_mut(board_id, issue_id)?;
        Ok(issue.push_comment(Comment::new(id, author_id, body.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};

    fn setup() -> (BoardManager, EntityId) {
        let mut manager = BoardManager::new();
        let board_id = manager.create_board("Main").id;
        (manager, board_id)
    }

    fn titles(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_create_issue_defaults() {
        let (mut manager, board_id) = setup();
        let issue = manager.create_issue(board_id, NewIssue::new("Task")).unwrap();

        assert_eq!(issue.status, "todo");
        assert_eq!(issue.priority, 100);
        assert_eq!(issue.description, "");
        assert!(issue.assignee_id.is_none());
    }

    #[test]
    fn test_create_issue_uses_configured_defaults() {
        let config = crate::config::ManagerConfig {
            default_status: "backlog".to_string(),
            default_priority: 10,
            ..Default::default()
        };
        let mut manager = BoardManager::with_config(config);
        let board_id = manager.create_board("Main").id;

        let issue = manager.create_issue(board_id, NewIssue::new("Task")).unwrap();
        assert_eq!(issue.status, "backlog");
        assert_eq!(issue.priority, 10);
    }

    #[test]
    fn test_create_issue_unknown_board() {
        let mut manager = BoardManager::new();
        let err = manager
            .create_issue(EntityId::new(5), NewIssue::new("Task"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_issue_with_dangling_assignee() {
        let (mut manager, board_id) = setup();
        let issue = manager
            .create_issue(board_id, NewIssue::new("Task").assignee(EntityId::new(999)))
            .unwrap();
        assert_eq!(issue.assignee_id, Some(EntityId::new(999)));
    }

    #[test]
    fn test_get_issue_not_found() {
        let (manager, board_id) = setup();

        let err = manager.get_issue(board_id, EntityId::new(77)).unwrap_err();
        assert!(matches!(
            err,
            MinimiError::NotFound {
                kind: EntityKind::Issue,
                ..
            }
        ));

        let err = manager.get_issue(EntityId::new(88), EntityId::new(77)).unwrap_err();
        assert!(matches!(
            err,
            MinimiError::NotFound {
                kind: EntityKind::Board,
                ..
            }
        ));
    }

    #[test]
    fn test_update_issue_refreshes_updated_at() {
        let (mut manager, board_id) = setup();
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;
        let before = manager.get_issue(board_id, issue_id).unwrap().updated_at;

        thread::sleep(Duration::from_millis(10));
        let issue = manager
            .update_issue(board_id, issue_id, IssuePatch::new().title("Renamed"))
            .unwrap();

        assert_eq!(issue.title, "Renamed");
        assert!(issue.updated_at > before);
    }

    #[test]
    fn test_workflow_wrappers() {
        let (mut manager, board_id) = setup();
        let user_id = manager.create_user("alice").id;
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;

        manager.move_issue(board_id, issue_id, "in_progress").unwrap();
        manager.prioritize_issue(board_id, issue_id, 5).unwrap();
        manager.assign_issue(board_id, issue_id, Some(user_id)).unwrap();

        let issue = manager.get_issue(board_id, issue_id).unwrap();
        assert_eq!(issue.status, "in_progress");
        assert_eq!(issue.priority, 5);
        assert_eq!(issue.assignee_id, Some(user_id));

        let issue = manager.assign_issue(board_id, issue_id, None).unwrap();
        assert!(issue.assignee_id.is_none());
    }

    #[test]
    fn test_label_operations() {
        let (mut manager, board_id) = setup();
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;

        manager.add_label(board_id, issue_id, "bug").unwrap();
        manager.add_label(board_id, issue_id, "bug").unwrap();
        manager.add_label(board_id, issue_id, "ui").unwrap();
        assert_eq!(manager.get_issue(board_id, issue_id).unwrap().labels, vec!["bug", "ui"]);

        manager.remove_label(board_id, issue_id, "bug").unwrap();
        manager.remove_label(board_id, issue_id, "bug").unwrap();
        assert_eq!(manager.get_issue(board_id, issue_id).unwrap().labels, vec!["ui"]);
    }

    #[test]
    fn test_label_changes_refresh_updated_at() {
        let (mut manager, board_id) = setup();
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;
        let created = manager.get_issue(board_id, issue_id).unwrap().updated_at;

        thread::sleep(Duration::from_millis(10));
        let added = manager.add_label(board_id, issue_id, "bug").unwrap().updated_at;
        assert!(added > created);

        thread::sleep(Duration::from_millis(10));
        let unchanged = manager.add_label(board_id, issue_id, "bug").unwrap().updated_at;
        assert_eq!(unchanged, added);

        thread::sleep(Duration::from_millis(10));
        let removed = manager.remove_label(board_id, issue_id, "bug").unwrap().updated_at;
        assert!(removed > added);
    }

    #[test]
    fn test_workflow_changes_refresh_updated_at() {
        let (mut manager, board_id) = setup();
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;
        let created = manager.get_issue(board_id, issue_id).unwrap().updated_at;

        thread::sleep(Duration::from_millis(10));
        let moved = manager.move_issue(board_id, issue_id, "done").unwrap().updated_at;
        assert!(moved > created);

        thread::sleep(Duration::from_millis(10));
        let prioritized = manager.prioritize_issue(board_id, issue_id, 1).unwrap().updated_at;
        assert!(prioritized > moved);

        thread::sleep(Duration::from_millis(10));
        let commented = manager
            .add_comment(board_id, issue_id, EntityId::new(1), "done")
            .unwrap()
            .created_at;
        let updated = manager.get_issue(board_id, issue_id).unwrap().updated_at;
        assert!(updated > prioritized);
        assert!(updated >= commented);
    }

    #[test]
    fn test_list_issues_priority_sort_is_stable() {
        let (mut manager, board_id) = setup();
        for (title, priority) in [("a", 300), ("b", 100), ("c", 100), ("d", 200)] {
            manager
                .create_issue(board_id, NewIssue::new(title).priority(priority))
                .unwrap();
        }

        let sorted = manager
            .list_issues(board_id, &IssueFilter::new().sorted_by_priority())
            .unwrap();

        assert_eq!(titles(&sorted), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn test_add_comment() {
        let (mut manager, board_id) = setup();
        let author = manager.create_user("alice").id;
        let issue_id = manager.create_issue(board_id, NewIssue::new("Task")).unwrap().id;

        let comment = manager.add_comment(board_id, issue_id, author, "First!").unwrap();
        assert_eq!(comment.body, "First!");
        assert_eq!(comment.author_id, author);
        assert!(comment.id > issue_id);

        manager.add_comment(board_id, issue_id, author, "Second").unwrap();
        let bodies: Vec<&str> = manager
            .get_issue(board_id, issue_id)
            .unwrap()
            .comments
            .iter()
            .map(|c| c.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["First!", "Second"]);
    }

    #[test]
    fn test_add_comment_missing_issue_consumes_no_id() {
        let (mut manager, board_id) = setup();
        let next = manager.ids.peek();

        assert!(manager
            .add_comment(board_id, EntityId::new(50), EntityId::new(1), "x")
            .is_err());
        assert_eq!(manager.ids.peek(), next);
    }

    #[test]
    fn test_delete_issue_missing_is_noop() {
        let (mut manager, board_id) = setup();
        assert!(manager.delete_issue(board_id, EntityId::new(40)).is_ok());
        assert!(manager.delete_issue(EntityId::new(41), EntityId::new(40)).is_err());
    }

    #[test]
    fn test_list_issues_filters() {
        let (mut manager, board_id) = setup();
        let alice = manager.create_user("alice").id;

        manager
            .create_issue(board_id, NewIssue::new("A").assignee(alice).label("bug").label("ui"))
            .unwrap();
        let b = manager.create_issue(board_id, NewIssue::new("B").label("bug")).unwrap().id;
        manager.create_issue(board_id, NewIssue::new("C").assignee(alice)).unwrap();
        manager.move_issue(board_id, b, "done").unwrap();

        let all = manager.list_issues(board_id, &IssueFilter::new()).unwrap();
        assert_eq!(titles(&all), vec!["A", "B", "C"]);

        let bugs = manager.list_issues(board_id, &IssueFilter::new().label("bug")).unwrap();
        assert_eq!(titles(&bugs), vec!["A", "B"]);

        let alice_bugs = manager
            .list_issues(board_id, &IssueFilter::new().assignee(alice).label("bug"))
            .unwrap();
        assert_eq!(titles(&alice_bugs), vec!["A"]);

        let done = manager.list_issues(board_id, &IssueFilter::new().status("done")).unwrap();
        assert_eq!(titles(&done), vec!["B"]);
    }

    #[test]
    fn test_search_issues() {
        let (mut manager, board_id) = setup();
        manager.create_issue(board_id, NewIssue::new("Fix Auth bug")).unwrap();
        manager
            .create_issue(board_id, NewIssue::new("Cleanup").description("touches AUTH"))
            .unwrap();
        manager.create_issue(board_id, NewIssue::new("Billing")).unwrap();

        let found = manager.search_issues(board_id, "auth").unwrap();
        assert_eq!(titles(&found), vec!["Fix Auth bug", "Cleanup"]);
        assert!(manager.search_issues(EntityId::new(99), "auth").is_err());
    }
}
