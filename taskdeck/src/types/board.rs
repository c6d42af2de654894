//! Board state snapshots

use super::ids::TaskId;
use super::task::Task;
use crate::error::BoardError;

/// Load lifecycle of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    /// A load is underway and has not completed yet
    Loading,
    /// The last load succeeded; the task list is authoritative
    Ready,
    /// The last load failed; the board contents are unknown
    Unavailable,
}

/// Snapshot of the board, published by the store on every change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Where the board is in its load lifecycle
    pub phase: BoardPhase,
    /// All tasks, in the order the remote returned them
    pub tasks: Vec<Task>,
    /// The most recent operation failure; a new failure overwrites the old one
    pub error: Option<BoardError>,
}

impl BoardState {
    /// A board that has not loaded yet
    pub fn new() -> Self {
        Self {
            phase: BoardPhase::Loading,
            tasks: Vec::new(),
            error: None,
        }
    }

    /// Look up a task by id
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Look up a task by id for mutation
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    /// Check whether a task with the given id is on the board
    pub fn contains(&self, id: &TaskId) -> bool {
        self.task(id).is_some()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    #[test]
    fn test_new_board_is_loading_and_empty() {
        let state = BoardState::new();
        assert_eq!(state.phase, BoardPhase::Loading);
        assert!(state.tasks.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_task_lookup() {
        let mut state = BoardState::new();
        state.tasks.push(Task::new("1", "First", Status::Todo));
        state.tasks.push(Task::new("2", "Second", Status::Done));

        let id = TaskId::from_string("2");
        assert_eq!(state.task(&id).map(|t| t.title.as_str()), Some("Second"));
        assert!(state.contains(&id));
        assert!(!state.contains(&TaskId::from_string("3")));

        state.task_mut(&id).unwrap().status = Status::InProgress;
        assert_eq!(state.task(&id).unwrap().status, Status::InProgress);
    }
}
