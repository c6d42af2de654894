//! Drag and drop resolution
//!
//! A renderer asks the controller for a [`DragHandle`] per visible card,
//! reports drag starts and drops, and the controller turns each drop into at
//! most one status move on the store. Drops on a lane background use that
//! lane; drops on another card adopt that card's lane. Anything that does not
//! resolve to a lane is ignored.

use crate::error::Result;
use crate::store::BoardStore;
use crate::types::{Status, Task, TaskId};
use std::sync::Arc;

/// What kind of surface a drop landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTargetKind {
    /// A lane background
    Lane,
    /// Another task's card
    Task,
}

/// The surface a drop landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    /// Lane name or task id, depending on `kind`
    pub id: String,
    /// What the id names
    pub kind: DropTargetKind,
}

impl DropTarget {
    /// A drop on a lane background
    pub fn lane(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: DropTargetKind::Lane,
        }
    }

    /// A drop on another task's card
    pub fn task(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: DropTargetKind::Task,
        }
    }
}

/// A finished drag: which task was dragged and where it landed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// The task that was dragged
    pub dragged: TaskId,
    /// Where it landed; `None` when the drag was cancelled or ended outside
    /// any drop surface
    pub target: Option<DropTarget>,
}

impl DropEvent {
    /// A drop on the given target
    pub fn new(dragged: impl Into<TaskId>, target: DropTarget) -> Self {
        Self {
            dragged: dragged.into(),
            target: Some(target),
        }
    }

    /// A drag that ended without landing anywhere
    pub fn cancelled(dragged: impl Into<TaskId>) -> Self {
        Self {
            dragged: dragged.into(),
            target: None,
        }
    }
}

/// Capability to start a drag for one task.
///
/// Renderers can only drag cards they were handed a handle for, which keeps
/// drag wiring explicit instead of letting arbitrary ids be dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragHandle {
    task_id: TaskId,
}

impl DragHandle {
    /// The task this handle drags
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }
}

/// Turns drop events into status moves on the store
pub struct DragController {
    store: Arc<BoardStore>,
    active: Option<TaskId>,
}

impl DragController {
    /// Create a controller over the given store
    pub fn new(store: Arc<BoardStore>) -> Self {
        Self {
            store,
            active: None,
        }
    }

    /// Mint a drag handle for a task
    pub fn handle_for(&self, task: &Task) -> DragHandle {
        DragHandle {
            task_id: task.id.clone(),
        }
    }

    /// Record that a drag started
    pub fn drag_start(&mut self, handle: &DragHandle) {
        self.active = Some(handle.task_id().clone());
    }

    /// The task currently being dragged, if any
    pub fn active_id(&self) -> Option<&TaskId> {
        self.active.as_ref()
    }

    /// Resolve a finished drag.
    ///
    /// The active id is cleared before anything else, no matter how
    /// resolution turns out. Unresolvable drops (no target, unknown lane
    /// name, target card not on the board) do nothing.
    pub async fn drag_end(&mut self, event: DropEvent) -> Result<()> {
        self.active = None;

        let target = match event.target {
            Some(target) => target,
            None => {
                tracing::debug!("Drag of task {} cancelled", event.dragged);
                return Ok(());
            }
        };

        let status = match self.resolve_lane(&target) {
            Some(status) => status,
            None => {
                tracing::debug!("Drop on {} did not resolve to a lane", target.id);
                return Ok(());
            }
        };

        self.store.move_status(&event.dragged, status).await
    }

    fn resolve_lane(&self, target: &DropTarget) -> Option<Status> {
        match target.kind {
            DropTargetKind::Lane => target.id.parse::<Status>().ok(),
            DropTargetKind::Task => self.store.task_status(&TaskId::from(target.id.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoardError, GatewayError};
    use crate::test_support::{GatewayCall, StubGateway};

    fn board() -> Vec<Task> {
        vec![
            Task::new("1", "Write the parser", Status::Todo),
            Task::new("2", "Wire up CI", Status::InProgress),
        ]
    }

    async fn setup() -> (Arc<StubGateway>, Arc<BoardStore>, DragController) {
        let gateway = Arc::new(StubGateway::seeded(board()));
        let store = Arc::new(BoardStore::new(gateway.clone()));
        store.load().await.unwrap();
        let controller = DragController::new(store.clone());
        (gateway, store, controller)
    }

    fn patch_calls(gateway: &StubGateway) -> usize {
        gateway
            .calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::PatchStatus(_, _)))
            .count()
    }

    #[tokio::test]
    async fn test_drag_start_records_active_task() {
        let (_gateway, store, mut controller) = setup().await;
        let task = store
            .state()
            .task(&TaskId::from_string("1"))
            .cloned()
            .unwrap();

        assert_eq!(controller.active_id(), None);
        let handle = controller.handle_for(&task);
        controller.drag_start(&handle);
        assert_eq!(controller.active_id(), Some(&task.id));
    }

    #[tokio::test]
    async fn test_drop_on_lane_moves_task() {
        let (_gateway, store, mut controller) = setup().await;
        let id = TaskId::from_string("1");

        controller
            .drag_end(DropEvent::new("1", DropTarget::lane("done")))
            .await
            .unwrap();

        assert_eq!(store.task_status(&id), Some(Status::Done));
        assert_eq!(controller.active_id(), None);
    }

    #[tokio::test]
    async fn test_drop_on_card_adopts_its_lane() {
        let (_gateway, store, mut controller) = setup().await;

        controller
            .drag_end(DropEvent::new("1", DropTarget::task("2")))
            .await
            .unwrap();

        assert_eq!(
            store.task_status(&TaskId::from_string("1")),
            Some(Status::InProgress)
        );
    }

    #[tokio::test]
    async fn test_drop_on_unknown_lane_is_ignored() {
        let (gateway, store, mut controller) = setup().await;

        controller
            .drag_end(DropEvent::new("1", DropTarget::lane("archive")))
            .await
            .unwrap();

        assert_eq!(patch_calls(&gateway), 0);
        assert_eq!(
            store.task_status(&TaskId::from_string("1")),
            Some(Status::Todo)
        );
    }

    #[tokio::test]
    async fn test_drop_on_unknown_card_is_ignored() {
        let (gateway, _store, mut controller) = setup().await;

        controller
            .drag_end(DropEvent::new("1", DropTarget::task("99")))
            .await
            .unwrap();

        assert_eq!(patch_calls(&gateway), 0);
    }

    #[tokio::test]
    async fn test_drop_on_own_lane_is_a_noop() {
        let (gateway, _store, mut controller) = setup().await;

        controller
            .drag_end(DropEvent::new("1", DropTarget::lane("todo")))
            .await
            .unwrap();

        assert_eq!(patch_calls(&gateway), 0);
    }

    #[tokio::test]
    async fn test_cancelled_drag_moves_nothing() {
        let (gateway, store, mut controller) = setup().await;
        let task = store
            .state()
            .task(&TaskId::from_string("1"))
            .cloned()
            .unwrap();

        let handle = controller.handle_for(&task);
        controller.drag_start(&handle);
        controller
            .drag_end(DropEvent::cancelled("1"))
            .await
            .unwrap();

        assert_eq!(controller.active_id(), None);
        assert_eq!(patch_calls(&gateway), 0);
    }

    #[tokio::test]
    async fn test_active_cleared_even_when_move_fails() {
        let (gateway, store, mut controller) = setup().await;
        let task = store
            .state()
            .task(&TaskId::from_string("1"))
            .cloned()
            .unwrap();

        gateway.fail_next_patch(GatewayError::api(500, "boom"));
        let handle = controller.handle_for(&task);
        controller.drag_start(&handle);
        let result = controller
            .drag_end(DropEvent::new("1", DropTarget::lane("done")))
            .await;

        assert!(matches!(result, Err(BoardError::Move { .. })));
        assert_eq!(controller.active_id(), None);
        assert_eq!(store.task_status(&task.id), Some(Status::Todo));
    }
}
