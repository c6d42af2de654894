//! End-to-end board flows against the scripted gateway

use std::sync::Arc;
use std::time::Duration;
use taskdeck::test_support::{GatewayCall, StubGateway};
use taskdeck::{
    BoardError, BoardPhase, BoardStore, DragController, DropEvent, DropTarget, EditingSession,
    GatewayError, SearchQuery, Status, Task, TaskId, ViewProjector,
};
use tokio::sync::watch;

fn board() -> Vec<Task> {
    vec![
        Task::new("1", "Write the parser", Status::Todo),
        Task::new("2", "Wire up CI", Status::InProgress),
        Task::new("3", "Cut a release", Status::Done),
    ]
}

async fn setup() -> (Arc<StubGateway>, Arc<BoardStore>) {
    let gateway = Arc::new(StubGateway::seeded(board()));
    let store = Arc::new(BoardStore::new(gateway.clone()));
    store.load().await.unwrap();
    (gateway, store)
}

/// Give background tasks a chance to catch up with published changes
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Wait until the gateway has received a status patch
async fn wait_for_patch(gateway: &StubGateway) {
    while !gateway
        .calls()
        .iter()
        .any(|call| matches!(call, GatewayCall::PatchStatus(_, _)))
    {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn full_task_lifecycle() {
    let (gateway, store) = setup().await;

    // Create through a form session.
    let mut form = EditingSession::create();
    form.set_title("Polish the README");
    form.set_description("screenshots too");
    form.submit(&store).await.unwrap();
    assert!(!form.is_open());

    let created = store.state().tasks.last().cloned().unwrap();
    assert_eq!(created.title, "Polish the README");
    assert_eq!(created.status, Status::Todo);

    // Drag it to in-progress.
    let mut drag = DragController::new(store.clone());
    let handle = drag.handle_for(&created);
    drag.drag_start(&handle);
    drag.drag_end(DropEvent::new(
        created.id.clone(),
        DropTarget::lane("in-progress"),
    ))
    .await
    .unwrap();
    assert_eq!(store.task_status(&created.id), Some(Status::InProgress));

    // Edit it through a prefilled session.
    let current = store.state().task(&created.id).cloned().unwrap();
    let mut form = EditingSession::edit(&current);
    form.set_status(Status::Done);
    form.submit(&store).await.unwrap();
    assert_eq!(store.task_status(&created.id), Some(Status::Done));

    // And delete it.
    let current = store.state().task(&created.id).cloned().unwrap();
    let mut form = EditingSession::edit(&current);
    form.delete(&store).await.unwrap();
    assert!(store.state().task(&created.id).is_none());

    // The remote saw every mutation.
    let calls = gateway.calls();
    assert!(calls.iter().any(|c| matches!(c, GatewayCall::CreateOne(_))));
    assert!(calls
        .iter()
        .any(|c| matches!(c, GatewayCall::PatchStatus(_, Status::InProgress))));
    assert!(calls.iter().any(|c| matches!(c, GatewayCall::ReplaceOne(_, _))));
    assert!(calls.iter().any(|c| matches!(c, GatewayCall::DeleteOne(_))));
}

#[tokio::test]
async fn failed_drop_snaps_the_card_back() {
    let (gateway, store) = setup().await;
    let id = TaskId::from_string("1");

    let (_query_tx, query_rx) = watch::channel(String::new());
    let projector = ViewProjector::spawn(store.subscribe(), query_rx);

    let task = store.state().task(&id).cloned().unwrap();
    let mut drag = DragController::new(store.clone());
    let handle = drag.handle_for(&task);
    drag.drag_start(&handle);

    let gate = gateway.hold_next_patch();
    gateway.fail_next_patch(GatewayError::transport("connection reset"));
    let pending = {
        let id = id.clone();
        tokio::spawn(async move {
            drag.drag_end(DropEvent::new(id, DropTarget::lane("done"))).await
        })
    };
    wait_for_patch(&gateway).await;

    // While the remote call is parked the card already shows in its new lane,
    // with no failure on display.
    settle().await;
    let view = projector.view();
    assert!(view.lane(Status::Done).tasks.iter().any(|t| t.id == id));
    assert!(view.lane(Status::Todo).tasks.iter().all(|t| t.id != id));
    assert_eq!(view.error, None);

    gate.release();
    let result = pending.await.unwrap();
    assert!(matches!(result, Err(BoardError::Move { .. })));

    // The card is back in its original lane and the failure is on display.
    settle().await;
    let view = projector.view();
    assert!(view.lane(Status::Todo).tasks.iter().any(|t| t.id == id));
    assert!(view.lane(Status::Done).tasks.iter().all(|t| t.id != id));
    assert!(matches!(view.error, Some(BoardError::Move { .. })));
}

#[tokio::test(start_paused = true)]
async fn debounced_search_narrows_the_board() {
    let (_gateway, store) = setup().await;
    let mut search = SearchQuery::new();
    let projector = ViewProjector::spawn(store.subscribe(), search.subscribe());
    settle().await;
    assert_eq!(projector.view().task_count(), 3);

    // Three quick keystrokes; only the last may ever reach the view.
    search.set("w");
    search.set("wi");
    search.set("wire");

    tokio::time::advance(Duration::from_millis(499)).await;
    settle().await;
    assert_eq!(projector.view().task_count(), 3);

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    let view = projector.view();
    assert_eq!(view.task_count(), 1);
    assert_eq!(view.lane(Status::InProgress).tasks[0].title, "Wire up CI");
}

#[tokio::test]
async fn unreachable_remote_marks_the_board_unavailable() {
    let gateway = Arc::new(StubGateway::seeded(board()));
    let store = Arc::new(BoardStore::new(gateway.clone()));
    let (_query_tx, query_rx) = watch::channel(String::new());
    let projector = ViewProjector::spawn(store.subscribe(), query_rx);

    gateway.fail_next_fetch(GatewayError::transport("connection refused"));
    let result = store.load().await;
    assert!(matches!(result, Err(BoardError::Load { .. })));

    settle().await;
    let view = projector.view();
    assert_eq!(view.phase, BoardPhase::Unavailable);
    assert_eq!(view.task_count(), 0);
    assert!(matches!(view.error, Some(BoardError::Load { .. })));

    // A later successful load recovers the board.
    store.load().await.unwrap();
    settle().await;
    assert_eq!(projector.view().phase, BoardPhase::Ready);
    assert_eq!(projector.view().task_count(), 3);
}

#[tokio::test]
async fn dismissing_an_error_clears_it_from_the_view() {
    let (gateway, store) = setup().await;
    let (_query_tx, query_rx) = watch::channel(String::new());
    let projector = ViewProjector::spawn(store.subscribe(), query_rx);

    gateway.fail_next_delete(GatewayError::api(500, "boom"));
    let _ = store.remove(&TaskId::from_string("1")).await;

    settle().await;
    assert!(projector.view().error.is_some());
    // The failed delete left the task on the board.
    assert_eq!(projector.view().task_count(), 3);

    store.clear_error().await;
    settle().await;
    assert_eq!(projector.view().error, None);
}

#[tokio::test]
async fn blank_draft_changes_nothing_anywhere() {
    let (gateway, store) = setup().await;
    let (_query_tx, query_rx) = watch::channel(String::new());
    let projector = ViewProjector::spawn(store.subscribe(), query_rx);

    let mut form = EditingSession::create();
    form.set_title("   ");
    form.submit(&store).await.unwrap();

    assert!(form.is_open());
    assert!(!gateway
        .calls()
        .iter()
        .any(|c| matches!(c, GatewayCall::CreateOne(_))));

    settle().await;
    assert_eq!(projector.view().task_count(), 3);
}
