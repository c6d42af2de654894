//! Command implementations for the TaskDeck CLI.
//!
//! Each command drives the board engine: load the board from the remote, act
//! on the store, print the outcome. Formatting decisions live here; board
//! semantics live in the `taskdeck` crate.

use taskdeck::{
    project, BoardError, BoardStore, BoardView, DraftError, EditingSession, Status, TaskDraft,
    TaskId, UnknownStatus,
};
use thiserror::Error;

use crate::table;

/// Errors a command can end with. Exit code mapping lives in main.
#[derive(Debug, Error)]
pub enum CliError {
    /// A board operation failed
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A status argument did not parse
    #[error(transparent)]
    Status(#[from] UnknownStatus),

    /// The given id is not on the board
    #[error("no task with id {0}")]
    UnknownTask(String),

    /// The form rejected the draft before anything was sent
    #[error(transparent)]
    Draft(#[from] DraftError),
}

/// Parse an optional status argument. Runs before any network traffic so a
/// typo fails fast.
fn parse_status(raw: Option<&str>) -> Result<Option<Status>, UnknownStatus> {
    raw.map(|s| s.parse::<Status>()).transpose()
}

/// The board as a JSON object with one array of tasks per lane, keyed by
/// status.
fn lanes_json(view: &BoardView) -> serde_json::Value {
    let mut lanes = serde_json::Map::new();
    for lane in &view.lanes {
        lanes.insert(
            lane.status.as_str().to_string(),
            serde_json::json!(lane.tasks),
        );
    }
    serde_json::Value::Object(lanes)
}

/// Run the board command: print the lanes, optionally filtered by a title
/// search.
pub async fn run_board(
    store: &BoardStore,
    search: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    store.load().await?;

    let state = store.state();
    let view = project(&state, search.unwrap_or(""));

    if json {
        let output = lanes_json(&view);
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return Ok(());
    }

    if view.task_count() == 0 {
        match search {
            Some(query) => println!("No tasks match '{}'.", query),
            None => println!("The board is empty."),
        }
        return Ok(());
    }

    let mut table = table::new_table();
    table.set_header(
        view.lanes
            .iter()
            .map(|lane| format!("{} ({})", lane.status.label(), lane.tasks.len()))
            .collect::<Vec<_>>(),
    );

    let depth = view
        .lanes
        .iter()
        .map(|lane| lane.tasks.len())
        .max()
        .unwrap_or(0);
    for row in 0..depth {
        table.add_row(
            view.lanes
                .iter()
                .map(|lane| match lane.tasks.get(row) {
                    Some(task) => table::card_cell(task.id.as_str(), &task.title),
                    None => String::new(),
                })
                .collect::<Vec<_>>(),
        );
    }

    println!("{table}");
    println!("\n{} task(s) shown.", view.task_count());

    Ok(())
}

/// Run the add command: create a task from the given fields.
pub async fn run_add(
    store: &BoardStore,
    title: &str,
    description: Option<&str>,
    status: Option<&str>,
) -> Result<(), CliError> {
    let status = parse_status(status)?;

    store.load().await?;

    let mut draft = TaskDraft::new(title);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    if let Some(status) = status {
        draft = draft.with_status(status);
    }

    let task = store.create(draft).await?;
    println!("Created task {} in {}", task.id, task.status.label());
    Ok(())
}

/// Run the edit command: overlay the given fields on the existing task and
/// save it back.
pub async fn run_edit(
    store: &BoardStore,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    status: Option<&str>,
) -> Result<(), CliError> {
    let status = parse_status(status)?;

    store.load().await?;
    let task_id = TaskId::from(id);
    let state = store.state();
    let task = state
        .task(&task_id)
        .ok_or_else(|| CliError::UnknownTask(id.to_string()))?;

    let mut session = EditingSession::edit(task);
    if let Some(title) = title {
        session.set_title(title);
    }
    if let Some(description) = description {
        session.set_description(description);
    }
    if let Some(status) = status {
        session.set_status(status);
    }

    session.submit(store).await?;
    if let Some(complaint) = session.draft_error() {
        return Err(complaint.into());
    }

    println!("Updated task {}", id);
    Ok(())
}

/// Run the move command: put the task in another lane.
pub async fn run_move(store: &BoardStore, id: &str, status: &str) -> Result<(), CliError> {
    let status: Status = status.parse()?;

    store.load().await?;
    let task_id = TaskId::from(id);
    if !store.state().contains(&task_id) {
        return Err(CliError::UnknownTask(id.to_string()));
    }

    store.move_status(&task_id, status).await?;
    println!("Moved task {} to {}", id, status.label());
    Ok(())
}

/// Run the rm command: delete the task.
pub async fn run_rm(store: &BoardStore, id: &str) -> Result<(), CliError> {
    store.load().await?;
    let task_id = TaskId::from(id);
    if !store.state().contains(&task_id) {
        return Err(CliError::UnknownTask(id.to_string()));
    }

    store.remove(&task_id).await?;
    println!("Deleted task {}", id);
    Ok(())
}
