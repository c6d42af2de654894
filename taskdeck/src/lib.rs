//! # TaskDeck
//!
//! Board engine for a three-lane kanban board (`todo`, `in-progress`,
//! `done`) backed by a remote task store over HTTP.
//!
//! ## Overview
//!
//! - [`BoardStore`] owns the local task list and keeps it in step with the
//!   remote: loads replace state wholesale, creates/edits/deletes go
//!   remote-first, and status moves apply optimistically with rollback.
//! - [`project`] and [`ViewProjector`] turn board snapshots into the three
//!   lanes a renderer draws, filtered by a search query.
//! - [`SearchQuery`] debounces keystrokes so subscribers only see values
//!   that have settled.
//! - [`DragController`] resolves drag and drop gestures into status moves.
//! - [`EditingSession`] holds create/edit form state and its validation.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskdeck::{project, BoardStore, HttpGateway};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Arc::new(HttpGateway::from_env()?);
//! let store = Arc::new(BoardStore::new(gateway));
//! store.load().await?;
//!
//! let view = project(&store.state(), "");
//! for lane in &view.lanes {
//!     println!("{}: {} tasks", lane.status.label(), lane.tasks.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Remote Configuration
//!
//! The remote URL is resolved from the `TASKDECK_REMOTE_URL` environment
//! variable, then the `remote_url` key in `~/.taskdeck/config.yaml`, then
//! falls back to `http://localhost:3001`.

mod drag;
mod error;
pub mod gateway;
mod search;
mod session;
mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod types;
mod view;

pub use drag::{DragController, DragHandle, DropEvent, DropTarget, DropTargetKind};
pub use error::{BoardError, GatewayError, GatewayResult, Result};
pub use gateway::{resolve_remote_url, HttpGateway, RemoteGateway, DEFAULT_REMOTE_URL};
pub use search::{SearchQuery, SEARCH_DEBOUNCE_MS};
pub use session::{DraftError, EditingSession, SessionMode};
pub use store::BoardStore;
pub use types::{
    BoardPhase, BoardState, Status, Task, TaskDraft, TaskFields, TaskId, UnknownStatus,
};
pub use view::{project, BoardView, LaneView, ViewProjector};
