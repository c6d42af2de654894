//! Board store
//!
//! [`BoardStore`] owns the canonical local [`BoardState`] and keeps it in step
//! with the remote through a [`RemoteGateway`]. Loads replace local state
//! wholesale. Creates, edits, and deletes go remote-first: the local list only
//! changes once the remote has accepted. Status moves are the exception. They
//! apply locally before the remote call and roll back if the call fails, so a
//! drag lands instantly even on a slow link.
//!
//! Concurrent moves of the same task are settled by stamping each move with a
//! store-wide sequence number. When a remote call resolves, its stamp must
//! still be the newest one recorded for that task; otherwise the resolution
//! belongs to a superseded move and is dropped without touching state.
//!
//! Every state change is published on a watch channel. Hosts subscribe once
//! and rerender from the snapshots they receive.

use crate::error::{BoardError, Result};
use crate::gateway::RemoteGateway;
use crate::types::{BoardPhase, BoardState, Status, Task, TaskDraft, TaskFields, TaskId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Bookkeeping guarded by the store lock
#[derive(Default)]
struct StoreInner {
    state: BoardState,
    /// Monotone counter stamping every issued move
    move_seq: u64,
    /// Stamp of the newest unresolved move, per task
    in_flight: HashMap<TaskId, u64>,
}

/// Single writer for the local board, backed by a remote gateway
pub struct BoardStore {
    gateway: Arc<dyn RemoteGateway>,
    inner: RwLock<StoreInner>,
    updates: watch::Sender<BoardState>,
}

impl BoardStore {
    /// Create a store over the given gateway. The board starts in
    /// [`BoardPhase::Loading`] with no tasks; call [`load`](Self::load) to
    /// fill it.
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let (updates, _) = watch::channel(BoardState::new());
        Self {
            gateway,
            inner: RwLock::new(StoreInner::default()),
            updates,
        }
    }

    /// Subscribe to board snapshots. The receiver always starts with the
    /// current state.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.updates.subscribe()
    }

    /// The current board snapshot
    pub fn state(&self) -> BoardState {
        self.updates.borrow().clone()
    }

    /// The status a task currently shows, if it is on the board
    pub fn task_status(&self, id: &TaskId) -> Option<Status> {
        self.updates.borrow().task(id).map(|task| task.status)
    }

    /// The most recent operation failure, if it has not been dismissed
    pub fn current_error(&self) -> Option<BoardError> {
        self.updates.borrow().error.clone()
    }

    /// Fetch the full task list and replace local state with it.
    ///
    /// On failure the board becomes [`BoardPhase::Unavailable`] and the task
    /// list is cleared rather than left showing data of unknown age. Either
    /// way, moves still waiting on the remote are forgotten; they were issued
    /// against a board that no longer exists.
    pub async fn load(&self) -> Result<()> {
        {
            let mut inner = self.inner.write().await;
            inner.state.phase = BoardPhase::Loading;
            self.publish(&inner);
        }

        match self.gateway.fetch_all().await {
            Ok(tasks) => {
                let mut inner = self.inner.write().await;
                inner.state.phase = BoardPhase::Ready;
                inner.state.tasks = tasks;
                inner.in_flight.clear();
                self.publish(&inner);
                Ok(())
            }
            Err(source) => {
                let mut inner = self.inner.write().await;
                inner.state.phase = BoardPhase::Unavailable;
                inner.state.tasks.clear();
                inner.in_flight.clear();
                let error = BoardError::load(source);
                inner.state.error = Some(error.clone());
                self.publish(&inner);
                tracing::warn!("Board load failed: {}", error);
                Err(error)
            }
        }
    }

    /// Create a task from a draft. The task appears locally only after the
    /// remote has assigned it an id.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task> {
        let fields = match draft.into_fields() {
            Ok(fields) => fields,
            Err(error) => return Err(self.record_error(error).await),
        };

        match self.gateway.create_one(&fields).await {
            Ok(task) => {
                let mut inner = self.inner.write().await;
                inner.state.tasks.push(task.clone());
                self.publish(&inner);
                Ok(task)
            }
            Err(source) => Err(self.record_error(BoardError::create(source)).await),
        }
    }

    /// Replace the writable fields of a task. The remote's echo of the
    /// updated record is adopted as the local copy.
    pub async fn edit(&self, id: &TaskId, fields: TaskFields) -> Result<Task> {
        if let Err(error) = fields.validate() {
            return Err(self.record_error(error).await);
        }

        match self.gateway.replace_one(id, &fields).await {
            Ok(task) => {
                let mut inner = self.inner.write().await;
                if let Some(existing) = inner.state.task_mut(id) {
                    *existing = task.clone();
                }
                self.publish(&inner);
                Ok(task)
            }
            Err(source) => Err(self.record_error(BoardError::edit(source)).await),
        }
    }

    /// Delete a task. The local copy stays on the board until the remote
    /// confirms the delete.
    pub async fn remove(&self, id: &TaskId) -> Result<()> {
        match self.gateway.delete_one(id).await {
            Ok(()) => {
                let mut inner = self.inner.write().await;
                inner.state.tasks.retain(|task| &task.id != id);
                inner.in_flight.remove(id);
                self.publish(&inner);
                Ok(())
            }
            Err(source) => Err(self.record_error(BoardError::delete(source)).await),
        }
    }

    /// Move a task to another lane, optimistically.
    ///
    /// The new status is applied and published before the remote call. If the
    /// remote refuses, only the status is put back to what it was when this
    /// move was issued; other fields are left alone so a concurrent edit is
    /// not clobbered. Moving a task to the lane it is already in, or moving an
    /// id that is not on the board, does nothing.
    ///
    /// If a newer move for the same task is issued while this one is waiting
    /// on the remote, this one's resolution is dropped entirely: no state
    /// change, no error, `Ok(())`.
    pub async fn move_status(&self, id: &TaskId, new_status: Status) -> Result<()> {
        let (previous, stamp) = {
            let mut inner = self.inner.write().await;
            let previous = match inner.state.task_mut(id) {
                Some(task) if task.status == new_status => return Ok(()),
                Some(task) => {
                    let previous = task.status;
                    task.status = new_status;
                    previous
                }
                None => {
                    tracing::debug!("Ignoring move for unknown task {}", id);
                    return Ok(());
                }
            };
            inner.move_seq += 1;
            let stamp = inner.move_seq;
            inner.in_flight.insert(id.clone(), stamp);
            self.publish(&inner);
            (previous, stamp)
        };

        // The lock is not held across the remote call, so a newer move for
        // the same task can be issued while this one is waiting.
        let outcome = self.gateway.patch_status(id, new_status).await;

        let mut inner = self.inner.write().await;
        if inner.in_flight.get(id) != Some(&stamp) {
            tracing::debug!("Discarding superseded move for task {}", id);
            return Ok(());
        }
        inner.in_flight.remove(id);

        match outcome {
            Ok(_) => Ok(()),
            Err(source) => {
                if let Some(task) = inner.state.task_mut(id) {
                    task.status = previous;
                }
                let error = BoardError::move_failed(id.clone(), source);
                inner.state.error = Some(error.clone());
                self.publish(&inner);
                tracing::warn!("Move failed for task {}: {}", id, error);
                Err(error)
            }
        }
    }

    /// Dismiss the current error, if any
    pub async fn clear_error(&self) {
        let mut inner = self.inner.write().await;
        if inner.state.error.is_some() {
            inner.state.error = None;
            self.publish(&inner);
        }
    }

    async fn record_error(&self, error: BoardError) -> BoardError {
        tracing::warn!("Board operation failed: {}", error);
        let mut inner = self.inner.write().await;
        inner.state.error = Some(error.clone());
        self.publish(&inner);
        error
    }

    fn publish(&self, inner: &StoreInner) {
        self.updates.send_replace(inner.state.clone());
    }
}
