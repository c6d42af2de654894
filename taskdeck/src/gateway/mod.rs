//! Remote task store access

mod http;

pub use http::{resolve_remote_url, HttpGateway, DEFAULT_REMOTE_URL};

use crate::error::GatewayResult;
use crate::types::{Status, Task, TaskFields, TaskId};
use async_trait::async_trait;

/// The five operations the board needs from a remote task store.
///
/// Implementations perform exactly one request per call: no retries, no
/// caching, no queueing. The store layered on top decides what a failure
/// means for local state.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch every task on the board
    async fn fetch_all(&self) -> GatewayResult<Vec<Task>>;

    /// Create a task; the remote assigns its id
    async fn create_one(&self, fields: &TaskFields) -> GatewayResult<Task>;

    /// Replace every writable field of an existing task
    async fn replace_one(&self, id: &TaskId, fields: &TaskFields) -> GatewayResult<Task>;

    /// Update only the status of an existing task
    async fn patch_status(&self, id: &TaskId, status: Status) -> GatewayResult<Task>;

    /// Delete a task
    async fn delete_one(&self, id: &TaskId) -> GatewayResult<()>;
}
