//! Test doubles for driving board flows without a server
//!
//! Compiled for this crate's own tests, and exported to integration tests and
//! downstream crates through the `test-support` feature.

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::RemoteGateway;
use crate::types::{Status, Task, TaskFields, TaskId};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One recorded call to the stub gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchAll,
    CreateOne(TaskFields),
    ReplaceOne(TaskId, TaskFields),
    PatchStatus(TaskId, Status),
    DeleteOne(TaskId),
}

/// Releases a patch call parked by [`StubGateway::hold_next_patch`]
pub struct PatchGate {
    notify: Arc<Notify>,
}

impl PatchGate {
    /// Let the parked patch call proceed
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

#[derive(Default)]
struct Script {
    tasks: Vec<Task>,
    next_id: u64,
    fetch_errors: VecDeque<GatewayError>,
    create_errors: VecDeque<GatewayError>,
    replace_errors: VecDeque<GatewayError>,
    patch_errors: VecDeque<GatewayError>,
    delete_errors: VecDeque<GatewayError>,
    patch_gates: VecDeque<Arc<Notify>>,
    calls: Vec<GatewayCall>,
}

/// Scripted in-memory gateway.
///
/// Behaves like a tiny remote store: it hands out ids, echoes updates, and
/// remembers every call in order. Failures are queued per operation with the
/// `fail_next_*` methods and consumed at call time. A patch can be parked
/// with [`hold_next_patch`](StubGateway::hold_next_patch), which makes move
/// races reproducible in tests.
pub struct StubGateway {
    script: Mutex<Script>,
}

impl StubGateway {
    /// An empty board
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// A board preloaded with the given tasks
    pub fn seeded(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .filter_map(|task| task.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            script: Mutex::new(Script {
                tasks,
                next_id,
                ..Script::default()
            }),
        }
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.script.lock().unwrap().calls.clone()
    }

    /// The tasks the stub currently holds
    pub fn remote_tasks(&self) -> Vec<Task> {
        self.script.lock().unwrap().tasks.clone()
    }

    /// Queue an error for the next fetch
    pub fn fail_next_fetch(&self, error: GatewayError) {
        self.script.lock().unwrap().fetch_errors.push_back(error);
    }

    /// Queue an error for the next create
    pub fn fail_next_create(&self, error: GatewayError) {
        self.script.lock().unwrap().create_errors.push_back(error);
    }

    /// Queue an error for the next replace
    pub fn fail_next_replace(&self, error: GatewayError) {
        self.script.lock().unwrap().replace_errors.push_back(error);
    }

    /// Queue an error for the next status patch
    pub fn fail_next_patch(&self, error: GatewayError) {
        self.script.lock().unwrap().patch_errors.push_back(error);
    }

    /// Queue an error for the next delete
    pub fn fail_next_delete(&self, error: GatewayError) {
        self.script.lock().unwrap().delete_errors.push_back(error);
    }

    /// Park the next status patch until the returned gate is released
    pub fn hold_next_patch(&self) -> PatchGate {
        let notify = Arc::new(Notify::new());
        self.script.lock().unwrap().patch_gates.push_back(notify.clone());
        PatchGate { notify }
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteGateway for StubGateway {
    async fn fetch_all(&self) -> GatewayResult<Vec<Task>> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(GatewayCall::FetchAll);
        if let Some(error) = script.fetch_errors.pop_front() {
            return Err(error);
        }
        Ok(script.tasks.clone())
    }

    async fn create_one(&self, fields: &TaskFields) -> GatewayResult<Task> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(GatewayCall::CreateOne(fields.clone()));
        if let Some(error) = script.create_errors.pop_front() {
            return Err(error);
        }
        script.next_id += 1;
        let task = Task {
            id: TaskId::from_string(script.next_id.to_string()),
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status,
        };
        script.tasks.push(task.clone());
        Ok(task)
    }

    async fn replace_one(&self, id: &TaskId, fields: &TaskFields) -> GatewayResult<Task> {
        let mut script = self.script.lock().unwrap();
        script
            .calls
            .push(GatewayCall::ReplaceOne(id.clone(), fields.clone()));
        if let Some(error) = script.replace_errors.pop_front() {
            return Err(error);
        }
        let task = Task {
            id: id.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            status: fields.status,
        };
        if let Some(existing) = script.tasks.iter_mut().find(|t| &t.id == id) {
            *existing = task.clone();
        }
        Ok(task)
    }

    async fn patch_status(&self, id: &TaskId, status: Status) -> GatewayResult<Task> {
        let (gate, result) = {
            let mut script = self.script.lock().unwrap();
            script.calls.push(GatewayCall::PatchStatus(id.clone(), status));
            let gate = script.patch_gates.pop_front();
            let result = match script.patch_errors.pop_front() {
                Some(error) => Err(error),
                None => match script.tasks.iter_mut().find(|t| &t.id == id) {
                    Some(task) => {
                        task.status = status;
                        Ok(task.clone())
                    }
                    None => Ok(Task::new(id.clone(), "", status)),
                },
            };
            (gate, result)
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn delete_one(&self, id: &TaskId) -> GatewayResult<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(GatewayCall::DeleteOne(id.clone()));
        if let Some(error) = script.delete_errors.pop_front() {
            return Err(error);
        }
        script.tasks.retain(|task| &task.id != id);
        Ok(())
    }
}
