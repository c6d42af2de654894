//! Task records and drafts

use super::ids::TaskId;
use super::status::Status;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// A task as it exists on the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Remote-assigned identifier
    pub id: TaskId,
    /// Short summary shown on the card
    pub title: String,
    /// Longer free-form text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The lane the task sits in
    pub status: Status,
}

impl Task {
    /// Create a task with the given id, title, and status
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, status: Status) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Copy the writable fields out of this task
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}

/// The writable fields of a task, sent to the remote on create and replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFields {
    /// Short summary shown on the card
    pub title: String,
    /// Longer free-form text, omitted from the wire when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The lane the task sits in
    pub status: Status,
}

impl TaskFields {
    /// Create fields with the given title and status
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            title: title.into(),
            description: None,
            status,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check that the fields describe a sendable task
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::EmptyTitle);
        }
        Ok(())
    }
}

/// An unsaved task, as captured by a create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Short summary, required
    pub title: String,
    /// Longer free-form text
    pub description: Option<String>,
    /// Starting lane; todo when not chosen
    pub status: Option<Status>,
}

impl TaskDraft {
    /// Create a draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the starting lane
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Resolve the draft into the fields sent to the remote
    pub fn into_fields(self) -> Result<TaskFields> {
        let fields = TaskFields {
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
        };
        fields.validate()?;
        Ok(fields)
    }
}
