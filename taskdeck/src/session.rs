//! Task form sessions
//!
//! An [`EditingSession`] holds the state behind a create or edit form: field
//! values, whether the form is still open, and the current validation
//! complaint. Submission validates locally first, so nothing reaches the
//! remote without a title. The session closes itself only when the store
//! reports success; a failed save keeps the user's input on screen.

use crate::error::Result;
use crate::store::BoardStore;
use crate::types::{Status, Task, TaskDraft, TaskFields, TaskId};
use thiserror::Error;

/// Validation complaints a form shows inline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The title field is blank
    #[error("a title is required")]
    TitleRequired,
}

/// Whether the session creates a new task or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Creating a new task
    Create,
    /// Editing the task with this id
    Edit(TaskId),
}

/// Form state for creating or editing one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingSession {
    mode: SessionMode,
    title: String,
    description: String,
    status: Status,
    open: bool,
    draft_error: Option<DraftError>,
}

impl EditingSession {
    /// Open a blank create form
    pub fn create() -> Self {
        Self {
            mode: SessionMode::Create,
            title: String::new(),
            description: String::new(),
            status: Status::Todo,
            open: true,
            draft_error: None,
        }
    }

    /// Open an edit form prefilled from the given task
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: SessionMode::Edit(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            open: true,
            draft_error: None,
        }
    }

    /// Whether the form is still on screen
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether this session edits an existing task
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, SessionMode::Edit(_))
    }

    /// The id being edited, if any
    pub fn target_id(&self) -> Option<&TaskId> {
        match &self.mode {
            SessionMode::Edit(id) => Some(id),
            SessionMode::Create => None,
        }
    }

    /// The current validation complaint, if any
    pub fn draft_error(&self) -> Option<DraftError> {
        self.draft_error
    }

    /// The title field
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The description field
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The status field
    pub fn status(&self) -> Status {
        self.status
    }

    /// Update the title field. Typing clears the validation complaint.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.draft_error = None;
    }

    /// Update the description field
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Update the status field
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Close the form without saving. Typed values are discarded with the
    /// session.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Save the form through the store.
    ///
    /// A blank title is caught before the store is involved: the complaint is
    /// recorded, nothing is sent, and the form stays open. A store failure
    /// also leaves the form open so nothing typed is lost. Only a successful
    /// save closes the form.
    pub async fn submit(&mut self, store: &BoardStore) -> Result<()> {
        if self.title.trim().is_empty() {
            self.draft_error = Some(DraftError::TitleRequired);
            return Ok(());
        }
        self.draft_error = None;

        let result = match self.mode.clone() {
            SessionMode::Create => store.create(self.draft()).await.map(|_| ()),
            SessionMode::Edit(id) => store.edit(&id, self.fields()).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.open = false;
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Delete the task this session edits. Create sessions have nothing to
    /// delete, so the request is ignored.
    pub async fn delete(&mut self, store: &BoardStore) -> Result<()> {
        let id = match self.mode.clone() {
            SessionMode::Edit(id) => id,
            SessionMode::Create => {
                tracing::debug!("Delete requested on a create form, ignoring");
                return Ok(());
            }
        };

        store.remove(&id).await?;
        self.open = false;
        Ok(())
    }

    fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.optional_description(),
            status: Some(self.status),
        }
    }

    fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.optional_description(),
            status: self.status,
        }
    }

    fn optional_description(&self) -> Option<String> {
        if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.clone())
        }
    }
}
