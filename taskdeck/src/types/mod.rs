//! Core types for the board engine

mod board;
mod ids;
mod status;
mod task;

pub use board::{BoardPhase, BoardState};
pub use ids::TaskId;
pub use status::{Status, UnknownStatus};
pub use task::{Task, TaskDraft, TaskFields};
