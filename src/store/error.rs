use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by store operations.
///
/// Operations that structurally require their referent to exist (`finish_task`,
/// `start_task`, opening an edit dialog, creating under a parent) fail with
/// `NotFound`. Idempotent point-updates (`rename_task`, `toggle_open`,
/// `reset_duration`) silently no-op on a missing id instead, so a
/// delete-then-edit race from the UI cannot blow up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no task with id {0}")]
    NotFound(Uuid),

    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("no dialog is open")]
    NoDialogOpen,

    #[error("invalid task set: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
