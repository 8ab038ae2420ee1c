//! Error types.
//!
//! Store operations never fail; guard violations and lookup misses are
//! no-ops. Errors are confined to snapshot capture, persistence and command
//! parsing.

use crate::ids::EntityId;

/// A slide sequence that cannot be captured as a history snapshot or written
/// to the JSON persistence format.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("element {element} on slide {slide}: {field} is not a finite number")]
    NonFinite { slide: EntityId, element: EntityId, field: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid command: {0}")]
    Command(String),
    #[error("autosave task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DeckError {
    /// Stable machine-readable code, used in CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_IO",
            Self::Json(_) => "E_JSON",
            Self::Snapshot(_) => "E_SNAPSHOT",
            Self::Command(_) => "E_COMMAND",
            Self::Task(_) => "E_TASK",
        }
    }
}
