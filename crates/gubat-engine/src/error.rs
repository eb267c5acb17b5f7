//! Error types for the story engine.

use std::path::PathBuf;

use gubat_story::{NodeId, StoryError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type for save storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while playing a story.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A mutating operation was called before `start_game`.
    #[error("no active session: start a game first")]
    NoActiveSession,

    /// Navigation was attempted after the game ended.
    #[error("the game has ended; restart to play again")]
    GameEnded,

    /// The current node does not exist in the story.
    #[error("story error: could not find story node \"{0}\"")]
    NodeNotFound(NodeId),

    /// The selected choice is not among the visible choices.
    #[error("invalid choice: {0}")]
    InvalidChoice(usize),

    /// The story failed to load or validate.
    #[error(transparent)]
    Story(#[from] StoryError),

    /// The save store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The game state could not be serialized.
    #[error("failed to serialize game state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from a [`SaveStore`](crate::store::SaveStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a save record failed.
    #[error("save storage error at {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a record name.
    #[error("invalid save key: \"{0}\"")]
    InvalidKey(String),
}
