use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::ids::NodeId;

/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while loading or validating a story.
#[derive(Debug, Error, Diagnostic)]
pub enum StoryError {
    /// The story file could not be read.
    #[error("failed to read story file {}", .path.display())]
    #[diagnostic(code(gubat::story::io))]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The story data is not valid JSON or does not match the node schema.
    #[error("malformed story data: {0}")]
    #[diagnostic(
        code(gubat::story::parse),
        help("a story is a JSON object mapping node ids to node objects")
    )]
    Parse(#[from] serde_json::Error),

    /// Two nodes share an identifier.
    #[error("duplicate node: \"{0}\"")]
    #[diagnostic(code(gubat::story::duplicate_node))]
    DuplicateNode(NodeId),

    /// The graph failed validation.
    #[error("story failed validation with {} issue(s)", .issues.len())]
    #[diagnostic(
        code(gubat::story::invalid),
        help("every choice target must name a defined node")
    )]
    Invalid {
        /// Every problem found.
        #[related]
        issues: Vec<StoryIssue>,
    },
}

/// A single problem found while validating a story graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StoryIssue {
    /// A choice leads to a node that does not exist.
    #[error("choice {index} of node \"{node}\" leads to unknown node \"{target}\"")]
    #[diagnostic(code(gubat::story::dangling_choice))]
    DanglingChoice {
        /// Node holding the choice.
        node: NodeId,
        /// Position of the choice within the node (0-based).
        index: usize,
        /// The missing target.
        target: NodeId,
    },

    /// A node the engine depends on is not defined.
    #[error("required node \"{0}\" is missing")]
    #[diagnostic(code(gubat::story::missing_node))]
    MissingNode(NodeId),

    /// A node other than an ending offers no way forward.
    #[error("node \"{0}\" has no choices and is not marked as an ending")]
    #[diagnostic(
        code(gubat::story::dead_end),
        help("add a choice or set \"isEnding\": true")
    )]
    DeadEnd(NodeId),

    /// An ending node lists choices that can never be taken.
    #[error("ending node \"{0}\" has choices")]
    #[diagnostic(code(gubat::story::ending_with_choices))]
    EndingWithChoices(NodeId),

    /// The node used for HP game over is not an ending.
    #[error("game-over node \"{0}\" is not marked as an ending")]
    #[diagnostic(code(gubat::story::game_over_not_ending))]
    GameOverNotEnding(NodeId),
}
