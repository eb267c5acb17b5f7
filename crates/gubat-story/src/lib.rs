//! Story graph model for San Gubat.
//!
//! A story is a static mapping from node identifiers to [`StoryNode`]s. Each
//! node carries narrative text, the choices leading out of it (optionally
//! gated on inventory), an optional arrival effect, and an ending flag. This
//! crate knows nothing about a running game; it only loads, describes, and
//! validates the graph.

/// Descriptions of the items a hunter can carry.
pub mod catalog;
/// Choices and the inventory requirements that gate them.
pub mod choice;
/// Arrival effects attached to nodes.
pub mod effect;
/// Ending classification for terminal nodes.
pub mod ending;
/// Error types for loading and validating stories.
pub mod error;
/// Node and item identifiers.
pub mod ids;
/// Story nodes.
pub mod node;
/// The story graph itself.
pub mod story;

pub use choice::{Choice, ItemHolder, Requirement};
pub use effect::{ArrivalEffect, EffectComponent, EffectKind};
pub use ending::EndingKind;
pub use error::{StoryError, StoryIssue, StoryResult};
pub use ids::{ItemId, NodeId};
pub use node::StoryNode;
pub use story::Story;
