/*!
# Errors

Lookups that translate between names and ids fail hard when the key does not exist; callers are
expected to check [`SocialGraph::has_user`](crate::repr::SocialGraph::has_user) first.
Algorithms never return errors for unknown users, they produce empty results instead.
*/

use crate::node::Node;

/// Errors produced by the graph store and its persistence layer
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A name was looked up that does not belong to any user
    #[error("unknown user: {0:?}")]
    UnknownUser(String),

    /// An id was looked up that is out of range
    #[error("unknown user id: {0}")]
    UnknownId(Node),

    /// A persisted snapshot is structurally inconsistent
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Shorthand used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
