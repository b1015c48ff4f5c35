use thiserror::Error;

use crate::node::NodeId;

/// Errors returned by the [`IndexTreeModel`](crate::IndexTreeModel) operations.
///
/// All of them are contract violations by the caller.
/// An operation returning an error did not mutate the model and did not call the output sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The location does not address a node of the tree.
    #[error("invalid tree location {location:?}: {reason}")]
    Location {
        location: Vec<usize>,
        reason: LocationReason,
    },

    /// The node was removed from the tree by an earlier splice.
    #[error("node {0:?} is not part of the tree anymore")]
    UnknownNode(NodeId),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LocationReason {
    #[error("index {index} at depth {depth} is out of range for {len} children")]
    OutOfRange {
        depth: usize,
        index: usize,
        len: usize,
    },

    #[error("deleting {delete_count} children from index {start} exceeds the {len} existing children")]
    DeleteOutOfRange {
        start: usize,
        delete_count: usize,
        len: usize,
    },

    #[error("the root has no location to operate on")]
    Empty,
}

impl TreeError {
    pub(crate) fn location(location: &[usize], reason: LocationReason) -> Self {
        Self::Location {
            location: location.to_vec(),
            reason,
        }
    }
}

#[test]
fn display_contains_location_and_reason() {
    let error = TreeError::location(
        &[0, 4],
        LocationReason::OutOfRange {
            depth: 1,
            index: 4,
            len: 3,
        },
    );
    assert_eq!(
        error.to_string(),
        "invalid tree location [0, 4]: index 4 at depth 1 is out of range for 3 children"
    );
}
