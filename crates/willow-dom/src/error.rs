//! Structural errors raised by tree mutations.

use thiserror::Error;

/// A structural-invariant violation detected by a mutation operation.
///
/// All variants are raised *before* any mutation takes effect; a failed
/// operation leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The mutation would make a node a descendant of itself.
    ///
    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a HierarchyRequestError."
    #[error("a node can not be made a descendant of itself")]
    Cycle,

    /// The node kind forbids the requested placement: the parent is a leaf
    /// kind that never accepts children, or the child is a Document (a
    /// Document is always a root).
    #[error("node kind `{kind}` does not allow this placement")]
    Kind {
        /// The offending node kind, as a portable kind string.
        kind: &'static str,
    },

    /// The given node is not a child of the given parent.
    #[error("the given node is not a child of the given parent")]
    NotAChild,

    /// The reference node passed to an insertion is not a child of the
    /// given parent.
    #[error("the reference node is not a child of the given parent")]
    ReferenceNotFound,

    /// A [`NodeId`](crate::NodeId) does not belong to this tree.
    #[error("node id is not part of this tree")]
    InvalidId,
}
