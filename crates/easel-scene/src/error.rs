use crate::node::{NodeId, NodeKind};
use thiserror::Error;

/// Errors raised by a host document when a mutation is invalid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} has been removed")]
    Removed(NodeId),

    #[error("{} nodes do not accept children", .kind.as_str())]
    NotAContainer { id: NodeId, kind: NodeKind },

    #[error("{} nodes do not hold characters", .kind.as_str())]
    NotText { id: NodeId, kind: NodeKind },

    #[error("current page must be a page, got {}", .kind.as_str())]
    NotAPage { id: NodeId, kind: NodeKind },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("the document root cannot be moved or removed")]
    RootImmutable,
}

pub type Result<T> = std::result::Result<T, SceneError>;
