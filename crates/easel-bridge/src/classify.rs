//! Predicates the patcher uses to decide whether a mutation applies.

use easel_scene::{NodeKind, SceneNode};

/// True when the lookup produced a node that is still attached-able, i.e.
/// present and not removed.
pub fn is_live(node: Option<&SceneNode>) -> bool {
    node.map(|n| !n.is_removed()).unwrap_or(false)
}

/// Containers that accept child attachment.
pub fn supports_children(kind: NodeKind) -> bool {
    kind.accepts_children()
}

/// Group-like containers, the ones that carry a placeholder child while
/// they would otherwise be empty.
pub fn is_group_like(kind: NodeKind) -> bool {
    matches!(kind, NodeKind::Group | NodeKind::BooleanOperation)
}

pub fn is_page(kind: NodeKind) -> bool {
    kind == NodeKind::Page
}

pub fn is_text(kind: NodeKind) -> bool {
    kind == NodeKind::Text
}
