use crate::props::Props;
use easel_scene::{LayoutMode, NodeId, NodeKind, SceneGraph};

/// Reuses `existing` when it is still a live node of the wanted kind,
/// otherwise creates a fresh detached node. A node abandoned here stays in
/// the document until a remove message tears it down.
pub(super) fn ensure_node(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    kind: NodeKind,
) -> NodeId {
    match existing {
        Some(id)
            if doc.kind(id) == Some(kind)
                && doc.node(id).map(|n| !n.is_removed()).unwrap_or(false) =>
        {
            id
        }
        _ => doc.create_node(kind),
    }
}

/// Props every node type understands.
pub(super) fn apply_base(doc: &mut dyn SceneGraph, id: NodeId, props: &Props) {
    let Some(node) = doc.node_mut(id) else { return };
    if let Some(name) = props.string("name") {
        node.name = name.into();
    }
    if let Some(visible) = props.boolean("visible") {
        node.visible = visible;
    }
    if let Some(locked) = props.boolean("locked") {
        node.locked = locked;
    }
    if let Some(opacity) = props.number("opacity") {
        node.opacity = opacity.clamp(0.0, 1.0);
    }
    if let Some(x) = props.number("x") {
        node.x = x;
    }
    if let Some(y) = props.number("y") {
        node.y = y;
    }
    if let Some(width) = props.number("width") {
        node.width = width.max(0.0);
    }
    if let Some(height) = props.number("height") {
        node.height = height.max(0.0);
    }
    if let Some(fill) = props.color("backgroundColor").or_else(|| props.color("fill")) {
        node.fill = Some(fill);
    }
}

/// Auto-layout props understood by frames and components.
pub(super) fn apply_layout(doc: &mut dyn SceneGraph, id: NodeId, props: &Props) {
    let Some(node) = doc.node_mut(id) else { return };
    if let Some(mode) = props.string("layoutMode").and_then(LayoutMode::parse) {
        node.layout_mode = mode;
    }
    if let Some(spacing) = props.number("itemSpacing") {
        node.item_spacing = spacing;
    }
    if let Some(padding) = props.number("horizontalPadding") {
        node.horizontal_padding = padding;
    }
    if let Some(padding) = props.number("verticalPadding") {
        node.vertical_padding = padding;
    }
    if let Some(align) = props.string("layoutAlign") {
        node.layout_align = Some(align.into());
    }
}
