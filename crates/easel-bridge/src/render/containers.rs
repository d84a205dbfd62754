use super::common::{apply_base, apply_layout, ensure_node};
use super::{RenderError, STUB_MARKER};
use crate::props::Props;
use easel_scene::{NodeId, NodeKind, SceneGraph};

pub(super) fn page(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, NodeKind::Page);
    // pages hang off the document root as soon as they exist
    if doc.parent(id).is_none() {
        doc.append_child(doc.root(), id)?;
    }
    apply_base(doc, id, props);
    Ok(id)
}

pub(super) fn frame(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, NodeKind::Frame);
    apply_base(doc, id, props);
    apply_layout(doc, id, props);
    Ok(id)
}

pub(super) fn component(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, NodeKind::Component);
    apply_base(doc, id, props);
    apply_layout(doc, id, props);
    Ok(id)
}

/// Groups cannot sit empty on the host, so a hidden stub child is parked in
/// the group until a real child arrives. The patcher clears stubs again
/// after attaching real children.
pub(super) fn group(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, NodeKind::Group);
    apply_base(doc, id, props);
    if doc.children(id).is_empty() {
        let stub = doc.create_node(NodeKind::Rectangle);
        if let Some(node) = doc.node_mut(stub) {
            node.name = "stub".into();
            node.visible = false;
        }
        doc.set_plugin_data(stub, STUB_MARKER, "true")?;
        doc.append_child(id, stub)?;
    }
    Ok(id)
}
