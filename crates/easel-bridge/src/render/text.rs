use super::common::{apply_base, ensure_node};
use super::RenderError;
use crate::props::Props;
use easel_scene::{NodeId, NodeKind, SceneGraph};

pub(super) fn text(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, NodeKind::Text);
    apply_base(doc, id, props);
    if let Some(node) = doc.node_mut(id) {
        if let Some(size) = props.number("fontSize") {
            node.font_size = size.max(1.0);
        }
        if let Some(align) = props.string("textAlign") {
            node.text_align = align.into();
        }
    }
    if let Some(characters) = props.string("characters") {
        doc.set_characters(id, characters)?;
    }
    Ok(id)
}
