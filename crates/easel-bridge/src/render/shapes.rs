use super::common::{apply_base, ensure_node};
use super::RenderError;
use crate::props::Props;
use easel_scene::{NodeId, NodeKind, SceneGraph};

fn shape(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
    kind: NodeKind,
) -> Result<NodeId, RenderError> {
    let id = ensure_node(doc, existing, kind);
    apply_base(doc, id, props);
    Ok(id)
}

pub(super) fn rectangle(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Rectangle)
}

pub(super) fn ellipse(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Ellipse)
}

pub(super) fn line(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Line)
}

pub(super) fn polygon(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Polygon)
}

pub(super) fn star(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Star)
}

pub(super) fn vector(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Vector)
}

pub(super) fn slice(
    doc: &mut dyn SceneGraph,
    existing: Option<NodeId>,
    props: &Props,
) -> Result<NodeId, RenderError> {
    shape(doc, existing, props, NodeKind::Slice)
}
