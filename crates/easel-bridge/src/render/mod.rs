//! Node factories keyed by the `type` string carried in create and update
//! notifications. Each factory either reuses the node it is given or
//! creates a fresh one, then applies the props it understands.

use crate::props::Props;
use easel_scene::{NodeId, SceneError, SceneGraph};
use std::collections::HashMap;
use thiserror::Error;

mod common;
mod containers;
mod shapes;
mod text;

/// Plugin data key marking the placeholder child a group renderer parks in
/// an otherwise empty group.
pub const STUB_MARKER: &str = "easelStub";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no renderer registered for type {0:?}")]
    UnknownType(String),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A renderer takes the previously bound node, when there is one, and
/// returns the node that should be bound after this render.
pub type RenderFn =
    Box<dyn Fn(&mut dyn SceneGraph, Option<NodeId>, &Props) -> Result<NodeId, RenderError>>;

/// Type-keyed factory table. Injected into the patcher so hosts can add or
/// replace renderers.
pub struct Renderers {
    table: HashMap<String, RenderFn>,
}

impl Renderers {
    /// A table with no renderers at all. Mostly useful in tests.
    pub fn empty() -> Self {
        Renderers { table: HashMap::new() }
    }

    /// The built-in set covering the standard node types.
    pub fn defaults() -> Self {
        let mut renderers = Renderers::empty();
        renderers.register("page", Box::new(containers::page));
        renderers.register("frame", Box::new(containers::frame));
        renderers.register("group", Box::new(containers::group));
        renderers.register("component", Box::new(containers::component));
        renderers.register("rectangle", Box::new(shapes::rectangle));
        renderers.register("ellipse", Box::new(shapes::ellipse));
        renderers.register("line", Box::new(shapes::line));
        renderers.register("polygon", Box::new(shapes::polygon));
        renderers.register("star", Box::new(shapes::star));
        renderers.register("vector", Box::new(shapes::vector));
        renderers.register("slice", Box::new(shapes::slice));
        renderers.register("text", Box::new(text::text));
        renderers
    }

    pub fn register(&mut self, node_type: impl Into<String>, renderer: RenderFn) {
        self.table.insert(node_type.into(), renderer);
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.table.contains_key(node_type)
    }

    pub fn run(
        &self,
        doc: &mut dyn SceneGraph,
        node_type: &str,
        existing: Option<NodeId>,
        props: &Props,
    ) -> Result<NodeId, RenderError> {
        let renderer = self
            .table
            .get(node_type)
            .ok_or_else(|| RenderError::UnknownType(node_type.to_string()))?;
        renderer(doc, existing, props)
    }
}

impl Default for Renderers {
    fn default() -> Self {
        Renderers::defaults()
    }
}
