use crate::error::Result;
use crate::node::{NodeId, NodeKind, SceneNode};

/// Mutation surface of a host document graph.
///
/// The bridge only ever talks to the host through this trait, so anything
/// that can create nodes, wire them into a tree and tag them with plugin
/// data can stand in for the real canvas. [`Document`](crate::Document) is
/// the in-memory implementation.
pub trait SceneGraph {
    /// Creates a detached node of the given kind and returns its handle.
    fn create_node(&mut self, kind: NodeKind) -> NodeId;

    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Children in paint order. Empty for leaves and unknown handles.
    fn children(&self, id: NodeId) -> &[NodeId];

    /// Moves `child` to the end of `parent`'s children, detaching it from
    /// its previous parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Inserts `child` so it ends up at `index` among `parent`'s children.
    /// The index is interpreted against the list with `child` already
    /// detached, and is clamped to the end.
    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()>;

    /// Detaches the node and marks it and its whole subtree removed.
    /// Handles stay valid; the nodes just refuse further mutation.
    fn remove(&mut self, id: NodeId) -> Result<()>;

    /// Replaces the text content of a text node.
    fn set_characters(&mut self, id: NodeId, text: &str) -> Result<()>;

    fn set_plugin_data(&mut self, id: NodeId, key: &str, value: &str) -> Result<()>;

    fn plugin_data(&self, id: NodeId, key: &str) -> Option<&str>;

    fn set_current_page(&mut self, id: NodeId) -> Result<()>;

    fn current_page(&self) -> Option<NodeId>;

    fn root(&self) -> NodeId;

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(SceneNode::kind)
    }
}
