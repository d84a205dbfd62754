use crate::error::{Result, SceneError};
use crate::graph::SceneGraph;
use crate::node::{LayoutMode, NodeId, NodeKind, SceneNode};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt::Write as _;

type Children = SmallVec<[NodeId; 8]>;

/// In-memory scene document. Nodes live in an arena indexed by [`NodeId`];
/// structure is kept in parallel parent/children tables.
///
/// Slots are never reused. Removing a node tombstones it in place, so stale
/// handles still resolve and report [`SceneNode::is_removed`] instead of
/// silently aliasing a newer node.
pub struct Document {
    nodes: Vec<SceneNode>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Children>,
    current_page: Option<NodeId>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            current_page: None,
            root: NodeId(0),
        };
        doc.root = doc.alloc(NodeKind::Document);
        doc
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode::new(kind));
        self.parents.push(None);
        self.children.push(Children::new());
        id
    }

    fn live(&self, id: NodeId) -> Result<&SceneNode> {
        let node = self.nodes.get(id.index()).ok_or(SceneError::UnknownNode(id))?;
        if node.removed {
            return Err(SceneError::Removed(id));
        }
        Ok(node)
    }

    /// Checks that attaching `child` under `parent` is structurally legal.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.live(parent)?;
        if !parent_node.kind().accepts_children() {
            return Err(SceneError::NotAContainer { id: parent, kind: parent_node.kind() });
        }
        self.live(child)?;
        if child == self.root {
            return Err(SceneError::RootImmutable);
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(SceneError::Cycle { parent, child });
            }
            cursor = self.parents[id.index()];
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old) = self.parents[child.index()].take() {
            self.children[old.index()].retain(|c| *c != child);
        }
    }

    /// Indented one-line-per-node rendering of the live tree.
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, 0, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        let _ = write!(out, "{}{} \"{}\" #{}", "  ".repeat(depth), node.kind().as_str(), node.name, id.as_u32());
        if self.current_page == Some(id) {
            out.push_str(" [current]");
        }
        if !node.visible {
            out.push_str(" hidden");
        }
        match node.kind() {
            NodeKind::Document | NodeKind::Page => {}
            NodeKind::Text => {
                let _ = write!(out, " \"{}\"", node.characters());
            }
            _ => {
                let _ = write!(out, " {}x{} @({},{})", node.width, node.height, node.x, node.y);
            }
        }
        if node.layout_mode != LayoutMode::None {
            let _ = write!(out, " layout={}", node.layout_mode.as_str());
        }
        out.push('\n');
        for &child in self.children(id) {
            self.write_node(child, depth + 1, out);
        }
    }

    /// JSON rendering of the live tree, nested under `"tree"` with the
    /// current page id alongside. Plugin data is emitted in key order.
    pub fn snapshot(&self) -> Value {
        let mut top = Map::new();
        top.insert("currentPage".into(), match self.current_page {
            Some(id) => Value::from(id.as_u32()),
            None => Value::Null,
        });
        top.insert("tree".into(), self.node_snapshot(self.root));
        Value::Object(top)
    }

    fn node_snapshot(&self, id: NodeId) -> Value {
        let Some(node) = self.node(id) else { return Value::Null };
        let mut map = Map::new();
        map.insert("id".into(), Value::from(id.as_u32()));
        map.insert("type".into(), Value::from(node.kind().as_str()));
        map.insert("name".into(), Value::from(node.name.as_str()));
        if !node.visible {
            map.insert("visible".into(), Value::from(false));
        }
        if node.opacity != 1.0 {
            map.insert("opacity".into(), Value::from(node.opacity));
        }
        match node.kind() {
            NodeKind::Document | NodeKind::Page => {}
            _ => {
                map.insert("x".into(), Value::from(node.x));
                map.insert("y".into(), Value::from(node.y));
                map.insert("width".into(), Value::from(node.width));
                map.insert("height".into(), Value::from(node.height));
            }
        }
        if let Some(fill) = node.fill {
            map.insert("fill".into(), Value::from(fill.to_hex()));
        }
        if node.layout_mode != LayoutMode::None {
            map.insert("layoutMode".into(), Value::from(node.layout_mode.as_str()));
            map.insert("itemSpacing".into(), Value::from(node.item_spacing));
            map.insert("horizontalPadding".into(), Value::from(node.horizontal_padding));
            map.insert("verticalPadding".into(), Value::from(node.vertical_padding));
        }
        if let Some(align) = &node.layout_align {
            map.insert("layoutAlign".into(), Value::from(align.as_str()));
        }
        if node.kind() == NodeKind::Text {
            map.insert("characters".into(), Value::from(node.characters()));
            map.insert("fontSize".into(), Value::from(node.font_size));
            map.insert("textAlign".into(), Value::from(node.text_align.as_str()));
        }
        if !node.plugin_data.is_empty() {
            let sorted: BTreeMap<&str, &str> =
                node.plugin_data.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            let mut data = Map::new();
            for (k, v) in sorted {
                data.insert(k.into(), Value::from(v));
            }
            map.insert("pluginData".into(), Value::Object(data));
        }
        if node.kind().accepts_children() {
            let children: Vec<Value> =
                self.children(id).iter().map(|c| self.node_snapshot(*c)).collect();
            map.insert("children".into(), Value::Array(children));
        }
        Value::Object(map)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl SceneGraph for Document {
    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.alloc(kind)
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.index()).copied().flatten()
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id.index()).map(|c| c.as_slice()).unwrap_or(&[])
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        self.detach(child);
        self.children[parent.index()].push(child);
        self.parents[child.index()] = Some(parent);
        Ok(())
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        self.detach(child);
        let siblings = &mut self.children[parent.index()];
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.parents[child.index()] = Some(parent);
        Ok(())
    }

    fn remove(&mut self, id: NodeId) -> Result<()> {
        self.live(id)?;
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        self.detach(id);
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if self.current_page == Some(next) {
                self.current_page = None;
            }
            self.nodes[next.index()].removed = true;
            self.parents[next.index()] = None;
            pending.extend(std::mem::take(&mut self.children[next.index()]));
        }
        Ok(())
    }

    fn set_characters(&mut self, id: NodeId, text: &str) -> Result<()> {
        let kind = self.live(id)?.kind();
        if kind != NodeKind::Text {
            return Err(SceneError::NotText { id, kind });
        }
        self.nodes[id.index()].characters.clear();
        self.nodes[id.index()].characters.push_str(text);
        Ok(())
    }

    fn set_plugin_data(&mut self, id: NodeId, key: &str, value: &str) -> Result<()> {
        self.live(id)?;
        self.nodes[id.index()].plugin_data.insert(key.into(), value.into());
        Ok(())
    }

    fn plugin_data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id).and_then(|node| node.plugin_data(key))
    }

    fn set_current_page(&mut self, id: NodeId) -> Result<()> {
        let kind = self.live(id)?.kind();
        if kind != NodeKind::Page {
            return Err(SceneError::NotAPage { id, kind });
        }
        self.current_page = Some(id);
        Ok(())
    }

    fn current_page(&self) -> Option<NodeId> {
        self.current_page
    }

    fn root(&self) -> NodeId {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(doc: &mut Document) -> NodeId {
        let page = doc.create_node(NodeKind::Page);
        doc.append_child(doc.root(), page).unwrap();
        page
    }

    #[test]
    fn test_append_preserves_order() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let a = doc.create_node(NodeKind::Rectangle);
        let b = doc.create_node(NodeKind::Ellipse);
        let c = doc.create_node(NodeKind::Star);
        doc.append_child(page, a).unwrap();
        doc.append_child(page, b).unwrap();
        doc.append_child(page, c).unwrap();
        assert_eq!(doc.children(page), &[a, b, c]);
        assert_eq!(doc.parent(b), Some(page));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let frame = doc.create_node(NodeKind::Frame);
        doc.append_child(page, frame).unwrap();
        let shape = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, shape).unwrap();
        doc.append_child(frame, shape).unwrap();
        assert_eq!(doc.children(page), &[frame]);
        assert_eq!(doc.children(frame), &[shape]);
        assert_eq!(doc.parent(shape), Some(frame));
    }

    #[test]
    fn test_insert_child_at_index() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let a = doc.create_node(NodeKind::Rectangle);
        let b = doc.create_node(NodeKind::Rectangle);
        let c = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, a).unwrap();
        doc.append_child(page, c).unwrap();
        doc.insert_child(page, 1, b).unwrap();
        assert_eq!(doc.children(page), &[a, b, c]);
    }

    #[test]
    fn test_insert_child_clamps_index() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let a = doc.create_node(NodeKind::Rectangle);
        let b = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, a).unwrap();
        doc.insert_child(page, 99, b).unwrap();
        assert_eq!(doc.children(page), &[a, b]);
    }

    #[test]
    fn test_insert_child_detaches_first() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let a = doc.create_node(NodeKind::Rectangle);
        let b = doc.create_node(NodeKind::Rectangle);
        let c = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, b).unwrap();
        doc.append_child(page, a).unwrap();
        doc.append_child(page, c).unwrap();
        // move b in front of c; index is relative to the list without b
        doc.insert_child(page, 1, b).unwrap();
        assert_eq!(doc.children(page), &[a, b, c]);
    }

    #[test]
    fn test_leaves_reject_children() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let rect = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, rect).unwrap();
        let other = doc.create_node(NodeKind::Ellipse);
        let err = doc.append_child(rect, other).unwrap_err();
        assert_eq!(err, SceneError::NotAContainer { id: rect, kind: NodeKind::Rectangle });
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let outer = doc.create_node(NodeKind::Frame);
        let inner = doc.create_node(NodeKind::Frame);
        doc.append_child(page, outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        assert_eq!(
            doc.append_child(inner, outer).unwrap_err(),
            SceneError::Cycle { parent: inner, child: outer }
        );
        assert_eq!(
            doc.append_child(outer, outer).unwrap_err(),
            SceneError::Cycle { parent: outer, child: outer }
        );
    }

    #[test]
    fn test_remove_tombstones_subtree() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let frame = doc.create_node(NodeKind::Frame);
        let shape = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, frame).unwrap();
        doc.append_child(frame, shape).unwrap();
        doc.remove(frame).unwrap();
        assert!(doc.children(page).is_empty());
        assert!(doc.node(frame).unwrap().is_removed());
        assert!(doc.node(shape).unwrap().is_removed());
        assert_eq!(doc.parent(shape), None);
        assert!(doc.children(frame).is_empty());
    }

    #[test]
    fn test_removed_nodes_reject_mutation() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let frame = doc.create_node(NodeKind::Frame);
        doc.append_child(page, frame).unwrap();
        doc.remove(frame).unwrap();
        assert_eq!(doc.remove(frame).unwrap_err(), SceneError::Removed(frame));
        let shape = doc.create_node(NodeKind::Rectangle);
        assert_eq!(doc.append_child(frame, shape).unwrap_err(), SceneError::Removed(frame));
        assert_eq!(
            doc.set_plugin_data(frame, "k", "v").unwrap_err(),
            SceneError::Removed(frame)
        );
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        let first = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, first).unwrap();
        doc.remove(first).unwrap();
        let second = doc.create_node(NodeKind::Rectangle);
        assert_ne!(first, second);
        assert!(doc.node(first).unwrap().is_removed());
        assert!(!doc.node(second).unwrap().is_removed());
    }

    #[test]
    fn test_characters_only_on_text() {
        let mut doc = Document::new();
        let text = doc.create_node(NodeKind::Text);
        doc.set_characters(text, "hello").unwrap();
        assert_eq!(doc.node(text).unwrap().characters(), "hello");
        let rect = doc.create_node(NodeKind::Rectangle);
        assert_eq!(
            doc.set_characters(rect, "nope").unwrap_err(),
            SceneError::NotText { id: rect, kind: NodeKind::Rectangle }
        );
    }

    #[test]
    fn test_plugin_data_round_trip() {
        let mut doc = Document::new();
        let rect = doc.create_node(NodeKind::Rectangle);
        assert_eq!(doc.plugin_data(rect, "mark"), None);
        doc.set_plugin_data(rect, "mark", "true").unwrap();
        assert_eq!(doc.plugin_data(rect, "mark"), Some("true"));
        doc.set_plugin_data(rect, "mark", "false").unwrap();
        assert_eq!(doc.plugin_data(rect, "mark"), Some("false"));
    }

    #[test]
    fn test_current_page_must_be_a_page() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        doc.set_current_page(page).unwrap();
        assert_eq!(doc.current_page(), Some(page));
        let frame = doc.create_node(NodeKind::Frame);
        assert_eq!(
            doc.set_current_page(frame).unwrap_err(),
            SceneError::NotAPage { id: frame, kind: NodeKind::Frame }
        );
    }

    #[test]
    fn test_remove_unsets_current_page() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        doc.set_current_page(page).unwrap();
        doc.remove(page).unwrap();
        assert_eq!(doc.current_page(), None);
    }

    #[test]
    fn test_root_is_immutable() {
        let mut doc = Document::new();
        let root = doc.root();
        assert_eq!(doc.remove(root).unwrap_err(), SceneError::RootImmutable);
        let page = page_with(&mut doc);
        assert_eq!(doc.append_child(page, root).unwrap_err(), SceneError::RootImmutable);
    }

    #[test]
    fn test_tree_string_shows_structure() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        doc.set_current_page(page).unwrap();
        doc.node_mut(page).unwrap().name = "New page".into();
        let text = doc.create_node(NodeKind::Text);
        doc.append_child(page, text).unwrap();
        doc.set_characters(text, "hi").unwrap();
        let dump = doc.tree_string();
        assert!(dump.starts_with("DOCUMENT \"Document\" #0\n"));
        assert!(dump.contains("  PAGE \"New page\" #1 [current]\n"));
        assert!(dump.contains("    TEXT \"Text\" #2 \"hi\"\n"));
    }

    #[test]
    fn test_snapshot_shape() {
        let mut doc = Document::new();
        let page = page_with(&mut doc);
        doc.set_current_page(page).unwrap();
        let rect = doc.create_node(NodeKind::Rectangle);
        doc.append_child(page, rect).unwrap();
        doc.set_plugin_data(rect, "mark", "true").unwrap();
        let snap = doc.snapshot();
        assert_eq!(snap["currentPage"], page.as_u32());
        assert_eq!(snap["tree"]["type"], "DOCUMENT");
        let page_json = &snap["tree"]["children"][0];
        assert_eq!(page_json["type"], "PAGE");
        assert_eq!(page_json["children"][0]["type"], "RECTANGLE");
        assert_eq!(page_json["children"][0]["pluginData"]["mark"], "true");
    }
}
