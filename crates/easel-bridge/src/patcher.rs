//! Applies the ordered message stream from the diffing process to a host
//! document. Structural messages that name something the host can no longer
//! satisfy are downgraded to no-ops; real host failures still propagate.

use crate::classify;
use crate::message::{BridgeMessage, Tag};
use crate::props::Props;
use crate::registry::{Instance, InstanceRegistry, RawText};
use crate::render::{RenderError, Renderers, STUB_MARKER};
use easel_scene::{NodeId, SceneError, SceneGraph};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Plugin data key marking nodes created through the bridge.
pub const PROVENANCE_MARKER: &str = "easelNode";
/// Plugin data key holding the tag a bridge-created node was minted for.
pub const PROVENANCE_TAG: &str = "easelTag";

#[derive(Error, Debug)]
pub enum PatchError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Host(#[from] SceneError),
}

/// Owns the host document, the tag registry and the renderer table, and
/// feeds messages through them one at a time.
pub struct ScenePatcher<D> {
    doc: D,
    registry: InstanceRegistry,
    renderers: Renderers,
}

impl<D: SceneGraph> ScenePatcher<D> {
    /// Patcher with the built-in renderer set.
    pub fn new(doc: D) -> Self {
        ScenePatcher::with_renderers(doc, Renderers::defaults())
    }

    pub fn with_renderers(doc: D, renderers: Renderers) -> Self {
        ScenePatcher { doc, registry: InstanceRegistry::new(), renderers }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Direct host access. Mutations made here happen behind the registry's
    /// back, which is exactly what host-side edits do in practice.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    /// Host node currently bound to `tag`, if the tag names one.
    pub fn node_for(&self, tag: Tag) -> Option<NodeId> {
        self.registry.get(tag).and_then(Instance::node_id)
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    pub fn apply(&mut self, message: BridgeMessage) -> Result<(), PatchError> {
        debug!(subject = %message.subject(), ?message, "apply");
        match message {
            BridgeMessage::CreateInstance { tag, node_type, props }
            | BridgeMessage::CommitUpdate { tag, node_type, props } => {
                self.render_instance(tag, &node_type, &props)
            }
            BridgeMessage::CreateTextInstance { tag, text }
            | BridgeMessage::CommitTextUpdate { tag, text } => self.render_text_instance(tag, text),
            BridgeMessage::AppendChild { parent, child } => self.attach(parent, child, None),
            BridgeMessage::InsertBefore { parent, child, before_child } => {
                self.attach(parent, child, Some(before_child))
            }
            BridgeMessage::RemoveChild { child } => self.remove_child(child),
        }
    }

    pub fn apply_all<I>(&mut self, messages: I) -> Result<(), PatchError>
    where
        I: IntoIterator<Item = BridgeMessage>,
    {
        for message in messages {
            self.apply(message)?;
        }
        Ok(())
    }

    /// Create and update share one path: run the renderer for `node_type`
    /// against whatever node the tag is currently bound to, then rebind.
    fn render_instance(&mut self, tag: Tag, node_type: &str, props: &Props) -> Result<(), PatchError> {
        let fresh = !self.registry.contains(tag);
        let existing = self.registry.get(tag).and_then(Instance::node_id);
        let node = self.renderers.run(&mut self.doc, node_type, existing, props)?;
        if fresh {
            self.doc.set_plugin_data(node, PROVENANCE_MARKER, "true")?;
            self.doc.set_plugin_data(node, PROVENANCE_TAG, &tag.to_string())?;
        }
        if self.doc.kind(node).map(classify::is_page).unwrap_or(false)
            && props.boolean("isCurrent").unwrap_or(false)
        {
            self.doc.set_current_page(node)?;
        }
        self.registry.set(tag, Instance::Node(node));
        Ok(())
    }

    /// Text create and update also share a path. The staged value is
    /// mirrored into the text parent right away when one is already known.
    fn render_text_instance(&mut self, tag: Tag, text: String) -> Result<(), PatchError> {
        if let Some(Instance::RawText(raw)) = self.registry.get_mut(tag) {
            raw.value = text;
            if let Some(parent) = raw.parent {
                self.doc.set_characters(parent, &raw.value)?;
            }
            return Ok(());
        }
        // first sighting of this tag as text; also rebinds a stale node entry
        self.registry.set(tag, Instance::RawText(RawText { value: text, parent: None }));
        Ok(())
    }

    /// Append and insert share everything but the target index.
    fn attach(&mut self, parent_tag: Tag, child_tag: Tag, before: Option<Tag>) -> Result<(), PatchError> {
        let parent = match self.registry.get(parent_tag) {
            None => {
                trace!(parent = %parent_tag, child = %child_tag, "attach skipped, unknown parent");
                return Ok(());
            }
            Some(Instance::RawText(_)) => {
                // the differ should never parent anything under staged text
                warn!(parent = %parent_tag, child = %child_tag, "attach skipped, parent tag is staged text");
                return Ok(());
            }
            Some(Instance::Node(id)) => *id,
        };
        if !classify::is_live(self.doc.node(parent)) {
            trace!(parent = %parent_tag, child = %child_tag, "attach skipped, parent no longer live");
            return Ok(());
        }
        match self.registry.get_mut(child_tag) {
            None => {
                trace!(parent = %parent_tag, child = %child_tag, "attach skipped, unknown child");
            }
            Some(Instance::RawText(raw)) => {
                // staged text merges into a text parent instead of attaching
                if self.doc.kind(parent).map(classify::is_text).unwrap_or(false) {
                    self.doc.set_characters(parent, &raw.value)?;
                    raw.parent = Some(parent);
                } else {
                    trace!(parent = %parent_tag, child = %child_tag, "text merge skipped, parent holds no characters");
                }
            }
            Some(Instance::Node(child)) => {
                let child = *child;
                let parent_takes_children =
                    self.doc.kind(parent).map(classify::supports_children).unwrap_or(false);
                if parent_takes_children && classify::is_live(self.doc.node(child)) {
                    match self.attach_index(parent, child, before) {
                        Some(index) => self.doc.insert_child(parent, index, child)?,
                        None => self.doc.append_child(parent, child)?,
                    }
                } else {
                    trace!(parent = %parent_tag, child = %child_tag, "attach skipped, pair cannot be joined");
                }
            }
        }
        self.cleanup_group_stubs(parent)
    }

    /// Final position for an insert, or `None` to append. The index is
    /// computed with `child` imagined out of the sibling list, because the
    /// host detaches it before inserting. A missing reference sibling
    /// degrades to an append.
    fn attach_index(&self, parent: NodeId, child: NodeId, before: Option<Tag>) -> Option<usize> {
        let before = self.node_for(before?)?;
        self.doc
            .children(parent)
            .iter()
            .filter(|&&sibling| sibling != child)
            .position(|&sibling| sibling == before)
    }

    fn remove_child(&mut self, child_tag: Tag) -> Result<(), PatchError> {
        match self.registry.get(child_tag) {
            None => {
                trace!(child = %child_tag, "remove skipped, unknown tag");
            }
            Some(Instance::RawText(_)) => {
                // staged text owns no host node; dropping the entry is the removal
                self.registry.delete(child_tag);
            }
            Some(Instance::Node(id)) => {
                let id = *id;
                if classify::is_live(self.doc.node(id)) {
                    self.doc.remove(id)?;
                    self.registry.delete(child_tag);
                } else {
                    trace!(child = %child_tag, "remove skipped, node already gone");
                }
            }
        }
        Ok(())
    }

    /// Once a group holds at least one real child, its placeholder stubs
    /// have done their job and are torn down.
    fn cleanup_group_stubs(&mut self, parent: NodeId) -> Result<(), PatchError> {
        if !self.doc.kind(parent).map(classify::is_group_like).unwrap_or(false) {
            return Ok(());
        }
        let is_stub =
            |doc: &D, id: NodeId| doc.plugin_data(id, STUB_MARKER).is_some();
        let has_real_child =
            self.doc.children(parent).iter().any(|&c| !is_stub(&self.doc, c));
        if !has_real_child {
            return Ok(());
        }
        let stubs: Vec<NodeId> = self
            .doc
            .children(parent)
            .iter()
            .copied()
            .filter(|&c| is_stub(&self.doc, c))
            .collect();
        for stub in stubs {
            self.doc.remove(stub)?;
        }
        Ok(())
    }
}
