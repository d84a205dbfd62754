use crate::message::Tag;
use easel_scene::NodeId;
use std::collections::HashMap;

/// Text payload that has no host node of its own. It is staged here until
/// an append merges it into a text parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawText {
    pub value: String,
    /// Text node the value was last merged into, if any.
    pub parent: Option<NodeId>,
}

/// What a tag currently resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    Node(NodeId),
    RawText(RawText),
}

impl Instance {
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Instance::Node(id) => Some(*id),
            Instance::RawText(_) => None,
        }
    }
}

/// Tag → instance mapping. The patcher is the only writer; an entry exists
/// exactly for the tags the diffing process has created and not removed.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    entries: HashMap<Tag, Instance>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        InstanceRegistry::default()
    }

    pub fn get(&self, tag: Tag) -> Option<&Instance> {
        self.entries.get(&tag)
    }

    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut Instance> {
        self.entries.get_mut(&tag)
    }

    /// Binds `tag`, replacing any previous entry.
    pub fn set(&mut self, tag: Tag, instance: Instance) {
        self.entries.insert(tag, instance);
    }

    pub fn delete(&mut self, tag: Tag) -> Option<Instance> {
        self.entries.remove(&tag)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let mut registry = InstanceRegistry::new();
        assert!(registry.is_empty());
        registry.set(Tag(1), Instance::RawText(RawText { value: "a".into(), parent: None }));
        assert!(registry.contains(Tag(1)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Tag(2)), None);
        let taken = registry.delete(Tag(1)).unwrap();
        assert_eq!(taken, Instance::RawText(RawText { value: "a".into(), parent: None }));
        assert!(!registry.contains(Tag(1)));
    }

    #[test]
    fn test_set_overwrites() {
        let mut registry = InstanceRegistry::new();
        registry.set(Tag(5), Instance::RawText(RawText::default()));
        registry.set(Tag(5), Instance::RawText(RawText { value: "b".into(), parent: None }));
        assert_eq!(registry.len(), 1);
        match registry.get(Tag(5)) {
            Some(Instance::RawText(raw)) => assert_eq!(raw.value, "b"),
            other => panic!("unexpected entry: {other:?}"),
        }
    }

    #[test]
    fn test_node_id_helper() {
        assert_eq!(Instance::RawText(RawText::default()).node_id(), None);
    }
}
