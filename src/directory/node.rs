use derive_more::Display;
use hashlink::LinkedHashMap;

/// Handle of a node inside a [`DirectoryTree`](super::DirectoryTree) arena:
/// slot index plus the generation of that slot when the node was created.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}.{_1}")]
pub struct NodeId(pub(super) usize, pub(super) u32);

/// One directory. Children are keyed by their name, which is unique among
/// siblings.
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    name: String,
    parent: Option<NodeId>,
    children: LinkedHashMap<String, NodeId>,
}

impl DirectoryNode {
    pub(super) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: LinkedHashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub(super) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(super) fn insert_child(&mut self, name: String, id: NodeId) {
        self.children.insert(name, id);
    }

    pub(super) fn remove_child(&mut self, name: &str) -> Option<NodeId> {
        self.children.remove(name)
    }
}
