use snafu::prelude::*;
use tracing::debug;

use super::node::{DirectoryNode, NodeId};

const ROOT_NAME: &str = "/";

/// Result of a successful [`DirectoryTree::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub node: NodeId,
    pub parent: NodeId,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<DirectoryNode>,
}

/// Arena-backed directory tree rooted at `/`.
///
/// Slots of deleted subtrees go on a free list and are reused by later
/// additions. Reusing a slot bumps its generation, so a stale [`NodeId`] is
/// reported as unknown instead of aliasing the newer node.
#[derive(Debug, Clone)]
pub struct DirectoryTree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(DirectoryNode::new(ROOT_NAME, None)),
            }],
            free: Vec::new(),
            root: NodeId(0, 0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.slots
            .get(id.0)
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Number of reachable nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Creates `name` under `parent`, or returns the existing child with that
    /// name.
    pub fn add(&mut self, name: &str, parent: NodeId) -> Result<NodeId, TreeError> {
        if let Some(existing) = self.lookup(name, parent) {
            return Ok(existing.node);
        }

        self.node(parent)?;
        let id = self.allocate(DirectoryNode::new(name, Some(parent)));
        self.node_mut(parent)?.insert_child(name.to_string(), id);
        debug!("Created '{}' as {} under {}", name, id, parent);

        Ok(id)
    }

    /// Finds the child of `node` called `name`.
    pub fn lookup(&self, name: &str, node: NodeId) -> Option<Lookup> {
        let child = self.get(node)?.child(name)?;
        Some(Lookup {
            node: child,
            parent: node,
        })
    }

    /// Re-parents `node` (and its whole subtree) under `target`.
    pub fn move_node(&mut self, node: NodeId, target: NodeId) -> Result<(), TreeError> {
        ensure!(node != self.root, MoveRootSnafu);
        let moved = self.node(node)?;
        let name = moved.name().to_string();
        let old_parent = moved.parent().context(UnknownNodeSnafu { id: node })?;
        self.node(target)?;

        if old_parent == target {
            debug!("{} already lives under {}", node, target);
            return Ok(());
        }
        ensure!(!self.is_within(target, node), CycleSnafu { node, target });
        ensure!(
            self.lookup(&name, target).is_none(),
            NameTakenSnafu { name: name.clone() }
        );

        self.node_mut(old_parent)?.remove_child(&name);
        self.node_mut(node)?.set_parent(Some(target));
        self.node_mut(target)?.insert_child(name, node);
        debug!("Moved {} from {} to {}", node, old_parent, target);

        Ok(())
    }

    /// Detaches `node` from its parent and releases its whole subtree.
    pub fn delete(&mut self, node: NodeId) -> Result<(), TreeError> {
        ensure!(node != self.root, DeleteRootSnafu);
        let deleted = self.node(node)?;
        let name = deleted.name().to_string();
        let parent = deleted.parent().context(UnknownNodeSnafu { id: node })?;

        self.node_mut(parent)?.remove_child(&name);

        let mut pending = vec![node];
        let mut released = 0usize;
        while let Some(id) = pending.pop() {
            if let Some(directory) = self.release(id) {
                pending.extend(directory.children().map(|(_, child)| child));
                released += 1;
            }
        }
        debug!("Deleted '{}' ({} nodes released)", name, released);

        Ok(())
    }

    /// Children of `node` ordered by name. Recomputed on every call.
    pub fn sorted_children(&self, node: NodeId) -> Vec<NodeId> {
        let Some(directory) = self.get(node) else {
            return Vec::new();
        };

        let mut children = directory.children().collect::<Vec<_>>();
        children.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        children.into_iter().map(|(_, id)| id).collect()
    }

    /// Renders the subtree below `node`, one name per line, each level indented
    /// by `indent` more spaces than its parent. `node` itself is not printed.
    pub fn render(&self, node: NodeId, depth: usize, indent: usize) -> String {
        let mut out = String::new();
        // children go on the stack in reverse so the smallest name pops first
        let mut pending = self
            .sorted_children(node)
            .into_iter()
            .rev()
            .map(|child| (child, depth))
            .collect::<Vec<_>>();

        while let Some((id, level)) = pending.pop() {
            let Some(directory) = self.get(id) else {
                continue;
            };
            out.push_str(&" ".repeat(level.saturating_mul(indent)));
            out.push_str(directory.name());
            out.push('\n');
            pending.extend(
                self.sorted_children(id)
                    .into_iter()
                    .rev()
                    .map(|child| (child, level + 1)),
            );
        }

        out
    }

    /// Whether `node` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(DirectoryNode::parent);
        }
        false
    }

    fn allocate(&mut self, directory: DirectoryNode) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(directory);
                return NodeId(index, slot.generation);
            }
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(directory),
        });
        NodeId(self.slots.len() - 1, 0)
    }

    fn release(&mut self, id: NodeId) -> Option<DirectoryNode> {
        let slot = self
            .slots
            .get_mut(id.0)
            .filter(|slot| slot.generation == id.1)?;
        let directory = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.0);
        Some(directory)
    }

    fn node(&self, id: NodeId) -> Result<&DirectoryNode, TreeError> {
        self.get(id).context(UnknownNodeSnafu { id })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DirectoryNode, TreeError> {
        self.slots
            .get_mut(id.0)
            .filter(|slot| slot.generation == id.1)
            .and_then(|slot| slot.node.as_mut())
            .context(UnknownNodeSnafu { id })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeError {
    #[snafu(display("Node {} is not part of the tree", id))]
    UnknownNode { id: NodeId },
    #[snafu(display("The root directory cannot be moved"))]
    MoveRoot,
    #[snafu(display("The root directory cannot be deleted"))]
    DeleteRoot,
    #[snafu(display("Cannot move {} into its own subtree at {}", node, target))]
    Cycle { node: NodeId, target: NodeId },
    #[snafu(display("Destination already contains '{}'", name))]
    NameTaken { name: String },
}
