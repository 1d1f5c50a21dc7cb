//! In-memory directory tree.
//!
//! Nodes live in an arena owned by [`DirectoryTree`] and are addressed by
//! [`NodeId`]. A node's parent link is a plain id and never implies ownership;
//! the child mapping of the parent is the only thing that keeps a node
//! reachable.

mod node;
mod path;
mod tree;

pub use node::NodeId;
pub use path::{DirectoryPath, DirectoryPathError};
pub use tree::{DirectoryTree, Lookup, TreeError};
