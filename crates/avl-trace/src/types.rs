//! Node storage.
//!
//! Each node exclusively owns its two child slots; there are no parent
//! links. All traversal is top-down and structural changes are spliced in
//! by the caller frame writing the returned subtree root into its own slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owned child slot.
pub type Link<K> = Option<Box<Node<K>>>;

/// Opaque per-node token for external correlation.
///
/// Assigned once when the node is created and never read by the balancing
/// algorithms. It tracks the physical node, not the key: a node whose key is
/// overwritten by its in-order successor keeps its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// AVL tree node.
#[derive(Clone, Debug)]
pub struct Node<K> {
    pub key: K,
    pub left: Link<K>,
    pub right: Link<K>,
    /// Cached height; a leaf has height 1.
    pub height: u32,
    pub id: NodeId,
}

impl<K> Node<K> {
    pub fn new(key: K, id: NodeId) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
            id,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }
}
