//! Structural invariant checks.

use thiserror::Error;

use crate::tree::AvlTree;
use crate::types::{Node, NodeId};
use crate::util::{balance_factor, height};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("height mismatch at node {id}: cached {cached}, expected {expected}")]
    HeightMismatch {
        id: NodeId,
        cached: u32,
        expected: u32,
    },
    #[error("avl balance violated at node {id}: balance factor {bf}")]
    Unbalanced { id: NodeId, bf: i32 },
    #[error("node order violated at node {id}")]
    OrderViolated { id: NodeId },
    #[error("duplicate node id {id}")]
    DuplicateId { id: NodeId },
    #[error("length mismatch: tree reports {reported}, found {found} nodes")]
    LengthMismatch { reported: usize, found: usize },
}

/// Checks cached heights, balance factors and key order of the subtree
/// rooted at `node`. Returns the number of nodes visited.
pub fn check_subtree<K: Ord>(node: Option<&Node<K>>) -> Result<usize, InvariantError> {
    let mut ids = Vec::new();
    let mut prev: Option<&K> = None;
    let count = walk(node, &mut prev, &mut ids)?;

    ids.sort_unstable();
    if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
        return Err(InvariantError::DuplicateId { id: w[0] });
    }
    Ok(count)
}

fn walk<'a, K: Ord>(
    node: Option<&'a Node<K>>,
    prev: &mut Option<&'a K>,
    ids: &mut Vec<NodeId>,
) -> Result<usize, InvariantError> {
    let Some(n) = node else {
        return Ok(0);
    };

    let left = walk(n.left(), prev, ids)?;

    if let Some(p) = *prev {
        if *p >= n.key {
            return Err(InvariantError::OrderViolated { id: n.id });
        }
    }
    *prev = Some(&n.key);
    ids.push(n.id);

    let right = walk(n.right(), prev, ids)?;

    let expected = 1 + height(n.left()).max(height(n.right()));
    if n.height != expected {
        return Err(InvariantError::HeightMismatch {
            id: n.id,
            cached: n.height,
            expected,
        });
    }
    let bf = balance_factor(Some(n));
    if !(-1..=1).contains(&bf) {
        return Err(InvariantError::Unbalanced { id: n.id, bf });
    }

    Ok(left + 1 + right)
}

impl<K: Ord, S> AvlTree<K, S> {
    /// Verifies every structural invariant of the tree.
    pub fn check(&self) -> Result<(), InvariantError> {
        let found = check_subtree(self.root())?;
        if found != self.len() {
            return Err(InvariantError::LengthMismatch {
                reported: self.len(),
                found,
            });
        }
        Ok(())
    }
}
