use std::cmp::Ordering;
use std::fmt::Display;

use crate::options::TreeOptions;
use crate::rebalance::{rebalance, Cause};
use crate::sink::{LogSink, NoopSink, Severity};
use crate::types::{Link, Node, NodeId};
use crate::util::{height, minimum_node, refresh_height};

/// AVL tree that reports its balancing decisions to a [`LogSink`].
///
/// Keys are unique. Every `insert`/`delete` runs to completion before
/// returning, so the tree is balanced whenever it can be observed.
#[derive(Debug)]
pub struct AvlTree<K, S = NoopSink> {
    root: Link<K>,
    len: usize,
    next_id: u64,
    options: TreeOptions,
    sink: S,
}

impl<K> AvlTree<K, NoopSink> {
    pub fn new() -> Self {
        Self::with_sink(NoopSink)
    }
}

impl<K> Default for AvlTree<K, NoopSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> AvlTree<K, S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            root: None,
            len: 0,
            next_id: 0,
            options: TreeOptions::default(),
            sink,
        }
    }

    pub fn with_options(mut self, options: TreeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TreeOptions) {
        self.options = options;
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> u32 {
        height(self.root())
    }

    /// Node holding the smallest key.
    pub fn minimum(&self) -> Option<&Node<K>> {
        self.root().map(minimum_node)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        fn walk<'a, K>(node: Option<&'a Node<K>>, out: &mut Vec<&'a K>) {
            if let Some(n) = node {
                walk(n.left(), out);
                out.push(&n.key);
                walk(n.right(), out);
            }
        }
        let mut out = Vec::with_capacity(self.len);
        walk(self.root(), &mut out);
        out
    }

    /// Drops every node. Ids are not reused afterwards.
    pub fn reset(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<K: Ord, S> AvlTree<K, S> {
    /// Node holding `key`, if any.
    pub fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut curr = self.root();
        while let Some(n) = curr {
            curr = match key.cmp(&n.key) {
                Ordering::Less => n.left(),
                Ordering::Greater => n.right(),
                Ordering::Equal => return Some(n),
            };
        }
        None
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}

impl<K, S> AvlTree<K, S>
where
    K: Ord + Clone + Display,
    S: LogSink,
{
    /// Inserts `key`. Returns `false`, leaving the tree untouched, when the
    /// key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let root = self.root.take();
        let (root, created) = self.insert_at(root, key);
        self.root = Some(root);
        if created {
            self.len += 1;
        }
        created
    }

    /// Removes `key`. Returns `false`, leaving the tree untouched, when the
    /// key is absent.
    pub fn delete(&mut self, key: &K) -> bool {
        let root = self.root.take();
        let (root, removed) = self.delete_at(root, key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn descend(&mut self, key: &K, at: &K, ord: Ordering) {
        if !self.options.trace_descent {
            return;
        }
        let message = match ord {
            Ordering::Less => format!("Value {key} < {at}, go Left."),
            _ => format!("Value {key} > {at}, go Right."),
        };
        self.sink.log(&message, Severity::Info);
    }

    /// Returns the new subtree root and whether a node was created below.
    fn insert_at(&mut self, node: Link<K>, key: K) -> (Box<Node<K>>, bool) {
        let Some(mut node) = node else {
            self.sink
                .log(&format!("Reached leaf. Creating Node {key}."), Severity::Info);
            let id = self.next_id();
            return (Box::new(Node::new(key, id)), true);
        };

        let created = match key.cmp(&node.key) {
            Ordering::Less => {
                self.descend(&key, &node.key, Ordering::Less);
                let (left, created) = self.insert_at(node.left.take(), key);
                node.left = Some(left);
                created
            }
            Ordering::Greater => {
                self.descend(&key, &node.key, Ordering::Greater);
                let (right, created) = self.insert_at(node.right.take(), key);
                node.right = Some(right);
                created
            }
            Ordering::Equal => {
                self.sink
                    .log(&format!("Duplicate value {key} ignored."), Severity::Warning);
                false
            }
        };

        if !created {
            return (node, false);
        }
        refresh_height(&mut node);
        (rebalance(node, Cause::Insert, &mut self.sink), true)
    }

    /// Returns the new subtree root and whether a key was removed below.
    fn delete_at(&mut self, node: Link<K>, key: &K) -> (Link<K>, bool) {
        let Some(mut node) = node else {
            self.sink
                .log(&format!("Value {key} not found to delete."), Severity::Warning);
            return (None, false);
        };

        let removed = match key.cmp(&node.key) {
            Ordering::Less => {
                self.descend(key, &node.key, Ordering::Less);
                let (left, removed) = self.delete_at(node.left.take(), key);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                self.descend(key, &node.key, Ordering::Greater);
                let (right, removed) = self.delete_at(node.right.take(), key);
                node.right = right;
                removed
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    self.sink.log(
                        &format!("Node {} is a leaf. Removing it.", node.key),
                        Severity::Info,
                    );
                    return (None, true);
                }
                (Some(child), None) | (None, Some(child)) => {
                    self.sink.log(
                        &format!(
                            "Node {} has one child. Promoting child {}.",
                            node.key, child.key
                        ),
                        Severity::Info,
                    );
                    return (Some(child), true);
                }
                (Some(left), Some(right)) => {
                    let successor = minimum_node(&right).key.clone();
                    self.sink.log(
                        &format!(
                            "Node {} has two children. Swapping value with successor {successor}.",
                            node.key
                        ),
                        Severity::Info,
                    );
                    node.key = successor;
                    self.sink.log(
                        &format!(
                            "Recursively deleting successor {} from right subtree...",
                            node.key
                        ),
                        Severity::Info,
                    );
                    node.left = Some(left);
                    let (right, _) = self.delete_at(Some(right), &node.key);
                    node.right = right;
                    true
                }
            },
        };

        if !removed {
            return (Some(node), false);
        }
        refresh_height(&mut node);
        (Some(rebalance(node, Cause::Delete, &mut self.sink)), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Recorder;
    use crate::util::balance_factor;

    fn shape(node: Option<&Node<i32>>) -> String {
        match node {
            None => "_".to_string(),
            Some(n) if n.is_leaf() => n.key.to_string(),
            Some(n) => format!("{}({},{})", n.key, shape(n.left()), shape(n.right())),
        }
    }

    fn build(keys: &[i32]) -> AvlTree<i32, Recorder> {
        let mut tree = AvlTree::with_sink(Recorder::new());
        for &k in keys {
            tree.insert(k);
        }
        tree
    }

    #[test]
    fn empty_tree() {
        let tree = AvlTree::<i32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.root().is_none());
        assert!(tree.minimum().is_none());
        assert!(tree.keys().is_empty());
    }

    #[test]
    fn single_insert_creates_leaf() {
        let mut tree = build(&[]);
        assert!(tree.insert(5));
        assert_eq!(shape(tree.root()), "5");
        assert_eq!(tree.root().map(|n| n.height), Some(1));
        assert_eq!(tree.sink().messages(), vec!["Reached leaf. Creating Node 5."]);
    }

    #[test]
    fn left_right_scenario() {
        let tree = build(&[30, 10, 20]);
        assert_eq!(shape(tree.root()), "20(10,30)");
        assert_eq!(balance_factor(tree.root()), 0);
    }

    #[test]
    fn right_left_scenario() {
        let tree = build(&[10, 30, 20]);
        assert_eq!(shape(tree.root()), "20(10,30)");
        let messages = tree.sink().messages();
        assert!(messages.contains(&"Case: Right-Left (Child BF: 1)"));
        assert!(messages.contains(&"Step 1: Rotate Right on Child 30"));
        assert!(messages.contains(&"Step 2: Rotate Left on Parent 10"));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut tree = build(&[2, 1, 3]);
        tree.sink_mut().clear();
        assert!(!tree.insert(3));
        assert_eq!(tree.len(), 3);
        assert_eq!(shape(tree.root()), "2(1,3)");
        assert_eq!(tree.sink().messages(), vec!["Duplicate value 3 ignored."]);
        assert_eq!(tree.sink().entries()[0].severity, Severity::Warning);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut tree = build(&[2, 1, 3]);
        tree.sink_mut().clear();
        assert!(!tree.delete(&7));
        assert_eq!(tree.len(), 3);
        assert_eq!(shape(tree.root()), "2(1,3)");
        assert_eq!(tree.sink().messages(), vec!["Value 7 not found to delete."]);
    }

    #[test]
    fn delete_from_empty_tree() {
        let mut tree = build(&[]);
        assert!(!tree.delete(&1));
        assert!(tree.is_empty());
    }

    #[test]
    fn delete_leaf_and_promote_child() {
        let mut tree = build(&[20, 10, 30, 40]);
        tree.sink_mut().clear();
        assert!(tree.delete(&30));
        assert_eq!(shape(tree.root()), "20(10,40)");
        assert_eq!(
            tree.sink().messages(),
            vec!["Node 30 has one child. Promoting child 40."]
        );

        tree.sink_mut().clear();
        assert!(tree.delete(&10));
        assert_eq!(shape(tree.root()), "20(_,40)");
        assert_eq!(tree.sink().messages(), vec!["Node 10 is a leaf. Removing it."]);
    }

    #[test]
    fn delete_two_children_keeps_position_id() {
        let mut tree = build(&[20, 10, 30]);
        let root_id = tree.root().map(|n| n.id);
        let successor_id = tree.find(&30).map(|n| n.id);
        tree.sink_mut().clear();

        assert!(tree.delete(&20));
        assert_eq!(shape(tree.root()), "30(10,_)");
        assert_eq!(tree.root().map(|n| n.id), root_id);
        assert_ne!(tree.root().map(|n| n.id), successor_id);
        assert_eq!(
            tree.sink().messages(),
            vec![
                "Node 20 has two children. Swapping value with successor 30.",
                "Recursively deleting successor 30 from right subtree...",
                "Node 30 is a leaf. Removing it.",
            ]
        );
    }

    #[test]
    fn delete_last_node_empties_tree() {
        let mut tree = build(&[1]);
        assert!(tree.delete(&1));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn descent_messages_are_optional() {
        let mut tree = build(&[20, 10]);
        tree.set_options(TreeOptions::default().with_descent(true));
        tree.sink_mut().clear();
        tree.insert(15);
        assert_eq!(
            tree.sink().messages()[..3],
            [
                "Value 15 < 20, go Left.",
                "Value 15 > 10, go Right.",
                "Reached leaf. Creating Node 15.",
            ]
        );
    }

    #[test]
    fn find_and_minimum() {
        let tree = build(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.find(&60).map(|n| n.key), Some(60));
        assert!(tree.find(&65).is_none());
        assert!(tree.contains(&20));
        assert_eq!(tree.minimum().map(|n| n.key), Some(20));
        assert_eq!(tree.keys(), vec![&20, &30, &40, &50, &60, &70, &80]);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut tree = build(&[1, 2]);
        let before: Vec<_> = [1, 2].iter().filter_map(|k| tree.find(k)).map(|n| n.id).collect();
        tree.reset();
        assert!(tree.is_empty());
        tree.insert(1);
        let after = tree.find(&1).map(|n| n.id).unwrap();
        assert!(!before.contains(&after));
    }
}
