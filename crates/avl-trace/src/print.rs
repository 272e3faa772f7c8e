//! Read-only views of a tree for renderers: a serialisable [`Snapshot`] and a
//! box-drawing text dump.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::tree::AvlTree;
use crate::types::{Node, NodeId};
use crate::util::{balance_factor, height};

/// Everything a renderer needs to draw one node and its subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView<K> {
    pub id: NodeId,
    pub key: K,
    pub height: u32,
    pub balance_factor: i32,
    pub left: Option<Box<NodeView<K>>>,
    pub right: Option<Box<NodeView<K>>>,
}

impl<K: Clone> NodeView<K> {
    pub fn of(node: &Node<K>) -> Self {
        Self {
            id: node.id,
            key: node.key.clone(),
            height: node.height,
            balance_factor: balance_factor(Some(node)),
            left: node.left().map(|n| Box::new(Self::of(n))),
            right: node.right().map(|n| Box::new(Self::of(n))),
        }
    }
}

/// Detached copy of the tree state after a completed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<K> {
    pub len: usize,
    pub height: u32,
    pub root: Option<NodeView<K>>,
}

impl<K> Snapshot<K> {
    /// Nodes in pre-order (parent before children, left before right).
    pub fn nodes(&self) -> Vec<&NodeView<K>> {
        let mut out = Vec::new();
        let mut stack: Vec<&NodeView<K>> = self.root.iter().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            if let Some(r) = n.right.as_deref() {
                stack.push(r);
            }
            if let Some(l) = n.left.as_deref() {
                stack.push(l);
            }
        }
        out
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&NodeView<K>> {
        self.nodes().into_iter().find(|n| n.id == id)
    }
}

impl<K: Serialize> Snapshot<K> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Joins pre-rendered children under a parent line using box-drawing
/// branches. `None` children are skipped.
pub fn print_tree(tab: &str, children: &[Option<&PrintChild<'_>>]) -> String {
    let mut out = String::new();
    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child) in children.iter().enumerate().take(last + 1) {
        let Some(child) = child else {
            continue;
        };
        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let rendered = child(&child_tab);
        let branch = if rendered.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !rendered.is_empty() {
            out.push(' ');
            out.push_str(&rendered);
        }
    }
    out
}

/// Renders `node` as `key [h=.., bf=.., #id]` followed by its children.
/// Missing children of an inner node print as `∅` so sides stay apparent.
pub fn print_node<K: Display>(node: &Node<K>, tab: &str) -> String {
    let header = format!(
        "{} [h={}, bf={}, {}]",
        node.key,
        node.height,
        balance_factor(Some(node)),
        node.id
    );
    if node.is_leaf() {
        return header;
    }
    let left = print_side(node.left());
    let right = print_side(node.right());
    header + &print_tree(tab, &[Some(&left as &PrintChild<'_>), Some(&right)])
}

fn print_side<K: Display>(child: Option<&Node<K>>) -> impl Fn(&str) -> String + '_ {
    move |tab| child.map_or_else(|| "∅".to_string(), |n| print_node(n, tab))
}

impl<K, S> AvlTree<K, S> {
    pub fn snapshot(&self) -> Snapshot<K>
    where
        K: Clone,
    {
        Snapshot {
            len: self.len(),
            height: height(self.root()),
            root: self.root().map(NodeView::of),
        }
    }

    pub fn print(&self) -> String
    where
        K: Display,
    {
        match self.root() {
            None => "∅".to_string(),
            Some(root) => print_node(root, ""),
        }
    }
}
