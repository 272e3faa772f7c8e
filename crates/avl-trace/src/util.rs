//! Height/balance accounting and the two single rotations.

use std::fmt::Display;

use crate::sink::{LogSink, Severity};
use crate::types::Node;

/// Cached height of `node`, 0 when absent.
#[inline]
pub fn height<K>(node: Option<&Node<K>>) -> u32 {
    node.map_or(0, |n| n.height)
}

/// Recomputes `node.height` from its children's cached heights.
#[inline]
pub fn refresh_height<K>(node: &mut Node<K>) {
    node.height = 1 + height(node.left()).max(height(node.right()));
}

/// `height(left) - height(right)`, 0 when absent.
#[inline]
pub fn balance_factor<K>(node: Option<&Node<K>>) -> i32 {
    match node {
        None => 0,
        Some(n) => height(n.left()) as i32 - height(n.right()) as i32,
    }
}

/// Leftmost node of the subtree rooted at `node`.
pub fn minimum_node<K>(node: &Node<K>) -> &Node<K> {
    let mut curr = node;
    while let Some(l) = curr.left() {
        curr = l;
    }
    curr
}

/// Rotates the subtree rooted at `y` to the right and returns the new root
/// (the former left child).
///
/// # Panics
///
/// Panics if `y` has no left child.
pub fn rotate_right<K, S>(mut y: Box<Node<K>>, sink: &mut S) -> Box<Node<K>>
where
    K: Display,
    S: LogSink + ?Sized,
{
    sink.log(
        &format!("PERFORMING RIGHT ROTATION on Node {}...", y.key),
        Severity::Action,
    );
    let mut x = y.left.take().expect("right rotation requires a left child");
    y.left = x.right.take();

    sink.log(&format!("  - Node {} becomes new parent.", x.key), Severity::Info);
    sink.log(&format!("  - Node {} moves to right child.", y.key), Severity::Info);

    // y is now x's child; its height must be settled first.
    refresh_height(&mut y);
    x.right = Some(y);
    refresh_height(&mut x);
    x
}

/// Mirror of [`rotate_right`]: the former right child becomes the root.
///
/// # Panics
///
/// Panics if `x` has no right child.
pub fn rotate_left<K, S>(mut x: Box<Node<K>>, sink: &mut S) -> Box<Node<K>>
where
    K: Display,
    S: LogSink + ?Sized,
{
    sink.log(
        &format!("PERFORMING LEFT ROTATION on Node {}...", x.key),
        Severity::Action,
    );
    let mut y = x.right.take().expect("left rotation requires a right child");
    x.right = y.left.take();

    sink.log(&format!("  - Node {} becomes new parent.", y.key), Severity::Info);
    sink.log(&format!("  - Node {} moves to left child.", x.key), Severity::Info);

    refresh_height(&mut x);
    y.left = Some(x);
    refresh_height(&mut y);
    y
}
