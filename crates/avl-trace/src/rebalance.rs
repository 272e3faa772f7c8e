//! Four-case imbalance classification shared by insert and delete.

use std::fmt::{self, Display};

use crate::sink::{LogSink, Severity};
use crate::types::Node;
use crate::util::{balance_factor, rotate_left, rotate_right};

/// Which mutation left the subtree unbalanced. Only changes the wording of
/// the imbalance message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cause {
    Insert,
    Delete,
}

/// Rotation case for a node with `|bf| > 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Imbalance {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

impl Imbalance {
    /// Classifies a node from its balance factor and the balance factor of
    /// its heavier child. Returns `None` when `-1 <= bf <= 1`.
    ///
    /// Ties on the child (`child_bf == 0`) resolve to the single rotation;
    /// this only happens after deletions.
    pub fn classify(bf: i32, child_bf: i32) -> Option<Self> {
        match bf {
            b if b > 1 && child_bf >= 0 => Some(Imbalance::LeftLeft),
            b if b > 1 => Some(Imbalance::LeftRight),
            b if b < -1 && child_bf <= 0 => Some(Imbalance::RightRight),
            b if b < -1 => Some(Imbalance::RightLeft),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Imbalance::LeftLeft => "Left-Left",
            Imbalance::RightRight => "Right-Right",
            Imbalance::LeftRight => "Left-Right",
            Imbalance::RightLeft => "Right-Left",
        }
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Repairs `node` if it is out of balance and returns the subtree root that
/// must take its place. `node.height` must already be current.
pub fn rebalance<K, S>(mut node: Box<Node<K>>, cause: Cause, sink: &mut S) -> Box<Node<K>>
where
    K: Display,
    S: LogSink + ?Sized,
{
    let bf = balance_factor(Some(&*node));
    let heavy = if bf > 0 { node.left() } else { node.right() };
    let child_bf = balance_factor(heavy);
    let Some(case) = Imbalance::classify(bf, child_bf) else {
        return node;
    };

    let message = match cause {
        Cause::Insert => format!("IMBALANCE detected at {} (BF: {bf}). Fixing...", node.key),
        Cause::Delete => format!("IMBALANCE detected at {} (BF: {bf}) after deletion.", node.key),
    };
    sink.log(&message, Severity::Warning);
    sink.log(&format!("Case: {case} (Child BF: {child_bf})"), Severity::Warning);

    match case {
        Imbalance::LeftLeft => rotate_right(node, sink),
        Imbalance::RightRight => rotate_left(node, sink),
        Imbalance::LeftRight => {
            let child = node.left.take().expect("left-heavy node has a left child");
            sink.log(
                &format!("Step 1: Rotate Left on Child {}", child.key),
                Severity::Action,
            );
            node.left = Some(rotate_left(child, sink));
            sink.log(
                &format!("Step 2: Rotate Right on Parent {}", node.key),
                Severity::Action,
            );
            rotate_right(node, sink)
        }
        Imbalance::RightLeft => {
            let child = node.right.take().expect("right-heavy node has a right child");
            sink.log(
                &format!("Step 1: Rotate Right on Child {}", child.key),
                Severity::Action,
            );
            node.right = Some(rotate_right(child, sink));
            sink.log(
                &format!("Step 2: Rotate Left on Parent {}", node.key),
                Severity::Action,
            );
            rotate_left(node, sink)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(Imbalance::classify(2, 1), Some(Imbalance::LeftLeft));
        assert_eq!(Imbalance::classify(2, 0), Some(Imbalance::LeftLeft));
        assert_eq!(Imbalance::classify(2, -1), Some(Imbalance::LeftRight));
        assert_eq!(Imbalance::classify(-2, -1), Some(Imbalance::RightRight));
        assert_eq!(Imbalance::classify(-2, 0), Some(Imbalance::RightRight));
        assert_eq!(Imbalance::classify(-2, 1), Some(Imbalance::RightLeft));
    }

    #[test]
    fn balanced_factors_have_no_case() {
        for bf in -1..=1 {
            for child in -1..=1 {
                assert_eq!(Imbalance::classify(bf, child), None);
            }
        }
    }

    #[test]
    fn labels() {
        assert_eq!(Imbalance::LeftRight.to_string(), "Left-Right");
        assert_eq!(Imbalance::RightLeft.label(), "Right-Left");
    }
}
