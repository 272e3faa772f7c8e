//! AVL tree with an observable balancing trace.
//!
//! [`AvlTree`] keeps unique keys in a height-balanced binary search tree and
//! reports every decision it makes (leaf creation, duplicate rejection,
//! removal mode, imbalance detection, case classification and each rotation
//! step) to a caller-supplied [`LogSink`]. The trace is synchronous and in a
//! fixed order, so a visualiser can replay it message by message.
//!
//! ```
//! use avl_trace::{AvlTree, Recorder};
//!
//! let mut tree = AvlTree::with_sink(Recorder::new());
//! for k in [10, 20, 30] {
//!     tree.insert(k);
//! }
//! assert_eq!(tree.root().map(|n| n.key), Some(20));
//! assert!(tree
//!     .sink()
//!     .messages()
//!     .contains(&"Case: Right-Right (Child BF: -1)"));
//! tree.check().unwrap();
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`], [`NodeId`] |
//! [`util`] | height/balance accounting, single rotations |
//! [`rebalance`] | four-case classifier shared by insert and delete |
//! [`tree`] | [`AvlTree`] insert/delete |
//! [`sink`] | [`LogSink`] and stock sinks |
//! [`validate`] | invariant checker |
//! [`print`] | [`Snapshot`] for renderers, text dump |
//! [`session`] | one-frame-per-operation driver |
//! [`cli`] | command parsing for the `avl-trace` binary |

pub mod cli;
pub mod options;
pub mod print;
pub mod rebalance;
pub mod session;
pub mod sink;
pub mod tree;
pub mod types;
pub mod util;
pub mod validate;

pub use options::TreeOptions;
pub use print::{NodeView, Snapshot};
pub use rebalance::{Cause, Imbalance};
pub use session::{Frame, Session};
pub use sink::{LogEntry, LogSink, NoopSink, Recorder, Severity, Tee, TracingSink};
pub use tree::AvlTree;
pub use types::{Link, Node, NodeId};
pub use util::{balance_factor, height, minimum_node, refresh_height, rotate_left, rotate_right};
pub use validate::InvariantError;
