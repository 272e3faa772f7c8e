//! Step-by-step driver for visualisers.
//!
//! Each call clears the log, runs one operation and hands back the full
//! trace of that operation together with a snapshot of the resulting tree,
//! so a renderer can redraw from scratch after every step.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::options::TreeOptions;
use crate::print::Snapshot;
use crate::sink::{LogEntry, LogSink, Recorder, Severity};
use crate::tree::AvlTree;

/// Result of one session step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame<K> {
    pub log: Vec<LogEntry>,
    pub snapshot: Snapshot<K>,
}

#[derive(Debug)]
pub struct Session<K> {
    tree: AvlTree<K, Recorder>,
}

impl<K> Session<K>
where
    K: Ord + Clone + Display,
{
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            tree: AvlTree::with_sink(Recorder::new()).with_options(options),
        }
    }

    pub fn tree(&self) -> &AvlTree<K, Recorder> {
        &self.tree
    }

    pub fn insert(&mut self, key: K) -> Frame<K> {
        self.begin(&format!("Starting insertion of {key}..."));
        self.tree.insert(key);
        self.finish("Insertion complete. Tree balanced.")
    }

    pub fn delete(&mut self, key: &K) -> Frame<K> {
        self.begin(&format!("Starting deletion of {key}..."));
        self.tree.delete(key);
        self.finish("Deletion complete. Tree balanced.")
    }

    pub fn reset(&mut self) -> Frame<K> {
        self.tree.reset();
        self.tree.sink_mut().clear();
        self.tree.sink_mut().log("Tree reset.", Severity::Info);
        self.frame()
    }

    fn begin(&mut self, message: &str) {
        let sink = self.tree.sink_mut();
        sink.clear();
        sink.log(message, Severity::Info);
    }

    fn finish(&mut self, message: &str) -> Frame<K> {
        self.tree.sink_mut().log(message, Severity::Success);
        self.frame()
    }

    fn frame(&mut self) -> Frame<K> {
        Frame {
            log: self.tree.sink_mut().take(),
            snapshot: self.tree.snapshot(),
        }
    }
}

impl<K> Default for Session<K>
where
    K: Ord + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}
