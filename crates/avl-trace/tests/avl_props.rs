use std::collections::BTreeSet;

use avl_trace::{AvlTree, NoopSink, Recorder, Severity};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Delete(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => (-64i16..64).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..300)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(k) => {
                    prop_assert_eq!(tree.insert(k), model.insert(k));
                }
                Op::Delete(k) => {
                    prop_assert_eq!(tree.delete(&k), model.remove(&k));
                }
            }
            prop_assert_eq!(tree.check(), Ok(()));
        }
        let keys: Vec<i16> = tree.keys().into_iter().copied().collect();
        let want: Vec<i16> = model.into_iter().collect();
        prop_assert_eq!(keys, want);
    }

    #[test]
    fn insert_then_delete_restores_key_set(
        keys in prop::collection::btree_set(0u32..1000, 0..120),
        extra in 0u32..1000,
    ) {
        prop_assume!(!keys.contains(&extra));
        let mut tree = AvlTree::with_sink(NoopSink);
        for &k in &keys {
            tree.insert(k);
        }
        let before: Vec<u32> = tree.keys().into_iter().copied().collect();
        prop_assert!(tree.insert(extra));
        prop_assert!(tree.delete(&extra));
        let after: Vec<u32> = tree.keys().into_iter().copied().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(tree.check(), Ok(()));
    }

    #[test]
    fn duplicates_and_misses_are_silent_noops(
        keys in prop::collection::vec(0i32..200, 1..80),
        miss in 200i32..400,
    ) {
        let mut tree = AvlTree::with_sink(Recorder::new());
        for &k in &keys {
            tree.insert(k);
        }
        let before = tree.snapshot();

        tree.sink_mut().clear();
        prop_assert!(!tree.insert(keys[0]));
        prop_assert_eq!(tree.sink().count(Severity::Warning), 1);
        prop_assert_eq!(tree.sink().entries().len(), 1);

        tree.sink_mut().clear();
        prop_assert!(!tree.delete(&miss));
        prop_assert_eq!(tree.sink().count(Severity::Warning), 1);
        prop_assert_eq!(tree.sink().entries().len(), 1);

        prop_assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn every_imbalance_is_followed_by_a_case(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = AvlTree::with_sink(Recorder::new());
        for op in ops {
            match op {
                Op::Insert(k) => {
                    tree.insert(k);
                }
                Op::Delete(k) => {
                    tree.delete(&k);
                }
            }
        }
        let messages = tree.sink().messages();
        for (i, m) in messages.iter().enumerate() {
            if m.starts_with("IMBALANCE") {
                prop_assert!(messages.get(i + 1).map_or(false, |n| n.starts_with("Case: ")));
            }
        }
    }
}
