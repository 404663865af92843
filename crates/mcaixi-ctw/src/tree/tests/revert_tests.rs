use crate::tree::{context_tree::ContextTree, error::ModelError, symbol::Symbol};

use super::snapshots_match;

use Symbol::{One, Zero};

#[test]
fn revert_beyond_history_fails_without_mutating() {
    let mut tree = ContextTree::new(2);
    tree.update(&[One, Zero, One]);
    let before = tree.snapshot();

    let err = tree.revert(4).expect_err("only three symbols to revert");
    assert_eq!(
        err,
        ModelError::RevertBeyondHistory {
            requested: 4,
            available: 3
        }
    );
    assert_eq!(tree.snapshot(), before);

    let err = tree
        .revert_history(10)
        .expect_err("only three symbols to drop");
    assert!(matches!(err, ModelError::RevertBeyondHistory { requested: 10, .. }));
    assert_eq!(tree.history_len(), 3);
}

#[test]
fn revert_prunes_contexts_that_are_no_longer_visited() {
    let mut tree = ContextTree::new(3);
    tree.update(&[One, One]);
    let size_before = tree.size();

    tree.update(&[Zero, Zero, One]);
    assert!(tree.size() > size_before);

    tree.revert(3).expect("five symbols in history");
    assert_eq!(tree.size(), size_before);
    assert_eq!(tree.history(), &[One, One]);
}

#[test]
fn reverting_everything_leaves_a_lone_root() {
    let mut tree = ContextTree::new(4);
    tree.update(&[One, Zero, Zero, One, One, Zero]);
    tree.revert(6).expect("six symbols in history");

    assert_eq!(tree.size(), 1);
    assert_eq!(tree.history_len(), 0);
    assert!(tree.root_log_probability().abs() < 1e-12);
}

#[test]
fn history_only_updates_shape_context_but_are_not_learned() {
    let mut tree = ContextTree::new(2);
    tree.update(&[One]);
    let learned = tree.snapshot();

    tree.update_history(&[Zero, Zero]);
    let after_history = tree.snapshot();
    assert_eq!(after_history.nodes, learned.nodes);
    assert_eq!(after_history.history_len, 3);

    // The next learned symbol is attributed to the context `0 0`.
    tree.update(&[One]);
    let contexts: Vec<_> = tree
        .snapshot()
        .nodes
        .into_iter()
        .map(|node| node.context)
        .collect();
    assert!(contexts.contains(&vec![Zero, Zero]));

    tree.revert(1).expect("four symbols in history");
    tree.revert_history(2).expect("three symbols in history");
    assert!(snapshots_match(&tree.snapshot(), &learned, 1e-12));
    assert_eq!(tree.history(), &[One]);
}

#[test]
fn clear_forgets_nodes_and_history() {
    let mut tree = ContextTree::new(3);
    tree.update(&[One, Zero, One, One]);
    tree.clear();

    assert_eq!(tree.size(), 1);
    assert_eq!(tree.history_len(), 0);
    assert_eq!(tree.depth(), 3);
    assert!((tree.predict(&[One]) - 0.5).abs() < 1e-12);
}
