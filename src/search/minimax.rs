//! Plain minimax over a built game tree.
//!
//! Scores are White-positive, so the maximizing role is White's and the
//! minimizing role is Black's. Every child visited gets its backed-up value
//! stored in `minimax_score`; the node the call starts from does not.

use crate::tree::game_tree::{GameTree, NodeId};

/// Backed-up value of `node` looking `depth` plies ahead.
///
/// A node at `depth == 0` or without children returns its static score.
/// Panics if `node` does not belong to `tree`.
pub fn minimax(tree: &mut GameTree, node: NodeId, depth: usize, maximizing: bool) -> f64 {
    if depth == 0 || tree.is_leaf(node) {
        return tree.node(node).static_score();
    }

    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for child in tree.child_ids(node) {
        let value = minimax(tree, child, depth - 1, !maximizing);
        tree.node_mut(child).minimax_score = Some(value);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    best
}
