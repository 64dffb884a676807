//! Alpha-beta search with structural pruning.
//!
//! Same roles and terminal rule as [`minimax`](crate::search::minimax::minimax),
//! plus the usual `(alpha, beta)` window. Children are visited in insertion
//! order. When a child closes the window (`beta <= alpha`) the edges to the
//! siblings not yet visited are removed from the tree, so those subtrees are
//! never evaluated and never receive an `alpha_beta_score`.

use tracing::trace;

use crate::tree::game_tree::{GameTree, NodeId};

/// Backed-up value of `node` under the window `(alpha, beta)`.
///
/// Call with `f64::NEG_INFINITY` / `f64::INFINITY` at the root to get the
/// same value [`minimax`](crate::search::minimax::minimax) returns.
/// Panics if `node` does not belong to `tree`.
pub fn alpha_beta(
    tree: &mut GameTree,
    node: NodeId,
    depth: usize,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
) -> f64 {
    if depth == 0 || tree.is_leaf(node) {
        return tree.node(node).static_score();
    }

    let children = tree.child_ids(node);
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for (visited, child) in children.iter().enumerate() {
        let value = alpha_beta(tree, *child, depth - 1, alpha, beta, !maximizing);

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }
        tree.node_mut(*child).alpha_beta_score = Some(value);

        if beta <= alpha {
            let pruned = tree.truncate_children(node, visited + 1);
            if pruned > 0 {
                trace!(node = %node, pruned, alpha, beta, "cutoff");
            }
            break;
        }
    }

    best
}
