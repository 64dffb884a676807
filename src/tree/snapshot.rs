//! Read-only, serializable view of a game tree.
//!
//! Only the part of the tree still reachable from the root is captured, so
//! subtrees cut by alpha-beta do not show up.

use serde::Serialize;

use crate::board::move_rules::move_to_long_algebraic;
use crate::errors::{SearchError, SearchResult};
use crate::tree::game_tree::{GameTree, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub fen: String,
    pub ply: usize,
    pub static_score: f64,
    pub minimax_score: Option<f64>,
    pub alpha_beta_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSnapshot {
    pub parent: NodeId,
    pub child: NodeId,
    #[serde(rename = "move")]
    pub mv: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSnapshot {
    pub root: NodeId,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl TreeSnapshot {
    pub fn capture(tree: &GameTree) -> Self {
        let order = tree.reachable();
        let mut nodes = Vec::with_capacity(order.len());
        let mut edges = Vec::with_capacity(order.len().saturating_sub(1));

        for id in order {
            let node = tree.node(id);
            nodes.push(NodeSnapshot {
                id,
                fen: node.position().fen(),
                ply: node.ply(),
                static_score: node.static_score(),
                minimax_score: node.minimax_score(),
                alpha_beta_score: node.alpha_beta_score(),
            });
            edges.extend(tree.children(id).iter().map(|edge| EdgeSnapshot {
                parent: id,
                child: edge.child,
                mv: move_to_long_algebraic(edge.mv),
            }));
        }

        Self {
            root: tree.root(),
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> SearchResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }
}
