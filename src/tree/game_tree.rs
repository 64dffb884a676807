//! Arena-backed game tree.
//!
//! Nodes live in a single append-only `Vec` and are addressed by `NodeId`,
//! which is simply the slot index (the root is slot 0). Edges are stored per
//! parent in insertion order, which is also the order the searchers visit
//! them. Pruning removes edges only; disconnected nodes stay in the arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::move_rules::Move;
use crate::board::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    id: NodeId,
    position: Position,
    static_score: f64,
    ply: usize,
    pub(crate) minimax_score: Option<f64>,
    pub(crate) alpha_beta_score: Option<f64>,
}

impl TreeNode {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Evaluator output recorded when the node was created.
    #[inline]
    pub fn static_score(&self) -> f64 {
        self.static_score
    }

    /// Distance from the root in plies.
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline]
    pub fn minimax_score(&self) -> Option<f64> {
        self.minimax_score
    }

    #[inline]
    pub fn alpha_beta_score(&self) -> Option<f64> {
        self.alpha_beta_score
    }
}

/// Directed edge to a child, labelled with the move that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub child: NodeId,
    pub mv: Move,
}

#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    children: Vec<Vec<Edge>>,
}

impl GameTree {
    pub fn with_root(position: Position, static_score: f64) -> Self {
        Self {
            nodes: vec![TreeNode {
                id: NodeId::ROOT,
                position,
                static_score,
                ply: 0,
                minimax_score: None,
                alpha_beta_score: None,
            }],
            children: vec![Vec::new()],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Append a child of `parent` reached by `mv`.
    ///
    /// A parent holds at most one edge per move: if `mv` is already present
    /// the existing child is returned and nothing is added.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        mv: Move,
        position: Position,
        static_score: f64,
    ) -> NodeId {
        if let Some(edge) = self.children[parent.index()].iter().find(|e| e.mv == mv) {
            return edge.child;
        }

        let id = NodeId(self.nodes.len());
        let ply = self.nodes[parent.index()].ply + 1;
        self.nodes.push(TreeNode {
            id,
            position,
            static_score,
            ply,
            minimax_score: None,
            alpha_beta_score: None,
        });
        self.children.push(Vec::new());
        self.children[parent.index()].push(Edge { child: id, mv });
        id
    }

    /// Panics if `id` does not belong to this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Number of nodes in the arena, including disconnected ones.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[Edge] {
        &self.children[id.index()]
    }

    /// Fixed-order copy of the child ids, safe to iterate while the live
    /// edge set changes.
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children[id.index()].iter().map(|e| e.child).collect()
    }

    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children[id.index()].is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.children
            .iter()
            .enumerate()
            .flat_map(|(parent, edges)| edges.iter().map(move |e| (NodeId(parent), e)))
    }

    pub fn edge_count(&self) -> usize {
        self.children.iter().map(Vec::len).sum()
    }

    pub fn edge_between(&self, parent: NodeId, child: NodeId) -> Option<&Edge> {
        self.children
            .get(parent.index())?
            .iter()
            .find(|e| e.child == child)
    }

    /// Drop every edge of `parent` after the first `keep`. Returns the
    /// number of edges removed.
    pub(crate) fn truncate_children(&mut self, parent: NodeId, keep: usize) -> usize {
        let edges = &mut self.children[parent.index()];
        let removed = edges.len().saturating_sub(keep);
        edges.truncate(keep);
        removed
    }

    /// Nodes reachable from the root, in depth-first pre-order.
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            for edge in self.children(id).iter().rev() {
                stack.push(edge.child);
            }
        }
        order
    }

    /// Longest root-to-leaf path, in edges, over the reachable tree.
    pub fn depth(&self) -> usize {
        self.reachable()
            .into_iter()
            .map(|id| self.node(id).ply)
            .max()
            .unwrap_or(0)
    }

    pub fn max_out_degree(&self) -> usize {
        self.children.iter().map(Vec::len).max().unwrap_or(0)
    }
}
