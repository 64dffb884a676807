//! Build-then-search entry points used by engines and the command line.
//!
//! A fresh tree is built for every request, searched from the root with the
//! selected algorithm, and the best move is read off the root's children.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::move_rules::Move;
use crate::board::position::Position;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::search::alpha_beta::alpha_beta;
use crate::search::minimax::minimax;
use crate::tree::builder::ConfiguredTreeBuilder;
use crate::tree::game_tree::{GameTree, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    Minimax,
    #[default]
    AlphaBeta,
    /// Minimax then alpha-beta on the same tree; the alpha-beta decision is
    /// reported and both score fields end up populated.
    Both,
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(SearchAlgorithm::Minimax),
            "alpha-beta" | "alphabeta" | "alpha_beta" | "ab" => Ok(SearchAlgorithm::AlphaBeta),
            "both" => Ok(SearchAlgorithm::Both),
            other => Err(format!("unknown search algorithm '{other}'")),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Minimax => write!(f, "minimax"),
            SearchAlgorithm::AlphaBeta => write!(f, "alpha-beta"),
            SearchAlgorithm::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub algorithm: SearchAlgorithm,
    pub best_move: Move,
    pub best_child: NodeId,
    /// Backed-up value of the root.
    pub root_score: f64,
    /// Whether the root was searched as the maximizing (White) side.
    pub maximizing: bool,
    pub nodes: usize,
    pub edges_before: usize,
    pub edges_after: usize,
}

impl SearchOutcome {
    #[inline]
    pub fn pruned_edges(&self) -> usize {
        self.edges_before - self.edges_after
    }
}

/// First root child, in insertion order, holding the best stored score for
/// the side to move at the root.
///
/// Reads `alpha_beta_score` for [`SearchAlgorithm::AlphaBeta`] and
/// [`SearchAlgorithm::Both`], `minimax_score` otherwise. Children without a
/// score are skipped.
pub fn best_child(tree: &GameTree, algorithm: SearchAlgorithm, maximizing: bool) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;

    for edge in tree.children(tree.root()) {
        let node = tree.node(edge.child);
        let score = match algorithm {
            SearchAlgorithm::Minimax => node.minimax_score(),
            SearchAlgorithm::AlphaBeta | SearchAlgorithm::Both => node.alpha_beta_score(),
        };
        let Some(score) = score else {
            continue;
        };

        let better = match best {
            None => true,
            Some((_, current)) if maximizing => score > current,
            Some((_, current)) => score < current,
        };
        if better {
            best = Some((edge.child, score));
        }
    }

    best.map(|(id, _)| id)
}

/// Search an already built tree from its root, `depth` plies deep.
///
/// The root maximizes when White is to move there and minimizes otherwise.
pub fn search_tree(
    tree: &mut GameTree,
    depth: usize,
    algorithm: SearchAlgorithm,
) -> SearchResult<SearchOutcome> {
    let root = tree.root();
    if tree.is_leaf(root) {
        return Err(SearchError::EmptySearch);
    }

    let maximizing = tree.node(root).position().side_to_move() == chess::Color::White;
    let edges_before = tree.edge_count();

    let root_score = match algorithm {
        SearchAlgorithm::Minimax => minimax(tree, root, depth, maximizing),
        SearchAlgorithm::AlphaBeta => alpha_beta(
            tree,
            root,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing,
        ),
        SearchAlgorithm::Both => {
            let minimax_value = minimax(tree, root, depth, maximizing);
            let alpha_beta_value = alpha_beta(
                tree,
                root,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                maximizing,
            );
            if minimax_value != alpha_beta_value {
                warn!(minimax_value, alpha_beta_value, "searchers disagree on root value");
            }
            alpha_beta_value
        }
    };

    let best = best_child(tree, algorithm, maximizing).ok_or(SearchError::EmptySearch)?;
    let best_move = tree
        .edge_between(root, best)
        .map(|edge| edge.mv)
        .ok_or(SearchError::EmptySearch)?;

    let outcome = SearchOutcome {
        algorithm,
        best_move,
        best_child: best,
        root_score,
        maximizing,
        nodes: tree.len(),
        edges_before,
        edges_after: tree.edge_count(),
    };

    debug!(
        %algorithm,
        best_move = %outcome.best_move,
        root_score,
        pruned = outcome.pruned_edges(),
        "search finished"
    );

    Ok(outcome)
}

/// Build a tree from the initial position after `opening_moves` and search
/// it with the configured depth and algorithm.
///
/// The tree is returned alongside the outcome for inspection.
pub fn build_and_search<M: AsRef<str>>(
    opening_moves: &[M],
    config: &SearchConfig,
) -> SearchResult<(GameTree, SearchOutcome)> {
    config.validate()?;
    let mut builder = ConfiguredTreeBuilder::from_config(config);
    let mut tree = builder.build(opening_moves, config.depth)?;
    let outcome = search_tree(&mut tree, config.depth, config.algorithm)?;
    Ok((tree, outcome))
}

/// Same as [`build_and_search`] but rooted at an arbitrary position.
pub fn search_position(
    position: Position,
    config: &SearchConfig,
) -> SearchResult<(GameTree, SearchOutcome)> {
    config.validate()?;
    let mut builder = ConfiguredTreeBuilder::from_config(config);
    let mut tree = builder.build_from(position, config.depth)?;
    let outcome = search_tree(&mut tree, config.depth, config.algorithm)?;
    Ok((tree, outcome))
}
