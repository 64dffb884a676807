//! Depth-bounded game tree construction.
//!
//! The builder plays the opening moves from the initial position, scores the
//! resulting root, then expands every node above the depth bound with the
//! moves chosen by its sampler. Expansion uses an explicit work stack, so
//! construction depth never grows the call stack.

use tracing::debug;

use crate::board::move_rules::{ChessRules, MoveRules};
use crate::board::position::Position;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::evaluation::evaluator::Evaluator;
use crate::tree::game_tree::GameTree;
use crate::tree::move_sampler::{MoveSampler, RandomSampler, DEFAULT_BRANCHING_LIMIT};

/// Deepest tree the builder will construct.
pub const MAX_TREE_DEPTH: usize = 12;

pub struct TreeBuilder<R, E, S> {
    rules: R,
    evaluator: E,
    sampler: S,
    branching_limit: usize,
}

pub type ConfiguredTreeBuilder =
    TreeBuilder<ChessRules, Box<dyn Evaluator + Send + Sync>, RandomSampler>;

impl ConfiguredTreeBuilder {
    /// Standard rules with the configured evaluator, branching limit and
    /// (optionally seeded) random sampler.
    pub fn from_config(config: &SearchConfig) -> Self {
        TreeBuilder::new(
            ChessRules,
            config.evaluator.build(),
            RandomSampler::from_seed(config.seed),
        )
        .with_branching_limit(config.branching_limit)
    }
}

impl<R: MoveRules, E: Evaluator, S: MoveSampler> TreeBuilder<R, E, S> {
    pub fn new(rules: R, evaluator: E, sampler: S) -> Self {
        Self {
            rules,
            evaluator,
            sampler,
            branching_limit: DEFAULT_BRANCHING_LIMIT,
        }
    }

    pub fn with_branching_limit(mut self, branching_limit: usize) -> Self {
        self.branching_limit = branching_limit;
        self
    }

    /// Build from the initial position after `opening_moves` (long algebraic
    /// notation). Fails without returning a partial tree if any opening move
    /// is malformed or illegal where it is played.
    pub fn build<M: AsRef<str>>(
        &mut self,
        opening_moves: &[M],
        depth: usize,
    ) -> SearchResult<GameTree> {
        let root = self.play_opening(Position::startpos(), opening_moves)?;
        self.build_from(root, depth)
    }

    /// Apply `moves` in order starting at `start`.
    pub fn play_opening<M: AsRef<str>>(
        &self,
        start: Position,
        moves: &[M],
    ) -> SearchResult<Position> {
        moves.iter().try_fold(start, |position, text| {
            let mv = self.rules.parse_move(&position, text.as_ref())?;
            Ok(self.rules.apply(&position, mv))
        })
    }

    /// Build a tree rooted at `root`, expanding `depth` plies.
    pub fn build_from(&mut self, root: Position, depth: usize) -> SearchResult<GameTree> {
        if depth > MAX_TREE_DEPTH {
            return Err(SearchError::DepthTooLarge {
                requested: depth,
                max: MAX_TREE_DEPTH,
            });
        }

        let root_score = self.evaluator.evaluate_checked(&root)?;
        let mut tree = GameTree::with_root(root, root_score);
        let mut pending = vec![tree.root()];

        while let Some(id) = pending.pop() {
            let node = tree.node(id);
            if node.ply() >= depth {
                continue;
            }
            let position = *node.position();

            let moves = self
                .sampler
                .sample(&self.rules, &position, self.branching_limit);

            let mut created = Vec::with_capacity(moves.len());
            for mv in moves {
                let child = self.rules.apply(&position, mv);
                let score = self.evaluator.evaluate_checked(&child)?;
                created.push(tree.add_child(id, mv, child, score));
            }
            pending.extend(created.into_iter().rev());
        }

        debug!(
            root = %tree.node(tree.root()).position(),
            depth,
            nodes = tree.len(),
            edges = tree.edge_count(),
            "built game tree"
        );

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::{TreeBuilder, MAX_TREE_DEPTH};
    use crate::board::move_rules::{ChessRules, MoveRules};
    use crate::board::position::Position;
    use crate::errors::SearchError;
    use crate::evaluation::evaluator::Evaluator;
    use crate::evaluation::heuristic::HeuristicEvaluator;
    use crate::tree::move_sampler::{OrderedSampler, RandomSampler};

    const QGD: [&str; 4] = ["d2d4", "d7d5", "c2c4", "e7e6"];

    fn seeded_builder(seed: u64) -> TreeBuilder<ChessRules, HeuristicEvaluator, RandomSampler> {
        TreeBuilder::new(ChessRules, HeuristicEvaluator, RandomSampler::seeded(seed))
    }

    #[test]
    fn tree_has_requested_depth_and_branching_bound() {
        let tree = seeded_builder(11).build(&QGD, 3).expect("build should succeed");

        assert_eq!(tree.depth(), 3);
        assert!(tree.max_out_degree() <= 3);
        // No terminal positions this early, so the tree is full.
        assert_eq!(tree.len(), 1 + 3 + 9 + 27);
        assert_eq!(tree.edge_count(), tree.len() - 1);
    }

    #[test]
    fn root_is_position_after_opening() {
        let tree = seeded_builder(1).build(&QGD, 1).expect("build should succeed");
        let expected = Position::from_fen(
            "rnbqkbnr/ppp2ppp/4p3/3p4/2PP4/8/PP2PPPP/RNBQKBNR w KQkq - 0 3",
        )
        .expect("FEN should parse");
        assert_eq!(*tree.node(tree.root()).position(), expected);
    }

    #[test]
    fn depth_zero_yields_single_leaf() {
        let tree = seeded_builder(1).build(&QGD, 0).expect("build should succeed");
        assert_eq!(tree.len(), 1);
        assert!(tree.is_leaf(tree.root()));
    }

    #[test]
    fn every_node_is_scored_once_and_children_follow_their_move() {
        let tree = seeded_builder(5).build(&["e2e4"], 3).expect("build should succeed");

        for node in tree.nodes() {
            assert_eq!(node.static_score(), HeuristicEvaluator.evaluate(node.position()));
            assert_eq!(node.minimax_score(), None);
            assert_eq!(node.alpha_beta_score(), None);
        }
        for (parent, edge) in tree.edges() {
            let parent_position = tree.node(parent).position();
            assert_eq!(
                *tree.node(edge.child).position(),
                ChessRules.apply(parent_position, edge.mv)
            );
        }
    }

    #[test]
    fn illegal_opening_move_fails_the_build() {
        let err = seeded_builder(1)
            .build(&["e2e4", "e7e4"], 2)
            .expect_err("illegal move must fail");
        assert!(matches!(err, SearchError::IllegalOpeningMove { ref mv, .. } if mv == "e7e4"));

        let err = seeded_builder(1)
            .build(&["castle"], 2)
            .expect_err("bad notation must fail");
        assert!(matches!(err, SearchError::InvalidMoveNotation(_)));
    }

    #[test]
    fn terminal_root_has_no_children() {
        let mated =
            Position::from_fen("6k1/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let tree = seeded_builder(1)
            .build_from(mated, 3)
            .expect("build should succeed");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn too_deep_request_is_rejected() {
        let err = seeded_builder(1)
            .build(&QGD, MAX_TREE_DEPTH + 1)
            .expect_err("depth bound must hold");
        assert!(matches!(err, SearchError::DepthTooLarge { .. }));
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let a = seeded_builder(99).build(&QGD, 2).expect("build should succeed");
        let b = seeded_builder(99).build(&QGD, 2).expect("build should succeed");

        let fens = |tree: &crate::tree::game_tree::GameTree| {
            tree.nodes().map(|n| n.position().fen()).collect::<Vec<_>>()
        };
        assert_eq!(fens(&a), fens(&b));
    }

    #[test]
    fn branching_limit_is_configurable() {
        let tree = TreeBuilder::new(ChessRules, HeuristicEvaluator, OrderedSampler)
            .with_branching_limit(2)
            .build(&QGD, 2)
            .expect("build should succeed");
        assert_eq!(tree.len(), 1 + 2 + 4);
        assert_eq!(tree.max_out_degree(), 2);
    }
}
