//! Crate root module declarations for the game-tree chess search engine.
//!
//! Exposes the board adapter, static evaluation, tree construction, the
//! minimax and alpha-beta searchers, engines, the UCI front-end and
//! rendering helpers so the binary, tests and benches share stable paths.

pub mod board {
    pub mod move_rules;
    pub mod position;
}

pub mod evaluation {
    pub mod evaluator;
    pub mod heuristic;
    pub mod material;
}

pub mod tree {
    pub mod builder;
    pub mod game_tree;
    pub mod move_sampler;
    pub mod snapshot;
}

pub mod search {
    pub mod alpha_beta;
    pub mod minimax;
    #[cfg(test)]
    pub(crate) mod test_trees;
    pub mod tree_search;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_trait;
    pub mod engine_tree_search;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod render_tree;
}

pub mod config;
pub mod errors;
pub mod logging;
