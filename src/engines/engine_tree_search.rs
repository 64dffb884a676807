//! Engine that builds a fresh sampled game tree for every `go` and searches it.

use tracing::info;

use crate::board::position::Position;
use crate::config::SearchConfig;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::SearchError;
use crate::search::tree_search::search_position;

pub struct TreeSearchEngine {
    config: SearchConfig,
}

impl TreeSearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Default for TreeSearchEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Root score in centipawns from the side to move's point of view.
fn score_cp(root_score: f64, white_to_move: bool) -> i64 {
    let cp = (root_score * 100.0).round() as i64;
    if white_to_move {
        cp
    } else {
        -cp
    }
}

impl Engine for TreeSearchEngine {
    fn name(&self) -> &str {
        "GameTree Chess"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        // Unknown options are ignored for UCI compatibility.
        self.config
            .apply_option(name, value)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    fn choose_move(
        &mut self,
        position: &Position,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let mut config = self.config.clone();
        if let Some(depth) = params.depth {
            config.depth = depth;
        }

        let mut out = EngineOutput::default();
        let (tree, outcome) = match search_position(*position, &config) {
            Ok(found) => found,
            Err(SearchError::EmptySearch) => {
                out.info_lines
                    .push("info string tree_search no moves to search".to_owned());
                return Ok(out);
            }
            Err(err) => return Err(err.to_string()),
        };

        info!(
            depth = config.depth,
            nodes = tree.len(),
            pruned = outcome.pruned_edges(),
            best_move = %outcome.best_move,
            "tree search move"
        );

        out.info_lines.push(format!(
            "info depth {} score cp {} nodes {} pv {}",
            config.depth,
            score_cp(outcome.root_score, outcome.maximizing),
            outcome.nodes,
            outcome.best_move
        ));
        out.info_lines.push(format!(
            "info string tree_search algorithm {} pruned_edges {}",
            outcome.algorithm,
            outcome.pruned_edges()
        ));
        out.best_move = Some(outcome.best_move);
        Ok(out)
    }
}
