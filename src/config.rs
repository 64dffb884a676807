//! Search configuration.
//!
//! Every knob has a default, so a JSON file only needs the fields it wants to
//! change. Command-line flags and UCI options are applied on top of whatever
//! the file provides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{SearchError, SearchResult};
use crate::evaluation::evaluator::EvaluatorKind;
use crate::search::tree_search::SearchAlgorithm;
use crate::tree::builder::MAX_TREE_DEPTH;
use crate::tree::move_sampler::DEFAULT_BRANCHING_LIMIT;

pub const DEFAULT_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to expand below the root.
    pub depth: usize,
    /// Children sampled per node.
    pub branching_limit: usize,
    pub algorithm: SearchAlgorithm,
    pub evaluator: EvaluatorKind,
    /// Seed for the move sampler; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            branching_limit: DEFAULT_BRANCHING_LIMIT,
            algorithm: SearchAlgorithm::default(),
            evaluator: EvaluatorKind::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(text: &str) -> SearchResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SearchResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SearchError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> SearchResult<()> {
        if self.depth > MAX_TREE_DEPTH {
            return Err(SearchError::DepthTooLarge {
                requested: self.depth,
                max: MAX_TREE_DEPTH,
            });
        }
        if self.branching_limit == 0 {
            return Err(SearchError::Config(
                "branching_limit must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Apply one named option (UCI `setoption` naming, case-insensitive).
    ///
    /// The update is all-or-nothing: on a parse or validation failure the
    /// config is left untouched. Returns `Ok(false)` for names that are not
    /// search knobs.
    pub fn apply_option(&mut self, name: &str, value: &str) -> SearchResult<bool> {
        let mut next = self.clone();

        if name.eq_ignore_ascii_case("Depth") {
            next.depth = parse_count("Depth", value)?;
        } else if name.eq_ignore_ascii_case("Branching") || name.eq_ignore_ascii_case("BranchingLimit") {
            next.branching_limit = parse_count("Branching", value)?;
        } else if name.eq_ignore_ascii_case("Algorithm") {
            next.algorithm = value.parse::<SearchAlgorithm>().map_err(SearchError::Config)?;
        } else if name.eq_ignore_ascii_case("Evaluator") {
            next.evaluator = value.parse::<EvaluatorKind>().map_err(SearchError::Config)?;
        } else if name.eq_ignore_ascii_case("Seed") {
            next.seed = match value.trim() {
                "" | "none" | "random" => None,
                text => Some(
                    text.parse::<u64>()
                        .map_err(|_| SearchError::Config(format!("invalid Seed value '{value}'")))?,
                ),
            };
        } else {
            return Ok(false);
        }

        next.validate()?;
        *self = next;
        Ok(true)
    }
}

fn parse_count(name: &str, value: &str) -> SearchResult<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| SearchError::Config(format!("invalid {name} value '{value}'")))
}
