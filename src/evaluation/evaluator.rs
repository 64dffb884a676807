//! Pluggable static evaluation interface.
//!
//! Tree building delegates position scoring to this trait, so alternate
//! heuristics (or a learned model) can be injected without touching the
//! builder or the searchers. Scores are in pawn units from White's point of
//! view: positive favours White, negative favours Black.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::position::Position;
use crate::errors::{SearchError, SearchResult};
use crate::evaluation::heuristic::HeuristicEvaluator;
use crate::evaluation::material::MaterialEvaluator;

pub trait Evaluator {
    /// Static score of `position`, no lookahead.
    fn evaluate(&self, position: &Position) -> f64;

    /// Like [`Evaluator::evaluate`] but rejects non-finite results.
    fn evaluate_checked(&self, position: &Position) -> SearchResult<f64> {
        let score = self.evaluate(position);
        if score.is_finite() {
            Ok(score)
        } else {
            Err(SearchError::Evaluation(format!(
                "non-finite score {score} for {}",
                position.fen()
            )))
        }
    }
}

impl<T: Evaluator + ?Sized> Evaluator for Box<T> {
    fn evaluate(&self, position: &Position) -> f64 {
        (**self).evaluate(position)
    }
}

impl<T: Evaluator + ?Sized> Evaluator for &T {
    fn evaluate(&self, position: &Position) -> f64 {
        (**self).evaluate(position)
    }
}

/// Evaluator selection by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
    Material,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator + Send + Sync> {
        match self {
            EvaluatorKind::Heuristic => Box::new(HeuristicEvaluator),
            EvaluatorKind::Material => Box::new(MaterialEvaluator),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(EvaluatorKind::Heuristic),
            "material" => Ok(EvaluatorKind::Material),
            other => Err(format!("unknown evaluator '{other}'")),
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluatorKind::Heuristic => write!(f, "heuristic"),
            EvaluatorKind::Material => write!(f, "material"),
        }
    }
}
