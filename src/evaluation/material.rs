//! Material-only baseline evaluator.

use chess::{Color, ALL_SQUARES};

use crate::board::position::Position;
use crate::evaluation::evaluator::Evaluator;
use crate::evaluation::heuristic::HeuristicEvaluator;

/// Sum of piece values, White minus Black, using the same pawn-unit table as
/// [`HeuristicEvaluator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position) -> f64 {
        ALL_SQUARES
            .iter()
            .filter_map(|sq| position.piece_at(*sq))
            .map(|(piece, color)| {
                let value = HeuristicEvaluator::piece_value(piece);
                match color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}
