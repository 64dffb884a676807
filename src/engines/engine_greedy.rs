use rand::prelude::IndexedRandom;

use crate::board::position::Position;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::evaluation::evaluator::{Evaluator, EvaluatorKind};

/// One-ply engine: scores every legal reply with the evaluator and plays the
/// best one for the side to move, breaking ties at random.
pub struct GreedyEngine {
    evaluator: Box<dyn Evaluator + Send + Sync>,
}

impl GreedyEngine {
    pub fn new(kind: EvaluatorKind) -> Self {
        Self {
            evaluator: kind.build(),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new(EvaluatorKind::default())
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "GameTree Chess Greedy"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Evaluator") {
            self.evaluator = value.parse::<EvaluatorKind>()?.build();
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        position: &Position,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = position.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {}", depth));
        }

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let white = position.side_to_move() == chess::Color::White;
        let mut best_value = f64::NEG_INFINITY;
        let mut best_moves = Vec::new();

        for mv in legal_moves {
            let score = self
                .evaluator
                .evaluate_checked(&position.apply(mv))
                .map_err(|e| e.to_string())?;
            let value = if white { score } else { -score };

            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        let mut rng = rand::rng();
        let picked = best_moves
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose greedy best move")?;

        out.info_lines.push(format!(
            "info string greedy_engine best_score {:.2}",
            best_value
        ));
        out.best_move = Some(*picked);
        Ok(out)
    }
}
