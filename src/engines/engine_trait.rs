//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so different move
//! pickers can be selected at runtime behind a single trait interface.

use crate::board::move_rules::Move;
use crate::board::position::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    /// Plies to search; `None` keeps the engine's configured depth.
    pub depth: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "gametree_chess"
    }

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn choose_move(
        &mut self,
        position: &Position,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
