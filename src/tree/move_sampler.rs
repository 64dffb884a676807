//! Branching-factor control.
//!
//! A sampler picks at most `limit` legal moves to expand from a position. The
//! default sampler shuffles the legal moves so repeated builds explore
//! different lines; a seeded sampler makes builds reproducible and
//! `OrderedSampler` keeps the generator's own order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::move_rules::{Move, MoveRules};
use crate::board::position::Position;

pub const DEFAULT_BRANCHING_LIMIT: usize = 3;

pub trait MoveSampler {
    /// Up to `limit` distinct legal moves of `position`. Empty means the
    /// position is terminal.
    fn sample(&mut self, rules: &dyn MoveRules, position: &Position, limit: usize) -> Vec<Move>;
}

impl<T: MoveSampler + ?Sized> MoveSampler for Box<T> {
    fn sample(&mut self, rules: &dyn MoveRules, position: &Position, limit: usize) -> Vec<Move> {
        (**self).sample(rules, position, limit)
    }
}

/// Uniform random permutation, truncated to `limit`.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSampler for RandomSampler {
    fn sample(&mut self, rules: &dyn MoveRules, position: &Position, limit: usize) -> Vec<Move> {
        let mut moves = rules.legal_moves(position);
        moves.shuffle(&mut self.rng);
        moves.truncate(limit);
        moves
    }
}

/// First `limit` moves in generation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedSampler;

impl MoveSampler for OrderedSampler {
    fn sample(&mut self, rules: &dyn MoveRules, position: &Position, limit: usize) -> Vec<Move> {
        let mut moves = rules.legal_moves(position);
        moves.truncate(limit);
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveSampler, OrderedSampler, RandomSampler, DEFAULT_BRANCHING_LIMIT};
    use crate::board::move_rules::ChessRules;
    use crate::board::position::Position;

    #[test]
    fn random_sampler_respects_limit_without_repeats() {
        let mut sampler = RandomSampler::seeded(7);
        let start = Position::startpos();
        for _ in 0..20 {
            let moves = sampler.sample(&ChessRules, &start, DEFAULT_BRANCHING_LIMIT);
            assert_eq!(moves.len(), DEFAULT_BRANCHING_LIMIT);
            for (i, a) in moves.iter().enumerate() {
                assert!(moves[i + 1..].iter().all(|b| b != a), "move sampled twice");
            }
            assert!(moves.iter().all(|mv| start.is_legal(*mv)));
        }
    }

    #[test]
    fn sampler_returns_everything_when_fewer_moves_than_limit() {
        // Lone kings in the corner: three king moves.
        let pos = Position::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mut sampler = RandomSampler::seeded(1);
        assert_eq!(sampler.sample(&ChessRules, &pos, 10).len(), 3);
    }

    #[test]
    fn sampler_returns_nothing_for_terminal_position() {
        let mated =
            Position::from_fen("6k1/6Q1/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(RandomSampler::seeded(3)
            .sample(&ChessRules, &mated, 3)
            .is_empty());
        assert!(OrderedSampler.sample(&ChessRules, &mated, 3).is_empty());
    }

    #[test]
    fn seeded_samplers_agree() {
        let start = Position::startpos();
        let a = RandomSampler::seeded(42).sample(&ChessRules, &start, 3);
        let b = RandomSampler::seeded(42).sample(&ChessRules, &start, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn ordered_sampler_is_prefix_of_generation_order() {
        let start = Position::startpos();
        let all = start.legal_moves();
        let sampled = OrderedSampler.sample(&ChessRules, &start, 3);
        assert_eq!(sampled.as_slice(), &all[..3]);
    }
}
