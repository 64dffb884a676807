//! Five-factor hand-written evaluation.
//!
//! The score is a plain sum of material, mobility, pawn structure, piece
//! placement and king shelter. Each factor is signed from White's point of
//! view and every penalty reduces the owning side's score, so the function is
//! antisymmetric under colour mirroring.

use chess::{Color, Piece};

use crate::board::position::{square_at, Position};
use crate::evaluation::evaluator::Evaluator;

pub const MOBILITY_WEIGHT: f64 = 0.1;
pub const ISOLATED_PAWN_PENALTY: f64 = 0.5;
pub const DOUBLED_PAWN_PENALTY: f64 = 0.25;
pub const CENTER_BONUS: f64 = 0.5;
pub const ADVANCED_PAWN_BONUS: f64 = 0.2;
pub const KING_SHELTER_PENALTY: f64 = 1.0;

/// d4, d5, e4, e5 as (file, rank).
const CENTER_SQUARES: [(usize, usize); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

type Grid = [[Option<(Piece, Color)>; 8]; 8];

/// Per-factor scores; `total` is what the evaluator returns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalBreakdown {
    pub material: f64,
    pub mobility: f64,
    pub pawn_structure: f64,
    pub positional: f64,
    pub king_safety: f64,
}

impl EvalBreakdown {
    pub fn total(&self) -> f64 {
        self.material + self.mobility + self.pawn_structure + self.positional + self.king_safety
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicEvaluator;

impl HeuristicEvaluator {
    #[inline]
    pub const fn piece_value(piece: Piece) -> f64 {
        match piece {
            Piece::Pawn => 1.0,
            Piece::Knight => 3.0,
            Piece::Bishop => 3.0,
            Piece::Rook => 5.0,
            Piece::Queen => 9.0,
            Piece::King => 0.0,
        }
    }

    pub fn breakdown(&self, position: &Position) -> EvalBreakdown {
        let grid = piece_grid(position);
        EvalBreakdown {
            material: material(&grid),
            mobility: mobility(position),
            pawn_structure: pawn_structure(&grid),
            positional: positional(&grid),
            king_safety: king_safety(position, &grid),
        }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, position: &Position) -> f64 {
        self.breakdown(position).total()
    }
}

#[inline]
fn sign(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

/// Board as `grid[file][rank]`.
fn piece_grid(position: &Position) -> Grid {
    let mut grid = [[None; 8]; 8];
    for (file, column) in grid.iter_mut().enumerate() {
        for (rank, cell) in column.iter_mut().enumerate() {
            *cell = position.piece_at(square_at(file, rank));
        }
    }
    grid
}

fn occupied(grid: &Grid) -> impl Iterator<Item = (usize, usize, Piece, Color)> + '_ {
    grid.iter().enumerate().flat_map(|(file, column)| {
        column
            .iter()
            .enumerate()
            .filter_map(move |(rank, cell)| cell.map(|(piece, color)| (file, rank, piece, color)))
    })
}

#[inline]
fn is_pawn_of(grid: &Grid, file: usize, rank: usize, color: Color) -> bool {
    grid[file][rank] == Some((Piece::Pawn, color))
}

fn material(grid: &Grid) -> f64 {
    occupied(grid)
        .map(|(_, _, piece, color)| sign(color) * HeuristicEvaluator::piece_value(piece))
        .sum()
}

fn mobility(position: &Position) -> f64 {
    let to_move = position.legal_move_count() as f64;
    let waiting = position.opponent_move_count() as f64;
    let (white, black) = match position.side_to_move() {
        Color::White => (to_move, waiting),
        Color::Black => (waiting, to_move),
    };
    MOBILITY_WEIGHT * (white - black)
}

fn pawn_structure(grid: &Grid) -> f64 {
    let mut score = 0.0;

    for (file, _, piece, color) in occupied(grid) {
        if piece != Piece::Pawn {
            continue;
        }

        let has_neighbour = [file.checked_sub(1), Some(file + 1)]
            .into_iter()
            .flatten()
            .filter(|f| *f < 8)
            .any(|f| (0..8).any(|r| is_pawn_of(grid, f, r, color)));
        if !has_neighbour {
            score -= sign(color) * ISOLATED_PAWN_PENALTY;
        }

        let same_file = (0..8).filter(|r| is_pawn_of(grid, file, *r, color)).count();
        if same_file > 1 {
            score -= sign(color) * DOUBLED_PAWN_PENALTY;
        }
    }

    score
}

fn positional(grid: &Grid) -> f64 {
    let mut score = 0.0;

    for (file, rank, piece, color) in occupied(grid) {
        if CENTER_SQUARES.contains(&(file, rank)) {
            score += sign(color) * CENTER_BONUS;
        }

        if piece == Piece::Pawn {
            let advanced = match color {
                Color::White => rank >= 4,
                Color::Black => rank <= 3,
            };
            if advanced {
                score += sign(color) * ADVANCED_PAWN_BONUS;
            }
        }
    }

    score
}

fn king_safety(position: &Position, grid: &Grid) -> f64 {
    let mut score = 0.0;

    for color in [Color::White, Color::Black] {
        let king = position.king_square(color);
        let file = king.get_file().to_index();
        let rank = king.get_rank().to_index();

        let shelter_rank = match color {
            Color::White => Some(rank + 1).filter(|r| *r < 8),
            Color::Black => rank.checked_sub(1),
        };

        let cover = shelter_rank.map_or(0, |r| {
            [file.checked_sub(1), Some(file), Some(file + 1)]
                .into_iter()
                .flatten()
                .filter(|f| *f < 8)
                .filter(|f| is_pawn_of(grid, *f, r, color))
                .count()
        });

        if cover < 2 {
            score -= sign(color) * KING_SHELTER_PENALTY;
        }
    }

    score
}
