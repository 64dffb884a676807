//! Immutable position snapshots.
//!
//! `Position` wraps a bitboard `chess::Board` and is `Copy`, so every tree
//! node owns its own snapshot and advancing a position never touches the
//! parent's copy.

use std::fmt;
use std::str::FromStr;

use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_pawn_quiets,
    get_rook_moves, Board, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square,
};

use crate::errors::{SearchError, SearchResult};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
}

impl Position {
    /// The standard initial setup, White to move.
    pub fn startpos() -> Self {
        Self {
            board: Board::default(),
        }
    }

    pub fn from_fen(fen: &str) -> SearchResult<Self> {
        Board::from_str(fen.trim())
            .map(|board| Self { board })
            .map_err(|e| SearchError::InvalidFen(format!("{fen} ({e})")))
    }

    pub fn fen(&self) -> String {
        self.board.to_string()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece, color))
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.board.king_square(color)
    }

    pub fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    pub fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.board).len()
    }

    /// Move count for the side that is *not* to move, measured on the same
    /// placement with the turn handed over.
    ///
    /// When the side to move is in check the hand-over position is not a
    /// valid board, so the waiting side's pseudo-legal moves are counted
    /// from the attack tables instead.
    pub fn opponent_move_count(&self) -> usize {
        match self.board.null_move() {
            Some(swapped) => MoveGen::new_legal(&swapped).len(),
            None => self.pseudo_legal_count(!self.side_to_move()),
        }
    }

    /// Destinations reachable by `color`'s pieces, ignoring pins, checks and
    /// castling. A promotion counts once per promotion piece, as the legal
    /// generator does.
    fn pseudo_legal_count(&self, color: Color) -> usize {
        let own = *self.board.color_combined(color);
        let enemy = *self.board.color_combined(!color);
        let blockers = *self.board.combined();
        let last_rank = match color {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        };

        let mut count = 0;
        for square in own {
            let Some(piece) = self.board.piece_on(square) else {
                continue;
            };
            let targets = match piece {
                Piece::Pawn => {
                    get_pawn_quiets(square, color, blockers) | get_pawn_attacks(square, color, enemy)
                }
                Piece::Knight => get_knight_moves(square) & !own,
                Piece::Bishop => get_bishop_moves(square, blockers) & !own,
                Piece::Rook => get_rook_moves(square, blockers) & !own,
                Piece::Queen => {
                    (get_bishop_moves(square, blockers) | get_rook_moves(square, blockers)) & !own
                }
                Piece::King => get_king_moves(square) & !own,
            };

            if piece == Piece::Pawn {
                count += targets
                    .map(|to| if to.get_rank() == last_rank { 4 } else { 1 })
                    .sum::<usize>();
            } else {
                count += targets.popcnt() as usize;
            }
        }
        count
    }

    /// Advance by a move the caller already knows to be legal.
    #[inline]
    pub fn apply(&self, mv: ChessMove) -> Self {
        Self {
            board: self.board.make_move_new(mv),
        }
    }

    #[inline]
    pub fn is_legal(&self, mv: ChessMove) -> bool {
        self.board.legal(mv)
    }

    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    pub fn is_terminal(&self) -> bool {
        self.board.status() != BoardStatus::Ongoing
    }

    /// Colour-mirrored copy: ranks flipped, piece colours swapped, turn,
    /// castling rights and en-passant square swapped accordingly.
    pub fn mirror(&self) -> SearchResult<Self> {
        let fen = self.fen();
        let mut fields = fen.split_whitespace();
        let placement = fields.next().unwrap_or_default();
        let turn = fields.next().unwrap_or("w");
        let castling = fields.next().unwrap_or("-");
        let en_passant = fields.next().unwrap_or("-");
        let rest = fields.collect::<Vec<_>>().join(" ");

        let mirrored_placement = placement
            .split('/')
            .rev()
            .map(swap_case)
            .collect::<Vec<_>>()
            .join("/");

        let mirrored_turn = if turn == "w" { "b" } else { "w" };

        let mirrored_castling = if castling == "-" {
            "-".to_owned()
        } else {
            let swapped = swap_case(castling);
            "KQkq".chars().filter(|c| swapped.contains(*c)).collect()
        };

        let mirrored_ep = match en_passant.as_bytes() {
            [file, b'3'] => format!("{}6", char::from(*file)),
            [file, b'6'] => format!("{}3", char::from(*file)),
            _ => "-".to_owned(),
        };

        let mirrored = format!(
            "{mirrored_placement} {mirrored_turn} {mirrored_castling} {mirrored_ep} {rest}"
        );
        Self::from_fen(mirrored.trim_end())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen())
    }
}

/// Square from zero-based file and rank (`a1 == (0, 0)`).
#[inline]
pub fn square_at(file: usize, rank: usize) -> Square {
    Square::make_square(Rank::from_index(rank), File::from_index(file))
}

fn swap_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}
