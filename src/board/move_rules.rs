//! Move-generation collaborator seam.
//!
//! Tree building only needs three things from the rules of chess: the legal
//! moves of a position, the position after a move, and whether a position is
//! terminal. `MoveRules` captures exactly that so the builder never depends
//! on a concrete move generator.

use chess::{ChessMove, Piece};

use crate::board::position::{square_at, Position};
use crate::errors::{SearchError, SearchResult};

pub type Move = ChessMove;

pub trait MoveRules {
    fn legal_moves(&self, position: &Position) -> Vec<Move>;

    /// Position after `mv`. The input snapshot is left untouched.
    fn apply(&self, position: &Position, mv: Move) -> Position;

    fn is_terminal(&self, position: &Position) -> bool {
        self.legal_moves(position).is_empty()
    }

    /// Parse long algebraic notation (`e2e4`, `e7e8q`) and check it is legal
    /// in `position`.
    fn parse_move(&self, position: &Position, text: &str) -> SearchResult<Move>;
}

impl<T: MoveRules + ?Sized> MoveRules for Box<T> {
    fn legal_moves(&self, position: &Position) -> Vec<Move> {
        (**self).legal_moves(position)
    }

    fn apply(&self, position: &Position, mv: Move) -> Position {
        (**self).apply(position, mv)
    }

    fn is_terminal(&self, position: &Position) -> bool {
        (**self).is_terminal(position)
    }

    fn parse_move(&self, position: &Position, text: &str) -> SearchResult<Move> {
        (**self).parse_move(position, text)
    }
}

/// Standard chess rules backed by the `chess` crate's legal move generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl MoveRules for ChessRules {
    fn legal_moves(&self, position: &Position) -> Vec<Move> {
        position.legal_moves()
    }

    fn apply(&self, position: &Position, mv: Move) -> Position {
        position.apply(mv)
    }

    fn is_terminal(&self, position: &Position) -> bool {
        position.is_terminal()
    }

    fn parse_move(&self, position: &Position, text: &str) -> SearchResult<Move> {
        let mv = long_algebraic_to_move(text)?;
        if !position.is_legal(mv) {
            return Err(SearchError::IllegalOpeningMove {
                mv: text.to_owned(),
                fen: position.fen(),
            });
        }
        Ok(mv)
    }
}

/// Parse a move in long algebraic notation without checking legality.
pub fn long_algebraic_to_move(text: &str) -> SearchResult<Move> {
    let bytes = text.trim().as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(SearchError::InvalidMoveNotation(text.to_owned()));
    }

    let square = |file: u8, rank: u8| {
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SearchError::InvalidMoveNotation(text.to_owned()));
        }
        Ok(square_at(usize::from(file - b'a'), usize::from(rank - b'1')))
    };

    let from = square(bytes[0], bytes[1])?;
    let to = square(bytes[2], bytes[3])?;

    let promotion = match bytes.get(4) {
        None => None,
        Some(b'q') => Some(Piece::Queen),
        Some(b'r') => Some(Piece::Rook),
        Some(b'b') => Some(Piece::Bishop),
        Some(b'n') => Some(Piece::Knight),
        Some(_) => return Err(SearchError::InvalidMoveNotation(text.to_owned())),
    };

    Ok(ChessMove::new(from, to, promotion))
}

/// Render a move in long algebraic notation; the inverse of
/// [`long_algebraic_to_move`].
pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_to_long_algebraic, ChessRules, MoveRules};
    use crate::board::position::Position;
    use crate::errors::SearchError;

    #[test]
    fn parses_and_renders_long_algebraic() {
        for text in ["e2e4", "g1f3", "e7e8q", "a7a8n"] {
            let mv = long_algebraic_to_move(text).expect("notation should parse");
            assert_eq!(move_to_long_algebraic(mv), text);
        }
    }

    #[test]
    fn rejects_malformed_notation() {
        for text in ["", "e2", "e2e9", "i2e4", "e7e8k", "e2e4e5"] {
            assert!(matches!(
                long_algebraic_to_move(text),
                Err(SearchError::InvalidMoveNotation(_))
            ));
        }
    }

    #[test]
    fn parse_move_rejects_illegal_move() {
        let rules = ChessRules;
        let start = Position::startpos();
        assert!(rules.parse_move(&start, "e2e4").is_ok());
        assert!(matches!(
            rules.parse_move(&start, "e2e5"),
            Err(SearchError::IllegalOpeningMove { .. })
        ));
    }

    #[test]
    fn start_position_is_not_terminal() {
        let rules = ChessRules;
        let start = Position::startpos();
        assert_eq!(rules.legal_moves(&start).len(), 20);
        assert!(!rules.is_terminal(&start));
    }
}
