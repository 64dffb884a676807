//! Terminal-oriented renderers for positions and game trees.
//!
//! Used by the `tree` subcommand and handy when debugging search tests.

use std::fmt::Write;

use chess::{Color, Piece};

use crate::board::position::{square_at, Position};
use crate::tree::game_tree::GameTree;

/// Render the board to a Unicode string, White at the bottom.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8).rev() {
        out.push(char::from(b'1' + rank as u8));
        out.push(' ');

        for file in 0..8 {
            match position.piece_at(square_at(file, rank)) {
                Some((piece, color)) => out.push(piece_to_unicode(color, piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank as u8));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Render the reachable tree as an indented forest, one node per line:
///
/// ```text
/// #0 root static=0.00
///   #1 e2e4 static=0.40 minimax=0.10 alpha-beta=0.10
/// ```
pub fn render_forest(tree: &GameTree) -> String {
    let mut out = String::new();
    let mut stack = vec![(tree.root(), None::<String>)];

    while let Some((id, incoming)) = stack.pop() {
        let node = tree.node(id);
        let indent = "  ".repeat(node.ply());
        let label = incoming.as_deref().unwrap_or("root");
        let _ = write!(out, "{indent}#{id} {label} static={:.2}", node.static_score());
        if let Some(score) = node.minimax_score() {
            let _ = write!(out, " minimax={score:.2}");
        }
        if let Some(score) = node.alpha_beta_score() {
            let _ = write!(out, " alpha-beta={score:.2}");
        }
        out.push('\n');

        for edge in tree.children(id).iter().rev() {
            stack.push((edge.child, Some(edge.mv.to_string())));
        }
    }

    out
}

fn piece_to_unicode(color: Color, piece: Piece) -> char {
    match (color, piece) {
        (Color::White, Piece::Pawn) => '♙',
        (Color::White, Piece::Knight) => '♘',
        (Color::White, Piece::Bishop) => '♗',
        (Color::White, Piece::Rook) => '♖',
        (Color::White, Piece::Queen) => '♕',
        (Color::White, Piece::King) => '♔',
        (Color::Black, Piece::Pawn) => '♟',
        (Color::Black, Piece::Knight) => '♞',
        (Color::Black, Piece::Bishop) => '♝',
        (Color::Black, Piece::Rook) => '♜',
        (Color::Black, Piece::Queen) => '♛',
        (Color::Black, Piece::King) => '♚',
    }
}
