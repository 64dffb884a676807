//! Hand-shaped trees for search tests.
//!
//! Static scores are given explicitly; positions are real (each child is its
//! parent advanced by the next legal move in generation order) so edges carry
//! genuine, distinct move labels. Ids are assigned in pre-order.

use crate::board::position::Position;
use crate::tree::game_tree::{GameTree, NodeId};

pub(crate) enum Shape {
    Leaf(f64),
    Node(f64, Vec<Shape>),
}

pub(crate) fn leaf(score: f64) -> Shape {
    Shape::Leaf(score)
}

pub(crate) fn node(score: f64, children: Vec<Shape>) -> Shape {
    Shape::Node(score, children)
}

fn score_of(shape: &Shape) -> f64 {
    match shape {
        Shape::Leaf(score) | Shape::Node(score, _) => *score,
    }
}

pub(crate) fn build(shape: &Shape) -> GameTree {
    let mut tree = GameTree::with_root(Position::startpos(), score_of(shape));
    attach(&mut tree, NodeId::ROOT, shape);
    tree
}

fn attach(tree: &mut GameTree, parent: NodeId, shape: &Shape) {
    let Shape::Node(_, children) = shape else {
        return;
    };
    let position = *tree.node(parent).position();
    let moves = position.legal_moves();
    assert!(moves.len() >= children.len(), "test shape too wide");

    for (mv, child_shape) in moves.into_iter().zip(children) {
        let child = tree.add_child(parent, mv, position.apply(mv), score_of(child_shape));
        attach(tree, child, child_shape);
    }
}
