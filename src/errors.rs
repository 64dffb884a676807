//! Errors used throughout the tree-search engine.
//!
//! `SearchError` is the single error type returned by position parsing, tree
//! building and the searchers. None of these failures are transient: there
//! is no I/O in the core, so callers never retry, they report.
//!
//! Usage guidelines:
//! - Input problems (`InvalidFen`, `InvalidMoveNotation`, `IllegalOpeningMove`,
//!   `DepthTooLarge`, `Config`) are suitable for presenting to end users.
//! - `Serialization` comes from exporting a tree snapshot.
//! - `EmptySearch` means the root has no children, so there is no move to
//!   report. Front-ends print a null move rather than inventing one.
//! - `Evaluation` indicates a bug in an evaluator and is not expected for
//!   positions produced by legal play.

use thiserror::Error;

/// Unified error type for building and searching game trees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// An opening move was well-formed but not legal where it was applied.
    ///
    /// Payload: the offending move text and the FEN it was applied to.
    #[error("illegal opening move {mv} in position {fen}")]
    IllegalOpeningMove { mv: String, fen: String },

    /// A move string could not be read as long algebraic notation.
    #[error("invalid move notation: {0}")]
    InvalidMoveNotation(String),

    /// A FEN string could not be parsed into a legal position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// An evaluator produced a value it should never produce.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// The search root has no children so no best move exists.
    #[error("no move available: search root has no children")]
    EmptySearch,

    /// A tree deeper than the supported bound was requested.
    #[error("requested depth {requested} exceeds maximum {max}")]
    DepthTooLarge { requested: usize, max: usize },

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A tree snapshot could not be written out.
    #[error("failed to serialize tree: {0}")]
    Serialization(String),
}

/// Result alias for tree-search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::SearchError;

    #[test]
    fn messages_carry_context() {
        let err = SearchError::IllegalOpeningMove {
            mv: "e2e5".to_owned(),
            fen: "startpos".to_owned(),
        };
        assert_eq!(err.to_string(), "illegal opening move e2e5 in position startpos");

        let err = SearchError::DepthTooLarge {
            requested: 40,
            max: 12,
        };
        assert_eq!(err.to_string(), "requested depth 40 exceeds maximum 12");

        let err = SearchError::Serialization("key must be a string".to_owned());
        assert_eq!(err.to_string(), "failed to serialize tree: key must be a string");
    }
}
