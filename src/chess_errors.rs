//! Errors used throughout the rules engine.
//!
//! `ChessError` covers caller contract violations only: touching a square off
//! the board, moving from an empty square, executing a promotion whose piece
//! was never elected, or handing the parsers malformed text. Illegal moves are
//! not errors; the game reports them as `Ok(false)` so they stay cheap to
//! reject.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};

/// Unified error type for the rules engine.
///
/// Every variant indicates a bug or bad input in the caller rather than a
/// chess-rules outcome, so callers are not expected to recover from the
/// board-level variants during normal play.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A square outside `a1..=h8` (including `Square::INVALID`) was read or written.
    #[error("square out of range: {0:?}")]
    SquareOutOfRange(Square),

    /// A move was applied from a square that holds no piece.
    #[error("no piece was found at {0}")]
    NoPieceAtSquare(Square),

    /// A promotion move was executed before its promotion piece was elected.
    #[error("promotion from {start} to {end} has no elected promotion piece")]
    PromotionPieceNotElected { start: Square, end: Square },

    /// Pawns and kings cannot be elected as promotion pieces.
    #[error("{0:?} is not a valid promotion piece")]
    InvalidPromotionPiece(PieceKind),

    /// A castling move referenced a rook square that holds no rook of the mover.
    #[error("no castling rook was found at {0}")]
    CastlingRookMissing(Square),

    /// The FEN string could not be interpreted.
    ///
    /// Payload: a short reason naming the offending field.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square or move in algebraic notation could not be parsed.
    #[error("invalid algebraic text: {0}")]
    InvalidAlgebraic(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
