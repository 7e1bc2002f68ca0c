//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and `Square`
//! values, and parses long algebraic move text (e.g., `e7e8q`) into candidate
//! movements for `Game::try_execute_move`.

use std::str::FromStr;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::movement::Movement;

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(format!("square {square}")));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidAlgebraic(format!("file {}", file as char)));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(format!("rank {}", rank as char)));
    }

    Ok(Square::new((file - b'a') as i8 + 1, (rank - b'1') as i8 + 1))
}

/// Convert a square to algebraic notation; `None` for off-board squares.
pub fn square_to_algebraic(square: Square) -> Option<String> {
    square.is_valid().then(|| square.to_string())
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(text)
    }
}

/// Parse long algebraic move text ("e2e4", "e7e8q") into a candidate movement.
///
/// Only start, end and an optional promotion letter are read; the game fills
/// in castling and en-passant details from its legal-move index.
pub fn long_algebraic_to_movement(text: &str) -> ChessResult<Movement> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidAlgebraic(format!("move {text}")));
    }

    let start = algebraic_to_square(&text[0..2])?;
    let end = algebraic_to_square(&text[2..4])?;

    match text[4..].chars().next() {
        None => Ok(Movement::new(start, end)),
        Some(letter) => {
            let piece = PieceKind::from_letter(letter)
                .filter(|kind| kind.is_promotion_choice())
                .ok_or_else(|| ChessError::InvalidAlgebraic(format!("promotion piece {letter}")))?;
            Ok(Movement::with_promotion(start, end, piece))
        }
    }
}
