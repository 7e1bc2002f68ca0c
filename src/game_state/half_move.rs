use crate::game_state::chess_types::Piece;
use crate::moves::movement::Movement;

/// Record of one executed ply.
///
/// Built in two phases: the capture and check flags are known as soon as the
/// move is applied, the stalemate/checkmate flags only once the opponent's
/// legal moves have been counted. `set_game_end_flags` is called exactly once,
/// before the record is appended to the game's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfMove {
    pub piece: Piece,
    pub movement: Movement,
    pub captured_piece: bool,
    pub caused_check: bool,
    pub caused_stalemate: bool,
    pub caused_checkmate: bool,
}

impl HalfMove {
    pub fn new(piece: Piece, movement: Movement, captured_piece: bool, caused_check: bool) -> Self {
        Self {
            piece,
            movement,
            captured_piece,
            caused_check,
            caused_stalemate: false,
            caused_checkmate: false,
        }
    }

    pub fn set_game_end_flags(&mut self, caused_stalemate: bool, caused_checkmate: bool) {
        self.caused_stalemate = caused_stalemate;
        self.caused_checkmate = caused_checkmate;
    }

    #[inline]
    pub fn ended_game(&self) -> bool {
        self.caused_stalemate || self.caused_checkmate
    }
}
