//! Per-position index of every legal move for the side to move.
//!
//! Built once per ply from scratch and never patched. Moves are keyed by
//! start square, then end square, so a `(start, end)` pair identifies at most
//! one movement. Promotions appear once per destination with no piece elected.

use std::collections::BTreeMap;

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::move_generator::{legal_moves_for_piece, MoveGenResult};
use crate::moves::movement::Movement;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveIndex {
    moves_by_square: BTreeMap<Square, BTreeMap<Square, Movement>>,
}

impl LegalMoveIndex {
    /// Enumerate the legal moves of every piece belonging to the side to move.
    /// Squares whose piece has no legal move are left out.
    pub fn compute(board: &Board, conditions: &GameConditions) -> MoveGenResult<Self> {
        let mut moves_by_square = BTreeMap::new();

        for (square, piece) in board.pieces() {
            if piece.side != conditions.side_to_move {
                continue;
            }
            let moves = legal_moves_for_piece(piece, board, conditions, square)?;
            if moves.is_empty() {
                continue;
            }
            let by_end: BTreeMap<Square, Movement> =
                moves.into_iter().map(|movement| (movement.end, movement)).collect();
            moves_by_square.insert(square, by_end);
        }

        let index = Self { moves_by_square };
        trace!(
            side = ?conditions.side_to_move,
            legal_moves = index.len(),
            "legal move index rebuilt"
        );
        Ok(index)
    }

    pub fn get(&self, start: Square, end: Square) -> Option<&Movement> {
        self.moves_by_square.get(&start)?.get(&end)
    }

    /// Legal moves of the piece on `start`, ordered by destination.
    pub fn moves_from(&self, start: Square) -> impl Iterator<Item = &Movement> + '_ {
        self.moves_by_square
            .get(&start)
            .into_iter()
            .flat_map(|by_end| by_end.values())
    }

    /// Squares holding a piece with at least one legal move.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.moves_by_square.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movement> + '_ {
        self.moves_by_square.values().flat_map(|by_end| by_end.values())
    }

    /// Total number of legal moves.
    pub fn len(&self) -> usize {
        self.moves_by_square.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.moves_by_square.is_empty()
    }
}
