use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::legal_move_shared::{generate_sliding_moves, mover_side};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::movement::Movement;
use crate::moves::offsets::SURROUNDING_OFFSETS;

pub struct QueenMoveGenerator;

impl MoveGenerator for QueenMoveGenerator {
    fn legal_moves(
        &self,
        board: &Board,
        _conditions: &GameConditions,
        position: Square,
    ) -> MoveGenResult<Vec<Movement>> {
        let side = mover_side(board, position)?;
        let mut out = Vec::with_capacity(27);
        generate_sliding_moves(board, position, side, &SURROUNDING_OFFSETS, &mut out)?;
        Ok(out)
    }
}
