use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};
use crate::move_generation::legal_move_checks::move_obeys_rules;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::movement::Movement;

/// Owner of the piece a generator was asked to move.
#[inline]
pub fn mover_side(board: &Board, position: Square) -> MoveGenResult<Side> {
    board
        .get(position)?
        .map(|piece| piece.side)
        .ok_or(ChessError::NoPieceAtSquare(position))
}

/// Push `movement` if it does not leave `side`'s king in check.
#[inline]
pub fn push_if_legal(
    board: &Board,
    movement: Movement,
    side: Side,
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    if move_obeys_rules(board, &movement, side)? {
        out.push(movement);
    }
    Ok(())
}

/// Walk each direction from `position` until the edge or the first occupant,
/// keeping the occupied square only when it holds an enemy piece.
pub fn generate_sliding_moves(
    board: &Board,
    position: Square,
    side: Side,
    directions: &[Square],
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    for offset in directions {
        let mut test_square = position + *offset;

        while test_square.is_valid() {
            let occupant = board.piece_at(test_square);
            if !matches!(occupant, Some(piece) if piece.side == side) {
                push_if_legal(board, Movement::new(position, test_square), side, out)?;
            }
            if occupant.is_some() {
                break;
            }
            test_square = test_square + *offset;
        }
    }
    Ok(())
}

/// Try each fixed offset from `position` independently.
pub fn generate_step_moves(
    board: &Board,
    position: Square,
    side: Side,
    offsets: &[Square],
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    for offset in offsets {
        let test_square = position + *offset;
        if test_square.is_valid() && !board.is_occupied_by_side(test_square, side) {
            push_if_legal(board, Movement::new(position, test_square), side, out)?;
        }
    }
    Ok(())
}
