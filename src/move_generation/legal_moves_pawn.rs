//! Legal pawn move generation.
//!
//! Single and double steps, diagonal captures, en passant and promotion
//! tagging. Promotions are emitted once per destination with no piece
//! elected; the player supplies the piece when executing the move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Side, Square};
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::legal_move_shared::{mover_side, push_if_legal};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::movement::Movement;

const CAPTURE_FILE_OFFSETS: [i8; 2] = [-1, 1];

pub struct PawnMoveGenerator;

impl MoveGenerator for PawnMoveGenerator {
    fn legal_moves(
        &self,
        board: &Board,
        conditions: &GameConditions,
        position: Square,
    ) -> MoveGenResult<Vec<Movement>> {
        let side = mover_side(board, position)?;
        let mut out = Vec::with_capacity(4);

        generate_forward_moves(board, position, side, &mut out)?;
        generate_captures(board, position, side, &mut out)?;
        generate_en_passant(board, conditions.en_passant_square, position, side, &mut out)?;

        Ok(out)
    }
}

/// Plain or promotion movement depending on the landing rank.
#[inline]
fn pawn_movement(start: Square, end: Square, side: Side) -> Movement {
    if end.rank == side.opposite().castling_rank() {
        Movement::promotion(start, end)
    } else {
        Movement::new(start, end)
    }
}

fn generate_forward_moves(
    board: &Board,
    position: Square,
    side: Side,
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    let forward = side.forward_direction();
    let one_step = position.offset(0, forward);
    if !one_step.is_valid() || board.is_occupied(one_step) {
        return Ok(());
    }
    push_if_legal(board, pawn_movement(position, one_step, side), side, out)?;

    if position.rank == side.pawn_rank() {
        let two_step = one_step.offset(0, forward);
        if two_step.is_valid() && !board.is_occupied(two_step) {
            push_if_legal(board, Movement::new(position, two_step), side, out)?;
        }
    }
    Ok(())
}

fn generate_captures(
    board: &Board,
    position: Square,
    side: Side,
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    for file_offset in CAPTURE_FILE_OFFSETS {
        let target = position.offset(file_offset, side.forward_direction());
        if target.is_valid() && board.is_occupied_by_side(target, side.opposite()) {
            push_if_legal(board, pawn_movement(position, target, side), side, out)?;
        }
    }
    Ok(())
}

fn generate_en_passant(
    board: &Board,
    en_passant_square: Square,
    position: Square,
    side: Side,
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    let forward = side.forward_direction();
    if !en_passant_square.is_valid()
        || position.rank + forward != en_passant_square.rank
        || (position.file - en_passant_square.file).abs() != 1
    {
        return Ok(());
    }

    let captured_pawn_square = en_passant_square.offset(0, -forward);
    let captured = board.piece_at(captured_pawn_square);
    if !matches!(captured, Some(piece) if piece.kind == PieceKind::Pawn && piece.side != side)
        || board.is_occupied(en_passant_square)
    {
        return Ok(());
    }

    push_if_legal(
        board,
        Movement::en_passant(position, en_passant_square, captured_pawn_square),
        side,
        out,
    )
}
