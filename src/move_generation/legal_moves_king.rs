//! Legal king move generation, castling included.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_HOME_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::legal_move_checks::{is_player_in_check, move_obeys_rules};
use crate::move_generation::legal_move_shared::{generate_step_moves, mover_side};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::moves::movement::Movement;
use crate::moves::offsets::SURROUNDING_OFFSETS;

pub struct KingMoveGenerator;

impl MoveGenerator for KingMoveGenerator {
    fn legal_moves(
        &self,
        board: &Board,
        conditions: &GameConditions,
        position: Square,
    ) -> MoveGenResult<Vec<Movement>> {
        let side = mover_side(board, position)?;
        let mut out = Vec::with_capacity(10);

        generate_step_moves(board, position, side, &SURROUNDING_OFFSETS, &mut out)?;
        generate_castling_moves(board, conditions, position, side, &mut out)?;

        Ok(out)
    }
}

fn generate_castling_moves(
    board: &Board,
    conditions: &GameConditions,
    king_square: Square,
    side: Side,
    out: &mut Vec<Movement>,
) -> MoveGenResult<()> {
    let can_kingside = conditions.can_castle_kingside(side);
    let can_queenside = conditions.can_castle_queenside(side);
    let castling_rank = side.castling_rank();

    if (!can_kingside && !can_queenside)
        || king_square != Square::new(KING_HOME_FILE, castling_rank)
        // Cannot castle out of check.
        || is_player_in_check(board, side)
    {
        return Ok(());
    }

    for (allowed, rook_file) in [
        (can_kingside, KINGSIDE_ROOK_FILE),
        (can_queenside, QUEENSIDE_ROOK_FILE),
    ] {
        let rook_square = Square::new(rook_file, castling_rank);
        if !allowed || board.piece_at(rook_square) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        let direction = (rook_file - KING_HOME_FILE).signum();
        let path_is_empty = (1..(rook_file - KING_HOME_FILE).abs())
            .all(|step| !board.is_occupied(king_square.offset(direction * step, 0)));
        if !path_is_empty {
            continue;
        }

        // The king may neither pass through nor land on an attacked square.
        let pass_through = king_square.offset(direction, 0);
        let landing = king_square.offset(2 * direction, 0);
        if move_obeys_rules(board, &Movement::new(king_square, pass_through), side)?
            && move_obeys_rules(board, &Movement::new(king_square, landing), side)?
        {
            out.push(Movement::castling(king_square, landing, rook_square));
        }
    }

    Ok(())
}
