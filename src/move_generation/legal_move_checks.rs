//! Attack detection and move-legality predicates.
//!
//! Legality is defined operationally: a move is legal when applying it to a
//! copy of the board does not leave the mover's king attacked. Pins and
//! discovered checks therefore need no special handling.

use crate::game_state::board::Board;
use crate::game_state::chess_types::{PieceKind, Side, Square};
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::movement::{MoveKind, Movement};
use crate::moves::offsets::{is_diagonal_offset, KNIGHT_OFFSETS, SURROUNDING_OFFSETS};

/// Whether any piece of `defending_side`'s opponent attacks `square`.
pub fn is_square_attacked(square: Square, board: &Board, defending_side: Side) -> bool {
    if !square.is_valid() {
        return false;
    }

    let enemy = defending_side.opposite();
    let defending_forward = defending_side.forward_direction();

    for offset in SURROUNDING_OFFSETS {
        let diagonal = is_diagonal_offset(offset);
        let mut test_square = square + offset;
        let mut distance = 1;

        while test_square.is_valid() {
            if let Some(piece) = board.piece_at(test_square) {
                if piece.side == enemy {
                    let attacks = match piece.kind {
                        PieceKind::Queen => true,
                        PieceKind::Bishop => diagonal,
                        PieceKind::Rook => !diagonal,
                        PieceKind::King => distance == 1,
                        PieceKind::Pawn => {
                            distance == 1 && diagonal && offset.rank == defending_forward
                        }
                        PieceKind::Knight => false,
                    };
                    if attacks {
                        return true;
                    }
                }
                break;
            }

            test_square = test_square + offset;
            distance += 1;
        }
    }

    KNIGHT_OFFSETS.iter().any(|offset| {
        matches!(
            board.piece_at(square + *offset),
            Some(piece) if piece.side == enemy && piece.kind == PieceKind::Knight
        )
    })
}

/// Whether `side`'s king is attacked. A board without that king is never in check.
#[inline]
pub fn is_player_in_check(board: &Board, side: Side) -> bool {
    is_square_attacked(board.king_square(side), board, side)
}

/// Whether `movement` by `moving_side` is legal on `board`, assuming it
/// already follows the moving piece's pattern.
pub fn move_obeys_rules(board: &Board, movement: &Movement, moving_side: Side) -> MoveGenResult<bool> {
    if !movement.start.is_valid() || !movement.end.is_valid() {
        return Ok(false);
    }
    match board.piece_at(movement.end) {
        Some(piece) if piece.kind == PieceKind::King || piece.side == moving_side => {
            return Ok(false)
        }
        _ => {}
    }

    // The promoted piece cannot change whether the mover's own king is
    // attacked, so an unelected promotion is probed as a plain move.
    let probe = match movement.kind {
        MoveKind::Promotion {
            promotion_piece: None,
        } => Movement::new(movement.start, movement.end),
        _ => *movement,
    };

    let mut resulting_board = board.clone();
    resulting_board.move_piece(&probe)?;

    Ok(!is_player_in_check(&resulting_board, moving_side))
}

pub fn is_player_checkmated(board: &Board, side: Side, num_legal_moves: usize) -> bool {
    num_legal_moves == 0 && is_player_in_check(board, side)
}

pub fn is_player_stalemated(board: &Board, side: Side, num_legal_moves: usize) -> bool {
    num_legal_moves == 0 && !is_player_in_check(board, side)
}
