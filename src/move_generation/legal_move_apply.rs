use crate::chess_errors::ChessError;
use crate::game_state::board::Board;
use crate::game_state::game_conditions::GameConditions;
use crate::game_state::half_move::HalfMove;
use crate::move_generation::legal_move_checks::is_player_in_check;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::movement::{MoveKind, Movement};

/// Position reached by one half-move, with its provisional record.
///
/// `half_move` carries the capture and check flags only; the end-of-game
/// flags are set by the caller once the resulting legal moves are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMovement {
    pub board: Board,
    pub conditions: GameConditions,
    pub half_move: HalfMove,
}

/// Apply a validated `movement` to a copy of `board`.
///
/// Promotions must carry an elected knight, bishop, rook or queen.
pub fn apply_movement(
    board: &Board,
    conditions: &GameConditions,
    movement: &Movement,
) -> MoveGenResult<AppliedMovement> {
    let piece = board
        .get(movement.start)?
        .ok_or(ChessError::NoPieceAtSquare(movement.start))?;

    if let MoveKind::Promotion {
        promotion_piece: Some(kind),
    } = movement.kind
    {
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotionPiece(kind));
        }
    }

    let captured_piece = movement.is_en_passant() || board.get(movement.end)?.is_some();

    let mut next_board = board.clone();
    next_board.move_piece(movement)?;

    let caused_check = is_player_in_check(&next_board, piece.side.opposite());
    let half_move = HalfMove::new(piece, *movement, captured_piece, caused_check);
    let next_conditions = conditions.calculate_ending_conditions(&next_board, &half_move);

    Ok(AppliedMovement {
        board: next_board,
        conditions: next_conditions,
        half_move,
    })
}
