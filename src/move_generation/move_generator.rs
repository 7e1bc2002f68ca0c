use crate::chess_errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::legal_moves_bishop::BishopMoveGenerator;
use crate::move_generation::legal_moves_king::KingMoveGenerator;
use crate::move_generation::legal_moves_knight::KnightMoveGenerator;
use crate::move_generation::legal_moves_pawn::PawnMoveGenerator;
use crate::move_generation::legal_moves_queen::QueenMoveGenerator;
use crate::move_generation::legal_moves_rook::RookMoveGenerator;
use crate::moves::movement::Movement;

pub type MoveGenResult<T> = ChessResult<T>;

/// Per-piece legal move generation.
///
/// Implementations are pure: they read the board and conditions, probe every
/// candidate through `move_obeys_rules`, and return the moves that survive.
/// `position` must hold a piece of the kind the generator handles.
pub trait MoveGenerator: Send + Sync {
    fn legal_moves(
        &self,
        board: &Board,
        conditions: &GameConditions,
        position: Square,
    ) -> MoveGenResult<Vec<Movement>>;
}

/// The generator responsible for `kind`.
pub fn generator_for(kind: PieceKind) -> &'static dyn MoveGenerator {
    match kind {
        PieceKind::Pawn => &PawnMoveGenerator,
        PieceKind::Knight => &KnightMoveGenerator,
        PieceKind::Bishop => &BishopMoveGenerator,
        PieceKind::Rook => &RookMoveGenerator,
        PieceKind::Queen => &QueenMoveGenerator,
        PieceKind::King => &KingMoveGenerator,
    }
}

/// Legal moves of `piece`, which must stand on `position`.
pub fn legal_moves_for_piece(
    piece: Piece,
    board: &Board,
    conditions: &GameConditions,
    position: Square,
) -> MoveGenResult<Vec<Movement>> {
    generator_for(piece.kind).legal_moves(board, conditions, position)
}

/// Legal moves of whatever piece stands on `position`; empty for an empty square.
pub fn legal_moves_for_square(
    board: &Board,
    conditions: &GameConditions,
    position: Square,
) -> MoveGenResult<Vec<Movement>> {
    match board.get(position)? {
        Some(piece) => legal_moves_for_piece(piece, board, conditions, position),
        None => Ok(Vec::new()),
    }
}
