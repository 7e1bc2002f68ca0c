//! Non-board, non-move-record game state.
//!
//! `GameConditions` holds everything FEN stores besides the piece placement:
//! side to move, castling rights, en-passant target and the two clocks. A
//! value is never mutated; the next one is derived from the board after a
//! half-move and that half-move's record.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{KINGSIDE_ROOK_FILE, KING_HOME_FILE, QUEENSIDE_ROOK_FILE};
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::game_state::half_move::HalfMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConditions {
    pub side_to_move: Side,
    pub white_can_castle_kingside: bool,
    pub white_can_castle_queenside: bool,
    pub black_can_castle_kingside: bool,
    pub black_can_castle_queenside: bool,
    /// Square a pawn may capture onto en passant, or `Square::INVALID`.
    pub en_passant_square: Square,
    pub half_move_clock: u32,
    pub turn_number: u32,
}

impl Default for GameConditions {
    fn default() -> Self {
        Self::NORMAL_STARTING_CONDITIONS
    }
}

impl GameConditions {
    pub const NORMAL_STARTING_CONDITIONS: GameConditions = GameConditions {
        side_to_move: Side::White,
        white_can_castle_kingside: true,
        white_can_castle_queenside: true,
        black_can_castle_kingside: true,
        black_can_castle_queenside: true,
        en_passant_square: Square::INVALID,
        half_move_clock: 0,
        turn_number: 1,
    };

    /// Conditions with no castling rights and no en-passant target, handy for
    /// arbitrary set-up positions.
    pub const fn without_castling(side_to_move: Side) -> Self {
        Self {
            side_to_move,
            white_can_castle_kingside: false,
            white_can_castle_queenside: false,
            black_can_castle_kingside: false,
            black_can_castle_queenside: false,
            en_passant_square: Square::INVALID,
            half_move_clock: 0,
            turn_number: 1,
        }
    }

    #[inline]
    pub const fn can_castle_kingside(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_can_castle_kingside,
            Side::Black => self.black_can_castle_kingside,
        }
    }

    #[inline]
    pub const fn can_castle_queenside(&self, side: Side) -> bool {
        match side {
            Side::White => self.white_can_castle_queenside,
            Side::Black => self.black_can_castle_queenside,
        }
    }

    /// Derive the conditions that hold after `last_half_move` produced
    /// `resulting_board`.
    pub fn calculate_ending_conditions(&self, resulting_board: &Board, last_half_move: &HalfMove) -> Self {
        let white_king_home = king_is_home(resulting_board, Side::White);
        let black_king_home = king_is_home(resulting_board, Side::Black);

        Self {
            side_to_move: self.side_to_move.opposite(),
            white_can_castle_kingside: self.white_can_castle_kingside
                && white_king_home
                && rook_is_home(resulting_board, Side::White, KINGSIDE_ROOK_FILE),
            white_can_castle_queenside: self.white_can_castle_queenside
                && white_king_home
                && rook_is_home(resulting_board, Side::White, QUEENSIDE_ROOK_FILE),
            black_can_castle_kingside: self.black_can_castle_kingside
                && black_king_home
                && rook_is_home(resulting_board, Side::Black, KINGSIDE_ROOK_FILE),
            black_can_castle_queenside: self.black_can_castle_queenside
                && black_king_home
                && rook_is_home(resulting_board, Side::Black, QUEENSIDE_ROOK_FILE),
            en_passant_square: next_en_passant_square(last_half_move),
            half_move_clock: next_half_move_clock(last_half_move, self.half_move_clock),
            turn_number: match self.side_to_move {
                Side::White => self.turn_number,
                Side::Black => self.turn_number.saturating_add(1),
            },
        }
    }
}

fn king_is_home(board: &Board, side: Side) -> bool {
    board.king_square(side) == Square::new(KING_HOME_FILE, side.castling_rank())
}

fn rook_is_home(board: &Board, side: Side, file: i8) -> bool {
    board.piece_at(Square::new(file, side.castling_rank())) == Some(Piece::new(PieceKind::Rook, side))
}

fn next_half_move_clock(last_half_move: &HalfMove, half_move_clock: u32) -> u32 {
    if last_half_move.piece.kind == PieceKind::Pawn || last_half_move.captured_piece {
        0
    } else {
        half_move_clock.saturating_add(1)
    }
}

/// The en-passant window only ever opens for the ply right after a double step.
fn next_en_passant_square(last_half_move: &HalfMove) -> Square {
    let piece = last_half_move.piece;
    let movement = last_half_move.movement;
    let forward = piece.side.forward_direction();

    if piece.kind == PieceKind::Pawn
        && movement.start.rank == piece.side.pawn_rank()
        && movement.end.rank == movement.start.rank + 2 * forward
        && movement.end.file == movement.start.file
    {
        movement.end.offset(0, -forward)
    } else {
        Square::INVALID
    }
}
