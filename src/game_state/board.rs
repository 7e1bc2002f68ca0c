//! 8x8 mailbox board.
//!
//! `Board` stores one optional `Piece` per cell in a flat array and caches the
//! square of each side's king, which the check test needs on every legality
//! probe. Cloning is a plain array copy, so "what-if" probes can clone freely.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_PIECES;
use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};
use crate::moves::movement::{MoveKind, Movement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    // [side]
    king_squares: [Square; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
            king_squares: [Square::INVALID; 2],
        }
    }

    /// Board with the standard 32-piece starting arrangement.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (square, piece) in STARTING_POSITION_PIECES {
            board.place(square, piece);
        }
        board
    }

    /// Build a board from explicit placements. Later placements overwrite
    /// earlier ones on the same square.
    pub fn from_placements(placements: &[(Square, Piece)]) -> ChessResult<Self> {
        let mut board = Self::empty();
        for (square, piece) in placements {
            board.set(*square, Some(*piece))?;
        }
        Ok(board)
    }

    /// Strict read; fails for squares off the board.
    pub fn get(&self, square: Square) -> ChessResult<Option<Piece>> {
        let index = square.index().ok_or(ChessError::SquareOutOfRange(square))?;
        Ok(self.squares[index])
    }

    /// Strict write; fails for squares off the board.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> ChessResult<()> {
        let index = square.index().ok_or(ChessError::SquareOutOfRange(square))?;

        if let Some(previous) = self.squares[index] {
            if previous.kind == PieceKind::King && self.king_squares[previous.side.index()] == square {
                self.king_squares[previous.side.index()] = Square::INVALID;
            }
        }
        if let Some(piece) = piece {
            if piece.kind == PieceKind::King {
                self.king_squares[piece.side.index()] = square;
            }
        }

        self.squares[index] = piece;
        Ok(())
    }

    /// Lenient read used by move generation: off-board squares read as empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        square.index().and_then(|index| self.squares[index])
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    #[inline]
    pub fn is_occupied_by_side(&self, square: Square, side: Side) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.side == side)
    }

    /// Current square of `side`'s king, or `Square::INVALID` without one.
    #[inline]
    pub fn king_square(&self, side: Side) -> Square {
        self.king_squares[side.index()]
    }

    /// All occupied squares, a1 through h8 in rank-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (Square::from_index(index), piece)))
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// Move the piece on `movement.start` to `movement.end`, capturing any
    /// occupant, then perform the side effect of a special move.
    pub fn move_piece(&mut self, movement: &Movement) -> ChessResult<()> {
        let piece = self
            .get(movement.start)?
            .ok_or(ChessError::NoPieceAtSquare(movement.start))?;

        // Resolve the promotion choice before touching the board so a failed
        // call leaves it unchanged.
        let landing_piece = match movement.kind {
            MoveKind::Promotion {
                promotion_piece: Some(kind),
            } => Piece::new(kind, piece.side),
            MoveKind::Promotion {
                promotion_piece: None,
            } => {
                return Err(ChessError::PromotionPieceNotElected {
                    start: movement.start,
                    end: movement.end,
                })
            }
            _ => piece,
        };

        match movement.kind {
            MoveKind::Castling { rook_start } => {
                let rook = Piece::new(PieceKind::Rook, piece.side);
                if self.get(rook_start)? != Some(rook) {
                    return Err(ChessError::CastlingRookMissing(rook_start));
                }
            }
            MoveKind::EnPassant {
                captured_pawn_square,
            } => {
                self.get(captured_pawn_square)?;
            }
            MoveKind::Normal | MoveKind::Promotion { .. } => {}
        }

        self.get(movement.end)?;
        self.set(movement.start, None)?;
        self.set(movement.end, Some(landing_piece))?;

        match movement.kind {
            MoveKind::Castling { rook_start } => {
                let rook = self.piece_at(rook_start);
                let rook_end = movement
                    .rook_end_square()
                    .ok_or(ChessError::CastlingRookMissing(rook_start))?;
                self.set(rook_start, None)?;
                self.set(rook_end, rook)?;
            }
            MoveKind::EnPassant {
                captured_pawn_square,
            } => {
                self.set(captured_pawn_square, None)?;
            }
            MoveKind::Normal | MoveKind::Promotion { .. } => {}
        }

        Ok(())
    }

    fn place(&mut self, square: Square, piece: Piece) {
        if let Some(index) = square.index() {
            self.squares[index] = Some(piece);
            if piece.kind == PieceKind::King {
                self.king_squares[piece.side.index()] = square;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn starting_position_places_32_pieces_and_caches_kings() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king_square(Side::White), sq("e1"));
        assert_eq!(board.king_square(Side::Black), sq("e8"));
        assert_eq!(
            board.get(sq("d8")).expect("d8 is on the board"),
            Some(Piece::new(PieceKind::Queen, Side::Black))
        );
    }

    #[test]
    fn out_of_range_access_fails() {
        let mut board = Board::empty();
        assert_eq!(
            board.get(Square::INVALID),
            Err(ChessError::SquareOutOfRange(Square::INVALID))
        );
        assert!(board.set(Square::new(0, 4), None).is_err());
        assert_eq!(board.piece_at(Square::new(9, 9)), None);
    }

    #[test]
    fn moving_from_empty_square_fails() {
        let mut board = Board::empty();
        let result = board.move_piece(&Movement::new(sq("a1"), sq("a2")));
        assert_eq!(result, Err(ChessError::NoPieceAtSquare(sq("a1"))));
    }

    #[test]
    fn clone_is_independent_and_keeps_king_cache() {
        let original = Board::starting_position();
        let mut copy = original.clone();
        copy.move_piece(&Movement::new(sq("e1"), sq("e3")))
            .expect("king move should apply");

        assert_eq!(copy.king_square(Side::White), sq("e3"));
        assert_eq!(original.king_square(Side::White), sq("e1"));
        assert!(original.is_occupied(sq("e1")));
        assert!(!copy.is_occupied(sq("e1")));
    }

    #[test]
    fn castling_moves_rook_beside_king() {
        let mut board = Board::from_placements(&[
            (sq("e1"), Piece::new(PieceKind::King, Side::White)),
            (sq("h1"), Piece::new(PieceKind::Rook, Side::White)),
            (sq("a1"), Piece::new(PieceKind::Rook, Side::White)),
        ])
        .expect("placements are on the board");

        let mut queenside = board.clone();
        queenside
            .move_piece(&Movement::castling(sq("e1"), sq("c1"), sq("a1")))
            .expect("queenside castle should apply");
        assert_eq!(
            queenside.piece_at(sq("d1")),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
        assert_eq!(queenside.king_square(Side::White), sq("c1"));
        assert!(!queenside.is_occupied(sq("a1")));

        board
            .move_piece(&Movement::castling(sq("e1"), sq("g1"), sq("h1")))
            .expect("kingside castle should apply");
        assert_eq!(board.king_square(Side::White), sq("g1"));
        assert_eq!(
            board.piece_at(sq("f1")),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
        assert!(!board.is_occupied(sq("h1")));
    }

    #[test]
    fn castling_without_rook_fails_and_leaves_board_untouched() {
        let mut board =
            Board::from_placements(&[(sq("e1"), Piece::new(PieceKind::King, Side::White))])
                .expect("placement is on the board");
        let before = board.clone();
        let result = board.move_piece(&Movement::castling(sq("e1"), sq("g1"), sq("h1")));
        assert_eq!(result, Err(ChessError::CastlingRookMissing(sq("h1"))));
        assert_eq!(board, before);
    }

    #[test]
    fn en_passant_removes_captured_pawn() {
        let mut board = Board::from_placements(&[
            (sq("e5"), Piece::new(PieceKind::Pawn, Side::White)),
            (sq("d5"), Piece::new(PieceKind::Pawn, Side::Black)),
        ])
        .expect("placements are on the board");
        board
            .move_piece(&Movement::en_passant(sq("e5"), sq("d6"), sq("d5")))
            .expect("en passant should apply");
        assert!(!board.is_occupied(sq("d5")));
        assert!(board.is_occupied_by_side(sq("d6"), Side::White));
    }

    #[test]
    fn promotion_requires_elected_piece() {
        let mut board =
            Board::from_placements(&[(sq("b7"), Piece::new(PieceKind::Pawn, Side::White))])
                .expect("placement is on the board");

        let unelected = Movement::promotion(sq("b7"), sq("b8"));
        assert!(matches!(
            board.move_piece(&unelected),
            Err(ChessError::PromotionPieceNotElected { .. })
        ));
        assert!(board.is_occupied(sq("b7")));

        board
            .move_piece(&unelected.set_promotion_piece(PieceKind::Rook))
            .expect("elected promotion should apply");
        assert_eq!(
            board.piece_at(sq("b8")),
            Some(Piece::new(PieceKind::Rook, Side::White))
        );
    }

    #[test]
    fn capturing_a_king_clears_its_cache_entry() {
        let mut board = Board::from_placements(&[
            (sq("d4"), Piece::new(PieceKind::Rook, Side::White)),
            (sq("d8"), Piece::new(PieceKind::King, Side::Black)),
        ])
        .expect("placements are on the board");
        board
            .move_piece(&Movement::new(sq("d4"), sq("d8")))
            .expect("raw board move should apply");
        assert_eq!(board.king_square(Side::Black), Square::INVALID);
    }
}
