//! Move values.
//!
//! A `Movement` is a start/end pair plus a `MoveKind` tag. Special moves carry
//! the data the board needs to perform their side effect, so applying a move
//! is a single `match` on the tag in `Board::move_piece`.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Used for moving and capturing.
    Normal,
    /// King move of two files; the rook standing on `rook_start` jumps over it.
    Castling { rook_start: Square },
    /// Pawn capture landing behind the pawn it removes from `captured_pawn_square`.
    EnPassant { captured_pawn_square: Square },
    /// Pawn reaching the far rank. The piece stays `None` until the player elects it.
    Promotion { promotion_piece: Option<PieceKind> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movement {
    pub start: Square,
    pub end: Square,
    pub kind: MoveKind,
}

impl Movement {
    #[inline]
    pub const fn new(start: Square, end: Square) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::Normal,
        }
    }

    #[inline]
    pub const fn castling(king_start: Square, king_end: Square, rook_start: Square) -> Self {
        Self {
            start: king_start,
            end: king_end,
            kind: MoveKind::Castling { rook_start },
        }
    }

    #[inline]
    pub const fn en_passant(start: Square, end: Square, captured_pawn_square: Square) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::EnPassant {
                captured_pawn_square,
            },
        }
    }

    /// A promotion whose piece has not been elected yet.
    #[inline]
    pub const fn promotion(start: Square, end: Square) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::Promotion {
                promotion_piece: None,
            },
        }
    }

    /// Candidate move carrying a promotion choice, as submitted by a player.
    #[inline]
    pub const fn with_promotion(start: Square, end: Square, piece: PieceKind) -> Self {
        Self {
            start,
            end,
            kind: MoveKind::Promotion {
                promotion_piece: Some(piece),
            },
        }
    }

    /// Elect the promotion piece. Non-promotion moves are returned unchanged.
    pub fn set_promotion_piece(self, piece: PieceKind) -> Self {
        match self.kind {
            MoveKind::Promotion { .. } => Self {
                kind: MoveKind::Promotion {
                    promotion_piece: Some(piece),
                },
                ..self
            },
            _ => self,
        }
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castling { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant { .. })
    }

    /// The elected promotion piece, if any.
    pub const fn promotion_piece(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promotion_piece } => promotion_piece,
            _ => None,
        }
    }

    /// Where the castling rook lands: beside the king's landing square, on
    /// the side the rook came from.
    pub fn rook_end_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::Castling { rook_start } => {
                let toward_rook = if rook_start.file > self.end.file { 1 } else { -1 };
                Some(self.end.offset(-toward_rook, 0))
            }
            _ => None,
        }
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
