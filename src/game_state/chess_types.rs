//! Value types shared by every layer of the rules engine: sides, piece kinds,
//! pieces and board squares.
use std::fmt;
use std::ops::Add;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank delta of a pawn step for this side.
    #[inline]
    pub const fn forward_direction(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Rank this side's pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Side::White => 2,
            Side::Black => 7,
        }
    }

    /// Back rank holding this side's king and rooks at the start.
    #[inline]
    pub const fn castling_rank(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => 8,
        }
    }
}

/// Piece kind (the owner is stored separately in `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may be promoted to.
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Uppercase letter used by FEN and algebraic notation.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// An immutable piece value. Pieces carry no position or history; the board
/// cell they occupy is their only identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// FEN symbol: uppercase for White, lowercase for Black.
    pub const fn fen_symbol(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::White => letter,
            Side::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_symbol(symbol: char) -> Option<Self> {
        let kind = PieceKind::from_letter(symbol)?;
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Self::new(kind, side))
    }
}

/// A board coordinate with one-based `file` (a = 1) and `rank`.
///
/// `Square::INVALID` stands for "no square". Addition is plain component-wise
/// arithmetic, so offsets are squares too and the sum must be checked with
/// `is_valid` before it is used to index a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const INVALID: Square = Square::new(-1, -1);

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.file >= 1 && self.file <= 8 && self.rank >= 1 && self.rank <= 8
    }

    /// Offset this square by a file and rank delta.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Self {
        Self::new(self.file + d_file, self.rank + d_rank)
    }

    /// Flat `0..64` index with `a1 == 0` and `h8 == 63`; `None` off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(((self.rank - 1) * 8 + (self.file - 1)) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::new((index % 8) as i8 + 1, (index / 8) as i8 + 1)
    }
}

impl Add for Square {
    type Output = Square;

    #[inline]
    fn add(self, rhs: Square) -> Square {
        self.offset(rhs.file, rhs.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "-");
        }
        let file = char::from(b'a' + (self.file - 1) as u8);
        write!(f, "{}{}", file, self.rank)
    }
}
