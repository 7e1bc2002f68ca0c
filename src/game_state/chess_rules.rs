//! Canonical chess-rule constants.
//!
//! Stores the standard starting arrangement both as FEN text and as a
//! compile-time placement table used to build the initial board.

use crate::game_state::chess_types::{Piece, PieceKind, Side, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The 32 pieces of the standard starting position.
pub const STARTING_POSITION_PIECES: [(Square, Piece); 32] = generate_starting_position_pieces();

/// Back-rank order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File the king starts on.
pub const KING_HOME_FILE: i8 = 5;
pub const KINGSIDE_ROOK_FILE: i8 = 8;
pub const QUEENSIDE_ROOK_FILE: i8 = 1;

const fn generate_starting_position_pieces() -> [(Square, Piece); 32] {
    let mut table = [(Square::INVALID, Piece::new(PieceKind::Pawn, Side::White)); 32];
    let mut filled = 0usize;
    let mut file = 1i8;

    while file <= 8 {
        let kind = BACK_RANK[(file - 1) as usize];
        table[filled] = (Square::new(file, 1), Piece::new(kind, Side::White));
        table[filled + 1] = (Square::new(file, 2), Piece::new(PieceKind::Pawn, Side::White));
        table[filled + 2] = (Square::new(file, 7), Piece::new(PieceKind::Pawn, Side::Black));
        table[filled + 3] = (Square::new(file, 8), Piece::new(kind, Side::Black));
        filled += 4;
        file += 1;
    }

    table
}
