//! Standard algebraic notation (SAN) for executed half-moves.
//!
//! Disambiguation needs the position the move was played from, so callers
//! pass the board and legal-move index that were current before the move.

use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::half_move::HalfMove;
use crate::move_generation::legal_move_index::LegalMoveIndex;
use crate::moves::movement::MoveKind;

/// Render `half_move` in SAN, e.g. `Nbd7`, `exd6`, `e8=Q+`, `O-O-O#`.
pub fn half_move_to_standard_algebraic(
    half_move: &HalfMove,
    board_before: &Board,
    legal_moves_before: &LegalMoveIndex,
) -> String {
    let movement = half_move.movement;
    let mut out = String::new();

    if let MoveKind::Castling { .. } = movement.kind {
        out.push_str(if movement.end.file > movement.start.file {
            "O-O"
        } else {
            "O-O-O"
        });
    } else {
        if half_move.piece.kind == PieceKind::Pawn {
            if half_move.captured_piece {
                out.push(file_letter(movement.start.file));
            }
        } else {
            out.push(half_move.piece.kind.letter());
            out.push_str(&disambiguation(half_move, board_before, legal_moves_before));
        }

        if half_move.captured_piece {
            out.push('x');
        }
        out.push_str(&movement.end.to_string());

        if let Some(kind) = movement.promotion_piece() {
            out.push('=');
            out.push(kind.letter());
        }
    }

    if half_move.caused_checkmate {
        out.push('#');
    } else if half_move.caused_check {
        out.push('+');
    }

    out
}

/// File, rank or full square of the start, whichever first tells the moving
/// piece apart from same-kind pieces that could also reach the destination.
fn disambiguation(half_move: &HalfMove, board_before: &Board, legal_moves_before: &LegalMoveIndex) -> String {
    let start = half_move.movement.start;
    let end = half_move.movement.end;

    let rivals: Vec<_> = legal_moves_before
        .squares()
        .filter(|square| *square != start)
        .filter(|square| board_before.piece_at(*square) == Some(half_move.piece))
        .filter(|square| legal_moves_before.get(*square, end).is_some())
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|square| square.file != start.file) {
        file_letter(start.file).to_string()
    } else if rivals.iter().all(|square| square.rank != start.rank) {
        start.rank.to_string()
    } else {
        start.to_string()
    }
}

fn file_letter(file: i8) -> char {
    char::from(b'a' + (file - 1) as u8)
}
