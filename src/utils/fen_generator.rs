use crate::game_state::board::Board;
use crate::game_state::chess_types::{Side, Square};
use crate::game_state::game_conditions::GameConditions;

pub fn generate_fen(board: &Board, conditions: &GameConditions) -> String {
    let side_to_move = match conditions.side_to_move {
        Side::White => "w",
        Side::Black => "b",
    };
    let en_passant = if conditions.en_passant_square.is_valid() {
        conditions.en_passant_square.to_string()
    } else {
        "-".to_owned()
    };

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(board),
        side_to_move,
        generate_castling_field(conditions),
        en_passant,
        conditions.half_move_clock,
        conditions.turn_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (1..=8).rev() {
        let mut empty_count = 0u8;

        for file in 1..=8 {
            if let Some(piece) = board.piece_at(Square::new(file, rank)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_symbol());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 1 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(conditions: &GameConditions) -> String {
    let out: String = [
        (conditions.white_can_castle_kingside, 'K'),
        (conditions.white_can_castle_queenside, 'Q'),
        (conditions.black_can_castle_kingside, 'k'),
        (conditions.black_can_castle_queenside, 'q'),
    ]
    .into_iter()
    .filter_map(|(allowed, symbol)| allowed.then_some(symbol))
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}
