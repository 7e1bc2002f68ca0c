//! FEN parser.
//!
//! Splits a Forsyth-Edwards Notation string into the game conditions and the
//! piece placements a `Game` is built from.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Piece, Side, Square};
use crate::game_state::game_conditions::GameConditions;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<(GameConditions, Vec<(Square, Piece)>)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing half-move clock"))?;
    let turn_part = parts.next().ok_or_else(|| invalid("missing turn number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let placements = parse_board(board_part)?;

    let mut conditions = GameConditions::without_castling(parse_side_to_move(side_part)?);
    parse_castling_rights(castling_part, &mut conditions)?;
    conditions.en_passant_square = parse_en_passant_square(en_passant_part)?;
    conditions.half_move_clock = halfmove_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("invalid half-move clock '{halfmove_part}'")))?;
    conditions.turn_number = turn_part
        .parse::<u32>()
        .map_err(|_| invalid(format!("invalid turn number '{turn_part}'")))?;

    Ok((conditions, placements))
}

fn invalid(reason: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(reason.into())
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Square, Piece)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut placements = Vec::with_capacity(32);

    for (rank, rank_str) in (1..=8).rev().zip(ranks) {
        let mut file = 1i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as i8;
                if file > 9 {
                    return Err(invalid(format!("rank {rank} has too many files")));
                }
                continue;
            }

            let piece = Piece::from_fen_symbol(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            if file > 8 {
                return Err(invalid(format!("rank {rank} has too many files")));
            }
            placements.push((Square::new(file, rank), piece));
            file += 1;
        }

        if file != 9 {
            return Err(invalid(format!("rank {rank} does not sum to 8 files")));
        }
    }

    Ok(placements)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Side> {
    match side_part {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(invalid(format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str, conditions: &mut GameConditions) -> ChessResult<()> {
    if castling_part == "-" {
        return Ok(());
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => conditions.white_can_castle_kingside = true,
            'Q' => conditions.white_can_castle_queenside = true,
            'k' => conditions.black_can_castle_kingside = true,
            'q' => conditions.black_can_castle_queenside = true,
            _ => return Err(invalid(format!("invalid castling rights character '{ch}'"))),
        }
    }

    Ok(())
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Square> {
    if en_passant_part == "-" {
        return Ok(Square::INVALID);
    }

    algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(format!("invalid en passant square '{en_passant_part}'")))
}
