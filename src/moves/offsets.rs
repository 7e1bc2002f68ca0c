use crate::game_state::chess_types::Square;

pub const CARDINAL_OFFSETS: [Square; 4] = [
    Square::new(0, 1),
    Square::new(1, 0),
    Square::new(0, -1),
    Square::new(-1, 0),
];

pub const DIAGONAL_OFFSETS: [Square; 4] = [
    Square::new(1, 1),
    Square::new(1, -1),
    Square::new(-1, -1),
    Square::new(-1, 1),
];

/// Cardinal and diagonal directions, i.e. the eight neighbours of a square.
pub const SURROUNDING_OFFSETS: [Square; 8] = generate_surrounding_offsets();

pub const KNIGHT_OFFSETS: [Square; 8] = [
    Square::new(1, 2),
    Square::new(2, 1),
    Square::new(2, -1),
    Square::new(1, -2),
    Square::new(-1, -2),
    Square::new(-2, -1),
    Square::new(-2, 1),
    Square::new(-1, 2),
];

#[inline]
pub const fn is_diagonal_offset(offset: Square) -> bool {
    offset.file != 0 && offset.rank != 0
}

const fn generate_surrounding_offsets() -> [Square; 8] {
    let mut table = [Square::new(0, 0); 8];
    let mut i = 0usize;

    while i < 4 {
        table[2 * i] = CARDINAL_OFFSETS[i];
        table[2 * i + 1] = DIAGONAL_OFFSETS[i];
        i += 1;
    }

    table
}
