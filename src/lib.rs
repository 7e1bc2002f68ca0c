//! Crate root module declarations for the timeline chess rules engine.
//!
//! Exposes the position and history model (`game_state`), the move value
//! types (`moves`), legal move generation and rules checks
//! (`move_generation`), and text interchange helpers (`utils`).

pub mod chess_errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game;
    pub mod game_conditions;
    pub mod half_move;
    pub mod timeline;
}

pub mod moves {
    pub mod movement;
    pub mod offsets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_index;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_board;
    pub mod standard_algebraic;
}
