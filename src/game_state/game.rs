//! A single game of chess with navigable history.
//!
//! `Game` keeps four timelines in lockstep: boards, game conditions and
//! legal-move indices hold one entry per position (the starting position plus
//! one per half-move), while the half-move timeline holds one entry per ply.
//! Every move is validated against the current legal-move index, fully
//! computed off to the side, and only then appended to all four timelines.

use tracing::debug;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Piece, Square};
use crate::game_state::game_conditions::GameConditions;
use crate::game_state::half_move::HalfMove;
use crate::game_state::timeline::Timeline;
use crate::move_generation::legal_move_apply::apply_movement;
use crate::move_generation::legal_move_checks::{is_player_checkmated, is_player_stalemated};
use crate::move_generation::legal_move_index::LegalMoveIndex;
use crate::moves::movement::Movement;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::standard_algebraic::half_move_to_standard_algebraic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board_timeline: Timeline<Board>,
    conditions_timeline: Timeline<GameConditions>,
    half_move_timeline: Timeline<HalfMove>,
    legal_move_timeline: Timeline<LegalMoveIndex>,
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> ChessResult<Self> {
        Self::from_board(Board::starting_position(), GameConditions::NORMAL_STARTING_CONDITIONS)
    }

    /// Arbitrary set-up position.
    pub fn from_position(conditions: GameConditions, placements: &[(Square, Piece)]) -> ChessResult<Self> {
        Self::from_board(Board::from_placements(placements)?, conditions)
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let (conditions, placements) = parse_fen(fen)?;
        Self::from_position(conditions, &placements)
    }

    fn from_board(board: Board, conditions: GameConditions) -> ChessResult<Self> {
        let legal_moves = LegalMoveIndex::compute(&board, &conditions)?;

        Ok(Self {
            board_timeline: Timeline::with_first(board),
            conditions_timeline: Timeline::with_first(conditions),
            half_move_timeline: Timeline::new(),
            legal_move_timeline: Timeline::with_first(legal_moves),
        })
    }

    /// FEN of the current position.
    pub fn to_fen(&self) -> Option<String> {
        Some(generate_fen(self.current_board()?, self.current_conditions()?))
    }

    /// Execute `candidate` if the current position allows it.
    ///
    /// Only the start and end squares of `candidate` are matched against the
    /// legal-move index; castling and en-passant details come from the index.
    /// For promotions the candidate must carry the elected piece. Returns
    /// `Ok(false)` with no state change when the move is not legal.
    pub fn try_execute_move(&mut self, candidate: &Movement) -> ChessResult<bool> {
        let (Some(board), Some(conditions), Some(legal_moves)) = (
            self.board_timeline.current(),
            self.conditions_timeline.current(),
            self.legal_move_timeline.current(),
        ) else {
            return Ok(false);
        };

        let Some(validated) = legal_moves.get(candidate.start, candidate.end).copied() else {
            debug!(movement = %candidate, "rejected illegal move");
            return Ok(false);
        };

        let movement = if validated.is_promotion() {
            let kind = candidate
                .promotion_piece()
                .ok_or(ChessError::PromotionPieceNotElected {
                    start: candidate.start,
                    end: candidate.end,
                })?;
            validated.set_promotion_piece(kind)
        } else {
            validated
        };

        let applied = apply_movement(board, conditions, &movement)?;
        let next_legal_moves = LegalMoveIndex::compute(&applied.board, &applied.conditions)?;

        let mut half_move = applied.half_move;
        let side_to_move = applied.conditions.side_to_move;
        half_move.set_game_end_flags(
            is_player_stalemated(&applied.board, side_to_move, next_legal_moves.len()),
            is_player_checkmated(&applied.board, side_to_move, next_legal_moves.len()),
        );

        debug!(
            movement = %movement,
            captured = half_move.captured_piece,
            check = half_move.caused_check,
            checkmate = half_move.caused_checkmate,
            stalemate = half_move.caused_stalemate,
            "committed move"
        );

        self.board_timeline.add_next(applied.board);
        self.conditions_timeline.add_next(applied.conditions);
        self.half_move_timeline.add_next(half_move);
        self.legal_move_timeline.add_next(next_legal_moves);

        Ok(true)
    }

    /// The fully specified legal movement from `start` to `end`, if any.
    pub fn try_get_legal_move(&self, start: Square, end: Square) -> Option<Movement> {
        self.current_legal_moves()?.get(start, end).copied()
    }

    /// Legal moves of the piece on `start`; empty when it has none or belongs
    /// to the side not on move.
    pub fn legal_moves_from(&self, start: Square) -> Vec<Movement> {
        self.current_legal_moves()
            .map(|legal_moves| legal_moves.moves_from(start).copied().collect())
            .unwrap_or_default()
    }

    /// Rewind to the position right after half-move `index` (zero based).
    ///
    /// Later entries are kept until the next executed move prunes them, so a
    /// rewind can be followed by another call moving forward again.
    pub fn reset_to_half_move(&mut self, index: usize) -> bool {
        if index >= self.half_move_timeline.len() {
            debug!(index, stored = self.half_move_timeline.len(), "rejected rewind");
            return false;
        }

        self.set_heads(Some(index));
        debug!(index, "rewound history");
        true
    }

    /// Rewind to the starting position. False when no move was ever played.
    pub fn reset_to_start(&mut self) -> bool {
        if self.half_move_timeline.is_empty() {
            return false;
        }

        self.set_heads(None);
        debug!("rewound history to start");
        true
    }

    fn set_heads(&mut self, half_move_index: Option<usize>) {
        let position_index = half_move_index.map_or(0, |index| index + 1);

        self.board_timeline.set_head_index(Some(position_index));
        self.conditions_timeline.set_head_index(Some(position_index));
        self.legal_move_timeline.set_head_index(Some(position_index));
        self.half_move_timeline.set_head_index(half_move_index);
    }

    pub fn current_board(&self) -> Option<&Board> {
        self.board_timeline.current()
    }

    pub fn current_conditions(&self) -> Option<&GameConditions> {
        self.conditions_timeline.current()
    }

    pub fn current_legal_moves(&self) -> Option<&LegalMoveIndex> {
        self.legal_move_timeline.current()
    }

    /// Half-moves from the first up to the current one.
    pub fn half_move_history(&self) -> &[HalfMove] {
        self.half_move_timeline.start_to_current()
    }

    pub fn last_half_move(&self) -> Option<&HalfMove> {
        self.half_move_timeline.current()
    }

    pub fn half_move_count(&self) -> usize {
        self.half_move_history().len()
    }

    pub fn board_timeline(&self) -> &Timeline<Board> {
        &self.board_timeline
    }

    pub fn conditions_timeline(&self) -> &Timeline<GameConditions> {
        &self.conditions_timeline
    }

    pub fn half_move_timeline(&self) -> &Timeline<HalfMove> {
        &self.half_move_timeline
    }

    pub fn legal_move_timeline(&self) -> &Timeline<LegalMoveIndex> {
        &self.legal_move_timeline
    }

    /// Standard algebraic notation of every half-move up to the current one.
    pub fn algebraic_notation_history(&self) -> Vec<String> {
        self.half_move_history()
            .iter()
            .enumerate()
            .filter_map(|(ply, half_move)| {
                let board_before = self.board_timeline.get(ply)?;
                let legal_moves_before = self.legal_move_timeline.get(ply)?;
                Some(half_move_to_standard_algebraic(half_move, board_before, legal_moves_before))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game_state::chess_types::{PieceKind, Side};
    use crate::move_generation::legal_move_checks::{is_player_in_check, move_obeys_rules};
    use crate::moves::offsets::KNIGHT_OFFSETS;
    use crate::utils::algebraic::{algebraic_to_square, long_algebraic_to_movement};

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn play(game: &mut Game, text: &str) -> bool {
        let movement = long_algebraic_to_movement(text).expect("test move should parse");
        game.try_execute_move(&movement).expect("move execution should not error")
    }

    fn play_all(game: &mut Game, moves: &[&str]) {
        for text in moves {
            assert!(play(game, text), "{text} should be legal");
        }
    }

    fn conditions(game: &Game) -> GameConditions {
        *game.current_conditions().expect("game has a current position")
    }

    #[test]
    fn new_game_starts_at_standard_position() {
        let game = Game::new().expect("starting position should build");

        assert_eq!(game.current_board(), Some(&Board::starting_position()));
        assert_eq!(conditions(&game), GameConditions::NORMAL_STARTING_CONDITIONS);
        assert_eq!(game.current_legal_moves().map(LegalMoveIndex::len), Some(20));
        assert_eq!(game.half_move_count(), 0);
        assert!(game.last_half_move().is_none());
        assert_eq!(
            game.to_fen().as_deref(),
            Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        );
    }

    #[test]
    fn king_pawn_opening_sets_en_passant_and_clocks() {
        let mut game = Game::new().expect("starting position should build");
        assert!(play(&mut game, "e2e4"));

        let after = conditions(&game);
        assert_eq!(after.en_passant_square, sq("e3"));
        assert_eq!(after.side_to_move, Side::Black);
        assert_eq!(after.half_move_clock, 0);
        assert_eq!(after.turn_number, 1);
        assert_eq!(game.half_move_count(), 1);
        assert_eq!(
            game.to_fen().as_deref(),
            Some("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        );

        assert!(play(&mut game, "g8f6"));
        let after = conditions(&game);
        assert_eq!(after.en_passant_square, Square::INVALID);
        assert_eq!(after.half_move_clock, 1);
        assert_eq!(after.turn_number, 2);
    }

    #[test]
    fn illegal_move_leaves_game_untouched() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["e2e4"]);
        let before = game.clone();

        assert!(!play(&mut game, "e2e5"));
        assert!(!play(&mut game, "e4e5"));
        assert!(!play(&mut game, "a1a1"));
        assert!(!play(&mut game, "d8h4"));
        assert_eq!(game, before);
    }

    #[test]
    fn saturated_clocks_stay_at_their_limit() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 4294967295 4294967295")
            .expect("FEN should load");

        assert!(play(&mut game, "e1d1"));
        assert!(play(&mut game, "e8d8"));

        let conditions = game.current_conditions().expect("game has a position");
        assert_eq!(conditions.half_move_clock, u32::MAX);
        assert_eq!(conditions.turn_number, u32::MAX);
        assert_eq!(game.half_move_count(), 2);
    }

    #[test]
    fn reading_legal_moves_never_mutates() {
        let game = Game::new().expect("starting position should build");
        let before = game.clone();

        for _ in 0..3 {
            assert!(game.try_get_legal_move(sq("g1"), sq("f3")).is_some());
            assert!(game.try_get_legal_move(sq("g1"), sq("g3")).is_none());
            assert_eq!(game.legal_moves_from(sq("b1")).len(), 2);
            assert!(game.legal_moves_from(sq("b8")).is_empty());
        }
        assert_eq!(game, before);
    }

    #[test]
    fn kingside_castle_moves_king_and_rook() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5"]);

        let castle = game
            .try_get_legal_move(sq("e1"), sq("g1"))
            .expect("castling should be available");
        assert!(castle.is_castling());
        assert!(play(&mut game, "e1g1"));

        let board = game.current_board().expect("game has a current position");
        assert_eq!(board.piece_at(sq("g1")), Some(Piece::new(PieceKind::King, Side::White)));
        assert_eq!(board.piece_at(sq("f1")), Some(Piece::new(PieceKind::Rook, Side::White)));
        assert_eq!(board.piece_at(sq("e1")), None);
        assert_eq!(board.piece_at(sq("h1")), None);
        assert_eq!(board.king_square(Side::White), sq("g1"));

        let after = conditions(&game);
        assert!(!after.white_can_castle_kingside);
        assert!(!after.white_can_castle_queenside);
        assert!(after.black_can_castle_kingside);
        assert!(after.black_can_castle_queenside);
        assert_eq!(game.algebraic_notation_history().last().map(String::as_str), Some("O-O"));
    }

    #[test]
    fn castling_is_rejected_in_check_and_through_attack() {
        let mut in_check = Game::from_fen("4k3/8/8/4r3/8/8/8/4K2R w K - 0 1").expect("FEN should load");
        let before = in_check.clone();
        assert!(!play(&mut in_check, "e1g1"));
        assert_eq!(in_check, before);

        let mut through = Game::from_fen("4k3/8/8/5r2/8/8/8/4K2R w K - 0 1").expect("FEN should load");
        assert!(!play(&mut through, "e1g1"));

        let mut clear = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should load");
        assert!(play(&mut clear, "e1g1"));
    }

    #[test]
    fn en_passant_window_lasts_one_ply() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

        assert_eq!(conditions(&game).en_passant_square, sq("d6"));
        let capture = game
            .try_get_legal_move(sq("e5"), sq("d6"))
            .expect("en passant should be available");
        assert!(capture.is_en_passant());

        play_all(&mut game, &["h2h3", "h7h6"]);
        assert_eq!(conditions(&game).en_passant_square, Square::INVALID);
        assert!(!play(&mut game, "e5d6"));
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6"]);

        let board = game.current_board().expect("game has a current position");
        assert_eq!(board.piece_at(sq("d5")), None);
        assert_eq!(board.piece_at(sq("d6")), Some(Piece::new(PieceKind::Pawn, Side::White)));
        let last = game.last_half_move().expect("a move was played");
        assert!(last.captured_piece);
        assert_eq!(game.algebraic_notation_history().last().map(String::as_str), Some("exd6"));
    }

    #[test]
    fn promotion_needs_an_elected_piece() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        let before = game.clone();

        assert_eq!(
            game.try_execute_move(&Movement::new(sq("a7"), sq("a8"))),
            Err(ChessError::PromotionPieceNotElected {
                start: sq("a7"),
                end: sq("a8"),
            })
        );
        assert_eq!(
            game.try_execute_move(&Movement::with_promotion(sq("a7"), sq("a8"), PieceKind::King)),
            Err(ChessError::InvalidPromotionPiece(PieceKind::King))
        );
        assert_eq!(game, before);

        assert!(play(&mut game, "a7a8r"));
        let board = game.current_board().expect("game has a current position");
        assert_eq!(board.piece_at(sq("a8")), Some(Piece::new(PieceKind::Rook, Side::White)));
        let last = game.last_half_move().expect("a move was played");
        assert_eq!(last.movement.promotion_piece(), Some(PieceKind::Rook));
        assert!(last.caused_check);
        assert_eq!(game.algebraic_notation_history(), vec!["a8=R+"]);
    }

    #[test]
    fn fools_mate_is_flagged() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

        let last = game.last_half_move().expect("a move was played");
        assert!(last.caused_check);
        assert!(last.caused_checkmate);
        assert!(!last.caused_stalemate);
        assert!(last.ended_game());
        assert_eq!(game.current_legal_moves().map(LegalMoveIndex::len), Some(0));
        assert!(!play(&mut game, "a2a3"));
        assert_eq!(game.algebraic_notation_history(), vec!["f3", "e5", "g4", "Qh4#"]);
    }

    #[test]
    fn queen_move_can_stalemate() {
        let mut game = Game::from_fen("k7/8/8/2Q5/8/8/8/K7 w - - 0 1").expect("FEN should load");
        assert!(play(&mut game, "c5b6"));

        let last = game.last_half_move().expect("a move was played");
        assert!(last.caused_stalemate);
        assert!(!last.caused_checkmate);
        assert!(!last.caused_check);
    }

    #[test]
    fn rewinding_then_playing_prunes_the_future() {
        let mut game = Game::new().expect("starting position should build");
        assert!(!game.reset_to_half_move(0));
        assert!(!game.reset_to_start());

        play_all(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6"]);
        assert!(!game.reset_to_half_move(4));

        assert!(game.reset_to_half_move(1));
        assert_eq!(game.half_move_count(), 2);
        assert_eq!(conditions(&game).side_to_move, Side::White);
        assert_eq!(game.half_move_timeline().len(), 4);
        assert_eq!(game.board_timeline().len(), 5);
        assert_eq!(
            game.current_board(),
            game.board_timeline().get(2),
            "board head should sit after the second half-move"
        );

        assert!(play(&mut game, "d2d4"));
        let history: Vec<String> = game
            .half_move_history()
            .iter()
            .map(|half_move| half_move.movement.to_string())
            .collect();
        assert_eq!(history, vec!["e2e4", "e7e5", "d2d4"]);
        assert_eq!(game.half_move_timeline().len(), 3);
        assert_eq!(game.board_timeline().len(), 4);
        assert_eq!(game.conditions_timeline().len(), 4);
        assert_eq!(game.legal_move_timeline().len(), 4);
        assert!(game.half_move_timeline().is_up_to_date());
        assert!(game.board_timeline().is_up_to_date());
    }

    #[test]
    fn rewinding_keeps_future_until_a_new_move() {
        let mut game = Game::new().expect("starting position should build");
        play_all(&mut game, &["d2d4", "d7d5", "c2c4"]);

        assert!(game.reset_to_start());
        assert_eq!(game.half_move_count(), 0);
        assert_eq!(game.current_board(), Some(&Board::starting_position()));
        assert_eq!(conditions(&game), GameConditions::NORMAL_STARTING_CONDITIONS);

        assert!(game.reset_to_half_move(2));
        assert_eq!(game.half_move_count(), 3);
        assert_eq!(
            game.to_fen().as_deref(),
            Some("rnbqkbnr/ppp1pppp/8/3p4/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3 0 2")
        );
    }

    /// Whether `piece` on `start` follows its movement pattern to `end`,
    /// ignoring castling, en passant and check.
    fn follows_pattern(board: &Board, piece: Piece, start: Square, end: Square) -> bool {
        if start == end || board.is_occupied_by_side(end, piece.side) {
            return false;
        }
        let d_file = end.file - start.file;
        let d_rank = end.rank - start.rank;
        let line_is_clear = || {
            let steps = d_file.abs().max(d_rank.abs());
            (1..steps).all(|step| {
                !board.is_occupied(start.offset(d_file.signum() * step, d_rank.signum() * step))
            })
        };
        let straight = d_file == 0 || d_rank == 0;
        let diagonal = d_file.abs() == d_rank.abs();

        match piece.kind {
            PieceKind::Knight => KNIGHT_OFFSETS.contains(&Square::new(d_file, d_rank)),
            PieceKind::King => d_file.abs() <= 1 && d_rank.abs() <= 1,
            PieceKind::Bishop => diagonal && line_is_clear(),
            PieceKind::Rook => straight && line_is_clear(),
            PieceKind::Queen => (straight || diagonal) && line_is_clear(),
            PieceKind::Pawn => {
                let forward = piece.side.forward_direction();
                let target_occupied = board.is_occupied(end);
                if d_file == 0 && d_rank == forward {
                    !target_occupied
                } else if d_file == 0 && d_rank == 2 * forward {
                    start.rank == piece.side.pawn_rank() && !target_occupied && line_is_clear()
                } else {
                    d_file.abs() == 1 && d_rank == forward && target_occupied
                }
            }
        }
    }

    fn brute_force_plain_move_count(board: &Board, side: Side) -> usize {
        let mut count = 0;
        for (start, piece) in board.pieces().filter(|(_, piece)| piece.side == side) {
            for index in 0..64 {
                let end = Square::from_index(index);
                if follows_pattern(board, piece, start, end)
                    && move_obeys_rules(board, &Movement::new(start, end), side)
                        .expect("probe should run")
                {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn random_playouts_are_sound_and_complete() {
        let mut rng = StdRng::seed_from_u64(0x5eed_c4e5);

        for _ in 0..6 {
            let mut game = Game::new().expect("starting position should build");

            for _ in 0..80 {
                let board = game.current_board().expect("game has a current position").clone();
                let side = conditions(&game).side_to_move;
                let legal_moves: Vec<Movement> = game
                    .current_legal_moves()
                    .expect("game has a current position")
                    .iter()
                    .copied()
                    .collect();

                for movement in &legal_moves {
                    let mut probe = board.clone();
                    probe
                        .move_piece(&movement.set_promotion_piece(PieceKind::Queen))
                        .expect("indexed moves should apply");
                    assert!(!is_player_in_check(&probe, side), "{movement} leaves the king in check");
                }

                let plain = legal_moves
                    .iter()
                    .filter(|movement| !movement.is_castling() && !movement.is_en_passant())
                    .count();
                assert_eq!(plain, brute_force_plain_move_count(&board, side));

                if legal_moves.is_empty() {
                    break;
                }
                let mut choice = legal_moves[rng.gen_range(0..legal_moves.len())];
                if choice.is_promotion() {
                    let kinds = PieceKind::PROMOTION_CHOICES;
                    choice = choice.set_promotion_piece(kinds[rng.gen_range(0..kinds.len())]);
                }
                assert!(game.try_execute_move(&choice).expect("indexed moves should execute"));
            }
        }
    }
}
