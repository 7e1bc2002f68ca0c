//! Leaf-node counting over the legal move tree.
//!
//! Each legal movement is applied with `apply_movement` and the resulting
//! position is expanded through a freshly computed `LegalMoveIndex`, so these
//! counts exercise the exact path `Game` uses for every ply. Promotions are
//! expanded into the four electable pieces.

use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_conditions::GameConditions;
use crate::move_generation::legal_move_apply::{apply_movement, AppliedMovement};
use crate::move_generation::legal_move_index::LegalMoveIndex;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::movement::Movement;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, applied: &AppliedMovement) -> MoveGenResult<()> {
        let half_move = &applied.half_move;
        self.nodes += 1;

        if half_move.captured_piece {
            self.captures += 1;
        }
        if half_move.movement.is_en_passant() {
            self.en_passant += 1;
        }
        if half_move.movement.is_castling() {
            self.castles += 1;
        }
        if half_move.movement.is_promotion() {
            self.promotions += 1;
        }
        if half_move.caused_check {
            self.checks += 1;
            if LegalMoveIndex::compute(&applied.board, &applied.conditions)?.is_empty() {
                self.checkmates += 1;
            }
        }
        Ok(())
    }
}

pub fn perft(board: &Board, conditions: &GameConditions, depth: u8) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    perft_recurse(board, conditions, depth, &mut total)?;
    Ok(total)
}

/// Node count below each root movement, in index order.
pub fn perft_divide(
    board: &Board,
    conditions: &GameConditions,
    depth: u8,
) -> MoveGenResult<Vec<(Movement, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let index = LegalMoveIndex::compute(board, conditions)?;
    let mut divided = Vec::with_capacity(index.len());
    for movement in expand_promotions(&index) {
        let applied = apply_movement(board, conditions, &movement)?;
        let counts = perft(&applied.board, &applied.conditions, depth - 1)?;
        divided.push((movement, counts.nodes));
    }
    Ok(divided)
}

fn perft_recurse(
    board: &Board,
    conditions: &GameConditions,
    remaining_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let index = LegalMoveIndex::compute(board, conditions)?;

    for movement in expand_promotions(&index) {
        let applied = apply_movement(board, conditions, &movement)?;
        if remaining_depth == 1 {
            counts.record_leaf(&applied)?;
        } else {
            let mut child = PerftCounts::default();
            perft_recurse(&applied.board, &applied.conditions, remaining_depth - 1, &mut child)?;
            counts.merge(child);
        }
    }

    Ok(())
}

fn expand_promotions(index: &LegalMoveIndex) -> impl Iterator<Item = Movement> + '_ {
    index.iter().flat_map(|movement| {
        let choices: Vec<Movement> = if movement.is_promotion() {
            PieceKind::PROMOTION_CHOICES
                .iter()
                .map(|kind| movement.set_promotion_piece(*kind))
                .collect()
        } else {
            vec![*movement]
        };
        choices
    })
}
