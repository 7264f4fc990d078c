use crate::board::{Board, Color};
use crate::evaluation::Evaluator;
use crate::movegen::{Move, MoveGenerator};

const NEG_INF: i32 = -1_000_000_000;
const POS_INF: i32 = 1_000_000_000;

/// Mate scores are offset by the remaining depth so that a mate found
/// earlier in the tree outranks one found later.
pub const MATE_SCORE: i32 = 10_000_000;

pub const DEFAULT_DEPTH: u32 = 3;

/// Outcome of one root search. `best` is `None` exactly when the side to
/// move has no legal moves; `nodes` is diagnostics only and never affects
/// the chosen move.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    pub best: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

pub struct Search {
    evaluator: Evaluator,
    move_generator: MoveGenerator,
}

impl Search {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
            move_generator: MoveGenerator::new(),
        }
    }

    /// Fixed-depth negamax with alpha-beta pruning. The root scans every
    /// legal move once and keeps the maximum negated child value; ties
    /// break to the first move found in scan order, so the result is
    /// deterministic for a given board and depth.
    pub fn best_move(&self, board: &Board, side: Color, depth: u32) -> SearchReport {
        // The search owns this copy outright; the caller's board is never
        // touched.
        let mut scratch = board.clone();
        let mut nodes = 0u64;

        let moves = self.move_generator.generate_legal_moves(&scratch, side);
        let mut best = None;
        let mut best_score = NEG_INF;

        for mv in moves {
            let undo = scratch.apply_move(&mv);
            let value = -self.negamax(
                &mut scratch,
                side.opposite(),
                depth.saturating_sub(1),
                NEG_INF,
                POS_INF,
                &mut nodes,
            );
            scratch.undo_move(undo);

            if value > best_score {
                best_score = value;
                best = Some(mv);
            }
        }

        let score = if best.is_some() { best_score } else { 0 };
        SearchReport { best, score, nodes }
    }

    /// Every node reports its score from the current mover's perspective
    /// and negates the child's answer. Undo is paired with apply on every
    /// exit path, including the cutoff, so the shared board is intact for
    /// the caller no matter how a node ends.
    fn negamax(
        &self,
        board: &mut Board,
        side: Color,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        let moves = self.move_generator.generate_legal_moves(board, side);
        if moves.is_empty() {
            if self.move_generator.is_king_in_check(board, side) {
                return -(MATE_SCORE + depth as i32);
            }
            return 0;
        }

        if depth == 0 {
            return side.sign() * self.evaluator.evaluate(board);
        }

        let mut best = NEG_INF;
        for mv in moves {
            let undo = board.apply_move(&mv);
            let value = -self.negamax(board, side.opposite(), depth - 1, -beta, -alpha, nodes);
            board.undo_move(undo);

            if value > best {
                best = value;
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}
