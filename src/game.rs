use crate::board::{Board, Color};
use crate::coord::flip_rank;
use crate::error::EngineError;
use crate::movegen::{GameStatus, Move, MoveGenerator};
use crate::search::Search;

/// Automated move as reported to the host: display-indexed endpoints plus
/// search diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ComputerMove {
    pub from: u8,
    pub to: u8,
    pub score: i32,
    pub nodes: u64,
}

/// Host-facing surface. Everything crossing this boundary uses the host's
/// display indices (top row numbered first); the conversion to engine
/// order happens here and nowhere else above the board codec.
pub struct Game {
    board: Board,
    side_to_move: Color,
    move_generator: MoveGenerator,
    search: Search,
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            move_generator: MoveGenerator::new(),
            search: Search::new(),
        }
    }

    /// Fresh game from a slash-delimited placement field, White to move.
    pub fn from_placement(placement: &str) -> Result<Self, EngineError> {
        let board = Board::from_placement(placement)?;
        let mut game = Game::new();
        game.board = board;
        Ok(game)
    }

    pub fn state_text(&self) -> String {
        self.board.state_text()
    }

    /// Replaces the board from a 64-character snapshot; on a malformed
    /// snapshot the previous position is left untouched.
    pub fn load_state_text(&mut self, text: &str) -> Result<(), EngineError> {
        self.board = Board::from_state_text(text)?;
        Ok(())
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Color) {
        self.side_to_move = side;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Legality oracle over display indices. Out-of-range indices are
    /// rejected here, before anything reaches the engine.
    pub fn is_legal(&self, from: u8, to: u8, side: Color) -> bool {
        if from > 63 || to > 63 {
            return false;
        }
        self.move_generator
            .is_move_legal(&self.board, side, flip_rank(from), flip_rank(to))
    }

    /// Validates a proposed move for the side to move and applies it on
    /// acceptance, flipping the turn. A rejection mutates nothing.
    pub fn apply_external_move(&mut self, from: u8, to: u8) -> bool {
        if from > 63 || to > 63 {
            return false;
        }
        let side = self.side_to_move;
        let engine_from = flip_rank(from);
        let engine_to = flip_rank(to);
        if !self
            .move_generator
            .is_move_legal(&self.board, side, engine_from, engine_to)
        {
            return false;
        }
        // The oracle accepted, so the source square holds a mover.
        let Some(piece) = self.board.piece_at(engine_from) else {
            return false;
        };
        self.board
            .apply_move(&Move::new(engine_from, engine_to, piece.piece));
        self.side_to_move = side.opposite();
        true
    }

    /// Searches for `side`, applies the chosen move and flips the turn.
    /// `None` means no legal moves; the caller treats that as game end.
    pub fn computer_move(&mut self, side: Color, depth: u32) -> Option<ComputerMove> {
        let report = self.search.best_move(&self.board, side, depth);
        let mv = report.best?;
        self.board.apply_move(&mv);
        self.side_to_move = side.opposite();
        Some(ComputerMove {
            from: flip_rank(mv.from),
            to: flip_rank(mv.to),
            score: report.score,
            nodes: report.nodes,
        })
    }

    pub fn game_status(&self, side: Color) -> GameStatus {
        self.move_generator.game_status(&self.board, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_move_round_trip() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);

        // e2-e4 in display indices: e2 is display square 52, e4 is 36.
        assert!(game.is_legal(52, 36, Color::White));
        assert!(game.apply_external_move(52, 36));
        assert_eq!(game.side_to_move(), Color::Black);
        let expected = concat!(
            "rnbqkbnr", "pppppppp", "00000000", "00000000",
            "0000P000", "00000000", "PPPP0PPP", "RNBQKBNR"
        );
        assert_eq!(game.state_text(), expected);
    }

    #[test]
    fn test_illegal_request_mutates_nothing() {
        let mut game = Game::new();
        let before = game.state_text();

        // A rook cannot jump over its own pawn.
        assert!(!game.apply_external_move(56, 40));
        // A black move is not accepted while White is to move.
        assert!(!game.apply_external_move(12, 28));
        // Out-of-range indices are rejected at the boundary.
        assert!(!game.apply_external_move(64, 0));
        assert!(!game.is_legal(0, 200, Color::White));

        assert_eq!(game.state_text(), before);
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_load_state_text_keeps_prior_state_on_error() {
        let mut game = Game::new();
        let before = game.state_text();
        assert!(game.load_state_text("too short").is_err());
        assert_eq!(game.state_text(), before);

        let sparse = "0000k0000000000000000000000000000000000000000000000000000000K000";
        game.load_state_text(sparse).unwrap();
        assert_eq!(game.state_text(), sparse);
    }

    #[test]
    fn test_computer_answers_and_flips_the_turn() {
        let mut game = Game::new();
        assert!(game.apply_external_move(52, 36)); // e2-e4

        let reply = game.computer_move(Color::Black, 2).unwrap();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(reply.nodes > 0);
        // The reply must have been legal for Black in the position it was
        // searched from.
        assert!(reply.from < 64 && reply.to < 64);
    }

    #[test]
    fn test_computer_reports_no_move_at_game_end() {
        // Stalemate: Black to move with no legal moves and no check.
        let mut game = Game::from_placement("k7/8/1Q6/8/8/8/8/4K3").unwrap();
        game.set_side_to_move(Color::Black);
        assert!(game.computer_move(Color::Black, 3).is_none());
        assert_eq!(game.game_status(Color::Black), GameStatus::Stalemate);
    }

    #[test]
    fn test_game_status_reports_winner() {
        let game = Game::from_placement("7k/7Q/6K1/8/8/8/8/8").unwrap();
        assert_eq!(
            game.game_status(Color::Black),
            GameStatus::Checkmate(Color::White)
        );
        assert_eq!(game.game_status(Color::White), GameStatus::Ongoing);
    }

    #[test]
    fn test_rook_slide_legality() {
        // Lone white rook on a1, black king on e8, white pawn on a4.
        let game = Game::from_placement("4k3/8/8/8/P7/8/8/R7").unwrap();

        // Display indices: a1 = 56, a2 = 48, a3 = 40, a5 = 24, h1 = 63.
        assert!(game.is_legal(56, 48, Color::White));
        assert!(game.is_legal(56, 40, Color::White));
        assert!(game.is_legal(56, 63, Color::White));
        // Sliding through (or onto) the own pawn on a4 is rejected.
        assert!(!game.is_legal(56, 32, Color::White));
        assert!(!game.is_legal(56, 24, Color::White));
    }
}
