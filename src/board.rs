use std::fmt;

use crate::coord::flip_rank;
use crate::error::EngineError;
use crate::movegen::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign convention shared with the evaluator: positive favors White.
    pub fn sign(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredPiece {
    pub color: Color,
    pub piece: Piece,
}

impl ColoredPiece {
    pub fn new(color: Color, piece: Piece) -> Self {
        Self { color, piece }
    }

    /// Letter case selects the owner, letter identity the type. Anything
    /// that is not a piece letter yields `None`.
    pub fn from_char(c: char) -> Option<ColoredPiece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_uppercase() {
            'P' => Piece::Pawn,
            'N' => Piece::Knight,
            'B' => Piece::Bishop,
            'R' => Piece::Rook,
            'Q' => Piece::Queen,
            'K' => Piece::King,
            _ => return None,
        };
        Some(ColoredPiece { color, piece })
    }

    pub fn to_char(&self) -> char {
        let c = match self.piece {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// Saved occupants of the two squares a move touches. A move has no other
/// side effect, so restoring these two cells is a full rollback.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    from: u8,
    to: u8,
    source: Option<ColoredPiece>,
    target: Option<ColoredPiece>,
}

pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Flat 64-slot occupancy array in engine order: `index = rank * 8 + file`,
/// rank 0 is White's back rank. At most one piece per slot by construction;
/// "exactly one king per side" is the caller's invariant to preserve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<ColoredPiece>; 64],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    pub fn standard() -> Self {
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut board = Board::empty();
        for (file, &piece) in back_rank.iter().enumerate() {
            let file = file as u8;
            board.set(file, Some(ColoredPiece::new(Color::White, piece)));
            board.set(8 + file, Some(ColoredPiece::new(Color::White, Piece::Pawn)));
            board.set(48 + file, Some(ColoredPiece::new(Color::Black, Piece::Pawn)));
            board.set(56 + file, Some(ColoredPiece::new(Color::Black, piece)));
        }
        board
    }

    /// Builds a board from the host's 64-character snapshot, row-major from
    /// the display top row to the bottom row. Wrong length or an
    /// unrecognized character is refused without producing a board.
    pub fn from_state_text(text: &str) -> Result<Self, EngineError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 64 {
            return Err(EngineError::StateTextLength(chars.len()));
        }

        let mut board = Board::empty();
        for (display_idx, &c) in chars.iter().enumerate() {
            if c == '0' {
                continue;
            }
            let piece = ColoredPiece::from_char(c).ok_or(EngineError::StateTextChar(c))?;
            board.set(flip_rank(display_idx as u8), Some(piece));
        }
        Ok(board)
    }

    /// Inverse of `from_state_text`; the round trip is exact for any
    /// well-formed snapshot.
    pub fn state_text(&self) -> String {
        let mut text = String::with_capacity(64);
        for display_idx in 0..64u8 {
            match self.squares[flip_rank(display_idx) as usize] {
                Some(piece) => text.push(piece.to_char()),
                None => text.push('0'),
            }
        }
        text
    }

    /// Builds a board from a slash-delimited placement field, 8th rank
    /// first: digits 1-8 are runs of empty squares, letters are pieces.
    /// Only the placement field is consumed; there is no active color,
    /// castling, en-passant or clock data here.
    pub fn from_placement(placement: &str) -> Result<Self, EngineError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::PlacementShape);
        }

        let mut board = Board::empty();
        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(EngineError::PlacementChar(c));
                    }
                    let run = run as u8;
                    if file + run > 8 {
                        return Err(EngineError::PlacementShape);
                    }
                    file += run;
                    continue;
                }
                let piece = ColoredPiece::from_char(c).ok_or(EngineError::PlacementChar(c))?;
                if file >= 8 {
                    return Err(EngineError::PlacementShape);
                }
                board.set(rank * 8 + file, Some(piece));
                file += 1;
            }
            if file != 8 {
                return Err(EngineError::PlacementShape);
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: u8) -> Option<ColoredPiece> {
        self.squares[square as usize]
    }

    pub fn set(&mut self, square: u8, content: Option<ColoredPiece>) {
        self.squares[square as usize] = content;
    }

    /// Overwrites the destination with the source piece and clears the
    /// source; captures are the implicit overwrite. Returns the saved
    /// occupants so the move can be reverted exactly.
    pub fn apply_move(&mut self, mv: &Move) -> Undo {
        let undo = Undo {
            from: mv.from,
            to: mv.to,
            source: self.squares[mv.from as usize],
            target: self.squares[mv.to as usize],
        };
        self.squares[mv.to as usize] = self.squares[mv.from as usize];
        self.squares[mv.from as usize] = None;
        undo
    }

    pub fn undo_move(&mut self, undo: Undo) {
        self.squares[undo.from as usize] = undo.source;
        self.squares[undo.to as usize] = undo.target;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = String::new();
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = rank * 8 + file;
                match self.squares[square as usize] {
                    Some(piece) => result.push(piece.to_char()),
                    None => result.push('.'),
                }
                if file < 7 {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_TEXT: &str =
        "rnbqkbnrpppppppp00000000000000000000000000000000PPPPPPPPRNBQKBNR";

    #[test]
    fn test_state_text_round_trip() {
        let board = Board::from_state_text(START_TEXT).unwrap();
        assert_eq!(board.state_text(), START_TEXT);

        // A sparse mid-game snapshot survives the round trip too.
        let sparse =
            "0000k0000000000000000000000q00000000000000N0000000000000R000K000";
        let board = Board::from_state_text(sparse).unwrap();
        assert_eq!(board.state_text(), sparse);
    }

    #[test]
    fn test_state_text_matches_engine_order() {
        let board = Board::from_state_text(START_TEXT).unwrap();
        // Display row 0 is Black's back rank, which is engine rank 7.
        assert_eq!(
            board.piece_at(56),
            Some(ColoredPiece::new(Color::Black, Piece::Rook))
        );
        assert_eq!(
            board.piece_at(4),
            Some(ColoredPiece::new(Color::White, Piece::King))
        );
        assert_eq!(board.piece_at(27), None);
    }

    #[test]
    fn test_malformed_state_text_is_refused() {
        assert_eq!(
            Board::from_state_text("0000"),
            Err(EngineError::StateTextLength(4))
        );
        let bad = format!("x{}", "0".repeat(63));
        assert_eq!(
            Board::from_state_text(&bad),
            Err(EngineError::StateTextChar('x'))
        );
    }

    #[test]
    fn test_standard_placement() {
        assert_eq!(
            Board::from_placement(STANDARD_PLACEMENT).unwrap(),
            Board::standard()
        );
        assert_eq!(Board::standard().state_text(), START_TEXT);
    }

    #[test]
    fn test_malformed_placement_is_refused() {
        assert_eq!(
            Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP"),
            Err(EngineError::PlacementShape)
        );
        assert_eq!(
            Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX"),
            Err(EngineError::PlacementChar('X'))
        );
        assert_eq!(
            Board::from_placement("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(EngineError::PlacementChar('9'))
        );
        // A rank that does not add up to 8 files is rejected.
        assert_eq!(
            Board::from_placement("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(EngineError::PlacementShape)
        );
    }

    #[test]
    fn test_overlong_digit_rank_is_refused() {
        // Digit runs past 8 files are refused outright, no matter how many
        // digits pile up in one rank.
        assert_eq!(
            Board::from_placement("44p5/8/8/8/8/8/8/8"),
            Err(EngineError::PlacementShape)
        );
        let flooded = format!("{}/8/8/8/8/8/8/8", "8".repeat(33));
        assert_eq!(
            Board::from_placement(&flooded),
            Err(EngineError::PlacementShape)
        );
    }

    #[test]
    fn test_apply_then_undo_is_a_no_op() {
        let mut board = Board::standard();
        let before = board.state_text();

        // A quiet pawn push and a capture both restore exactly.
        let push = Move::new(12, 28, Piece::Pawn);
        let undo = board.apply_move(&push);
        assert_ne!(board.state_text(), before);
        board.undo_move(undo);
        assert_eq!(board.state_text(), before);

        board.set(28, Some(ColoredPiece::new(Color::Black, Piece::Knight)));
        let snapshot = board.state_text();
        let capture = Move::new(12, 28, Piece::Pawn);
        let undo = board.apply_move(&capture);
        assert_eq!(
            board.piece_at(28),
            Some(ColoredPiece::new(Color::White, Piece::Pawn))
        );
        assert_eq!(board.piece_at(12), None);
        board.undo_move(undo);
        assert_eq!(board.state_text(), snapshot);
    }
}
