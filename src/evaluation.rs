use crate::board::{Board, Piece};

/// Static material evaluator. The values are fixed but live in fields so a
/// variant can tune them without touching the sign convention the search
/// depends on.
pub struct Evaluator {
    pub pawn_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub rook_value: i32,
    pub queen_value: i32,
    pub king_value: i32,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            pawn_value: 100,
            knight_value: 200,
            bishop_value: 230,
            rook_value: 400,
            queen_value: 900,
            king_value: 2000,
        }
    }

    pub fn piece_value(&self, piece: Piece) -> i32 {
        match piece {
            Piece::Pawn => self.pawn_value,
            Piece::Knight => self.knight_value,
            Piece::Bishop => self.bishop_value,
            Piece::Rook => self.rook_value,
            Piece::Queen => self.queen_value,
            Piece::King => self.king_value,
        }
    }

    /// Summed piece values signed by owner; positive favors White, an empty
    /// board is 0.
    pub fn evaluate(&self, board: &Board) -> i32 {
        let mut score = 0;
        for square in 0..64u8 {
            if let Some(p) = board.piece_at(square) {
                score += p.color.sign() * self.piece_value(p.piece);
            }
        }
        score
    }
}
