use crate::board::{Board, Color, ColoredPiece, Piece};
use crate::masks::{leaper_tables, LeaperTables};

/// A move is only (from, to, mover); whether it captures is derivable from
/// the board it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub piece: Piece,
}

impl Move {
    pub fn new(from: u8, to: u8, piece: Piece) -> Self {
        Self { from, to, piece }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move has no legal moves and is in check; the payload is
    /// the winner.
    Checkmate(Color),
    Stalemate,
}

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub struct MoveGenerator {
    tables: &'static LeaperTables,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self {
            tables: leaper_tables(),
        }
    }

    /// Pseudo-legal moves for `side`, in board-scan order (square 0..63,
    /// then the fixed per-piece direction order). The mover's own king may
    /// be left attacked; no en passant, promotion or castling. An empty
    /// list is a normal answer, never an error.
    pub fn generate_moves(&self, board: &Board, side: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in 0..64u8 {
            let occupant = match board.piece_at(from) {
                Some(p) if p.color == side => p,
                _ => continue,
            };
            match occupant.piece {
                Piece::Pawn => self.pawn_moves(board, side, from, &mut moves),
                Piece::Knight => self.leaper_moves(
                    board,
                    side,
                    from,
                    Piece::Knight,
                    self.tables.knight[from as usize],
                    &mut moves,
                ),
                Piece::King => self.leaper_moves(
                    board,
                    side,
                    from,
                    Piece::King,
                    self.tables.king[from as usize],
                    &mut moves,
                ),
                Piece::Bishop => {
                    self.slider_moves(board, side, from, Piece::Bishop, &BISHOP_DIRS, &mut moves)
                }
                Piece::Rook => {
                    self.slider_moves(board, side, from, Piece::Rook, &ROOK_DIRS, &mut moves)
                }
                Piece::Queen => {
                    self.slider_moves(board, side, from, Piece::Queen, &ROOK_DIRS, &mut moves);
                    self.slider_moves(board, side, from, Piece::Queen, &BISHOP_DIRS, &mut moves);
                }
            }
        }
        moves
    }

    /// Pseudo-legal moves filtered by "own king not attacked afterwards",
    /// probed with a paired apply/undo on a scratch copy.
    pub fn generate_legal_moves(&self, board: &Board, side: Color) -> Vec<Move> {
        let mut probe = board.clone();
        self.generate_moves(board, side)
            .into_iter()
            .filter(|mv| {
                let undo = probe.apply_move(mv);
                let safe = !self.is_king_in_check(&probe, side);
                probe.undo_move(undo);
                safe
            })
            .collect()
    }

    /// Legality oracle: recomputes the legal move list on every query and
    /// accepts iff (from, to) is in it. Correctness over speed.
    pub fn is_move_legal(&self, board: &Board, side: Color, from: u8, to: u8) -> bool {
        self.generate_legal_moves(board, side)
            .iter()
            .any(|mv| mv.from == from && mv.to == to)
    }

    /// Game end for the side about to move: no legal moves plus the check
    /// predicate distinguishes checkmate from stalemate.
    pub fn game_status(&self, board: &Board, side: Color) -> GameStatus {
        if !self.generate_legal_moves(board, side).is_empty() {
            return GameStatus::Ongoing;
        }
        if self.is_king_in_check(board, side) {
            GameStatus::Checkmate(side.opposite())
        } else {
            GameStatus::Stalemate
        }
    }

    fn leaper_moves(
        &self,
        board: &Board,
        side: Color,
        from: u8,
        piece: Piece,
        mask: u64,
        out: &mut Vec<Move>,
    ) {
        // The precomputed mask already filtered off-board targets; only the
        // own-occupied ones are removed here.
        let mut targets = mask;
        while targets != 0 {
            let to = targets.trailing_zeros() as u8;
            targets &= targets - 1;
            match board.piece_at(to) {
                Some(p) if p.color == side => {}
                _ => out.push(Move::new(from, to, piece)),
            }
        }
    }

    fn pawn_moves(&self, board: &Board, side: Color, from: u8, out: &mut Vec<Move>) {
        let rank = (from / 8) as i8;
        let file = (from % 8) as i8;
        let (dir, start_rank): (i8, i8) = match side {
            Color::White => (1, 1),
            Color::Black => (-1, 6),
        };

        let ahead = rank + dir;
        if !(0..8).contains(&ahead) {
            return;
        }

        let one = (ahead * 8 + file) as u8;
        if board.piece_at(one).is_none() {
            out.push(Move::new(from, one, Piece::Pawn));
            // Double push only from the starting rank with both squares empty.
            if rank == start_rank {
                let two = ((rank + 2 * dir) * 8 + file) as u8;
                if board.piece_at(two).is_none() {
                    out.push(Move::new(from, two, Piece::Pawn));
                }
            }
        }

        for df in [-1i8, 1] {
            let f = file + df;
            if !(0..8).contains(&f) {
                continue;
            }
            let to = (ahead * 8 + f) as u8;
            if matches!(board.piece_at(to), Some(p) if p.color != side) {
                out.push(Move::new(from, to, Piece::Pawn));
            }
        }
    }

    fn slider_moves(
        &self,
        board: &Board,
        side: Color,
        from: u8,
        piece: Piece,
        dirs: &[(i8, i8)],
        out: &mut Vec<Move>,
    ) {
        let rank = (from / 8) as i8;
        let file = (from % 8) as i8;
        for &(dr, df) in dirs {
            let mut r = rank + dr;
            let mut f = file + df;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                let to = (r * 8 + f) as u8;
                match board.piece_at(to) {
                    None => out.push(Move::new(from, to, piece)),
                    Some(p) => {
                        // First occupied square ends the ray; included only
                        // if it holds an enemy piece.
                        if p.color != side {
                            out.push(Move::new(from, to, piece));
                        }
                        break;
                    }
                }
                r += dr;
                f += df;
            }
        }
    }

    pub fn is_square_attacked(&self, board: &Board, square: u8, attacker: Color) -> bool {
        let rank = (square / 8) as i8;
        let file = (square % 8) as i8;

        // Pawns: an attacker pawn one rank behind its push direction on an
        // adjacent file covers this square.
        let pawn_dir: i8 = match attacker {
            Color::White => 1,
            Color::Black => -1,
        };
        for df in [-1i8, 1] {
            let r = rank - pawn_dir;
            let f = file + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                let from = (r * 8 + f) as u8;
                if board.piece_at(from) == Some(ColoredPiece::new(attacker, Piece::Pawn)) {
                    return true;
                }
            }
        }

        // Leapers: the masks are symmetric, so the squares this square
        // "attacks" are exactly the squares attacking it.
        let mut knights = self.tables.knight[square as usize];
        while knights != 0 {
            let from = knights.trailing_zeros() as u8;
            knights &= knights - 1;
            if board.piece_at(from) == Some(ColoredPiece::new(attacker, Piece::Knight)) {
                return true;
            }
        }
        let mut kings = self.tables.king[square as usize];
        while kings != 0 {
            let from = kings.trailing_zeros() as u8;
            kings &= kings - 1;
            if board.piece_at(from) == Some(ColoredPiece::new(attacker, Piece::King)) {
                return true;
            }
        }

        // Sliders: walk each ray to the first occupant.
        for &(dr, df) in &ROOK_DIRS {
            if self.ray_hits(board, rank, file, dr, df, attacker, Piece::Rook) {
                return true;
            }
        }
        for &(dr, df) in &BISHOP_DIRS {
            if self.ray_hits(board, rank, file, dr, df, attacker, Piece::Bishop) {
                return true;
            }
        }
        false
    }

    fn ray_hits(
        &self,
        board: &Board,
        rank: i8,
        file: i8,
        dr: i8,
        df: i8,
        attacker: Color,
        slider: Piece,
    ) -> bool {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            if let Some(p) = board.piece_at((r * 8 + f) as u8) {
                return p.color == attacker && (p.piece == slider || p.piece == Piece::Queen);
            }
            r += dr;
            f += df;
        }
        false
    }

    pub fn king_square(&self, board: &Board, side: Color) -> Option<u8> {
        (0..64u8).find(|&sq| board.piece_at(sq) == Some(ColoredPiece::new(side, Piece::King)))
    }

    pub fn is_king_in_check(&self, board: &Board, side: Color) -> bool {
        match self.king_square(board, side) {
            Some(sq) => self.is_square_attacked(board, sq, side.opposite()),
            None => false,
        }
    }
}
