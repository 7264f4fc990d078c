use std::sync::OnceLock;

/// Per-square reachability masks for the two leaper pieces. Built once on
/// first use and read-only afterwards; off-board targets are filtered at
/// build time. Own-occupied targets are the move generator's problem.
pub struct LeaperTables {
    pub knight: [u64; 64],
    pub king: [u64; 64],
}

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

static TABLES: OnceLock<LeaperTables> = OnceLock::new();

pub fn leaper_tables() -> &'static LeaperTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> LeaperTables {
    let mut knight = [0u64; 64];
    let mut king = [0u64; 64];

    for square in 0..64usize {
        let rank = (square / 8) as i8;
        let file = (square % 8) as i8;

        for &(dr, df) in &KNIGHT_STEPS {
            let r = rank + dr;
            let f = file + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                knight[square] |= 1u64 << (r * 8 + f);
            }
        }

        for &(dr, df) in &KING_STEPS {
            let r = rank + dr;
            let f = file + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                king[square] |= 1u64 << (r * 8 + f);
            }
        }
    }

    LeaperTables { knight, king }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_mask_counts() {
        let tables = leaper_tables();
        // Corner knight reaches 2 squares, a central one all 8.
        assert_eq!(tables.knight[0].count_ones(), 2);
        assert_eq!(tables.knight[7].count_ones(), 2);
        assert_eq!(tables.knight[27].count_ones(), 8);
    }

    #[test]
    fn test_king_mask_counts() {
        let tables = leaper_tables();
        assert_eq!(tables.king[0].count_ones(), 3);
        assert_eq!(tables.king[63].count_ones(), 3);
        assert_eq!(tables.king[4].count_ones(), 5);
        assert_eq!(tables.king[27].count_ones(), 8);
    }

    #[test]
    fn test_masks_are_symmetric() {
        let tables = leaper_tables();
        for s in 0..64usize {
            for t in 0..64usize {
                let knight_st = tables.knight[s] >> t & 1;
                let knight_ts = tables.knight[t] >> s & 1;
                assert_eq!(knight_st, knight_ts, "knight {} <-> {}", s, t);

                let king_st = tables.king[s] >> t & 1;
                let king_ts = tables.king[t] >> s & 1;
                assert_eq!(king_st, king_ts, "king {} <-> {}", s, t);
            }
        }
    }
}
