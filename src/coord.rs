/// Converts between the display index (top row numbered first, the way the
/// host lays out its squares) and the engine index (White's back rank is
/// rank 0). The transform only mirrors the rank, so it is its own inverse.
pub fn flip_rank(idx: u8) -> u8 {
    let file = idx % 8;
    let rank_from_top = idx / 8;
    (7 - rank_from_top) * 8 + file
}
