/// Bound returned for indices where the asymptotic formula is unreliable.
pub const SMALL_INDEX_BOUND: u64 = 30;

/// Upper bound U on the n-th prime (0-indexed), using
/// p(n) ~ n (ln n + ln ln n). The `+ 2` absorbs float rounding.
pub fn upper_bound(n: u64) -> u64 {
    if n < 10 {
        return SMALL_INDEX_BOUND;
    }
    let m = n as f64;
    // `as` saturates on overflow, which is fine: such bounds never fit in memory.
    (m * (m.ln() + m.ln().ln())) as u64 + 2
}
