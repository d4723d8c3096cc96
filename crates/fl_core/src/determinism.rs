//! Determinism utilities: stable ordering for scored entries.
//!
//! - Total order on `f64` via `total_cmp` (no NaN panics)
//! - Canonical "leaderboard" order: value descending, name ascending on ties

use core::cmp::Ordering;

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Leaderboard order: higher value first, ties broken by ascending name.
#[inline]
pub fn cmp_desc_by_value<N: AsRef<str>>(a: (&N, f64), b: (&N, f64)) -> Ordering {
    match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.as_ref().cmp(b.0.as_ref()),
        o => o,
    }
}

/// Sort `(name, value)` pairs **in place** into leaderboard order.
#[inline]
pub fn sort_desc_by_value<N: AsRef<str>>(xs: &mut [(N, f64)]) {
    xs.sort_by(|a, b| cmp_desc_by_value((&a.0, a.1), (&b.0, b.1)));
}
