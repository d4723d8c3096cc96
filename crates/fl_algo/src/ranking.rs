//! Standings: rank entries by their final cumulative value.
//!
//! Order is value descending; equal values are ordered by name ascending so
//! the output never depends on map iteration order. Tied entries share a
//! position ("1, 2, 2, 4").

use fl_core::determinism::sort_desc_by_value;

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<N> {
    pub position: usize,
    pub name: N,
    pub value: f64,
}

/// Rank `(name, final value)` pairs.
pub fn rank_desc<N, I>(entries: I) -> Vec<Ranked<N>>
where
    N: AsRef<str>,
    I: IntoIterator<Item = (N, f64)>,
{
    let mut xs: Vec<(N, f64)> = entries.into_iter().collect();
    sort_desc_by_value(&mut xs);

    let mut out: Vec<Ranked<N>> = Vec::with_capacity(xs.len());
    for (i, (name, value)) in xs.into_iter().enumerate() {
        let position = match out.last() {
            Some(prev) if prev.value == value => prev.position,
            _ => i + 1,
        };
        out.push(Ranked { position, name, value });
    }
    out
}

/// Final element of a cumulative series (0 before the first race).
#[inline]
pub fn final_value(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_position_and_sort_by_name() {
        let r = rank_desc(vec![("Ben", 40.0), ("Ann", 55.0), ("Cid", 40.0), ("Dee", 12.0)]);
        let got: Vec<_> = r.iter().map(|x| (x.position, x.name)).collect();
        assert_eq!(got, vec![(1, "Ann"), (2, "Ben"), (2, "Cid"), (4, "Dee")]);
    }

    #[test]
    fn final_value_of_empty_series() {
        assert_eq!(final_value(&[]), 0.0);
        assert_eq!(final_value(&[1.0, 3.0]), 3.0);
    }
}
