//! Points per value.
//!
//! Points at race `i` pair with the value at race `i` (same index, no lag).
//! - `per_race[i] = points[i] / values[i]`, or 0 when either is 0.
//! - `average[i] = Σ points[..=i] / Σ values_used[..=i]`, where a race's value
//!   is only "used" when that race scored non-zero points; 0 when either sum is 0.
//!
//! The average is a ratio of sums, not a mean of the per-race ratios.

use crate::PointsPerValue;

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if num == 0.0 || den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Sequences are paired up to the shorter length.
pub fn points_per_value(points: &[f64], values: &[f64]) -> PointsPerValue {
    let n = points.len().min(values.len());
    let mut per_race = Vec::with_capacity(n);
    let mut average = Vec::with_capacity(n);
    let (mut p_sum, mut v_sum) = (0.0, 0.0);

    for (&p, &v) in points.iter().zip(values).take(n) {
        per_race.push(ratio(p, v));
        if p != 0.0 {
            p_sum += p;
            v_sum += v;
        }
        average.push(ratio(p_sum, v_sum));
    }
    PointsPerValue { per_race, average }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_points_or_zero_value_give_zero() {
        let r = points_per_value(&[0.0, 10.0, 6.0], &[20.0, 0.0, 3.0]);
        assert_eq!(r.per_race, vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn average_is_ratio_of_sums() {
        let r = points_per_value(&[10.0, 30.0], &[10.0, 5.0]);
        assert_eq!(r.per_race, vec![1.0, 6.0]);
        // mean of ratios would be 3.5
        assert!((r.average[1] - 40.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn races_without_points_do_not_dilute_average() {
        let r = points_per_value(&[0.0, 12.0, 0.0], &[50.0, 4.0, 50.0]);
        assert_eq!(r.average, vec![0.0, 3.0, 3.0]);
    }

    #[test]
    fn mismatched_lengths_truncate() {
        let r = points_per_value(&[1.0, 2.0, 3.0], &[1.0]);
        assert_eq!(r.per_race.len(), 1);
    }
}
