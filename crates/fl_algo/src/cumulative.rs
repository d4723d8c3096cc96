//! Season aggregation: running sums/averages and race-wise combination of
//! several sequences (a manager's weekly score is the race-wise sum over the
//! manager's teams; the cumulative pass runs on that combined sequence).

use crate::{Cumulative, Series};

/// `sum[i] = s[0] + .. + s[i]`.
pub fn running_sum(scores: &[f64]) -> Series {
    scores
        .iter()
        .scan(0.0, |acc, x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// `avg[i] = running_sum[i] / (i + 1)`.
pub fn running_average(scores: &[f64]) -> Series {
    running_sum(scores)
        .into_iter()
        .enumerate()
        .map(|(i, s)| s / (i + 1) as f64)
        .collect()
}

pub fn aggregate(scores: &[f64]) -> Cumulative {
    let sum = running_sum(scores);
    let average = sum.iter().enumerate().map(|(i, s)| s / (i + 1) as f64).collect();
    Cumulative { sum, average }
}

/// Race-wise sum of equally long sequences. Empty input gives an empty series.
pub fn column_sum<'a, I>(rows: I) -> Series
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut out: Series = Vec::new();
    for row in rows {
        if out.len() < row.len() {
            out.resize(row.len(), 0.0);
        }
        for (o, x) in out.iter_mut().zip(row) {
            *o += x;
        }
    }
    out
}

/// Race-wise mean of sequences (each race divided by the number of rows).
pub fn column_mean<'a, I>(rows: I) -> Series
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut n = 0usize;
    let sum = column_sum(rows.into_iter().inspect(|_| n += 1));
    if n == 0 {
        return sum;
    }
    sum.into_iter().map(|x| x / n as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn mixed_sign_sequence() {
        let c = aggregate(&[10.0, 0.0, -3.0, 7.0]);
        assert_eq!(c.sum, vec![10.0, 10.0, 7.0, 14.0]);
        assert!(close(&c.average, &[10.0, 5.0, 7.0 / 3.0, 3.5]));
    }

    #[test]
    fn empty_sequence() {
        assert!(running_sum(&[]).is_empty());
        assert_eq!(aggregate(&[]), Cumulative::default());
    }

    #[test]
    fn manager_combines_raw_scores_before_accumulating() {
        let a = [10.0, 20.0];
        let b = [1.0, -4.0];
        let weekly = column_sum([&a[..], &b[..]]);
        assert_eq!(weekly, vec![11.0, 16.0]);
        assert_eq!(running_sum(&weekly), vec![11.0, 27.0]);
        assert_eq!(column_mean([&a[..], &b[..]]), vec![5.5, 8.0]);
    }

    #[test]
    fn column_mean_of_nothing_is_empty() {
        assert!(column_mean(std::iter::empty::<&[f64]>()).is_empty());
    }

    proptest! {
        #[test]
        fn sum_matches_prefix_sums(xs in prop::collection::vec(-1000.0f64..1000.0, 0..40)) {
            let s = running_sum(&xs);
            for i in 0..xs.len() {
                let expect: f64 = xs[..=i].iter().sum();
                prop_assert!((s[i] - expect).abs() < 1e-9);
            }
        }

        #[test]
        fn average_is_sum_over_count(xs in prop::collection::vec(-1000.0f64..1000.0, 0..40)) {
            let c = aggregate(&xs);
            prop_assert_eq!(&c.average, &running_average(&xs));
            for i in 0..xs.len() {
                prop_assert!((c.average[i] - c.sum[i] / (i + 1) as f64).abs() < 1e-12);
            }
        }

        #[test]
        fn nonnegative_scores_never_decrease(xs in prop::collection::vec(0.0f64..500.0, 1..40)) {
            let s = running_sum(&xs);
            prop_assert!(s.windows(2).all(|w| w[1] >= w[0]));
        }
    }
}
