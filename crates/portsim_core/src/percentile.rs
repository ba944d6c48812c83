//! Order statistics over simulated balances
//!
//! Balances are accumulated per year across trials, sorted once, and queried with
//! linear interpolation between order statistics: for percentile `p` and `L` sorted
//! values the rank is `k = (L - 1) * p / 100`, interpolated between `floor(k)` and
//! `ceil(k)`.
//!
//! NaN is ordered as +inf. Infinite balances pass through unchanged.

use crate::model::{PercentileSeries, SeriesPoint};

/// Percentile of an already sorted slice. Returns 0.0 for an empty slice.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = (sorted.len() - 1) as f64 * (p.clamp(0.0, 100.0) / 100.0);
    let lower = rank.floor();
    let upper = rank.ceil();

    let (lo, hi) = (sorted[lower as usize], sorted[upper as usize]);
    if lower == upper || lo == hi {
        return lo;
    }

    lo * (upper - rank) + hi * (rank - lower)
}

/// Sort balances ascending, mapping NaN to +inf first
pub fn sort_samples(values: &mut [f64]) {
    for v in values.iter_mut() {
        if v.is_nan() {
            *v = f64::INFINITY;
        }
    }
    values.sort_unstable_by(f64::total_cmp);
}

/// Round to two decimal places
#[must_use]
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Per-year accumulation buffer of balances across trials
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlySamples {
    rows: Vec<Vec<f64>>,
}

impl YearlySamples {
    /// Empty buffer for years 0..=`years`, reserving room for `trials` values per year
    #[must_use]
    pub fn new(years: usize, trials: usize) -> Self {
        Self {
            rows: (0..=years).map(|_| Vec::with_capacity(trials)).collect(),
        }
    }

    #[inline]
    pub fn push(&mut self, year: usize, value: f64) {
        self.rows[year].push(value);
    }

    /// Append another buffer's samples (multiset union)
    pub fn merge(&mut self, other: YearlySamples) {
        for (row, other_row) in self.rows.iter_mut().zip(other.rows) {
            row.extend(other_row);
        }
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Number of samples recorded for a year
    #[must_use]
    pub fn len(&self, year: usize) -> usize {
        self.rows.get(year).map_or(0, Vec::len)
    }

    /// Sort every year's samples once
    #[must_use]
    pub fn into_sorted(mut self) -> SortedYearlySamples {
        for row in &mut self.rows {
            sort_samples(row);
        }
        SortedYearlySamples { rows: self.rows }
    }
}

/// Per-year samples sorted ascending, ready for percentile queries
#[derive(Debug, Clone, PartialEq)]
pub struct SortedYearlySamples {
    rows: Vec<Vec<f64>>,
}

impl SortedYearlySamples {
    /// Percentile of one year's samples (0.0 if the year has none)
    #[must_use]
    pub fn percentile(&self, year: usize, p: f64) -> f64 {
        self.rows.get(year).map_or(0.0, |row| percentile(row, p))
    }

    /// Unrounded values at one percentile for every year
    #[must_use]
    pub fn percentile_series(&self, p: f64) -> PercentileSeries {
        PercentileSeries {
            percentile: p,
            points: self
                .rows
                .iter()
                .enumerate()
                .map(|(year, row)| SeriesPoint {
                    year,
                    value: percentile(row, p),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];

        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 50.0), 30.0);
        assert_eq!(percentile(&sorted, 100.0), 50.0);
        // k = 4 * 0.1 = 0.4 -> 10 * 0.6 + 20 * 0.4
        assert!((percentile(&sorted, 10.0) - 14.0).abs() < 1e-12);
        // k = 4 * 0.9 = 3.6 -> 40 * 0.4 + 50 * 0.6
        assert!((percentile(&sorted, 90.0) - 46.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_even_length_median() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 50.0), 2.5);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[7.0], 10.0), 7.0);
        assert_eq!(percentile(&[7.0], 90.0), 7.0);
        // Out-of-range percentiles are clamped
        assert_eq!(percentile(&[1.0, 2.0], 150.0), 2.0);
        assert_eq!(percentile(&[1.0, 2.0], -5.0), 1.0);
    }

    #[test]
    fn test_sort_samples_orders_nan_as_infinity() {
        let mut values = vec![3.0, f64::NAN, 1.0, f64::INFINITY, 2.0];
        sort_samples(&mut values);

        assert_eq!(&values[..3], &[1.0, 2.0, 3.0]);
        assert_eq!(values[3], f64::INFINITY);
        assert_eq!(values[4], f64::INFINITY);
    }

    #[test]
    fn test_percentile_with_infinite_tail_stays_finite_below() {
        let mut values = vec![1.0, 2.0, 3.0, 4.0, f64::NAN];
        sort_samples(&mut values);

        assert_eq!(percentile(&values, 50.0), 3.0);
        assert_eq!(percentile(&values, 90.0), f64::INFINITY);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(1050.004), 1050.0);
        assert_eq!(round_to_cents(12.345_6), 12.35);
        assert_eq!(round_to_cents(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_yearly_samples_merge_and_sort() {
        let mut a = YearlySamples::new(1, 2);
        a.push(0, 5.0);
        a.push(1, 9.0);
        let mut b = YearlySamples::new(1, 2);
        b.push(0, 1.0);
        b.push(1, 3.0);

        a.merge(b);
        assert_eq!(a.len(0), 2);
        assert_eq!(a.years(), 1);

        let sorted = a.into_sorted();
        let median = sorted.percentile_series(50.0);
        assert_eq!(median.points.len(), 2);
        assert_eq!(median.points[0].value, 3.0);
        assert_eq!(median.points[1].value, 6.0);
        assert_eq!(sorted.percentile(1, 0.0), 3.0);
        assert_eq!(sorted.percentile(7, 50.0), 0.0);
    }
}
