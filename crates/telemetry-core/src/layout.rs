//! Bucket boundary generators
//!
//! Every layout starts with an underflow bucket at `0`. Boundaries are whole
//! numbers stored as `f64` so percentile interpolation can use them directly.

/// Boundaries shared by `boolean`, `flag` and `count` histograms
pub const TWO_STATE_RANGES: [f64; 3] = [0.0, 1.0, 2.0];

/// Evenly spaced boundaries between `low` and `high`
///
/// Boundary `i` (for `1 <= i < n_buckets`) is
/// `round((low * (n - 1 - i) + high * (i - 1)) / (n - 2))`.
/// Callers must ensure `n_buckets >= 3`.
pub fn linear_buckets(low: i64, high: i64, n_buckets: usize) -> Vec<f64> {
    debug_assert!(n_buckets >= 3);

    let low = low as f64;
    let high = high as f64;
    let denominator = (n_buckets - 2) as f64;

    let mut ranges = vec![0.0; n_buckets];
    for (i, boundary) in ranges.iter_mut().enumerate().skip(1) {
        let value = (low * (n_buckets - 1 - i) as f64 + high * (i - 1) as f64) / denominator;
        *boundary = (value + 0.5).trunc();
    }
    ranges
}

/// Exponentially spaced boundaries between `low` and `high`
///
/// Each boundary is placed so the remaining log-range is split evenly over
/// the remaining buckets, and is forced to grow by at least one.
/// Callers must ensure `n_buckets >= 3` and `low >= 1`.
pub fn exponential_buckets(low: i64, high: i64, n_buckets: usize) -> Vec<f64> {
    debug_assert!(n_buckets >= 3 && low >= 1);

    let log_max = (high as f64).ln();
    let mut ranges = vec![0.0; n_buckets];
    let mut current = low as f64;
    ranges[1] = current;

    for (i, boundary) in ranges.iter_mut().enumerate().skip(2) {
        let log_current = current.ln();
        let log_ratio = (log_max - log_current) / (n_buckets - i) as f64;
        let next = ((log_current + log_ratio).exp() + 0.5).floor();
        current = if next > current { next } else { current + 1.0 };
        *boundary = current;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_buckets() {
        assert_eq!(linear_buckets(1, 2, 3), vec![0.0, 1.0, 2.0]);
        assert_eq!(linear_buckets(1, 3, 4), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            linear_buckets(1, 100, 12),
            vec![0.0, 1.0, 11.0, 21.0, 31.0, 41.0, 51.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
    }

    #[test]
    fn test_exponential_buckets() {
        assert_eq!(
            exponential_buckets(1, 100, 10),
            vec![0.0, 1.0, 2.0, 3.0, 5.0, 9.0, 16.0, 29.0, 54.0, 100.0]
        );
    }

    #[test]
    fn test_exponential_buckets_grow_by_at_least_one() {
        // Dense low end where rounding would otherwise repeat a boundary
        let ranges = exponential_buckets(1, 10000, 50);
        assert_eq!(&ranges[..10], &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);
        assert_eq!(ranges[49], 10000.0);
        assert!(ranges.windows(2).all(|w| w[0] < w[1]));
    }
}
