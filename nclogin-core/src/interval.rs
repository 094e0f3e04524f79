//! Adaptive poll interval.
//!
//! Every time the scheduler wakes up because the interval elapsed (rather
//! than because the user asked for a poll), the interval grows:
//!
//! ```text
//! next = base * log2(2^(prev / base) + 1)
//! ```
//!
//! Starting from `prev = base` this yields `base * log2(k + 1)` for the k-th
//! interval: 5s, 7.92s, 10s, 11.6s, 12.9s, ... for the default 5s base.
//! The spacing grows without bound but ever more slowly.

use std::time::Duration;

/// Default base interval in seconds.
pub const DEFAULT_BASE_SECS: f64 = 5.0;

/// Computes the interval that follows `prev_secs` for the given base.
///
/// Evaluated as `prev + base * log2(1 + 2^(-prev / base))`, which is the
/// same quantity but cannot overflow for large intervals.
pub fn next_interval_secs(prev_secs: f64, base_secs: f64) -> f64 {
    if base_secs <= 0.0 || !prev_secs.is_finite() {
        return prev_secs;
    }
    let growth = (-prev_secs / base_secs).exp2().ln_1p() / std::f64::consts::LN_2;
    prev_secs + base_secs * growth
}

/// The current wait between timer-driven polls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollInterval {
    base_secs: f64,
    current_secs: f64,
}

impl PollInterval {
    /// Creates an interval policy starting at `base`.
    pub fn new(base: Duration) -> Self {
        let base_secs = base.as_secs_f64();
        Self {
            base_secs,
            current_secs: base_secs,
        }
    }

    /// The current interval.
    pub fn current(&self) -> Duration {
        Duration::try_from_secs_f64(self.current_secs).unwrap_or(Duration::MAX)
    }

    /// The current interval in seconds.
    pub fn current_secs(&self) -> f64 {
        self.current_secs
    }

    /// Grows the interval after a timer-driven wake-up.
    pub fn advance(&mut self) {
        self.current_secs = next_interval_secs(self.current_secs, self.base_secs);
    }
}

impl Default for PollInterval {
    fn default() -> Self {
        Self::new(Duration::from_secs_f64(DEFAULT_BASE_SECS))
    }
}

impl Iterator for PollInterval {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.current();
        self.advance();
        Some(current)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(prev: f64) -> f64 {
        5.0 * ((prev / 5.0).exp2() + 1.0).log2()
    }

    #[test]
    fn test_matches_reference_formula() {
        let mut prev = 5.0;
        for _ in 0..10 {
            let next = next_interval_secs(prev, 5.0);
            assert!((next - reference(prev)).abs() < 1e-9, "prev={prev}");
            prev = next;
        }
    }

    #[test]
    fn test_closed_form_sequence() {
        let mut interval = PollInterval::default();
        for k in 1..=8u32 {
            let expected = 5.0 * f64::from(k + 1).log2();
            assert!(
                (interval.current_secs() - expected).abs() < 1e-9,
                "step {k}: {} != {expected}",
                interval.current_secs()
            );
            interval.advance();
        }
    }

    #[test]
    fn test_strictly_increasing() {
        let values: Vec<Duration> = PollInterval::default().take(50).collect();
        for pair in values.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert_eq!(values[0], Duration::from_secs(5));
        assert!((values[2].as_secs_f64() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_large_interval_stays_finite() {
        let next = next_interval_secs(1.0e6, 5.0);
        assert!(next.is_finite());
        assert!(next >= 1.0e6);
        assert!(reference(1.0e6).is_infinite());
    }

    #[test]
    fn test_custom_base() {
        let mut interval = PollInterval::new(Duration::from_millis(100));
        assert_eq!(interval.current(), Duration::from_millis(100));
        interval.advance();
        assert!((interval.current_secs() - 0.1 * 3f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_base_does_not_grow() {
        let mut interval = PollInterval::new(Duration::ZERO);
        interval.advance();
        assert_eq!(interval.current(), Duration::ZERO);
    }
}
