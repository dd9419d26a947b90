/// Running minimum/maximum of every waveform sample observed this session.
///
/// The interval only ever widens: min is non-increasing, max is
/// non-decreasing, and neither is reset. An early extreme sample therefore
/// compresses all later normal-range frames toward the midpoint. That is
/// the reference behavior and is kept as-is; a sliding window would be a
/// deliberate policy change, not a fix.
#[derive(Clone, Copy, Debug)]
pub struct RangeTracker {
    min: f64,
    max: f64,
}

impl Default for RangeTracker {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the tracked interval to include `value`.
    pub fn observe(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Current (min, max) bounds.
    pub fn current(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(RangeTracker::new().current(), (0.0, 0.0));
    }

    #[test]
    fn test_observe_widens_both_ends() {
        let mut range = RangeTracker::new();
        range.observe(2.5);
        assert_eq!(range.current(), (0.0, 2.5));
        range.observe(-1.25);
        assert_eq!(range.current(), (-1.25, 2.5));
    }

    #[test]
    fn test_never_shrinks() {
        let mut range = RangeTracker::new();
        range.observe(-4.0);
        range.observe(4.0);
        for v in [-3.9, 0.0, 1.0, 3.9] {
            range.observe(v);
            assert_eq!(range.current(), (-4.0, 4.0));
        }
    }

    #[test]
    fn test_monotonic_over_sequence() {
        let mut range = RangeTracker::new();
        let (mut last_min, mut last_max) = range.current();
        for i in 0..200 {
            range.observe(((i as f64) * 0.37).sin() * (i as f64).sqrt());
            let (min, max) = range.current();
            assert!(min <= last_min);
            assert!(max >= last_max);
            assert!(min <= max);
            last_min = min;
            last_max = max;
        }
    }
}
