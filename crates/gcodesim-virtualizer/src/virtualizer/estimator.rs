//! Approximate machining time
//!
//! Single-axis kinematic model with a constant acceleration. Feed changes
//! are blended over the distance needed to accelerate between the two
//! feeds; everything else runs at the programmed feed.

use gcodesim_core::CNCPoint;

/// Assumed acceleration, mm/s²
pub const ACCELERATION: f64 = 750.0;

/// Running time total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEstimator {
    acceleration: f64,
    total_seconds: f64,
    last_feed: f64,
}

impl Default for TimeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeEstimator {
    pub fn new() -> Self {
        Self::with_acceleration(ACCELERATION)
    }

    pub fn with_acceleration(acceleration: f64) -> Self {
        Self {
            acceleration,
            total_seconds: 0.0,
            last_feed: 0.0,
        }
    }

    /// Total estimated seconds so far
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    /// Feed of the previous move, mm/s
    pub fn last_feed(&self) -> f64 {
        self.last_feed
    }

    /// Duration of a move of `travel` mm at `feed` mm/s after a move at
    /// `previous` mm/s
    pub fn move_duration(travel: f64, previous: f64, feed: f64, acceleration: f64) -> f64 {
        if previous == feed {
            if feed == 0.0 {
                return 0.0;
            }
            return travel / feed;
        }

        let sum = previous + feed;
        let blend = 2.0 * ((sum * (feed - previous) * 0.5) / acceleration).abs();
        if blend < travel && previous != 0.0 && feed != 0.0 {
            2.0 * blend / sum + (travel - blend) / feed
        } else {
            2.0 * travel / sum
        }
    }

    /// Travel used for timing: XY distance, or |ΔZ| for a pure plunge
    pub fn travel(start: &CNCPoint, end: &CNCPoint) -> f64 {
        let xy = start.distance_xy(end);
        if xy == 0.0 {
            (end.z - start.z).abs()
        } else {
            xy
        }
    }

    /// Add a move to the total
    ///
    /// Returns the added duration, or `None` when the result was not a
    /// usable number. The feed becomes the previous feed either way.
    pub fn record_move(&mut self, start: &CNCPoint, end: &CNCPoint, feed: f64) -> Option<f64> {
        let travel = Self::travel(start, end);
        let duration = Self::move_duration(travel, self.last_feed, feed, self.acceleration);
        self.last_feed = feed;

        if !duration.is_finite() || duration < 0.0 {
            return None;
        }
        self.total_seconds += duration;
        Some(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_feed() {
        assert_eq!(TimeEstimator::move_duration(100.0, 10.0, 10.0, ACCELERATION), 10.0);
        assert_eq!(TimeEstimator::move_duration(100.0, 0.0, 0.0, ACCELERATION), 0.0);
    }

    #[test]
    fn test_first_move_from_rest() {
        // previous feed 0 forces the averaged branch
        let t = TimeEstimator::move_duration(100.0, 0.0, 10.0, ACCELERATION);
        assert!((t - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_blended_feed_change() {
        // b = 2 * |(30 * 10 * 0.5) / 750| = 0.4
        let t = TimeEstimator::move_duration(100.0, 10.0, 20.0, ACCELERATION);
        let expected = 2.0 * 0.4 / 30.0 + (100.0 - 0.4) / 20.0;
        assert!((t - expected).abs() < 1e-9);
    }

    #[test]
    fn test_short_move_uses_average() {
        let t = TimeEstimator::move_duration(0.1, 10.0, 20.0, ACCELERATION);
        assert!((t - 0.2 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_travel_falls_back_to_z() {
        let a = CNCPoint::new(1.0, 1.0, 0.0);
        let b = CNCPoint::new(1.0, 1.0, -3.0);
        assert_eq!(TimeEstimator::travel(&a, &b), 3.0);
        let c = CNCPoint::new(4.0, 5.0, 10.0);
        assert_eq!(TimeEstimator::travel(&a, &c), 5.0);
    }

    #[test]
    fn test_record_skips_unusable_durations() {
        let mut est = TimeEstimator::new();
        let a = CNCPoint::default();
        let b = CNCPoint::new(10.0, 0.0, 0.0);
        // opposite feeds sum to zero and divide by it
        est.last_feed = 5.0;
        assert_eq!(est.record_move(&a, &b, -5.0), None);
        assert_eq!(est.total_seconds(), 0.0);
        assert_eq!(est.last_feed(), -5.0);
    }

    #[test]
    fn test_record_accumulates() {
        let mut est = TimeEstimator::new();
        let a = CNCPoint::default();
        let b = CNCPoint::new(10.0, 0.0, 0.0);
        est.record_move(&a, &b, 10.0);
        est.record_move(&b, &a, 10.0);
        assert!((est.total_seconds() - 3.0).abs() < 1e-9);
    }
}
