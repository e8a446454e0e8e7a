// src/motion/planner.rs - Linear joint move planning
use std::time::Duration;

/// Moves shorter than this are treated as already at target.
pub const AT_TARGET_EPSILON_DEG: f64 = 0.01;

/// A planned single-joint move, interpolated linearly from `start_deg` to
/// `target_deg` over `steps` animation steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPlan {
    pub start_deg: f64,
    pub target_deg: f64,
    pub duration: Duration,
    pub steps: u64,
}

impl MotionPlan {
    /// Plan a move at `speed` deg/s animated at `rate_hz`.
    ///
    /// Returns `None` when the joint is already within
    /// [`AT_TARGET_EPSILON_DEG`] of the target. A non-positive speed means
    /// "as fast as possible", which still takes one step.
    pub fn new(start_deg: f64, target_deg: f64, speed: f64, rate_hz: f64) -> Option<Self> {
        let delta = target_deg - start_deg;
        if delta.abs() < AT_TARGET_EPSILON_DEG {
            return None;
        }
        let duration_secs = if speed > 0.0 { delta.abs() / speed } else { 0.0 };
        let steps = ((duration_secs * rate_hz).round() as u64).max(1);
        Some(Self {
            start_deg,
            target_deg,
            duration: Duration::try_from_secs_f64(duration_secs).unwrap_or(Duration::MAX),
            steps,
        })
    }

    pub fn delta(&self) -> f64 {
        self.target_deg - self.start_deg
    }

    /// Fraction of the move completed after step `i`.
    pub fn progress(&self, step: u64) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            step as f64 / self.steps as f64
        }
    }

    /// Interpolated angle at step `i` (0 ..= steps).
    pub fn angle_at(&self, step: u64) -> f64 {
        self.start_deg + self.delta() * self.progress(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_at_target() {
        assert!(MotionPlan::new(45.0, 45.0, 30.0, 20.0).is_none());
        assert!(MotionPlan::new(45.0, 45.009, 30.0, 20.0).is_none());
        assert!(MotionPlan::new(45.0, 45.02, 30.0, 20.0).is_some());
    }

    #[test]
    fn test_step_count_follows_duration() {
        let plan = MotionPlan::new(0.0, 90.0, 30.0, 20.0).unwrap();
        assert_eq!(plan.duration, Duration::from_secs(3));
        assert_eq!(plan.steps, 60);
        assert_eq!(plan.angle_at(0), 0.0);
        assert_eq!(plan.angle_at(30), 45.0);
        assert_eq!(plan.angle_at(60), 90.0);
    }

    #[test]
    fn test_step_count_rounds() {
        // 10 degrees at 40 deg/s is 0.25 s, 5 steps at 20 Hz
        assert_eq!(MotionPlan::new(0.0, 10.0, 40.0, 20.0).unwrap().steps, 5);
        // 1 degree at 30 deg/s is 0.0333 s, 0.67 steps rounds up to 1
        assert_eq!(MotionPlan::new(0.0, 1.0, 30.0, 20.0).unwrap().steps, 1);
        // 2 degrees at 30 deg/s is 1.33 steps, rounds down
        assert_eq!(MotionPlan::new(0.0, 2.0, 30.0, 20.0).unwrap().steps, 1);
    }

    #[test]
    fn test_non_positive_speed_takes_one_step() {
        for speed in [0.0, -5.0] {
            let plan = MotionPlan::new(10.0, 120.0, speed, 20.0).unwrap();
            assert_eq!(plan.steps, 1);
            assert_eq!(plan.duration, Duration::ZERO);
            assert_eq!(plan.angle_at(0), 10.0);
            assert_eq!(plan.angle_at(1), 120.0);
        }
    }

    #[test]
    fn test_moving_down() {
        let plan = MotionPlan::new(90.0, 30.0, 60.0, 20.0).unwrap();
        assert_eq!(plan.delta(), -60.0);
        assert_eq!(plan.steps, 20);
        assert!(plan.angle_at(10) < 90.0 && plan.angle_at(10) > 30.0);
    }

    #[test]
    fn test_tiny_speed_saturates() {
        let plan = MotionPlan::new(0.0, 180.0, 1e-300, 20.0).unwrap();
        assert_eq!(plan.steps, u64::MAX);
        assert_eq!(plan.duration, Duration::MAX);
    }
}
