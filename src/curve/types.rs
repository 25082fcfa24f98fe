use bevy::prelude::*;

use super::CurveError;

/// How many polyline samples are spent approximating arc length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum CurveSampling {
    /// Every segment is sampled this many times.
    PerSegment(usize),
    /// A budget for the whole curve, split as `budget / segments + 1` per
    /// segment so the total cost stays roughly constant as points are added.
    WholeCurve(usize),
}

impl Default for CurveSampling {
    fn default() -> Self {
        Self::PerSegment(25)
    }
}

impl CurveSampling {
    /// Number of samples to take on each of `segment_count` segments. Never 0.
    pub fn samples_per_segment(self, segment_count: usize) -> usize {
        let samples = match self {
            Self::PerSegment(samples) => samples,
            Self::WholeCurve(budget) => budget / segment_count.max(1) + 1,
        };
        samples.max(1)
    }

    /// Get the display name for this sampling strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PerSegment(_) => "Per segment",
            Self::WholeCurve(_) => "Whole curve",
        }
    }
}

/// Trait for evaluating a curve at a normalized, length-weighted time.
///
/// `time` runs from 0.0 at the first key point to 1.0 at the last. Equal
/// steps of `time` cover roughly equal distances regardless of how the key
/// points are spaced. Every method fails with [`CurveError::NotEnoughPoints`]
/// on curves with fewer than two points.
pub trait CurveEvaluator {
    /// Total approximate arc length.
    fn approximate_length(&self) -> Result<f32, CurveError>;

    /// Evaluate the position at `time`.
    fn evaluate_position(&self, time: f32) -> Result<Vec3, CurveError>;

    /// Evaluate the unit tangent at `time`. Zero when degenerate.
    fn evaluate_tangent(&self, time: f32) -> Result<Vec3, CurveError>;

    /// Evaluate the binormal at `time` against the reference `up`.
    fn evaluate_binormal(&self, time: f32, up: Vec3) -> Result<Vec3, CurveError>;

    /// Evaluate the normal at `time` against the reference `up`.
    fn evaluate_normal(&self, time: f32, up: Vec3) -> Result<Vec3, CurveError>;

    /// Evaluate the orientation at `time`: forward (-Z) along the tangent, up
    /// along the normal. Identity when the frame is degenerate.
    fn evaluate_rotation(&self, time: f32, up: Vec3) -> Result<Quat, CurveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_segment_ignores_segment_count() {
        let sampling = CurveSampling::PerSegment(10);
        assert_eq!(sampling.samples_per_segment(1), 10);
        assert_eq!(sampling.samples_per_segment(7), 10);
    }

    #[test]
    fn test_whole_curve_budget_is_split() {
        let sampling = CurveSampling::WholeCurve(100);
        assert_eq!(sampling.samples_per_segment(1), 101);
        assert_eq!(sampling.samples_per_segment(4), 26);
        assert_eq!(sampling.samples_per_segment(0), 101);
    }

    #[test]
    fn test_sampling_never_zero() {
        assert_eq!(CurveSampling::PerSegment(0).samples_per_segment(3), 1);
    }
}
