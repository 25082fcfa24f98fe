use bevy::prelude::*;

use crate::geometry::{normalize_or_degenerate, CurveFrame};

use super::ControlHandle;

/// Parameters within this distance of 0 or 1 snap to the segment endpoints.
pub const ENDPOINT_SNAP: f32 = 1e-2;

/// A single cubic Bézier segment given by its four control vectors.
///
/// `p0` and `p3` lie on the curve; `p1` is the start's outgoing handle and
/// `p2` the end's incoming handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierSegment {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl BezierSegment {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// The segment running from `start` to `end`, shaped by the start's right
    /// handle and the end's left handle.
    pub fn between(start: &ControlHandle, end: &ControlHandle) -> Self {
        Self {
            p0: start.position(),
            p1: start.right_handle_position(),
            p2: end.left_handle_position(),
            p3: end.position(),
        }
    }

    /// Evaluate the position at local parameter `t`.
    ///
    /// Parameters within [`ENDPOINT_SNAP`] of either end return that endpoint
    /// exactly.
    pub fn position(&self, t: f32) -> Vec3 {
        if t.abs() < ENDPOINT_SNAP {
            return self.p0;
        }
        if (1.0 - t).abs() < ENDPOINT_SNAP {
            return self.p3;
        }
        self.point_at(t)
    }

    /// Evaluate the position at `t` without snapping to the endpoints.
    ///
    /// Coincident control points evaluate to exactly that point.
    pub fn point_at(&self, t: f32) -> Vec3 {
        cubic_bezier(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Raw first derivative at `t`, not normalized.
    pub fn derivative(&self, t: f32) -> Vec3 {
        cubic_bezier_derivative(self.p0, self.p1, self.p2, self.p3, t)
    }

    /// Unit tangent at `t`.
    ///
    /// Returns [`Vec3::ZERO`] when the derivative vanishes, e.g. at an end
    /// whose handle coincides with its anchor.
    pub fn tangent(&self, t: f32) -> Vec3 {
        normalize_or_degenerate(self.derivative(t))
    }

    /// Tangent, binormal and normal at `t` against the reference `up`.
    pub fn frame(&self, t: f32, up: Vec3) -> CurveFrame {
        CurveFrame::from_tangent(self.tangent(t), up)
    }

    /// `normalize(up × tangent)`. Zero when `up` is parallel to the tangent.
    pub fn binormal(&self, t: f32, up: Vec3) -> Vec3 {
        self.frame(t, up).binormal
    }

    /// `normalize(tangent × binormal)`. Zero when the binormal is degenerate.
    pub fn normal(&self, t: f32, up: Vec3) -> Vec3 {
        self.frame(t, up).normal
    }

    /// Orientation looking along the tangent with the normal as up.
    pub fn rotation(&self, t: f32, up: Vec3) -> Quat {
        self.frame(t, up).to_rotation()
    }

    /// Approximate the arc length by a polyline through `sampling + 1` points.
    ///
    /// This underestimates the true length and converges from below as
    /// `sampling` grows. A sampling of 0 is treated as 1. Samples come from
    /// [`BezierSegment::point_at`] so fine samplings keep every vertex near the
    /// endpoints.
    pub fn approximate_length(&self, sampling: usize) -> f32 {
        let sampling = sampling.max(1);
        let mut length = 0.0_f64;
        let mut prev_point = self.p0;

        for i in 1..=sampling {
            let t = i as f32 / sampling as f32;
            let point = self.point_at(t);
            length += f64::from((point - prev_point).length());
            prev_point = point;
        }

        length as f32
    }
}

// De Casteljau rather than the Bernstein sum: its weights never leave a
// rounding residue, so equal control points give back that exact point.
fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let a = lerp(p0, p1, t);
    let b = lerp(p1, p2, t);
    let c = lerp(p2, p3, t);
    let d = lerp(a, b, t);
    let e = lerp(b, c, t);

    lerp(d, e, t)
}

// `Vec3::lerp` blends as `a * (1 - t) + b * t`, which is inexact for `a == b`.
fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

fn cubic_bezier_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;

    (p1 - p0) * 3.0 * mt2 + (p2 - p1) * 6.0 * mt * t + (p3 - p2) * 3.0 * t2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arch() -> BezierSegment {
        BezierSegment::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints_snap_exactly() {
        let segment = arch();
        assert_eq!(segment.position(0.0), segment.p0);
        assert_eq!(segment.position(0.005), segment.p0);
        assert_eq!(segment.position(0.995), segment.p3);
        assert_eq!(segment.position(1.0), segment.p3);
    }

    #[test]
    fn test_midpoint_matches_bernstein_blend() {
        let segment = arch();
        // (p0 + 3 p1 + 3 p2 + p3) / 8
        let expected = Vec3::new(0.5, 0.75, 0.0);
        assert!(segment.position(0.5).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_tangent_is_unit_length() {
        let segment = arch();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_relative_eq!(segment.tangent(t).length(), 1.0, epsilon = 1e-5);
        }
        assert!(segment.tangent(0.0).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(segment.tangent(0.5).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_coincident_handle_gives_zero_tangent() {
        let start = ControlHandle::linear(Vec3::ZERO);
        let end = ControlHandle::linear(Vec3::X);
        let segment = BezierSegment::between(&start, &end);

        assert_eq!(segment.tangent(0.0), Vec3::ZERO);
        assert_eq!(segment.normal(0.0, Vec3::Y), Vec3::ZERO);
        assert!(segment.tangent(0.5).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_normal_and_binormal_against_world_up() {
        let segment = arch();
        assert!(segment.binormal(0.5, Vec3::Y).abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(segment.normal(0.5, Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
        // Tangent at t = 0 is +Y, parallel to up.
        assert_eq!(segment.binormal(0.0, Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_between_uses_outgoing_and_incoming_handles() {
        let start = ControlHandle::broken(Vec3::ZERO, Vec3::new(-9.0, 0.0, 0.0), Vec3::Y);
        let end = ControlHandle::broken(Vec3::X, Vec3::new(0.0, 1.0, 0.0), Vec3::new(9.0, 0.0, 0.0));
        assert_eq!(BezierSegment::between(&start, &end), arch());
    }

    #[test]
    fn test_straight_segment_length() {
        let segment = BezierSegment::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        );
        assert_relative_eq!(segment.approximate_length(1), 3.0, epsilon = 1e-5);
        assert_relative_eq!(segment.approximate_length(32), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_length_grows_under_refinement() {
        let segment = arch();
        let mut previous = 0.0;
        for sampling in [1, 2, 4, 8, 16, 32, 64, 128] {
            let length = segment.approximate_length(sampling);
            assert!(length >= previous - 1e-5, "{sampling}: {length} < {previous}");
            previous = length;
        }
        // Chord is 1, the control polygon is 3.
        assert!(previous > 1.0 && previous < 3.0);
    }

    #[test]
    fn test_length_grows_with_every_extra_sample() {
        let segment = arch();
        let mut previous = segment.approximate_length(1);
        for sampling in 2..=300 {
            let length = segment.approximate_length(sampling);
            assert!(length >= previous - 1e-6, "{sampling}: {length} < {previous}");
            previous = length;
        }
    }

    #[test]
    fn test_coincident_points_are_exact() {
        let point = Vec3::new(3.7, -12.1, 0.3);
        let segment = BezierSegment::new(point, point, point, point);

        for i in 0..=20 {
            assert_eq!(segment.point_at(i as f32 / 20.0), point);
        }
        assert_eq!(segment.approximate_length(64), 0.0);
    }
}
