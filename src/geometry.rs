//! Geometry utilities for curve-based calculations.

use bevy::prelude::*;

/// Vectors shorter than this are treated as having no direction.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Normalize `v`, or return [`Vec3::ZERO`] when it is too short to have a
/// meaningful direction.
pub fn normalize_or_degenerate(v: Vec3) -> Vec3 {
    if v.length_squared() < DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        Vec3::ZERO
    } else {
        v.normalize_or_zero()
    }
}

/// A local frame along a curve: tangent, binormal and normal.
///
/// The frame is built from a tangent and an externally supplied reference up
/// vector. Degenerate inputs (zero tangent, or up parallel to the tangent)
/// produce zero-length axes rather than being patched with a fallback axis;
/// check [`CurveFrame::is_valid`] before relying on direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFrame {
    /// Unit direction of travel along the curve.
    pub tangent: Vec3,
    /// `normalize(up × tangent)`.
    pub binormal: Vec3,
    /// `normalize(tangent × binormal)`.
    pub normal: Vec3,
}

impl CurveFrame {
    /// Build a frame from a tangent and a reference up direction.
    pub fn from_tangent(tangent: Vec3, up: Vec3) -> Self {
        let tangent = normalize_or_degenerate(tangent);
        let binormal = normalize_or_degenerate(up.cross(tangent));
        let normal = normalize_or_degenerate(tangent.cross(binormal));

        Self {
            tangent,
            binormal,
            normal,
        }
    }

    /// Check if every axis of this frame has a direction.
    pub fn is_valid(&self) -> bool {
        self.tangent != Vec3::ZERO && self.binormal != Vec3::ZERO && self.normal != Vec3::ZERO
    }

    /// Convert to a rotation quaternion.
    ///
    /// The rotation orients an entity so that:
    /// - Its local -Z (forward) points along `tangent`
    /// - Its local +Y (up) points along `normal`
    ///
    /// Degenerate frames yield [`Quat::IDENTITY`].
    pub fn to_rotation(&self) -> Quat {
        if !self.is_valid() {
            return Quat::IDENTITY;
        }
        let back = -self.tangent;
        let right = self.normal.cross(back);
        Quat::from_mat3(&Mat3::from_cols(right, self.normal, back))
    }
}
