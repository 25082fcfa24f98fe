//! Seams through which a host application plugs into a curve.
//!
//! The curve never transforms coordinates or manages backing objects on its
//! own. A host supplies a [`PointSpace`] when it needs curve data in another
//! coordinate space, and a [`HandleLifecycle`] when it keeps per-handle state
//! (entities, gizmos, inspector rows) that must follow inserts and removals.

use bevy::prelude::*;

use super::ControlHandle;

/// Maps points between a curve's local space and world space.
pub trait PointSpace {
    /// Map a local point to world space.
    fn to_world(&self, point: Vec3) -> Vec3;

    /// Map a world point to local space.
    fn to_local(&self, point: Vec3) -> Vec3;
}

impl PointSpace for Transform {
    fn to_world(&self, point: Vec3) -> Vec3 {
        self.transform_point(point)
    }

    fn to_local(&self, point: Vec3) -> Vec3 {
        self.compute_affine().inverse().transform_point3(point)
    }
}

impl PointSpace for GlobalTransform {
    fn to_world(&self, point: Vec3) -> Vec3 {
        self.transform_point(point)
    }

    fn to_local(&self, point: Vec3) -> Vec3 {
        self.affine().inverse().transform_point3(point)
    }
}

/// Callbacks fired after a key point is inserted into or removed from a curve.
///
/// Both run only after the mutation succeeded; a rejected insert or remove
/// fires nothing.
pub trait HandleLifecycle {
    /// `handle` now sits at `index`.
    fn on_inserted(&mut self, _index: usize, _handle: &ControlHandle) {}

    /// `handle` was taken out of `index`.
    fn on_removed(&mut self, _index: usize, _handle: &ControlHandle) {}
}

impl HandleLifecycle for () {}

/// A structural change to a curve's key points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveChange {
    /// A key point was inserted at this index.
    Inserted { index: usize },
    /// The key point at this index was removed.
    Removed { index: usize },
}

/// Records changes so a host can react to them in a batch later.
impl HandleLifecycle for Vec<CurveChange> {
    fn on_inserted(&mut self, index: usize, _handle: &ControlHandle) {
        self.push(CurveChange::Inserted { index });
    }

    fn on_removed(&mut self, index: usize, _handle: &ControlHandle) {
        self.push(CurveChange::Removed { index });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_round_trip() {
        let transform = Transform::from_xyz(1.0, 2.0, 3.0).with_scale(Vec3::splat(2.0));
        let local = Vec3::new(0.5, -1.0, 4.0);
        let world = transform.to_world(local);

        assert!(world.abs_diff_eq(Vec3::new(2.0, 0.0, 11.0), 1e-5));
        assert!(transform.to_local(world).abs_diff_eq(local, 1e-5));
    }

    #[test]
    fn test_global_transform_round_trip() {
        let global = GlobalTransform::from(Transform::from_xyz(-4.0, 0.0, 1.0));
        let local = Vec3::new(1.0, 1.0, 1.0);

        assert!(global.to_world(local).abs_diff_eq(Vec3::new(-3.0, 1.0, 2.0), 1e-5));
        assert!(global.to_local(global.to_world(local)).abs_diff_eq(local, 1e-5));
    }

    #[test]
    fn test_change_log_records_in_order() {
        let mut log: Vec<CurveChange> = Vec::new();
        let handle = ControlHandle::default();
        log.on_inserted(2, &handle);
        log.on_removed(0, &handle);

        assert_eq!(
            log,
            vec![
                CurveChange::Inserted { index: 2 },
                CurveChange::Removed { index: 0 },
            ]
        );
    }
}
