mod components;
mod error;
mod handle;
mod host;
mod segment;
mod types;

pub use components::*;
pub use error::*;
pub use handle::*;
pub use host::*;
pub use segment::*;
pub use types::*;

use bevy::prelude::*;

/// Defaults applied to curves created with [`BezierCurve::from_settings`].
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource, Default)]
pub struct CurveSettings {
    /// Arc length sampling for new curves.
    pub sampling: CurveSampling,
    /// Right handle offset for key points inserted into new curves.
    pub new_handle_offset: Vec3,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            sampling: CurveSampling::default(),
            new_handle_offset: -DEFAULT_LEFT_OFFSET,
        }
    }
}

/// System that checks every changed curve.
///
/// Connected handles whose offsets were written around the accessors, e.g. by
/// a scene load or a reflection-based inspector, are repaired in place. Curves
/// with too few points to be evaluated are reported.
pub fn validate_curves(mut curves: Query<(Entity, &mut BezierCurve), Changed<BezierCurve>>) {
    for (entity, mut curve) in &mut curves {
        if !curve.handles().iter().all(ControlHandle::is_consistent) {
            let repaired = curve
                .handles_mut()
                .iter_mut()
                .map(ControlHandle::repair)
                .filter(|repaired| *repaired)
                .count();
            warn!("curve on {entity} had {repaired} connected key points with unlinked handles, repaired");
        }

        if !curve.is_valid() {
            warn!(
                "curve on {entity} has {} key points and cannot be evaluated until it has {MIN_POINTS}",
                curve.len()
            );
        }
    }
}

/// Plugin that registers curve types for reflection/serialization and
/// validates curves as they change.
pub struct BezierCurvePlugin;

impl Plugin for BezierCurvePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HandleMode>()
            .register_type::<ControlHandle>()
            .register_type::<CurveSampling>()
            .register_type::<BezierCurve>()
            .register_type::<CurveSettings>()
            .init_resource::<CurveSettings>()
            .add_systems(Update, validate_curves);
    }
}
