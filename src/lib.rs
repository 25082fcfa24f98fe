//! # bevy_bezier_3d
//!
//! Multi-segment cubic Bézier curves for Bevy, evaluated at a normalized,
//! length-weighted time.
//!
//! ## Features
//!
//! - Key points with connected (smooth) or broken (corner) tangent handles
//! - Position, tangent, normal, binormal and orientation along the curve
//! - Arc-length weighted segment lookup: equal steps of time cover roughly
//!   equal distances, however unevenly the key points are spaced
//! - Key point insertion that extends or splits the existing curve in place
//! - Serializable with Bevy's scene system (RON format)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_bezier_3d::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BezierCurvePlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn(BezierCurve::from_positions([
//!         Vec3::new(-3.0, 0.0, 0.0),
//!         Vec3::new(0.0, 2.0, 0.0),
//!         Vec3::new(3.0, 0.0, 0.0),
//!     ]));
//! }
//!
//! fn report(curves: Query<&BezierCurve>) {
//!     for curve in &curves {
//!         if let Ok(position) = curve.evaluate_position(0.5) {
//!             info!("halfway along the curve: {position}");
//!         }
//!     }
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`BezierCurvePlugin`]: type registration, [`CurveSettings`] and curve validation
//!
//! [`CurveSettings`]: curve::CurveSettings

pub mod curve;
pub mod geometry;

pub use curve::BezierCurvePlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::curve::{
        BezierCurve, BezierCurvePlugin, BezierSegment, ControlHandle, CurveChange, CurveError,
        CurveEvaluator, CurveSampling, CurveSettings, HandleLifecycle, HandleMode, PointSpace,
        SegmentSelection,
    };
    pub use crate::geometry::CurveFrame;
}
