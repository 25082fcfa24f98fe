use bevy::prelude::*;

use crate::geometry::{CurveFrame, DEGENERATE_EPSILON};

use super::error::MIN_POINTS;
use super::handle::DEFAULT_LEFT_OFFSET;
use super::host::{HandleLifecycle, PointSpace};
use super::segment::ENDPOINT_SNAP;
use super::types::{CurveEvaluator, CurveSampling};
use super::{BezierSegment, ControlHandle, CurveError, CurveSettings};

/// A chain of cubic Bézier segments through an ordered list of key points.
///
/// Segment `i` runs from `points[i]` to `points[i + 1]`. Evaluation through
/// [`CurveEvaluator`] is length-weighted: normalized time is distributed over
/// segments in proportion to their approximate arc length. Nothing is cached,
/// so every query reflects the current key points.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component, Default)]
pub struct BezierCurve {
    points: Vec<ControlHandle>,
    /// Arc length sampling used by every length-dependent query.
    pub sampling: CurveSampling,
    /// Right handle offset given to key points created by [`BezierCurve::insert_at`].
    pub new_handle_offset: Vec3,
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            sampling: CurveSampling::default(),
            new_handle_offset: -DEFAULT_LEFT_OFFSET,
        }
    }
}

/// The segment a normalized time falls into, and where inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSelection<'a> {
    /// Index of the segment, i.e. of `start` in the curve.
    pub index: usize,
    /// Key point the segment starts at.
    pub start: &'a ControlHandle,
    /// Key point the segment ends at, `index + 1` in the curve.
    pub end: &'a ControlHandle,
    /// Parameter within the segment.
    pub local_t: f32,
}

impl SegmentSelection<'_> {
    /// The control vectors of the selected segment.
    pub fn segment(&self) -> BezierSegment {
        BezierSegment::between(self.start, self.end)
    }
}

impl BezierCurve {
    /// Create a curve from existing key points.
    pub fn new(points: Vec<ControlHandle>) -> Self {
        Self {
            points,
            ..default()
        }
    }

    /// The starter curve: a shallow arch from `(-1, 0, 0)` to `(1, 0, 0)`,
    /// bulging towards +Y, with connected handles.
    pub fn default_shape() -> Self {
        Self::new(vec![
            ControlHandle::connected(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(-0.35, -0.35, 0.0)),
            ControlHandle::connected(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-0.35, 0.35, 0.0)),
        ])
    }

    /// Create a curve with connected default handles at each position.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self::new(positions.into_iter().map(ControlHandle::new).collect())
    }

    /// Create an empty curve configured from [`CurveSettings`].
    pub fn from_settings(settings: &CurveSettings) -> Self {
        Self {
            points: Vec::new(),
            sampling: settings.sampling,
            new_handle_offset: settings.new_handle_offset,
        }
    }

    /// Set the arc length sampling.
    pub fn with_sampling(mut self, sampling: CurveSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Number of key points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check if the curve has enough points to be evaluated.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_POINTS
    }

    /// Get the number of segments in this curve.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn handles(&self) -> &[ControlHandle] {
        &self.points
    }

    /// Mutable access to the key points. The number of points can only change
    /// through [`BezierCurve::insert_at`] and [`BezierCurve::remove_at`].
    pub fn handles_mut(&mut self) -> &mut [ControlHandle] {
        &mut self.points
    }

    pub fn get(&self, index: usize) -> Result<&ControlHandle, CurveError> {
        let len = self.points.len();
        self.points
            .get(index)
            .ok_or(CurveError::InvalidIndex { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut ControlHandle, CurveError> {
        let len = self.points.len();
        self.points
            .get_mut(index)
            .ok_or(CurveError::InvalidIndex { index, len })
    }

    /// The control vectors of segment `index`.
    pub fn segment(&self, index: usize) -> Result<BezierSegment, CurveError> {
        if index >= self.segment_count() {
            return Err(CurveError::InvalidIndex {
                index,
                len: self.segment_count(),
            });
        }
        Ok(BezierSegment::between(&self.points[index], &self.points[index + 1]))
    }

    /// Iterate over every segment in curve order.
    pub fn segments(&self) -> impl Iterator<Item = BezierSegment> + '_ {
        self.points
            .windows(2)
            .map(|pair| BezierSegment::between(&pair[0], &pair[1]))
    }

    /// Approximate length of every segment, using the configured sampling.
    ///
    /// Lengths below [`DEGENERATE_EPSILON`] are reported as exactly 0, so
    /// collapsed segments never take a share of normalized time.
    pub fn segment_lengths(&self) -> Vec<f32> {
        let samples = self.sampling.samples_per_segment(self.segment_count());
        self.segments()
            .map(|segment| segment.approximate_length(samples))
            .map(|length| if length < DEGENERATE_EPSILON { 0.0 } else { length })
            .collect()
    }

    /// Append a key point after the last one.
    pub fn add_point(&mut self) -> &mut ControlHandle {
        let index = self.points.len();
        // The end of the list is always a valid insertion index.
        let position = self.placement_for(index);
        self.insert_handle(index, position, &mut ())
    }

    /// Insert a new key point at `index` and return it.
    ///
    /// The new point is placed so that it extends or splits the existing curve:
    /// - the first two points of a curve start at the local origin,
    /// - a point before the first or after the last continues one unit along
    ///   the direction of the adjacent pair,
    /// - a point between two others lands on the curve, at the middle of the
    ///   segment it splits.
    pub fn insert_at(&mut self, index: usize) -> Result<&mut ControlHandle, CurveError> {
        self.insert_at_with(index, &mut ())
    }

    /// [`BezierCurve::insert_at`], notifying `lifecycle` on success.
    pub fn insert_at_with(
        &mut self,
        index: usize,
        lifecycle: &mut impl HandleLifecycle,
    ) -> Result<&mut ControlHandle, CurveError> {
        let len = self.points.len();
        if index > len {
            return Err(CurveError::InvalidIndex { index, len });
        }

        let position = self.placement_for(index);
        Ok(self.insert_handle(index, position, lifecycle))
    }

    /// Remove and return the key point at `index`.
    ///
    /// Fails without touching the curve if `index` is out of range or the
    /// curve would be left with fewer than two points.
    pub fn remove_at(&mut self, index: usize) -> Result<ControlHandle, CurveError> {
        self.remove_at_with(index, &mut ())
    }

    /// [`BezierCurve::remove_at`], notifying `lifecycle` on success.
    pub fn remove_at_with(
        &mut self,
        index: usize,
        lifecycle: &mut impl HandleLifecycle,
    ) -> Result<ControlHandle, CurveError> {
        let len = self.points.len();
        if index >= len {
            return Err(CurveError::InvalidIndex { index, len });
        }
        if len <= MIN_POINTS {
            return Err(CurveError::MinimumPointsViolation { len });
        }

        let handle = self.points.remove(index);
        debug!("removed key point {index}, {} remain", self.points.len());
        lifecycle.on_removed(index, &handle);
        Ok(handle)
    }

    /// Resolve a normalized time to the segment it falls into.
    ///
    /// Segments consume slices of `[0, 1]` in proportion to their approximate
    /// length. The first segment whose cumulative share exceeds `time` is
    /// selected and `time` is remapped into its local parameter, so
    /// zero-length segments are never selected. When rounding leaves `time`
    /// past every cumulative share, the last segment with a positive length
    /// is used with `local_t = time`. `time` is clamped to `[0, 1]`.
    pub fn resolve_segment(&self, time: f32) -> Result<SegmentSelection<'_>, CurveError> {
        self.ensure_valid()?;

        let time = time.clamp(0.0, 1.0);
        let lengths = self.segment_lengths();
        let total_length: f32 = lengths.iter().sum();
        let last = lengths
            .iter()
            .rposition(|length| *length > 0.0)
            .unwrap_or(lengths.len() - 1);

        if total_length <= 0.0 {
            // Every key point and handle coincides.
            return Ok(self.selection(last, time));
        }

        let mut accumulated = 0.0;
        for (index, length) in lengths.iter().enumerate() {
            let fraction = length / total_length;
            if accumulated + fraction > time {
                return Ok(self.selection(index, (time - accumulated) / fraction));
            }
            accumulated += fraction;
        }

        Ok(self.selection(last, time))
    }

    /// Tangent, binormal and normal at `time` against the reference `up`.
    pub fn evaluate_frame(&self, time: f32, up: Vec3) -> Result<CurveFrame, CurveError> {
        let selection = self.resolve_segment(time)?;
        Ok(selection.segment().frame(selection.local_t, up))
    }

    /// Sample `count` positions at evenly spaced normalized times, endpoints
    /// included. Suitable for drawing the curve as a polyline.
    pub fn sample(&self, count: usize) -> Result<Vec<Vec3>, CurveError> {
        self.ensure_valid()?;

        match count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![self.evaluate_position(0.0)?]),
            _ => (0..count)
                .map(|i| self.evaluate_position(i as f32 / (count - 1) as f32))
                .collect(),
        }
    }

    /// A copy of this curve with every point mapped from local to world space.
    pub fn to_world(&self, space: &impl PointSpace) -> Self {
        self.mapped(|point| space.to_world(point))
    }

    /// A copy of this curve with every point mapped from world to local space.
    pub fn to_local(&self, space: &impl PointSpace) -> Self {
        self.mapped(|point| space.to_local(point))
    }

    fn mapped(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self {
            points: self.points.iter().map(|handle| handle.mapped(&f)).collect(),
            sampling: self.sampling,
            new_handle_offset: self.new_handle_offset,
        }
    }

    fn ensure_valid(&self) -> Result<(), CurveError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(CurveError::NotEnoughPoints {
                len: self.points.len(),
            })
        }
    }

    fn selection(&self, index: usize, local_t: f32) -> SegmentSelection<'_> {
        SegmentSelection {
            index,
            start: &self.points[index],
            end: &self.points[index + 1],
            local_t,
        }
    }

    /// Default position for a key point about to be inserted at `index`.
    /// `index` must be in `0..=len`.
    fn placement_for(&self, index: usize) -> Vec3 {
        let points = &self.points;
        let len = points.len();

        if len < MIN_POINTS {
            Vec3::ZERO
        } else if index == 0 {
            let first = points[0].position();
            first + (first - points[1].position()).normalize_or_zero()
        } else if index == len {
            let last = points[len - 1].position();
            last + (last - points[len - 2].position()).normalize_or_zero()
        } else {
            BezierSegment::between(&points[index - 1], &points[index]).position(0.5)
        }
    }

    fn insert_handle(
        &mut self,
        index: usize,
        position: Vec3,
        lifecycle: &mut impl HandleLifecycle,
    ) -> &mut ControlHandle {
        let handle = ControlHandle::connected(position, -self.new_handle_offset);
        self.points.insert(index, handle);
        debug!("inserted key point {index} at {position}, {} total", self.points.len());
        lifecycle.on_inserted(index, &self.points[index]);
        &mut self.points[index]
    }
}

impl CurveEvaluator for BezierCurve {
    fn approximate_length(&self) -> Result<f32, CurveError> {
        self.ensure_valid()?;
        Ok(self.segment_lengths().iter().sum())
    }

    fn evaluate_position(&self, time: f32) -> Result<Vec3, CurveError> {
        self.ensure_valid()?;

        if time < ENDPOINT_SNAP {
            return Ok(self.points[0].position());
        }
        if time > 1.0 - ENDPOINT_SNAP {
            return Ok(self.points[self.points.len() - 1].position());
        }

        let selection = self.resolve_segment(time)?;
        Ok(selection.segment().position(selection.local_t))
    }

    fn evaluate_tangent(&self, time: f32) -> Result<Vec3, CurveError> {
        let selection = self.resolve_segment(time)?;
        Ok(selection.segment().tangent(selection.local_t))
    }

    fn evaluate_binormal(&self, time: f32, up: Vec3) -> Result<Vec3, CurveError> {
        Ok(self.evaluate_frame(time, up)?.binormal)
    }

    fn evaluate_normal(&self, time: f32, up: Vec3) -> Result<Vec3, CurveError> {
        Ok(self.evaluate_frame(time, up)?.normal)
    }

    fn evaluate_rotation(&self, time: f32, up: Vec3) -> Result<Quat, CurveError> {
        Ok(self.evaluate_frame(time, up)?.to_rotation())
    }
}
