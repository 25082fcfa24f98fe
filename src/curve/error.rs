use thiserror::Error;

/// Minimum number of key points a curve needs to be evaluated.
pub const MIN_POINTS: usize = 2;

/// Errors returned by curve mutation and evaluation.
///
/// Every failure is local: the curve is left exactly as it was before the
/// failing call. Degenerate directions (coincident control points, up vector
/// parallel to the tangent) are not errors; they surface as zero-length
/// vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    /// An index outside the valid range was passed to insert, remove or get.
    #[error("index {index} is out of range for a curve with {len} points")]
    InvalidIndex {
        /// The rejected index.
        index: usize,
        /// Number of points in the curve at the time of the call.
        len: usize,
    },
    /// Removing a point would leave the curve with fewer than two points.
    #[error("cannot remove a point from a curve with {len} points, at least {min} must remain", min = MIN_POINTS)]
    MinimumPointsViolation {
        /// Number of points in the curve at the time of the call.
        len: usize,
    },
    /// The curve has too few points to be evaluated.
    #[error("curve has {len} points, evaluation needs at least {min}", min = MIN_POINTS)]
    NotEnoughPoints {
        /// Number of points in the curve.
        len: usize,
    },
}
