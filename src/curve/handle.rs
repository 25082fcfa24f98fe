use bevy::prelude::*;

/// Offset given to the left handle of a newly created key point.
pub const DEFAULT_LEFT_OFFSET: Vec3 = Vec3::new(-0.5, 0.0, 0.0);

/// How the two tangent handles of a key point relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Default)]
pub enum HandleMode {
    /// The handles are kept opposite: `right_offset == -left_offset`.
    /// Produces a smooth curve through the key point.
    #[default]
    Connected,
    /// The handles move independently, allowing a sharp corner.
    Broken,
}

impl HandleMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Broken => "Broken",
        }
    }
}

/// A key point of a Bézier curve: an on-curve anchor plus two tangent handles.
///
/// Handle offsets are stored relative to [`ControlHandle::position`]. Under
/// [`HandleMode::Connected`] every offset mutation keeps
/// `right_offset == -left_offset`, so the fields are only reachable through
/// accessors. Reflection bypasses the accessors; [`ControlHandle::repair`]
/// restores the invariant afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Default)]
pub struct ControlHandle {
    position: Vec3,
    left_offset: Vec3,
    right_offset: Vec3,
    mode: HandleMode,
}

impl Default for ControlHandle {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl ControlHandle {
    /// Create a connected key point with the default half-unit handles along X.
    pub fn new(position: Vec3) -> Self {
        Self::connected(position, DEFAULT_LEFT_OFFSET)
    }

    /// Create a connected key point; the right handle mirrors `left_offset`.
    pub fn connected(position: Vec3, left_offset: Vec3) -> Self {
        Self {
            position,
            left_offset,
            right_offset: -left_offset,
            mode: HandleMode::Connected,
        }
    }

    /// Create a broken key point with independent handles.
    pub fn broken(position: Vec3, left_offset: Vec3, right_offset: Vec3) -> Self {
        Self {
            position,
            left_offset,
            right_offset,
            mode: HandleMode::Broken,
        }
    }

    /// Create a key point with both handles collapsed onto the anchor.
    pub fn linear(position: Vec3) -> Self {
        Self::broken(position, Vec3::ZERO, Vec3::ZERO)
    }

    /// Build a key point from raw parts.
    ///
    /// In connected mode `right_offset` is ignored and derived from
    /// `left_offset`.
    pub fn from_parts(position: Vec3, left_offset: Vec3, right_offset: Vec3, mode: HandleMode) -> Self {
        match mode {
            HandleMode::Connected => Self::connected(position, left_offset),
            HandleMode::Broken => Self::broken(position, left_offset, right_offset),
        }
    }

    /// The on-curve anchor.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the anchor. Handles move with it.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn left_offset(&self) -> Vec3 {
        self.left_offset
    }

    pub fn right_offset(&self) -> Vec3 {
        self.right_offset
    }

    pub fn mode(&self) -> HandleMode {
        self.mode
    }

    /// Set the left handle offset. In connected mode the right handle follows.
    pub fn set_left_offset(&mut self, offset: Vec3) {
        self.left_offset = offset;
        if self.mode == HandleMode::Connected {
            self.right_offset = -offset;
        }
    }

    /// Set the right handle offset. In connected mode the left handle follows.
    pub fn set_right_offset(&mut self, offset: Vec3) {
        self.right_offset = offset;
        if self.mode == HandleMode::Connected {
            self.left_offset = -offset;
        }
    }

    /// Change the handle mode.
    ///
    /// Switching to [`HandleMode::Connected`] re-derives the right handle from
    /// the left one.
    pub fn set_mode(&mut self, mode: HandleMode) {
        self.mode = mode;
        if mode == HandleMode::Connected {
            self.right_offset = -self.left_offset;
        }
    }

    /// Whether the stored offsets agree with the mode.
    pub fn is_consistent(&self) -> bool {
        self.mode == HandleMode::Broken || self.right_offset == -self.left_offset
    }

    /// Re-derive the right handle of a connected key point whose offsets were
    /// written directly, e.g. by a scene load. Returns whether it changed.
    pub fn repair(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        self.right_offset = -self.left_offset;
        true
    }

    /// Absolute position of the left handle.
    pub fn left_handle_position(&self) -> Vec3 {
        self.position + self.left_offset
    }

    /// Absolute position of the right handle.
    pub fn right_handle_position(&self) -> Vec3 {
        self.position + self.right_offset
    }

    /// Place the left handle at an absolute position.
    pub fn set_left_handle_position(&mut self, point: Vec3) {
        self.set_left_offset(point - self.position);
    }

    /// Place the right handle at an absolute position.
    pub fn set_right_handle_position(&mut self, point: Vec3) {
        self.set_right_offset(point - self.position);
    }

    /// Map the anchor and both absolute handle points through `f`.
    ///
    /// Offsets are recomputed from the mapped points, so any affine map keeps
    /// connected handles opposite.
    pub fn mapped(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        let position = f(self.position);
        let left_offset = f(self.left_handle_position()) - position;
        let right_offset = f(self.right_handle_position()) - position;
        Self::from_parts(position, left_offset, right_offset, self.mode)
    }
}
