//! Local transform of a scene object
//!
//! Position, Euler orientation and per-axis scale. The matrix is rebuilt on
//! demand as `T * R * S`, with `R = Rx(pitch) * Ry(yaw) * Rz(roll)`
//! (see [`Mat4Ext::from_euler_xyz`]). Nothing is validated: zero or negative
//! scale simply degenerates the geometry.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Position, orientation and scale relative to the parent object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec3,
    orientation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set orientation (radians, pitch/yaw/roll)
    pub fn with_orientation(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Orientation as `(pitch, yaw, roll)` radians
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }

    /// Per-axis scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Add `delta` to the position
    pub fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Multiply the scale component-wise by `factor`
    pub fn grow(&mut self, factor: Vec3) {
        self.scale.component_mul_assign(&factor);
    }

    /// Add `delta` to the scale
    pub fn stretch(&mut self, delta: Vec3) {
        self.scale += delta;
    }

    /// Add `delta` radians to each orientation angle
    pub fn rotate(&mut self, delta: Vec3) {
        self.orientation += delta;
    }

    /// Absolute position assignment
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Absolute orientation assignment
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.orientation = orientation;
    }

    /// Absolute scale assignment
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Local matrix, `translate * rotate * scale`
    pub fn matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::from_euler_xyz(&self.orientation)
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}
