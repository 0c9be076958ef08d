//! Lighting system
//!
//! One directional light plus ambient light per view, written into the program
//! before the view's pass.

use crate::foundation::math::Vec3;
use crate::render::program::{uniforms, ShaderProgram};

/// Per-view lighting environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Direction the directional light travels in
    pub direction: Vec3,
    /// Directional light color. `None` leaves the previous value in the program.
    pub directional_color: Option<Vec3>,
    /// Ambient light color
    pub ambient_color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, -1.0, -1.0),
            directional_color: Some(Vec3::new(1.0, 1.0, 1.0)),
            ambient_color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Lighting {
    /// White directional light along `direction` with white ambient
    pub fn directional(direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Builder pattern: set the directional color
    pub fn with_directional_color(mut self, color: Option<Vec3>) -> Self {
        self.directional_color = color;
        self
    }

    /// Write the lighting uniforms
    pub fn apply(&self, program: &mut ShaderProgram) {
        program.set_uniform(uniforms::DIRECTIONAL_LIGHT, self.direction);
        program.set_uniform(uniforms::AMBIENT_COLOR, self.ambient_color);
        if let Some(color) = self.directional_color {
            program.set_uniform(uniforms::DIRECTIONAL_COLOR, color);
        }
    }
}
