//! Shader program and uniform state
//!
//! The program itself is opaque to the engine: it is a pair of shader paths the
//! backend knows how to compile. What the engine does own is the uniform table.
//! The frame loop sets per-view uniforms before each pass and the scene graph
//! sets per-object ones during traversal; backends read the table when drawing.

use std::collections::HashMap;

use crate::core::config::ShaderConfig;
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Names of the uniforms the engine writes
pub mod uniforms {
    /// Camera projection matrix
    pub const PROJECTION: &str = "projection";
    /// Camera view matrix
    pub const VIEW: &str = "view";
    /// Camera position in world space
    pub const CAMERA_POS: &str = "cameraPos";
    /// Direction of the directional light
    pub const DIRECTIONAL_LIGHT: &str = "directionalLight";
    /// Ambient light color
    pub const AMBIENT_COLOR: &str = "ambientColor";
    /// Directional light color
    pub const DIRECTIONAL_COLOR: &str = "directionalColor";
    /// World matrix of the object being drawn
    pub const MODEL: &str = "model";
    /// Material coefficients of the surface being drawn
    pub const MATERIAL: &str = "material";
}

/// Value of a single uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Scalar float
    Float(f32),
    /// Integer, also used for sampler texture units
    Int(i32),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// 4x4 matrix
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}

/// Shader program with its current uniform values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaderProgram {
    shaders: ShaderConfig,
    uniforms: HashMap<String, UniformValue>,
}

impl ShaderProgram {
    /// Create a program from its shader paths
    pub fn new(shaders: ShaderConfig) -> Self {
        Self {
            shaders,
            uniforms: HashMap::new(),
        }
    }

    /// Shader paths handed to the backend
    pub fn shaders(&self) -> &ShaderConfig {
        &self.shaders
    }

    /// Set (or overwrite) a uniform
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) {
        let value = value.into();
        if let Some(slot) = self.uniforms.get_mut(name) {
            *slot = value;
        } else {
            self.uniforms.insert(name.to_string(), value);
        }
    }

    /// Current value of a uniform
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Current value of a matrix uniform
    pub fn uniform_mat4(&self, name: &str) -> Option<Mat4> {
        match self.uniforms.get(name) {
            Some(UniformValue::Mat4(value)) => Some(*value),
            _ => None,
        }
    }

    /// Current value of a vec3 uniform
    pub fn uniform_vec3(&self, name: &str) -> Option<Vec3> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec3(value)) => Some(*value),
            _ => None,
        }
    }

    /// Current value of a vec4 uniform
    pub fn uniform_vec4(&self, name: &str) -> Option<Vec4> {
        match self.uniforms.get(name) {
            Some(UniformValue::Vec4(value)) => Some(*value),
            _ => None,
        }
    }

    /// All uniforms currently set
    pub fn uniforms(&self) -> &HashMap<String, UniformValue> {
        &self.uniforms
    }
}
