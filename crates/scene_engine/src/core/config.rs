//! # Engine Configuration
//!
//! All configuration consumed by the engine itself: logging, the presentation
//! window, shader locations, frame pacing, the off-screen render target and the
//! camera projection. Applications embed [`EngineConfig`] in their own config
//! struct and load both from one file.
//!
//! Every struct uses `#[serde(default)]` so a config file only needs to list the
//! values it changes.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// Presentation window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Night Shift".to_string(),
        }
    }
}

/// # Shader Configuration
///
/// Paths of the vertex and fragment shader sources handed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader
    pub vertex_shader_path: String,
    /// Path to the fragment shader
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::new("shaders/scene.vert", "shaders/scene.frag")
    }
}

/// Frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Upper bound for a single frame's delta time in seconds
    pub max_delta_seconds: f32,
    /// Stop after this many frames. `None` runs until the platform asks to close.
    pub max_frames: Option<u64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_delta_seconds: 0.25,
            max_frames: None,
        }
    }
}

/// Size of the off-screen render target used by secondary views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffscreenConfig {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
}

impl Default for OffscreenConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

/// Perspective projection shared by all cameras
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// # Engine Configuration
///
/// Core engine behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Window settings
    pub window: WindowConfig,
    /// Shader locations
    pub shaders: ShaderConfig,
    /// Frame pacing
    pub frame: FrameConfig,
    /// Off-screen target size
    pub offscreen: OffscreenConfig,
    /// Camera projection
    pub projection: ProjectionConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            shaders: ShaderConfig::default(),
            frame: FrameConfig::default(),
            offscreen: OffscreenConfig::default(),
            projection: ProjectionConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set window size
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set custom shader configuration
    pub fn with_shaders(mut self, shaders: ShaderConfig) -> Self {
        self.shaders = shaders;
        self
    }

    /// Stop the frame loop after `frames` frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.frame.max_frames = Some(frames);
        self
    }

    /// Set the off-screen target size
    pub fn with_offscreen_size(mut self, width: u32, height: u32) -> Self {
        self.offscreen = OffscreenConfig { width, height };
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("Window size must be non-zero".to_string()));
        }

        if self.offscreen.width == 0 || self.offscreen.height == 0 {
            return Err(ConfigError::Invalid(
                "Off-screen target size must be non-zero".to_string(),
            ));
        }

        if !(self.frame.max_delta_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_delta_seconds must be positive, got {}",
                self.frame.max_delta_seconds
            )));
        }

        let projection = &self.projection;
        if !(projection.fov_degrees > 0.0 && projection.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "Field of view must be within (0, 180) degrees, got {}",
                projection.fov_degrees
            )));
        }

        if !(projection.near > 0.0 && projection.far > projection.near) {
            return Err(ConfigError::Invalid(format!(
                "Clip planes must satisfy 0 < near < far, got near={} far={}",
                projection.near, projection.far
            )));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
