//! # 3D Camera System
//!
//! A camera is a position, a forwards direction and an up vector plus the
//! projection parameters. The aspect ratio is not stored: it comes from the
//! render target the camera is drawn into, so the same camera works for the
//! screen and for an off-screen target of a different shape.
//!
//! Controllers mutate a camera once per frame:
//! - [`FirstPersonController`] walks the camera around from keyboard input.
//! - [`SweepController`] pans a fixed camera back and forth like a security camera.

use crate::core::config::ProjectionConfig;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use crate::input::{InputManager, KeyCode};
use crate::render::program::{uniforms, ShaderProgram};

/// 3D perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Direction the camera looks along
    pub forwards: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a camera at `position` looking along `forwards`
    pub fn new(position: Vec3, forwards: Vec3, projection: &ProjectionConfig) -> Self {
        Self {
            position,
            forwards: forwards.normalize(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(projection.fov_degrees),
            near: projection.near,
            far: projection.far,
        }
    }

    /// Move the camera and point it along `forwards`
    pub fn set_pose(&mut self, position: Vec3, forwards: Vec3) {
        self.position = position;
        self.forwards = forwards.normalize();
        log::trace!("Camera pose updated to {:?} -> {:?}", position, self.forwards);
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forwards, self.up)
    }

    /// Projection matrix for a target with the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov, aspect, self.near, self.far)
    }

    /// Write `projection`, `view` and `cameraPos`
    pub fn apply(&self, program: &mut ShaderProgram, aspect: f32) {
        program.set_uniform(uniforms::PROJECTION, self.projection_matrix(aspect));
        program.set_uniform(uniforms::VIEW, self.view_matrix());
        program.set_uniform(uniforms::CAMERA_POS, self.position);
    }
}

/// Keyboard walking camera.
///
/// A/D turn, W/S walk along the horizontal forwards direction, Space and
/// left Control move straight up and down.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonController {
    /// Heading around the Y axis in radians; `-PI/2` looks down -Z
    pub yaw: f32,
    /// Units per second
    pub move_speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
}

impl FirstPersonController {
    /// Create a controller facing `yaw`
    pub fn new(yaw: f32, move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            yaw,
            move_speed,
            rotation_speed,
        }
    }

    /// Apply one frame of held keys to `camera`
    pub fn update(&mut self, camera: &mut Camera, input: &InputManager, dt: f32) {
        if input.is_key_held(KeyCode::A) {
            self.yaw -= self.rotation_speed * dt;
        }
        if input.is_key_held(KeyCode::D) {
            self.yaw += self.rotation_speed * dt;
        }

        camera.forwards = utils::direction_from_pitch_yaw(0.0, self.yaw);

        let step = self.move_speed * dt;
        if input.is_key_held(KeyCode::W) {
            camera.position += camera.forwards * step;
        }
        if input.is_key_held(KeyCode::S) {
            camera.position -= camera.forwards * step;
        }
        if input.is_key_held(KeyCode::Space) {
            camera.position.y += step;
        }
        if input.is_key_held(KeyCode::LControl) {
            camera.position.y -= step;
        }
    }
}

/// Security-camera pan: yaw sweeps between two limits at a constant rate,
/// reversing direction at each limit, with a fixed downward pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepController {
    /// Current yaw in radians
    pub yaw: f32,
    /// Fixed pitch in radians
    pub pitch: f32,
    /// Signed yaw rate in radians per second
    pub rate: f32,
    /// Lower yaw limit
    pub min_yaw: f32,
    /// Upper yaw limit
    pub max_yaw: f32,
}

impl Default for SweepController {
    fn default() -> Self {
        Self {
            yaw: -constants::HALF_PI,
            pitch: -constants::QUARTER_PI,
            rate: constants::PI / 8.0,
            min_yaw: -3.0 * constants::QUARTER_PI,
            max_yaw: -constants::QUARTER_PI,
        }
    }
}

impl SweepController {
    /// Point `camera` along the current heading, then advance the sweep by `dt`
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        camera.forwards = utils::direction_from_pitch_yaw(self.pitch, self.yaw);

        self.yaw += self.rate * dt;
        if self.yaw > self.max_yaw {
            self.yaw = self.max_yaw;
            self.rate = -self.rate.abs();
        }
        if self.yaw < self.min_yaw {
            self.yaw = self.min_yaw;
            self.rate = self.rate.abs();
        }
    }
}
