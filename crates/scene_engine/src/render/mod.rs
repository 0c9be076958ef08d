//! # Rendering Interface
//!
//! Backend-agnostic rendering types consumed by the scene graph and the frame loop.
//!
//! ## Organization
//!
//! - **Backend**: [`RenderBackend`] trait, render targets and texture handles
//! - **Program**: [`ShaderProgram`] and its uniform table
//! - **Geometry**: [`Mesh`] and [`Vertex`]
//! - **Materials**: [`Material`] coefficients and [`Texture`] bindings
//! - **Cameras**: [`Camera`] plus the first-person and sweeping controllers
//! - **Lighting**: per-view directional + ambient [`Lighting`]
//! - **Headless**: [`HeadlessBackend`], a recording backend for tests and display-less runs
//!
//! Shader compilation and GPU resource management live behind the backend
//! trait; nothing in this module talks to a graphics API.

pub mod backend;
pub mod camera;
pub mod headless;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod program;

pub use backend::{BackendResult, ClearFlags, RenderBackend, RenderTarget, TextureHandle};
pub use camera::{Camera, FirstPersonController, SweepController};
pub use headless::{DrawRecord, HeadlessBackend, PassRecord};
pub use lighting::Lighting;
pub use material::{Material, Texture, TextureImage, TextureSource};
pub use mesh::{Mesh, Vertex};
pub use program::{ShaderProgram, UniformValue};

use thiserror::Error;

/// High-level rendering error types
///
/// Represents errors that can occur during rendering operations, abstracted
/// from specific graphics API error types.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Resource creation or management failed
    ///
    /// Occurs when GPU resources (targets, textures, buffers) cannot be created,
    /// typically due to invalid sizes or memory constraints.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A draw or `end_pass` was issued with no pass open
    #[error("No render pass is active")]
    NoActivePass,

    /// A pass was opened, or the frame presented, while another pass was still open
    #[error("A render pass is already in progress")]
    PassInProgress,

    /// A render target handle the backend never created
    #[error("Unknown render target {0:?}")]
    UnknownTarget(TextureHandle),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
