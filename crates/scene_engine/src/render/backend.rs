//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that rendering backends must implement. The
//! engine drives one or more passes per frame, each into a [`RenderTarget`], and
//! asks the backend to draw surfaces with whatever uniforms the program holds at
//! that moment.

use bitflags::bitflags;

use crate::render::{RenderError, ShaderProgram};
use crate::scene::Surface;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a texture resource owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

bitflags! {
    /// Buffers cleared at the start of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachment
        const COLOR = 0b01;
        /// Depth attachment
        const DEPTH = 0b10;
    }
}

/// Destination of a render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// The presentation surface
    Screen {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// An off-screen color + depth target whose color can be sampled as a texture
    Offscreen {
        /// Color attachment handle
        handle: TextureHandle,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
}

impl RenderTarget {
    /// Viewport size `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        match *self {
            Self::Screen { width, height } | Self::Offscreen { width, height, .. } => {
                (width, height)
            }
        }
    }

    /// Width divided by height, 1.0 for a degenerate target
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.size();
        if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// Resize a screen target; off-screen targets keep their size
    pub fn resized(self, new_width: u32, new_height: u32) -> Self {
        match self {
            Self::Screen { .. } => Self::Screen {
                width: new_width,
                height: new_height,
            },
            offscreen @ Self::Offscreen { .. } => offscreen,
        }
    }
}

/// Main rendering backend trait
///
/// A frame is a sequence of `begin_pass` / `draw_surface`* / `end_pass` groups
/// followed by one `present`.
pub trait RenderBackend {
    /// Allocate an off-screen color + depth target and return its color texture
    fn create_render_target(&mut self, width: u32, height: u32) -> BackendResult<TextureHandle>;

    /// Bind `target`, set the viewport to its size and clear the requested buffers
    fn begin_pass(&mut self, target: &RenderTarget, clear: ClearFlags) -> BackendResult<()>;

    /// Draw one surface using the uniforms currently held by `program`
    fn draw_surface(&mut self, program: &ShaderProgram, surface: &Surface) -> BackendResult<()>;

    /// Finish the current pass
    fn end_pass(&mut self) -> BackendResult<()>;

    /// Present the screen target
    fn present(&mut self) -> BackendResult<()>;

    /// Downcast to the concrete backend type
    fn as_any(&self) -> &dyn std::any::Any;
}
