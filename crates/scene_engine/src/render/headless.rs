//! Headless rendering backend
//!
//! Records what a GPU backend would have been asked to do instead of doing it:
//! every pass with its target and clear flags, and every draw with the world
//! matrix, material and texture bindings it was issued with. Used by tests and by
//! runs without a display. Pass misuse (drawing outside a pass, nesting passes,
//! rendering into an unknown target) is reported the same way a real backend
//! would reject it.

use std::collections::HashMap;

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::backend::{BackendResult, ClearFlags, RenderBackend, RenderTarget, TextureHandle};
use crate::render::program::{uniforms, ShaderProgram, UniformValue};
use crate::render::{RenderError, TextureSource};
use crate::scene::Surface;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    /// `model` uniform at draw time
    pub model: Mat4,
    /// `material` uniform at draw time
    pub material: Option<Vec4>,
    /// Size of the vertex and index data the draw would upload
    pub uploaded_bytes: usize,
    /// Number of indices drawn
    pub index_count: usize,
    /// Off-screen targets sampled by the surface
    pub render_target_textures: Vec<TextureHandle>,
    /// Number of pixel textures sampled by the surface
    pub image_textures: usize,
}

impl DrawRecord {
    /// Translation part of the world matrix
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.model[(0, 3)], self.model[(1, 3)], self.model[(2, 3)])
    }
}

/// One recorded pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    /// Where the pass rendered to
    pub target: RenderTarget,
    /// Buffers cleared at the start of the pass
    pub clear: ClearFlags,
    /// Program uniforms as seen by the first draw of the pass
    pub uniforms: HashMap<String, UniformValue>,
    /// Draws in submission order
    pub draws: Vec<DrawRecord>,
}

impl PassRecord {
    fn new(target: RenderTarget, clear: ClearFlags) -> Self {
        Self {
            target,
            clear,
            uniforms: HashMap::new(),
            draws: Vec::new(),
        }
    }

    /// `cameraPos` uniform used by the pass
    pub fn camera_position(&self) -> Option<Vec3> {
        match self.uniforms.get(uniforms::CAMERA_POS) {
            Some(UniformValue::Vec3(position)) => Some(*position),
            _ => None,
        }
    }
}

/// Backend that records passes and draws without a GPU
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    targets: HashMap<TextureHandle, (u32, u32)>,
    active: Option<PassRecord>,
    frame: Vec<PassRecord>,
    last_frame: Vec<PassRecord>,
    frames_presented: u64,
    uploaded_bytes: usize,
}

impl HeadlessBackend {
    /// Create a new backend with no render targets
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a pass on a screen target of the given size, clearing color and depth
    pub fn begin_screen_pass(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.begin_pass(&RenderTarget::Screen { width, height }, ClearFlags::all())
    }

    /// Passes finished since the last `present`
    pub fn passes(&self) -> &[PassRecord] {
        &self.frame
    }

    /// Draws issued since the last `present`, including the open pass
    pub fn draws(&self) -> Vec<&DrawRecord> {
        self.frame
            .iter()
            .chain(self.active.iter())
            .flat_map(|pass| pass.draws.iter())
            .collect()
    }

    /// Passes of the most recently presented frame
    pub fn last_frame(&self) -> &[PassRecord] {
        &self.last_frame
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Total vertex and index bytes submitted over the backend's lifetime
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Size of an off-screen target created by this backend
    pub fn target_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.targets.get(&handle).copied()
    }

    fn check_texture(&self, handle: TextureHandle) -> BackendResult<()> {
        if self.targets.contains_key(&handle) {
            Ok(())
        } else {
            Err(RenderError::UnknownTarget(handle))
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_render_target(&mut self, width: u32, height: u32) -> BackendResult<TextureHandle> {
        if width == 0 || height == 0 {
            return Err(RenderError::ResourceCreationFailed(format!(
                "Render target size must be non-zero, got {width}x{height}"
            )));
        }

        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.targets.insert(handle, (width, height));
        log::debug!("Created {}x{} render target {:?}", width, height, handle);
        Ok(handle)
    }

    fn begin_pass(&mut self, target: &RenderTarget, clear: ClearFlags) -> BackendResult<()> {
        if self.active.is_some() {
            return Err(RenderError::PassInProgress);
        }
        if let RenderTarget::Offscreen { handle, .. } = *target {
            self.check_texture(handle)?;
        }

        self.active = Some(PassRecord::new(*target, clear));
        Ok(())
    }

    fn draw_surface(&mut self, program: &ShaderProgram, surface: &Surface) -> BackendResult<()> {
        let mut render_target_textures = Vec::new();
        let mut image_textures = 0;
        for texture in &surface.textures {
            match &texture.source {
                TextureSource::RenderTarget(handle) => {
                    self.check_texture(*handle)?;
                    render_target_textures.push(*handle);
                }
                TextureSource::Pixels(_) => image_textures += 1,
            }
        }

        let vertex_data = surface.mesh.vertex_data();
        let uploaded_bytes = bytemuck::cast_slice::<f32, u8>(&vertex_data).len()
            + bytemuck::cast_slice::<u32, u8>(&surface.mesh.indices).len();

        let pass = self.active.as_mut().ok_or(RenderError::NoActivePass)?;
        if pass.draws.is_empty() {
            pass.uniforms = program.uniforms().clone();
        }
        pass.draws.push(DrawRecord {
            model: program.uniform_mat4(uniforms::MODEL).unwrap_or_else(Mat4::identity),
            material: program.uniform_vec4(uniforms::MATERIAL),
            uploaded_bytes,
            index_count: surface.mesh.indices.len(),
            render_target_textures,
            image_textures,
        });
        self.uploaded_bytes += uploaded_bytes;
        Ok(())
    }

    fn end_pass(&mut self) -> BackendResult<()> {
        let pass = self.active.take().ok_or(RenderError::NoActivePass)?;
        log::trace!("Pass into {:?} finished with {} draws", pass.target, pass.draws.len());
        self.frame.push(pass);
        Ok(())
    }

    fn present(&mut self) -> BackendResult<()> {
        if self.active.is_some() {
            return Err(RenderError::PassInProgress);
        }

        self.last_frame = std::mem::take(&mut self.frame);
        self.frames_presented += 1;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
