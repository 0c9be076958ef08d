//! Surface materials and textures

use std::sync::Arc;

use crate::foundation::math::Vec4;
use crate::render::TextureHandle;

/// Phong reflection coefficients bound to the `material` uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// `(ambient, diffuse, specular, shininess)`
    pub reflectance: Vec4,
}

impl Material {
    /// Create a material from its four coefficients
    pub fn new(reflectance: Vec4) -> Self {
        Self { reflectance }
    }

    /// Ambient coefficient
    pub fn ambient(&self) -> f32 {
        self.reflectance.x
    }

    /// Diffuse coefficient
    pub fn diffuse(&self) -> f32 {
        self.reflectance.y
    }

    /// Specular coefficient
    pub fn specular(&self) -> f32 {
        self.reflectance.z
    }

    /// Specular exponent
    pub fn shininess(&self) -> f32 {
        self.reflectance.w
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec4::new(0.1, 1.0, 0.3, 4.0))
    }
}

/// Decoded RGBA8 pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 pixels
    pub pixels: Vec<u8>,
}

/// Where a texture's texels come from
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// Pixel data decoded on the CPU, shared between surfaces that use the same file
    Pixels(Arc<TextureImage>),
    /// Color attachment of an off-screen render target
    RenderTarget(TextureHandle),
}

/// A texture bound to a named sampler uniform
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Sampler uniform name, e.g. `baseTexture`
    pub sampler: String,
    /// Texel source
    pub source: TextureSource,
}

impl Texture {
    /// Sampler name used when a texture does not specify one
    pub const BASE_SAMPLER: &'static str = "baseTexture";

    /// Texture from decoded pixels
    pub fn from_image(image: Arc<TextureImage>, sampler: impl Into<String>) -> Self {
        Self {
            sampler: sampler.into(),
            source: TextureSource::Pixels(image),
        }
    }

    /// Texture sampling an off-screen render target
    pub fn from_render_target(handle: TextureHandle, sampler: impl Into<String>) -> Self {
        Self {
            sampler: sampler.into(),
            source: TextureSource::RenderTarget(handle),
        }
    }
}
