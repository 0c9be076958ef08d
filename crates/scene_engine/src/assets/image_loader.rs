//! Image loading utilities for texture data
//!
//! Decodes PNG, JPEG and TGA files into RGBA8 pixels for [`Texture`]s.

use std::path::Path;
use std::sync::Arc;

use crate::assets::AssetError;
use crate::render::{Texture, TextureImage};

/// Load an image file as RGBA8 pixels
pub fn load_image(path: impl AsRef<Path>) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();
    log::debug!("Loading image from: {:?}", path);

    if !path.exists() {
        return Err(AssetError::NotFound(path.display().to_string()));
    }

    // Convert to RGBA8 format (standard for GPU upload)
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Loaded image {}x{} from {:?}", width, height, path);

    Ok(TextureImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Load an image file as a texture bound to `sampler`
pub fn load_texture(path: impl AsRef<Path>, sampler: &str) -> Result<Texture, AssetError> {
    let image = load_image(path)?;
    Ok(Texture::from_image(Arc::new(image), sampler))
}

/// Create a solid color image (useful for testing and defaults)
pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> TextureImage {
    let pixel_count = (width * height) as usize;
    TextureImage {
        width,
        height,
        pixels: color.repeat(pixel_count),
    }
}
