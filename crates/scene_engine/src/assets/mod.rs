//! Asset loading
//!
//! Models become [`SceneObject`](crate::scene::SceneObject) trees through a
//! [`ModelLoader`]; images become [`Texture`](crate::render::Texture)s.

pub mod image_loader;
pub mod model_loader;

pub use image_loader::{load_image, load_texture};
pub use model_loader::{ModelLoader, ObjModelLoader};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The model file could not be parsed
    #[error("Failed to load model: {0}")]
    Model(#[from] tobj::LoadError),

    /// The image file could not be decoded
    #[error("Failed to load image: {0}")]
    Image(#[from] image::ImageError),
}
