//! Model loading into scene objects
//!
//! A loader turns a model file into a [`SceneObject`] tree ready to be moved into
//! a scene. The OBJ loader produces an empty root with one child per model in the
//! file, each child carrying a single surface.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::{image_loader, AssetError};
use crate::render::{Mesh, Texture, TextureImage, Vertex};
use crate::scene::{SceneObject, Surface};

/// Source of scene objects loaded from files
pub trait ModelLoader {
    /// Load the model at `path`.
    ///
    /// `flip_v` mirrors the V texture coordinate, for models authored with the
    /// texture origin in the lower left corner.
    fn load(&mut self, path: &Path, flip_v: bool) -> Result<SceneObject, AssetError>;
}

/// Wavefront OBJ loader.
///
/// Diffuse textures named by the companion MTL file are decoded once and shared
/// by every surface, and every later load, that references the same file.
#[derive(Debug, Default)]
pub struct ObjModelLoader {
    textures: HashMap<PathBuf, Arc<TextureImage>>,
}

impl ObjModelLoader {
    /// Create a loader with an empty texture cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct textures decoded so far
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    fn texture(&mut self, path: PathBuf) -> Option<Arc<TextureImage>> {
        if let Some(image) = self.textures.get(&path) {
            return Some(Arc::clone(image));
        }

        match image_loader::load_image(&path) {
            Ok(image) => {
                let image = Arc::new(image);
                self.textures.insert(path, Arc::clone(&image));
                Some(image)
            }
            Err(e) => {
                log::warn!("Skipping texture {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl ModelLoader for ObjModelLoader {
    fn load(&mut self, path: &Path, flip_v: bool) -> Result<SceneObject, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        };
        let (models, materials) = tobj::load_obj(path, &options)?;
        let materials = materials.unwrap_or_else(|e| {
            log::warn!("No usable materials for {}: {}", path.display(), e);
            Vec::new()
        });
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let name = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());
        let mut root = SceneObject::empty().with_name(name);

        for model in models {
            let source = &model.mesh;
            let vertex_count = source.positions.len() / 3;
            let mut vertices = Vec::with_capacity(vertex_count);
            for i in 0..vertex_count {
                let position = [
                    source.positions[3 * i],
                    source.positions[3 * i + 1],
                    source.positions[3 * i + 2],
                ];
                let normal = if source.normals.len() >= 3 * (i + 1) {
                    [source.normals[3 * i], source.normals[3 * i + 1], source.normals[3 * i + 2]]
                } else {
                    [0.0, 1.0, 0.0]
                };
                let tex_coord = if source.texcoords.len() >= 2 * (i + 1) {
                    [source.texcoords[2 * i], source.texcoords[2 * i + 1]]
                } else {
                    [0.0, 0.0]
                };
                vertices.push(Vertex::new(position, normal, tex_coord));
            }

            let mut mesh = Mesh::new(vertices, source.indices.clone());
            if flip_v {
                mesh.flip_v();
            }

            let mut surface = Surface::new(mesh);
            let diffuse_texture = source
                .material_id
                .and_then(|id| materials.get(id))
                .and_then(|material| material.diffuse_texture.clone());
            if let Some(texture_name) = diffuse_texture {
                if let Some(image) = self.texture(base_dir.join(texture_name)) {
                    let texture = Texture::from_image(image, Texture::BASE_SAMPLER);
                    surface = surface.with_texture(texture);
                }
            }

            log::debug!(
                "Loaded model '{}' with {} triangles from {}",
                model.name,
                surface.mesh.triangle_count(),
                path.display()
            );
            root.add_child(SceneObject::new(vec![surface]).with_name(model.name));
        }

        log::info!("Loaded {} ({} models)", path.display(), root.child_count());
        Ok(root)
    }
}
