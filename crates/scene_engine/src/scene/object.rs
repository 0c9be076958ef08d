//! Scene objects: a transform, renderable surfaces and owned children
//!
//! The hierarchy is a plain owned tree. A parent owns its children by value, so
//! dropping a parent drops every descendant, and there are no back-references.
//! Child transforms are relative to the immediate parent; world matrices only
//! exist during [`SceneObject::render`], which accumulates them on the way down.

use std::fmt;

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::render::program::{uniforms, ShaderProgram};
use crate::render::{Material, Mesh, RenderBackend, RenderResult, Texture};
use crate::scene::{ObjectKey, ObjectTable, SceneError, Transform};

/// Mesh with its textures and material
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Geometry
    pub mesh: Mesh,
    /// Textures, bound to consecutive texture units in order
    pub textures: Vec<Texture>,
    /// Reflection coefficients
    pub material: Material,
}

impl Surface {
    /// Untextured surface with the default material
    pub fn new(mesh: Mesh) -> Self {
        Self {
            mesh,
            textures: Vec::new(),
            material: Material::default(),
        }
    }

    /// Builder pattern: add a texture
    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.textures.push(texture);
        self
    }

    /// Builder pattern: set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Write `material` and the sampler uniforms for this surface
    fn bind(&self, program: &mut ShaderProgram) {
        program.set_uniform(uniforms::MATERIAL, self.material.reflectance);
        for (unit, texture) in self.textures.iter().enumerate() {
            program.set_uniform(&texture.sampler, unit as i32);
        }
    }
}

/// Node of the scene hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneObject {
    name: String,
    transform: Transform,
    surfaces: Vec<Surface>,
    children: Vec<SceneObject>,
}

impl SceneObject {
    /// Object drawing `surfaces` with an identity transform
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self {
            surfaces,
            ..Self::default()
        }
    }

    /// Object without surfaces, used as a grouping node
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder pattern: set the name used in logs
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Position relative to the parent
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Orientation relative to the parent, `(pitch, yaw, roll)` radians
    pub fn orientation(&self) -> Vec3 {
        self.transform.orientation()
    }

    /// Scale relative to the parent
    pub fn scale(&self) -> Vec3 {
        self.transform.scale()
    }

    /// Add `delta` to the position
    pub fn move_by(&mut self, delta: Vec3) {
        self.transform.move_by(delta);
    }

    /// Multiply the scale component-wise by `factor`
    pub fn grow(&mut self, factor: Vec3) {
        self.transform.grow(factor);
    }

    /// Add `delta` to the scale
    pub fn stretch(&mut self, delta: Vec3) {
        self.transform.stretch(delta);
    }

    /// Add `delta` radians to the orientation
    pub fn rotate(&mut self, delta: Vec3) {
        self.transform.rotate(delta);
    }

    /// Absolute position assignment
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
    }

    /// Absolute orientation assignment
    pub fn set_orientation(&mut self, orientation: Vec3) {
        self.transform.set_orientation(orientation);
    }

    /// Absolute scale assignment
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.set_scale(scale);
    }

    /// This object's own surfaces
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Set the material of every own surface. Children keep theirs.
    pub fn set_material(&mut self, reflectance: Vec4) {
        for surface in &mut self.surfaces {
            surface.material.reflectance = reflectance;
        }
    }

    /// Add `delta` to the material of every own surface
    pub fn tint(&mut self, delta: Vec4) {
        for surface in &mut self.surfaces {
            surface.material.reflectance += delta;
        }
    }

    /// Append `texture` to every own surface
    pub fn add_texture(&mut self, texture: &Texture) {
        for surface in &mut self.surfaces {
            surface.textures.push(texture.clone());
        }
    }

    /// Take ownership of `child` and return its index
    pub fn add_child(&mut self, child: SceneObject) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Child at `index`.
    ///
    /// # Panics
    /// If `index` is out of range. Use [`SceneObject::descendant`] for a checked lookup.
    pub fn child(&self, index: usize) -> &SceneObject {
        &self.children[index]
    }

    /// Mutable child at `index`.
    ///
    /// # Panics
    /// If `index` is out of range. Use [`SceneObject::descendant_mut`] for a checked lookup.
    pub fn child_mut(&mut self, index: usize) -> &mut SceneObject {
        &mut self.children[index]
    }

    /// Direct children
    pub fn children(&self) -> &[SceneObject] {
        &self.children
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Follow a path of child indices
    pub fn descendant(&self, path: &[usize]) -> Result<&SceneObject, SceneError> {
        let mut node = self;
        for &index in path {
            let len = node.children.len();
            node = node
                .children
                .get(index)
                .ok_or(SceneError::ChildOutOfRange { index, len })?;
        }
        Ok(node)
    }

    /// Follow a path of child indices, mutably
    pub fn descendant_mut(&mut self, path: &[usize]) -> Result<&mut SceneObject, SceneError> {
        let mut node = self;
        for &index in path {
            let len = node.children.len();
            node = node
                .children
                .get_mut(index)
                .ok_or(SceneError::ChildOutOfRange { index, len })?;
        }
        Ok(node)
    }

    /// Total number of objects in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    /// Draw this object and its descendants as a root
    pub fn render(
        &self,
        program: &mut ShaderProgram,
        backend: &mut dyn RenderBackend,
    ) -> RenderResult<()> {
        self.render_with_parent(program, backend, &Mat4::identity())
    }

    /// Draw this object and its descendants under the accumulated `parent` matrix.
    ///
    /// Sets `model` to this object's world matrix and `material` plus the sampler
    /// units for each surface before drawing it.
    pub fn render_with_parent(
        &self,
        program: &mut ShaderProgram,
        backend: &mut dyn RenderBackend,
        parent: &Mat4,
    ) -> RenderResult<()> {
        let world = parent * self.transform.matrix();
        program.set_uniform(uniforms::MODEL, world);

        for surface in &self.surfaces {
            surface.bind(program);
            backend.draw_surface(program, surface)?;
        }

        for child in &self.children {
            child.render_with_parent(program, backend, &world)?;
        }
        Ok(())
    }
}

/// Non-owning reference to an object somewhere in a scene: a top-level key plus
/// a path of child indices.
///
/// Resolving fails with [`SceneError`] once the top-level object has been removed
/// or the path no longer matches the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    root: ObjectKey,
    path: Vec<usize>,
}

impl ObjectRef {
    /// Reference to a top-level object
    pub fn root(root: ObjectKey) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Reference to the `index`-th child of the referenced object
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self {
            root: self.root,
            path,
        }
    }

    /// Key of the top-level ancestor
    pub fn root_key(&self) -> ObjectKey {
        self.root
    }

    /// Child indices from the top-level ancestor
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Look the object up in `objects`
    pub fn resolve<'a>(&self, objects: &'a ObjectTable) -> Result<&'a SceneObject, SceneError> {
        objects
            .get(self.root)
            .ok_or(SceneError::ObjectDestroyed(self.root))?
            .descendant(&self.path)
    }

    /// Look the object up in `objects`, mutably
    pub fn resolve_mut<'a>(
        &self,
        objects: &'a mut ObjectTable,
    ) -> Result<&'a mut SceneObject, SceneError> {
        objects
            .get_mut(self.root)
            .ok_or(SceneError::ObjectDestroyed(self.root))?
            .descendant_mut(&self.path)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.root)?;
        for index in &self.path {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessBackend;
    use approx::assert_relative_eq;

    fn cube_object() -> SceneObject {
        SceneObject::new(vec![Surface::new(Mesh::cube())])
    }

    #[test]
    fn test_add_child_returns_index() {
        let mut parent = SceneObject::empty();
        assert_eq!(parent.add_child(cube_object()), 0);
        assert_eq!(parent.add_child(cube_object().with_name("second")), 1);
        assert_eq!(parent.child(1).name(), "second");
        assert_eq!(parent.subtree_len(), 3);
    }

    #[test]
    #[should_panic]
    fn test_child_out_of_range_panics() {
        let mut parent = cube_object();
        parent.add_child(cube_object());
        let _ = parent.child_mut(1);
    }

    #[test]
    fn test_descendant_reports_out_of_range() {
        let mut parent = cube_object();
        parent.add_child(cube_object());
        assert!(parent.descendant(&[0]).is_ok());
        assert_eq!(
            parent.descendant_mut(&[0, 2]).unwrap_err(),
            SceneError::ChildOutOfRange { index: 2, len: 0 }
        );
    }

    #[test]
    fn test_set_material_only_touches_own_surfaces() {
        let mut parent = cube_object();
        parent.add_child(cube_object());
        parent.set_material(Vec4::new(1.0, 1.0, 1.0, 1.0));

        assert_eq!(parent.surfaces()[0].material.reflectance, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(parent.child(0).surfaces()[0].material, Material::default());
    }

    #[test]
    fn test_tint_accumulates() {
        let mut object = cube_object();
        object.tint(Vec4::new(0.1, 0.0, 0.0, 0.0));
        object.tint(Vec4::new(0.1, 0.0, 0.0, 0.0));
        assert_relative_eq!(object.surfaces()[0].material.ambient(), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_render_binds_material_and_samplers() {
        let mut backend = HeadlessBackend::new();
        let handle = backend.create_render_target(64, 64).unwrap();
        let mut object = cube_object();
        object.add_texture(&Texture::from_render_target(handle, Texture::BASE_SAMPLER));
        object.move_by(Vec3::new(0.0, 1.0, 0.0));

        let mut program = ShaderProgram::default();
        backend.begin_screen_pass(64, 64).unwrap();
        object.render(&mut program, &mut backend).unwrap();

        let draws = backend.draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].material, Some(Material::default().reflectance));
        assert_eq!(draws[0].render_target_textures, vec![handle]);
        assert_eq!(
            program.uniform(Texture::BASE_SAMPLER),
            Some(&crate::render::UniformValue::Int(0))
        );
        assert_relative_eq!(draws[0].world_position(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_render_rejects_unknown_render_target() {
        let mut object = cube_object();
        let stale = crate::render::TextureHandle(7);
        object.add_texture(&Texture::from_render_target(stale, Texture::BASE_SAMPLER));

        let mut program = ShaderProgram::default();
        let mut backend = HeadlessBackend::new();
        backend.begin_screen_pass(64, 64).unwrap();
        assert!(object.render(&mut program, &mut backend).is_err());
    }
}
