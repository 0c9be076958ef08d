//! The scene aggregate: objects, animators and the program they render with

use slotmap::{new_key_type, SlotMap};

use crate::animation::{AnimationError, Animator};
use crate::render::{RenderBackend, RenderResult, ShaderProgram};
use crate::scene::{ObjectRef, SceneError, SceneObject};

new_key_type! {
    /// Stable handle to a top-level object in a [`Scene`]
    pub struct ObjectKey;
}

/// Storage of top-level objects. Removing an object invalidates its key.
pub type ObjectTable = SlotMap<ObjectKey, SceneObject>;

/// Top-level objects, their animators and the shader program
#[derive(Debug, Default)]
pub struct Scene {
    program: ShaderProgram,
    objects: ObjectTable,
    animators: Vec<Animator>,
}

impl Scene {
    /// Empty scene drawn with `program`
    pub fn new(program: ShaderProgram) -> Self {
        Self {
            program,
            objects: ObjectTable::with_key(),
            animators: Vec::new(),
        }
    }

    /// Program shared by every object in the scene
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Mutable program, for setting per-view uniforms
    pub fn program_mut(&mut self) -> &mut ShaderProgram {
        &mut self.program
    }

    /// Move `object` into the scene as a new top-level object
    pub fn add_object(&mut self, object: SceneObject) -> ObjectKey {
        let key = self.objects.insert(object);
        log::debug!(
            "Added object '{}' as {:?} ({} objects in subtree)",
            self.objects[key].name(),
            key,
            self.objects[key].subtree_len()
        );
        key
    }

    /// Remove a top-level object and all of its descendants
    pub fn remove_object(&mut self, key: ObjectKey) -> Option<SceneObject> {
        let removed = self.objects.remove(key);
        if removed.is_some() {
            log::debug!("Removed object {:?}", key);
        }
        removed
    }

    /// Top-level object by key
    pub fn root(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Mutable top-level object by key
    pub fn root_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    /// Resolve a reference to any object in the scene
    pub fn object(&self, reference: &ObjectRef) -> Result<&SceneObject, SceneError> {
        reference.resolve(&self.objects)
    }

    /// Resolve a reference to any object in the scene, mutably
    pub fn object_mut(&mut self, reference: &ObjectRef) -> Result<&mut SceneObject, SceneError> {
        reference.resolve_mut(&mut self.objects)
    }

    /// Top-level objects with their keys
    pub fn objects(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Number of top-level objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Add an animator and return its index
    pub fn add_animator(&mut self, animator: Animator) -> usize {
        self.animators.push(animator);
        self.animators.len() - 1
    }

    /// Animator by index
    pub fn animator(&self, index: usize) -> Option<&Animator> {
        self.animators.get(index)
    }

    /// Mutable animator by index
    pub fn animator_mut(&mut self, index: usize) -> Option<&mut Animator> {
        self.animators.get_mut(index)
    }

    /// All animators in insertion order
    pub fn animators(&self) -> &[Animator] {
        &self.animators
    }

    /// Start every animator
    pub fn start_all(&mut self) {
        for animator in &mut self.animators {
            animator.start();
        }
    }

    /// Advance every animator by `dt` seconds, in insertion order
    pub fn tick(&mut self, dt: f32) -> Result<(), AnimationError> {
        for animator in &mut self.animators {
            animator.tick(&mut self.objects, dt)?;
        }
        Ok(())
    }

    /// Draw every top-level object with the scene's program.
    ///
    /// Per-view uniforms (camera, lighting) must already be set on the program.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> RenderResult<()> {
        for (_, object) in &self.objects {
            object.render(&mut self.program, backend)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TranslationAnimation;
    use crate::foundation::math::Vec3;
    use crate::render::{HeadlessBackend, Mesh};
    use crate::scene::Surface;
    use approx::assert_relative_eq;

    fn square() -> SceneObject {
        SceneObject::new(vec![Surface::new(Mesh::square())])
    }

    #[test]
    fn test_remove_invalidates_references() {
        let mut scene = Scene::default();
        let mut parent = square();
        parent.add_child(square());
        let key = scene.add_object(parent);
        let child = ObjectRef::root(key).child(0);

        assert!(scene.object(&child).is_ok());
        let removed = scene.remove_object(key).unwrap();
        assert_eq!(removed.subtree_len(), 2);
        assert_eq!(scene.object(&child).unwrap_err(), SceneError::ObjectDestroyed(key));
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_keys_stay_valid_across_removals() {
        let mut scene = Scene::default();
        let first = scene.add_object(square().with_name("first"));
        let second = scene.add_object(square().with_name("second"));
        scene.remove_object(first);
        let third = scene.add_object(square().with_name("third"));

        assert_eq!(scene.root(second).unwrap().name(), "second");
        assert_eq!(scene.root(third).unwrap().name(), "third");
        assert!(scene.root(first).is_none());
    }

    #[test]
    fn test_tick_drives_animators_in_order() {
        let mut scene = Scene::default();
        let key = scene.add_object(square());
        let target = ObjectRef::root(key);

        let mut first = Animator::new();
        first.add_animation(
            TranslationAnimation::new(target.clone(), 1.0, Vec3::new(1.0, 0.0, 0.0)).unwrap(),
        );
        let mut second = Animator::new();
        second.add_animation(
            TranslationAnimation::new(target, 1.0, Vec3::new(0.0, 2.0, 0.0)).unwrap(),
        );
        scene.add_animator(first);
        scene.add_animator(second);
        scene.start_all();

        scene.tick(0.5).unwrap();
        assert_relative_eq!(
            scene.root(key).unwrap().position(),
            Vec3::new(0.5, 1.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_tick_reports_destroyed_target() {
        let mut scene = Scene::default();
        let key = scene.add_object(square());
        let mut animator = Animator::new();
        animator.add_animation(
            TranslationAnimation::new(ObjectRef::root(key), 1.0, Vec3::new(1.0, 0.0, 0.0)).unwrap(),
        );
        scene.add_animator(animator);
        scene.start_all();
        scene.remove_object(key);

        assert_eq!(
            scene.tick(0.1).unwrap_err(),
            AnimationError::Target(SceneError::ObjectDestroyed(key))
        );
    }

    #[test]
    fn test_render_draws_every_object() {
        let mut scene = Scene::default();
        let mut parent = square();
        parent.add_child(square());
        scene.add_object(parent);
        scene.add_object(square());

        let mut backend = HeadlessBackend::new();
        backend.begin_screen_pass(64, 64).unwrap();
        scene.render(&mut backend).unwrap();
        assert_eq!(backend.draws().len(), 3);
    }
}
