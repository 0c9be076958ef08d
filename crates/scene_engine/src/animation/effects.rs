//! Concrete animation effects
//!
//! Each effect is built from a total change over a duration and stores the
//! per-second rate, so applying it for the full duration yields the total.

use crate::animation::{check_duration, Animation, AnimationEffect, AnimationError};
use crate::foundation::math::{Vec3, Vec4};
use crate::scene::{ObjectRef, SceneObject};

/// Rotates the target at a constant rate
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAnimation {
    per_second: Vec3,
}

impl RotationAnimation {
    /// Rotate `target` by `total` radians (pitch, yaw, roll) over `duration` seconds
    pub fn new(target: ObjectRef, duration: f32, total: Vec3) -> Result<Animation, AnimationError> {
        let duration = check_duration(duration)?;
        Animation::new(target, duration, Self { per_second: total / duration })
    }

    /// Radians per second
    pub fn per_second(&self) -> Vec3 {
        self.per_second
    }
}

impl AnimationEffect for RotationAnimation {
    fn apply(&mut self, object: &mut SceneObject, dt: f32) {
        object.rotate(self.per_second * dt);
    }
}

/// Moves the target at a constant velocity
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationAnimation {
    per_second: Vec3,
}

impl TranslationAnimation {
    /// Move `target` by `total` over `duration` seconds
    pub fn new(target: ObjectRef, duration: f32, total: Vec3) -> Result<Animation, AnimationError> {
        let duration = check_duration(duration)?;
        Animation::new(target, duration, Self { per_second: total / duration })
    }

    /// Units per second
    pub fn per_second(&self) -> Vec3 {
        self.per_second
    }
}

impl AnimationEffect for TranslationAnimation {
    fn apply(&mut self, object: &mut SceneObject, dt: f32) {
        object.move_by(self.per_second * dt);
    }
}

/// Changes the target's scale at a constant rate.
///
/// The change is additive so that partial ticks sum to the total regardless of
/// how the duration is split.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleAnimation {
    per_second: Vec3,
}

impl ScaleAnimation {
    /// Add `total` to the scale of `target` over `duration` seconds
    pub fn new(target: ObjectRef, duration: f32, total: Vec3) -> Result<Animation, AnimationError> {
        let duration = check_duration(duration)?;
        Animation::new(target, duration, Self { per_second: total / duration })
    }
}

impl AnimationEffect for ScaleAnimation {
    fn apply(&mut self, object: &mut SceneObject, dt: f32) {
        object.stretch(self.per_second * dt);
    }
}

/// Shifts the material coefficients of the target's own surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialAnimation {
    per_second: Vec4,
}

impl MaterialAnimation {
    /// Add `total` to the material of `target` over `duration` seconds
    pub fn new(target: ObjectRef, duration: f32, total: Vec4) -> Result<Animation, AnimationError> {
        let duration = check_duration(duration)?;
        Animation::new(target, duration, Self { per_second: total / duration })
    }
}

impl AnimationEffect for MaterialAnimation {
    fn apply(&mut self, object: &mut SceneObject, dt: f32) {
        object.tint(self.per_second * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Material, Mesh};
    use crate::scene::{ObjectTable, Surface};
    use approx::assert_relative_eq;

    fn run(mut animation: Animation, objects: &mut ObjectTable, steps: usize) {
        let dt = animation.duration() / steps as f32;
        animation.start();
        for _ in 0..steps {
            animation.tick(objects, dt).unwrap();
        }
        assert!(!animation.is_running());
    }

    #[test]
    fn test_rate_is_precomputed() {
        let mut effect = RotationAnimation {
            per_second: Vec3::new(0.0, 2.0, 0.0) / 4.0,
        };
        assert_relative_eq!(effect.per_second(), Vec3::new(0.0, 0.5, 0.0));
        let mut object = SceneObject::empty();
        effect.apply(&mut object, 2.0);
        assert_relative_eq!(object.orientation(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_translation_total() {
        let mut objects = ObjectTable::with_key();
        let key = objects.insert(SceneObject::empty());
        let drop = Vec3::new(0.0, -1.15, 0.0);
        let animation = TranslationAnimation::new(ObjectRef::root(key), 1.0, drop).unwrap();
        run(animation, &mut objects, 7);
        assert_relative_eq!(objects[key].position(), drop, epsilon = 1e-5);
    }

    #[test]
    fn test_scale_is_additive() {
        let mut objects = ObjectTable::with_key();
        let key = objects.insert(SceneObject::empty());
        let change = Vec3::new(1.0, 0.0, -0.5);
        let animation = ScaleAnimation::new(ObjectRef::root(key), 2.0, change).unwrap();
        run(animation, &mut objects, 10);
        assert_relative_eq!(objects[key].scale(), Vec3::new(2.0, 1.0, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_material_only_touches_own_surfaces() {
        let mut objects = ObjectTable::with_key();
        let mut lamp = SceneObject::new(vec![Surface::new(Mesh::cube())]);
        lamp.add_child(SceneObject::new(vec![Surface::new(Mesh::cube())]));
        let key = objects.insert(lamp);

        let change = Vec4::new(0.9, 0.0, 0.0, 0.0);
        let animation = MaterialAnimation::new(ObjectRef::root(key), 0.5, change).unwrap();
        run(animation, &mut objects, 3);

        assert_relative_eq!(objects[key].surfaces()[0].material.ambient(), 1.0, epsilon = 1e-5);
        assert_eq!(objects[key].child(0).surfaces()[0].material, Material::default());
    }
}
