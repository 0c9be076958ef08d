//! Scenario tests for animations and animators running against a scene
//!
//! These drive whole scenes the way the frame loop does: animators ticked with
//! frame deltas, objects rendered through the headless backend.

use approx::assert_relative_eq;

use crate::animation::{Animator, AnimatorState, RotationAnimation, TranslationAnimation};
use crate::foundation::math::{utils::deg_to_rad, Vec3};
use crate::render::{HeadlessBackend, Mesh, RenderBackend};
use crate::scene::{ObjectKey, ObjectRef, Scene, SceneObject, Surface};

const EPSILON: f32 = 1e-4;

fn scene_with_cube() -> (Scene, ObjectKey) {
    let mut scene = Scene::default();
    let key = scene.add_object(SceneObject::new(vec![Surface::new(Mesh::cube())]));
    (scene, key)
}

/// A turns 90 degrees of yaw over 2s, then B turns back 45 over 3s
fn turn_then_turn_back(target: &ObjectRef) -> Animator {
    let yaw = |degrees| Vec3::new(0.0, deg_to_rad(degrees), 0.0);
    Animator::new()
        .with_animation(RotationAnimation::new(target.clone(), 2.0, yaw(90.0)).unwrap())
        .with_animation(RotationAnimation::new(target.clone(), 3.0, yaw(-45.0)).unwrap())
}

fn yaw_degrees(scene: &Scene, key: ObjectKey) -> f32 {
    scene.root(key).unwrap().orientation().y.to_degrees()
}

#[test]
fn test_elapsed_never_exceeds_duration() {
    let (mut scene, key) = scene_with_cube();
    let mut animator = Animator::new();
    animator.add_animation(
        RotationAnimation::new(ObjectRef::root(key), 1.0, Vec3::new(0.0, 1.0, 0.0)).unwrap(),
    );
    let index = scene.add_animator(animator);
    scene.start_all();

    for dt in [0.3, 0.3, 0.3, 0.3, 0.3] {
        scene.tick(dt).unwrap();
        let animator = scene.animator(index).unwrap();
        for animation in animator.animations() {
            assert!(animation.elapsed() <= animation.duration());
        }
    }
    assert_relative_eq!(scene.root(key).unwrap().orientation().y, 1.0, epsilon = EPSILON);
}

#[test]
fn test_uneven_ticks_apply_exact_total() {
    let (mut scene, key) = scene_with_cube();
    let total = Vec3::new(0.5, deg_to_rad(360.0), -0.25);
    scene.add_animator(
        Animator::new()
            .with_animation(RotationAnimation::new(ObjectRef::root(key), 10.0, total).unwrap()),
    );
    scene.start_all();

    for dt in [0.016, 3.7, 0.5, 1.234, 0.0, 2.9, 7.0, 4.0] {
        scene.tick(dt).unwrap();
    }
    assert_relative_eq!(scene.root(key).unwrap().orientation(), total, epsilon = EPSILON);
}

#[test]
fn test_result_independent_of_tick_count() {
    let mut finals = Vec::new();
    for steps in [1_usize, 2, 100] {
        let (mut scene, key) = scene_with_cube();
        let target = ObjectRef::root(key);
        scene.add_animator(
            Animator::new()
                .with_animation(
                    RotationAnimation::new(target.clone(), 4.0, Vec3::new(0.0, 1.5, 0.0)).unwrap(),
                )
                .with_animation(
                    TranslationAnimation::new(target, 4.0, Vec3::new(2.0, 0.0, -3.0)).unwrap(),
                ),
        );
        scene.start_all();

        let dt = 4.0 / steps as f32;
        // One call per step for each animation
        for _ in 0..(2 * steps) {
            scene.tick(dt).unwrap();
        }
        assert_eq!(scene.animator(0).unwrap().state(), AnimatorState::Finished);
        let object = scene.root(key).unwrap();
        finals.push((object.orientation(), object.position()));
    }

    for (orientation, position) in &finals {
        assert_relative_eq!(*orientation, finals[0].0, epsilon = EPSILON);
        assert_relative_eq!(*position, finals[0].1, epsilon = EPSILON);
    }
    assert_relative_eq!(finals[0].1, Vec3::new(2.0, 0.0, -3.0), epsilon = EPSILON);
}

#[test]
fn test_chained_rotations() {
    let (mut scene, key) = scene_with_cube();
    let target = ObjectRef::root(key);
    let index = scene.add_animator(turn_then_turn_back(&target));
    scene.start_all();

    scene.tick(0.5).unwrap();
    scene.tick(1.5).unwrap();
    assert_relative_eq!(yaw_degrees(&scene, key), 90.0, epsilon = EPSILON);

    // B is queued up but has not consumed any time
    let animator = scene.animator(index).unwrap();
    assert_eq!(animator.current_index(), 1);
    assert_eq!(animator.current().unwrap().elapsed(), 0.0);

    scene.tick(1.0).unwrap();
    scene.tick(2.0).unwrap();
    assert_relative_eq!(yaw_degrees(&scene, key), 45.0, epsilon = EPSILON);
    assert_eq!(scene.animator(index).unwrap().state(), AnimatorState::Finished);
}

#[test]
fn test_chained_rotations_with_frame_deltas() {
    let (mut scene, key) = scene_with_cube();
    let target = ObjectRef::root(key);
    let index = scene.add_animator(turn_then_turn_back(&target));
    scene.start_all();

    for _ in 0..20 {
        scene.tick(0.1).unwrap();
    }
    assert_relative_eq!(yaw_degrees(&scene, key), 90.0, epsilon = EPSILON);
    assert_eq!(scene.animator(index).unwrap().current_index(), 1);

    for _ in 0..30 {
        scene.tick(0.1).unwrap();
    }
    assert_relative_eq!(yaw_degrees(&scene, key), 45.0, epsilon = EPSILON);
    assert_eq!(scene.animator(index).unwrap().state(), AnimatorState::Finished);
}

#[test]
fn test_sixtieth_second_frames_finish_translation() {
    let (mut scene, key) = scene_with_cube();
    let index = scene.add_animator(Animator::new().with_animation(
        TranslationAnimation::new(ObjectRef::root(key), 1.0, Vec3::new(0.0, -1.15, 0.0)).unwrap(),
    ));
    scene.start_all();

    for _ in 0..60 {
        scene.tick(1.0 / 60.0).unwrap();
    }
    assert_eq!(scene.animator(index).unwrap().state(), AnimatorState::Finished);
    let position = scene.root(key).unwrap().position();
    assert_relative_eq!(position, Vec3::new(0.0, -1.15, 0.0), epsilon = EPSILON);
}

#[test]
fn test_overshooting_tick_does_not_roll_into_next_animation() {
    let (mut scene, key) = scene_with_cube();
    let target = ObjectRef::root(key);
    let index = scene.add_animator(turn_then_turn_back(&target));
    scene.start_all();

    // 2.5s exhausts A with 0.5s to spare; the spare time is dropped
    scene.tick(2.5).unwrap();
    assert_relative_eq!(yaw_degrees(&scene, key), 90.0, epsilon = EPSILON);
    let animator = scene.animator(index).unwrap();
    assert!(animator.is_running());
    assert_eq!(animator.current().unwrap().elapsed(), 0.0);

    // B starts consuming time on the next call
    scene.tick(1.0).unwrap();
    assert_relative_eq!(yaw_degrees(&scene, key), 75.0, epsilon = EPSILON);
}

#[test]
fn test_independent_animators_on_parent_and_child() {
    let mut scene = Scene::default();
    let mut boat = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    boat.add_child(SceneObject::new(vec![Surface::new(Mesh::cube())]));
    let tiger_index = boat.add_child(SceneObject::new(vec![Surface::new(Mesh::cube())]));
    let key = scene.add_object(boat);

    let boat_ref = ObjectRef::root(key);
    let tiger_ref = boat_ref.child(tiger_index);
    scene.add_animator(
        Animator::new().with_animation(
            RotationAnimation::new(boat_ref.clone(), 10.0, Vec3::new(0.0, 2.0, 0.0)).unwrap(),
        ),
    );
    scene.add_animator(
        Animator::new().with_animation(
            RotationAnimation::new(tiger_ref.clone(), 10.0, Vec3::new(0.0, 0.0, 4.0)).unwrap(),
        ),
    );
    scene.start_all();
    scene.tick(5.0).unwrap();

    let boat_orientation = scene.object(&boat_ref).unwrap().orientation();
    let tiger_orientation = scene.object(&tiger_ref).unwrap().orientation();
    assert_relative_eq!(boat_orientation, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    assert_relative_eq!(tiger_orientation, Vec3::new(0.0, 0.0, 2.0), epsilon = EPSILON);
    assert_eq!(scene.object(&boat_ref.child(0)).unwrap().orientation(), Vec3::zeros());
}

#[test]
fn test_moving_parent_moves_descendants_in_world_space() {
    let mut scene = Scene::default();
    let mut parent = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    let mut child = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    child.move_by(Vec3::new(1.0, 0.0, 0.0));
    let mut grandchild = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    grandchild.move_by(Vec3::new(0.0, 2.0, 0.0));
    child.add_child(grandchild);
    parent.add_child(child);
    let key = scene.add_object(parent);

    let offset = Vec3::new(-9.0, -0.55, -28.0);
    scene.root_mut(key).unwrap().move_by(offset);

    let mut backend = HeadlessBackend::new();
    backend.begin_screen_pass(320, 240).unwrap();
    scene.render(&mut backend).unwrap();
    backend.end_pass().unwrap();

    let draws = backend.draws();
    assert_eq!(draws.len(), 3);
    assert_relative_eq!(draws[0].world_position(), offset, epsilon = EPSILON);
    let child = offset + Vec3::new(1.0, 0.0, 0.0);
    let grandchild = offset + Vec3::new(1.0, 2.0, 0.0);
    assert_relative_eq!(draws[1].world_position(), child, epsilon = EPSILON);
    assert_relative_eq!(draws[2].world_position(), grandchild, epsilon = EPSILON);

    // Stored local positions are untouched
    let root = scene.root(key).unwrap();
    assert_eq!(root.child(0).position(), Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(root.child(0).child(0).position(), Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn test_child_mutation_visible_on_next_render() {
    let mut scene = Scene::default();
    let mut parent = SceneObject::empty();
    parent.add_child(SceneObject::new(vec![Surface::new(Mesh::square())]));
    let key = scene.add_object(parent);

    scene.root_mut(key).unwrap().child_mut(0).move_by(Vec3::new(0.25, 0.1, 3.85));

    let mut backend = HeadlessBackend::new();
    backend.begin_screen_pass(320, 240).unwrap();
    scene.render(&mut backend).unwrap();
    backend.end_pass().unwrap();
    backend.present().unwrap();

    let draws = &backend.last_frame()[0].draws;
    assert_eq!(draws.len(), 1);
    assert_relative_eq!(draws[0].world_position(), Vec3::new(0.25, 0.1, 3.85), epsilon = EPSILON);
}

#[test]
fn test_parent_rotation_carries_child_offset() {
    let mut scene = Scene::default();
    let mut parent = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    let mut child = SceneObject::new(vec![Surface::new(Mesh::cube())]);
    child.move_by(Vec3::new(1.0, 0.0, 0.0));
    parent.add_child(child);
    parent.rotate(Vec3::new(0.0, deg_to_rad(90.0), 0.0));
    parent.grow(Vec3::new(2.0, 2.0, 2.0));
    scene.add_object(parent);

    let mut backend = HeadlessBackend::new();
    backend.begin_screen_pass(320, 240).unwrap();
    scene.render(&mut backend).unwrap();

    // Child sits one local unit along +X: scaled by 2 and yawed onto -Z
    let child = backend.draws()[1].world_position();
    assert_relative_eq!(child, Vec3::new(0.0, 0.0, -2.0), epsilon = EPSILON);
}
