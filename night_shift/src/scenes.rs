//! Demonstration scenes
//!
//! Each builder fills an empty [`Scene`] with objects and animators. Models that
//! fail to load are replaced by a cube so a scene always has something to show.

use std::path::{Path, PathBuf};

use scene_engine::animation::{AnimationError, Animator, RotationAnimation, TranslationAnimation};
use scene_engine::assets::{self, ModelLoader, ObjModelLoader};
use scene_engine::foundation::math::{constants, Vec3, Vec4};
use scene_engine::render::{Lighting, Mesh, Texture, TextureHandle};
use scene_engine::scene::{ObjectKey, ObjectRef, Scene, SceneObject, Surface};

use crate::config::SceneChoice;

/// Material coefficients that light a surface fully
pub const BRIGHT: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// Loads models below a root directory, substituting a cube for failures
pub struct ModelLibrary<L: ModelLoader = ObjModelLoader> {
    loader: L,
    root: PathBuf,
    fallbacks: usize,
}

impl ModelLibrary<ObjModelLoader> {
    /// OBJ library rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_loader(ObjModelLoader::new(), root)
    }
}

impl<L: ModelLoader> ModelLibrary<L> {
    /// Library using a specific loader
    pub fn with_loader(loader: L, root: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            root: root.into(),
            fallbacks: 0,
        }
    }

    /// Load `relative` below the root with V flipped, or a cube if that fails
    pub fn load(&mut self, relative: &str) -> SceneObject {
        let path = self.root.join(relative);
        match self.loader.load(&path, true) {
            Ok(object) => object,
            Err(e) => {
                log::warn!("Using a cube for {}: {}", path.display(), e);
                self.fallbacks += 1;
                let name = Path::new(relative)
                    .parent()
                    .and_then(Path::file_name)
                    .map_or_else(|| relative.to_string(), |dir| dir.to_string_lossy().into_owned());
                SceneObject::new(vec![Surface::new(Mesh::cube())]).with_name(name)
            }
        }
    }

    /// Texture below the root, if it can be decoded
    pub fn texture(&mut self, relative: &str) -> Option<Texture> {
        let path = self.root.join(relative);
        match assets::load_texture(&path, Texture::BASE_SAMPLER) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Leaving surface untextured: {}", e);
                None
            }
        }
    }

    /// Number of models replaced by a cube so far
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}

/// Objects and animators of the security office the game logic drives
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeLayout {
    /// The runner in the pirate cove
    pub foxy: ObjectKey,
    /// Right office door
    pub right_door: ObjectKey,
    /// Left office door
    pub left_door: ObjectKey,
    /// Square showing the security camera feed
    pub monitor: ObjectKey,
    /// Animator lowering the right door
    pub right_door_down: usize,
    /// Animator lowering the left door
    pub left_door_down: usize,
    /// Animator raising the right door
    pub right_door_up: usize,
    /// Animator raising the left door
    pub left_door_up: usize,
}

/// Result of building a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSetup {
    /// Lighting for the player's view
    pub lighting: Lighting,
    /// Present only for the security office
    pub office: Option<OfficeLayout>,
}

impl SceneSetup {
    fn lit_by(lighting: Lighting) -> Self {
        Self { lighting, office: None }
    }
}

/// Build `choice` into `scene`.
///
/// `monitor_feed` is the off-screen target shown on the office monitor; the
/// other scenes ignore it. Animators of the demonstration scenes are started,
/// the office's door animators wait for key presses.
pub fn build<L: ModelLoader>(
    choice: SceneChoice,
    scene: &mut Scene,
    models: &mut ModelLibrary<L>,
    monitor_feed: Option<TextureHandle>,
) -> Result<SceneSetup, AnimationError> {
    log::info!("Building scene {:?}", choice);
    let setup = match choice {
        SceneChoice::Bunny => bunny(scene, models)?,
        SceneChoice::MarbleSquare => marble_square(scene, models),
        SceneChoice::Cube => cube(scene, models)?,
        SceneChoice::LifeOfPi => life_of_pi(scene, models)?,
        SceneChoice::Freddy => freddy(scene, models),
        SceneChoice::SecurityOffice => return security_office(scene, models, monitor_feed),
    };
    scene.start_all();
    Ok(setup)
}

fn bunny<L: ModelLoader>(
    scene: &mut Scene,
    models: &mut ModelLibrary<L>,
) -> Result<SceneSetup, AnimationError> {
    let mut bunny = models.load("bunny_textured.obj");
    bunny.grow(Vec3::repeat(9.0));
    bunny.move_by(Vec3::new(0.2, -1.0, 0.0));
    let key = scene.add_object(bunny);

    scene.add_animator(Animator::new().with_animation(RotationAnimation::new(
        ObjectRef::root(key),
        10.0,
        Vec3::new(0.0, 1.0, 0.0),
    )?));
    Ok(SceneSetup::lit_by(Lighting::default()))
}

fn marble_square<L: ModelLoader>(scene: &mut Scene, models: &mut ModelLibrary<L>) -> SceneSetup {
    let mut surface = Surface::new(Mesh::square());
    let marble = "White_marble_03/Textures_2K/white_marble_03_2k_baseColor.tga";
    if let Some(texture) = models.texture(marble) {
        surface = surface.with_texture(texture);
    }

    let mut floor = SceneObject::new(vec![surface]).with_name("floor");
    floor.grow(Vec3::repeat(5.0));
    floor.move_by(Vec3::new(0.0, -1.5, 0.0));
    floor.rotate(Vec3::new(-constants::HALF_PI, 0.0, 0.0));
    scene.add_object(floor);
    SceneSetup::lit_by(Lighting::default())
}

fn cube<L: ModelLoader>(
    scene: &mut Scene,
    models: &mut ModelLibrary<L>,
) -> Result<SceneSetup, AnimationError> {
    let key = scene.add_object(models.load("cube.obj"));
    let target = ObjectRef::root(key);

    let spin = Animator::new()
        .with_animation(RotationAnimation::new(target.clone(), 10.0, constants::TAU * Vec3::y())?)
        .with_animation(RotationAnimation::new(target, 10.0, constants::TAU * Vec3::x())?);
    scene.add_animator(spin);
    Ok(SceneSetup::lit_by(Lighting::default()))
}

fn life_of_pi<L: ModelLoader>(
    scene: &mut Scene,
    models: &mut ModelLibrary<L>,
) -> Result<SceneSetup, AnimationError> {
    let mut boat = models.load("boat/boat.obj");
    boat.move_by(Vec3::new(0.0, -0.7, 0.0));
    boat.grow(Vec3::repeat(0.01));

    let mut tiger = models.load("tiger/scene.obj");
    tiger.move_by(Vec3::new(0.0, -5.0, 10.0));
    set_material_tree(&mut tiger, BRIGHT);
    let tiger_index = boat.add_child(tiger);

    let boat = ObjectRef::root(scene.add_object(boat));
    let tiger = boat.child(tiger_index);

    scene.add_animator(Animator::new().with_animation(RotationAnimation::new(
        boat,
        10.0,
        Vec3::new(0.0, constants::TAU, 0.0),
    )?));
    scene.add_animator(Animator::new().with_animation(RotationAnimation::new(
        tiger,
        10.0,
        Vec3::new(0.0, 0.0, constants::TAU),
    )?));
    Ok(SceneSetup::lit_by(Lighting::directional(Vec3::new(0.0, -1.0, 0.0))))
}

fn freddy<L: ModelLoader>(scene: &mut Scene, models: &mut ModelLibrary<L>) -> SceneSetup {
    let mut freddy = models.load("freddy_fazbear/scene.obj");
    freddy.move_by(Vec3::new(0.0, 0.0, -20.0));
    scene.add_object(freddy);

    let mut bright = models.load("freddy_fazbear/scene.obj");
    set_material_tree(&mut bright, BRIGHT);
    bright.move_by(Vec3::new(0.0, 5.0, -30.0));
    scene.add_object(bright);

    scene.add_animator(Animator::new());
    SceneSetup::lit_by(Lighting::default())
}

/// One-shot vertical slide of `door` by `rise` over `seconds`
fn door_animator(door: ObjectKey, seconds: f32, rise: f32) -> Result<Animator, AnimationError> {
    let slide =
        TranslationAnimation::new(ObjectRef::root(door), seconds, Vec3::new(0.0, rise, 0.0))?;
    Ok(Animator::new().with_animation(slide))
}

/// Place a loaded model: move, then grow, then rotate
fn place<L: ModelLoader>(
    models: &mut ModelLibrary<L>,
    path: &str,
    position: Vec3,
    scale: f32,
    rotation: Vec3,
) -> SceneObject {
    let mut object = models.load(path);
    object.move_by(position);
    object.grow(Vec3::repeat(scale));
    object.rotate(rotation);
    object
}

fn security_office<L: ModelLoader>(
    scene: &mut Scene,
    models: &mut ModelLibrary<L>,
    monitor_feed: Option<TextureHandle>,
) -> Result<SceneSetup, AnimationError> {
    let none = Vec3::zeros();
    let stage = [
        ("fnaf_movie/freddy/scene.obj", Vec3::new(0.0, -0.5, -29.0), 0.55),
        ("fnaf_movie/bonnie/scene.obj", Vec3::new(-0.5, -0.5, -29.5), 0.05),
        ("fnaf_movie/chica/scene.obj", Vec3::new(0.5, -0.5, -29.5), 0.05),
    ];
    for (path, position, size) in stage {
        scene.add_object(place(models, path, position, size, none));
    }

    let foxy = place(
        models,
        "fnaf_movie/foxy/scene.obj",
        FOXY_START,
        0.05,
        FOXY_START_ORIENTATION,
    );
    let foxy = scene.add_object(foxy);

    let stage = place(
        models,
        "fnaf_movie/stage/scene.obj",
        Vec3::new(0.0, 0.55, -30.0),
        0.336,
        Vec3::new(0.0, constants::PI, 0.0),
    );
    scene.add_object(stage);
    let office = place(models, "fnaf_movie/office/scene.obj", Vec3::new(0.0, -0.5, 4.5), 1.0, none);
    scene.add_object(office);

    let right_door = place(models, "fnaf_movie/office_door/scene.obj", RIGHT_DOOR_OPEN, 0.2, none);
    let right_door = scene.add_object(right_door);
    let left_door = place(models, "fnaf_movie/office_door/scene.obj", LEFT_DOOR_OPEN, 0.2, none);
    let left_door = scene.add_object(left_door);

    let cove = place(
        models,
        "fnaf_movie/pirate_cove/scene.obj",
        Vec3::new(-9.0, -0.8, -28.0),
        0.84,
        Vec3::new(0.0, 5.0 * constants::QUARTER_PI, 0.0),
    );
    scene.add_object(cove);

    let mut screen = Surface::new(Mesh::square());
    if let Some(handle) = monitor_feed {
        screen = screen.with_texture(Texture::from_render_target(handle, Texture::BASE_SAMPLER));
    }
    let mut monitor = SceneObject::new(vec![screen]).with_name("monitor");
    monitor.move_by(Vec3::new(0.25, 0.1, 3.85));
    monitor.grow(Vec3::new(-0.5, 0.5, 0.5));
    monitor.rotate(Vec3::new(0.0, 0.0, constants::PI));
    let monitor = scene.add_object(monitor);

    let right_door_down = scene.add_animator(door_animator(right_door, 1.0, -DOOR_TRAVEL)?);
    let left_door_down = scene.add_animator(door_animator(left_door, 1.0, -DOOR_TRAVEL)?);
    let right_door_up = scene.add_animator(door_animator(right_door, 2.0, DOOR_TRAVEL)?);
    let left_door_up = scene.add_animator(door_animator(left_door, 2.0, DOOR_TRAVEL)?);

    log::info!("Security office ready with {} objects", scene.object_count());
    Ok(SceneSetup {
        lighting: Lighting::default(),
        office: Some(OfficeLayout {
            foxy,
            right_door,
            left_door,
            monitor,
            right_door_down,
            left_door_down,
            right_door_up,
            left_door_up,
        }),
    })
}

/// Runner's pose in the pirate cove
pub const FOXY_START: Vec3 = Vec3::new(-9.0, -0.55, -28.0);
/// Runner's orientation in the pirate cove
pub const FOXY_START_ORIENTATION: Vec3 = Vec3::new(0.0, constants::QUARTER_PI, 0.0);

/// Right door raised
pub const RIGHT_DOOR_OPEN: Vec3 = Vec3::new(0.85, 0.65, 4.25);
/// Right door lowered
pub const RIGHT_DOOR_CLOSED: Vec3 = Vec3::new(0.85, -0.5, 4.25);
/// Left door raised
pub const LEFT_DOOR_OPEN: Vec3 = Vec3::new(-0.525, 0.65, 4.25);
/// Left door lowered
pub const LEFT_DOOR_CLOSED: Vec3 = Vec3::new(-0.525, -0.5, 4.25);

const DOOR_TRAVEL: f32 = 1.15;

fn set_material_tree(object: &mut SceneObject, reflectance: Vec4) {
    object.set_material(reflectance);
    for index in 0..object.child_count() {
        set_material_tree(object.child_mut(index), reflectance);
    }
}
