//! Night Shift game logic
//!
//! The player walks around the office while a panning security camera renders
//! the pizzeria into the monitor. Doors are raised and lowered with animators,
//! and once per night the runner leaves the pirate cove and charges the left
//! door.

use scene_engine::foundation::math::{constants, utils, Vec3};
use scene_engine::input::KeyCode;
use scene_engine::render::{Camera, FirstPersonController, Lighting, SweepController};
use scene_engine::scene::{ObjectKey, ObjectRef, Scene, SceneObject};
use scene_engine::{AppError, AppEvent, Application, Engine};

use crate::config::{ChaseConfig, NightShiftConfig};
use crate::scenes::{self, ModelLibrary, OfficeLayout};

/// Security camera positions selected with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Looking at the show stage
    Stage,
    /// Looking into the pirate cove
    Cove,
    /// Looking down the west hall
    Hall,
}

impl CameraPreset {
    /// Preset bound to `key`
    pub fn for_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Num1 => Some(Self::Stage),
            KeyCode::Num2 => Some(Self::Cove),
            KeyCode::Num3 => Some(Self::Hall),
            _ => None,
        }
    }

    /// Camera position and initial forwards direction
    pub fn pose(self) -> (Vec3, Vec3) {
        match self {
            Self::Stage => (Vec3::new(0.0, 1.0, -28.0), Vec3::new(0.0, 0.0, -1.0)),
            Self::Cove => (Vec3::new(-9.0, 0.6, -27.15), Vec3::new(-1.0, 0.0, -1.0)),
            Self::Hall => (Vec3::new(-1.0, 0.7, 3.0), Vec3::new(-1.0, 0.0, -1.0)),
        }
    }
}

/// An office door lowered and raised by a pair of animators
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    object: ObjectKey,
    close_animator: usize,
    open_animator: usize,
    closed_position: Vec3,
    open_position: Vec3,
    closed: bool,
}

impl Door {
    fn new(
        object: ObjectKey,
        close_animator: usize,
        open_animator: usize,
        closed_position: Vec3,
        open_position: Vec3,
    ) -> Self {
        Self {
            object,
            close_animator,
            open_animator,
            closed_position,
            open_position,
            closed: false,
        }
    }

    /// Whether the door was last sent down
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start the animator moving the door to its other state
    pub fn toggle(&mut self, scene: &mut Scene) -> Result<(), AppError> {
        let animator = if self.closed { self.open_animator } else { self.close_animator };
        scene
            .animator_mut(animator)
            .ok_or_else(|| AppError::Custom(format!("Door animator {animator} missing")))?
            .start();
        self.closed = !self.closed;
        log::debug!("Door {:?} {}", self.object, if self.closed { "closing" } else { "opening" });
        Ok(())
    }

    /// Keep the door between its lowered and raised positions
    pub fn clamp(&self, scene: &mut Scene) -> Result<(), AppError> {
        let door = scene.object_mut(&ObjectRef::root(self.object))?;
        let position = utils::clamp_vec3(door.position(), self.closed_position, self.open_position);
        door.set_position(position);
        Ok(())
    }
}

/// Progress of the hallway chase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChasePhase {
    /// Still in the cove
    Waiting,
    /// Running towards the office
    Running,
    /// Reached an open door and tipped over; a closed door still sends it back
    Fallen,
    /// Sent back to the cove by a closed door
    Repelled,
}

/// The runner leaving the cove, turning down the hall and charging the left door
#[derive(Debug, Clone, PartialEq)]
pub struct Chase {
    config: ChaseConfig,
    runner: ObjectKey,
    start_position: Vec3,
    start_orientation: Vec3,
    distance: f32,
    phase: ChasePhase,
}

impl Chase {
    /// Chase for `runner`, which starts at `start_position` facing `start_orientation`
    pub fn new(
        config: ChaseConfig,
        runner: ObjectKey,
        start_position: Vec3,
        start_orientation: Vec3,
    ) -> Self {
        Self {
            config,
            runner,
            start_position,
            start_orientation,
            distance: 0.0,
            phase: ChasePhase::Waiting,
        }
    }

    /// Current phase
    pub fn phase(&self) -> ChasePhase {
        self.phase
    }

    /// Distance run so far
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Advance the chase by `dt` at `elapsed` seconds since start-up
    pub fn update(
        &mut self,
        scene: &mut Scene,
        elapsed: f32,
        dt: f32,
        door_closed: bool,
    ) -> Result<(), AppError> {
        let trigger = self.config.trigger_seconds;
        let window_end = trigger + self.config.trigger_window_seconds;
        if self.phase == ChasePhase::Waiting && elapsed > trigger && elapsed < window_end {
            log::info!("The runner left the cove at {:.2}s", elapsed);
            self.phase = ChasePhase::Running;
        }

        if !matches!(self.phase, ChasePhase::Running | ChasePhase::Fallen) {
            return Ok(());
        }

        let runner = scene.object_mut(&ObjectRef::root(self.runner))?;
        let step = self.config.speed() * dt;
        if self.distance < self.config.turn_distance {
            runner.move_by(Vec3::new(step, 0.0, step));
            self.distance += step;
        } else if self.distance < self.config.door_distance {
            runner.move_by(Vec3::new(0.0, 0.0, step));
            self.distance += step;
        } else if door_closed {
            self.send_back(runner);
        } else if self.phase == ChasePhase::Running {
            runner.rotate(Vec3::new(0.0, 0.0, -constants::PI / 8.0));
            self.phase = ChasePhase::Fallen;
            log::info!("The runner reached an open door");
        }
        Ok(())
    }

    fn send_back(&mut self, runner: &mut SceneObject) {
        runner.set_position(self.start_position);
        runner.set_orientation(self.start_orientation);
        self.distance = 0.0;
        self.phase = ChasePhase::Repelled;
        log::info!("The left door held; the runner is back in the cove");
    }
}

/// State that only exists in the security office
#[derive(Debug)]
struct Office {
    layout: OfficeLayout,
    security_view: usize,
    sweep: SweepController,
    preset: CameraPreset,
    right_door: Door,
    left_door: Door,
    chase: Chase,
}

/// The Night Shift application
pub struct NightShift {
    config: NightShiftConfig,
    models: ModelLibrary,
    player: FirstPersonController,
    player_view: usize,
    office: Option<Office>,
}

impl NightShift {
    /// Create the application; the scene is built in [`Application::initialize`]
    pub fn new(config: NightShiftConfig) -> Self {
        let models = ModelLibrary::new(config.models_dir.clone());
        let player = FirstPersonController::new(
            config.player.yaw,
            config.player.move_speed,
            config.player.rotation_speed,
        );
        Self {
            config,
            models,
            player,
            player_view: 0,
            office: None,
        }
    }

    /// Whether the left door is down, `None` outside the office
    pub fn left_door_closed(&self) -> Option<bool> {
        self.office.as_ref().map(|office| office.left_door.is_closed())
    }

    /// Whether the right door is down, `None` outside the office
    pub fn right_door_closed(&self) -> Option<bool> {
        self.office.as_ref().map(|office| office.right_door.is_closed())
    }

    /// Selected security camera, `None` outside the office
    pub fn camera_preset(&self) -> Option<CameraPreset> {
        self.office.as_ref().map(|office| office.preset)
    }

    /// Phase of the chase, `None` outside the office
    pub fn chase_phase(&self) -> Option<ChasePhase> {
        self.office.as_ref().map(|office| office.chase.phase())
    }

    /// Office objects, `None` outside the office
    pub fn layout(&self) -> Option<&OfficeLayout> {
        self.office.as_ref().map(|office| &office.layout)
    }

    /// Number of models replaced by a cube
    pub fn model_fallbacks(&self) -> usize {
        self.models.fallbacks()
    }

    fn player_camera(&self, engine: &Engine) -> Camera {
        let forwards = utils::direction_from_pitch_yaw(0.0, self.config.player.yaw);
        Camera::new(self.config.player.position, forwards, &engine.config().projection)
    }
}

impl Application for NightShift {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let choice = self.config.scene;

        // The security feed renders first so the monitor samples this frame's image
        let security = if choice == crate::config::SceneChoice::SecurityOffice {
            let (position, forwards) = CameraPreset::Stage.pose();
            let camera = Camera::new(position, forwards, &engine.config().projection);
            // No directional color: the player's pass sets it
            let lighting =
                Lighting::directional(Vec3::new(0.0, 1.0, -1.0)).with_directional_color(None);
            Some(engine.add_offscreen_view("security", camera, lighting)?)
        } else {
            None
        };

        let monitor_feed = security.map(|(_, handle)| handle);
        let setup = scenes::build(choice, engine.scene_mut(), &mut self.models, monitor_feed)
            .map_err(scene_engine::EngineError::from)?;
        let camera = self.player_camera(engine);
        self.player_view = engine.add_screen_view("player", camera, setup.lighting);

        if let (Some(layout), Some((security_view, _))) = (setup.office, security) {
            let camera_config = &self.config.security_camera;
            let sweep = SweepController {
                yaw: camera_config.start_yaw,
                pitch: camera_config.pitch,
                rate: camera_config.pan_rate,
                min_yaw: camera_config.min_yaw,
                max_yaw: camera_config.max_yaw,
            };
            let right_door = Door::new(
                layout.right_door,
                layout.right_door_down,
                layout.right_door_up,
                scenes::RIGHT_DOOR_CLOSED,
                scenes::RIGHT_DOOR_OPEN,
            );
            let left_door = Door::new(
                layout.left_door,
                layout.left_door_down,
                layout.left_door_up,
                scenes::LEFT_DOOR_CLOSED,
                scenes::LEFT_DOOR_OPEN,
            );
            let chase = Chase::new(
                self.config.chase.clone(),
                layout.foxy,
                scenes::FOXY_START,
                scenes::FOXY_START_ORIENTATION,
            );
            self.office = Some(Office {
                layout,
                security_view,
                sweep,
                preset: CameraPreset::Stage,
                right_door,
                left_door,
                chase,
            });
        }

        log::info!(
            "Night shift started: scene {:?}, {} objects, {} models replaced by cubes",
            choice,
            engine.scene().object_count(),
            self.models.fallbacks()
        );
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: &AppEvent) -> Result<(), AppError> {
        if *event == AppEvent::KeyPressed(KeyCode::Escape) {
            engine.quit();
            return Ok(());
        }

        let (Some(office), AppEvent::KeyPressed(key)) = (self.office.as_mut(), event) else {
            return Ok(());
        };

        match *key {
            KeyCode::E => office.right_door.toggle(engine.scene_mut())?,
            KeyCode::Q => office.left_door.toggle(engine.scene_mut())?,
            key => {
                if let Some(preset) = CameraPreset::for_key(key) {
                    office.preset = preset;
                    let (position, forwards) = preset.pose();
                    if let Some(view) = engine.view_mut(office.security_view) {
                        view.camera.set_pose(position, forwards);
                    }
                    log::debug!("Security camera switched to {:?}", preset);
                }
            }
        }
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        if let Some((camera, input)) = engine.camera_and_input(self.player_view) {
            self.player.update(camera, input, delta_time);
        }

        let Some(office) = self.office.as_mut() else {
            return Ok(());
        };

        office.right_door.clamp(engine.scene_mut())?;
        office.left_door.clamp(engine.scene_mut())?;

        let elapsed = engine.elapsed_time();
        let left_closed = office.left_door.is_closed();
        office.chase.update(engine.scene_mut(), elapsed, delta_time, left_closed)?;

        if let Some(view) = engine.view_mut(office.security_view) {
            office.sweep.update(&mut view.camera, delta_time);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        if let Some(office) = &self.office {
            log::info!(
                "Night over after {:.1}s: chase {:?}, left door {}, right door {}",
                engine.elapsed_time(),
                office.chase.phase(),
                if office.left_door.is_closed() { "closed" } else { "open" },
                if office.right_door.is_closed() { "closed" } else { "open" },
            );
        }
    }
}
