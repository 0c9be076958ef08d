//! Core engine implementation
//!
//! The [`Engine`] owns the scene, the views it is drawn from and the frame loop.
//! A frame runs in a fixed order:
//!
//! 1. poll platform events and fold them into the input state
//! 2. sample the clock for the frame's delta time
//! 3. let the application update (cameras, gameplay)
//! 4. tick every animator
//! 5. render each view in insertion order, then present
//!
//! Animators tick before any pass, so every view of a frame sees the same scene
//! state.

use std::time::Duration;

use thiserror::Error;

use crate::animation::AnimationError;
use crate::application::{AppError, AppEvent, Application};
use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::core::config::EngineConfig;
use crate::foundation::time::{Clock, FrameTimer, ManualClock};
use crate::input::InputManager;
use crate::platform::{HeadlessPlatform, Platform};
use crate::render::{
    Camera, ClearFlags, HeadlessBackend, Lighting, RenderBackend, RenderError, RenderTarget,
    ShaderProgram, TextureHandle,
};
use crate::scene::Scene;

/// One camera drawing the scene into one target
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView {
    /// Name used in log output
    pub name: String,
    /// Camera the view is rendered from
    pub camera: Camera,
    /// Where the view is rendered to
    pub target: RenderTarget,
    /// Lighting applied before the view's pass
    pub lighting: Lighting,
}

impl RenderView {
    /// Create a view
    pub fn new(
        name: impl Into<String>,
        camera: Camera,
        target: RenderTarget,
        lighting: Lighting,
    ) -> Self {
        Self {
            name: name.into(),
            camera,
            target,
            lighting,
        }
    }
}

/// Main engine
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    views: Vec<RenderView>,
    input: InputManager,
    platform: Box<dyn Platform>,
    backend: Box<dyn RenderBackend>,
    clock: Box<dyn Clock>,
    timer: FrameTimer,
    frames: u64,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(
        config: EngineConfig,
        platform: Box<dyn Platform>,
        backend: Box<dyn RenderBackend>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine ({}x{}, shaders {} / {})",
            config.window.width,
            config.window.height,
            config.shaders.vertex_shader_path,
            config.shaders.fragment_shader_path
        );

        let timer = FrameTimer::new().with_max_delta(config.frame.max_delta_seconds);
        let scene = Scene::new(ShaderProgram::new(config.shaders.clone()));

        Ok(Self {
            config,
            scene,
            views: Vec::new(),
            input: InputManager::new(),
            platform,
            backend,
            clock,
            timer,
            frames: 0,
            running: false,
        })
    }

    /// Engine without a display: a [`HeadlessPlatform`] of the configured window
    /// size, a [`HeadlessBackend`] and a clock advancing by `frame_time` per frame
    pub fn headless(
        config: EngineConfig,
        platform: HeadlessPlatform,
        frame_time: Duration,
    ) -> Result<Self, EngineError> {
        Self::new(
            config,
            Box::new(platform),
            Box::new(HeadlessBackend::new()),
            Box::new(ManualClock::with_step(frame_time)),
        )
    }

    /// Run `app` until the platform closes, the application quits or the
    /// configured frame limit is reached
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        app.initialize(self).map_err(EngineError::from_app)?;
        log::info!("Starting frame loop with {} views", self.views.len());

        self.running = true;
        let result = self.run_frames(app);
        self.running = false;
        if let Err(e) = &result {
            log::error!("Frame loop stopped: {}", e);
        }

        app.cleanup(self);
        log::info!(
            "Shutdown after {} frames, {:.2}s simulated ({:.1} fps average)",
            self.frames,
            self.timer.total_time(),
            self.timer.average_fps()
        );
        result
    }

    fn run_frames<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        while self.running {
            if let Some(max_frames) = self.config.frame.max_frames {
                if self.frames >= max_frames {
                    log::debug!("Reached frame limit of {}", max_frames);
                    break;
                }
            }

            self.frame(app)?;

            if self.platform.should_close() {
                self.running = false;
            }
        }
        Ok(())
    }

    /// Run a single frame
    pub fn frame<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        self.input.begin_frame();
        for event in self.platform.poll_events() {
            self.handle_event(&event);
            app.handle_event(self, &event).map_err(EngineError::from_app)?;
        }

        let dt = self.timer.update(self.clock.as_ref());
        app.update(self, dt).map_err(EngineError::from_app)?;
        self.scene.tick(dt)?;

        self.render_views()?;
        self.backend.present()?;
        self.frames += 1;
        log::trace!("Frame {} done (dt = {:.4}s)", self.frames, dt);
        Ok(())
    }

    fn handle_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                log::info!("Window close requested");
                self.running = false;
            }
            AppEvent::WindowResized { width, height } => {
                log::debug!("Window resized to {}x{}", width, height);
            }
            _ => {}
        }
        self.input.handle_event(event);
    }

    fn render_views(&mut self) -> Result<(), EngineError> {
        let (width, height) = self.platform.framebuffer_size();

        for view in &mut self.views {
            view.target = view.target.resized(width, height);
            self.backend.begin_pass(&view.target, ClearFlags::COLOR | ClearFlags::DEPTH)?;

            let program = self.scene.program_mut();
            view.camera.apply(program, view.target.aspect_ratio());
            view.lighting.apply(program);

            self.scene.render(self.backend.as_mut())?;
            self.backend.end_pass()?;
        }
        Ok(())
    }

    /// Add a view rendered into the screen and return its index
    pub fn add_screen_view(
        &mut self,
        name: impl Into<String>,
        camera: Camera,
        lighting: Lighting,
    ) -> usize {
        let (width, height) = self.platform.framebuffer_size();
        let target = RenderTarget::Screen { width, height };
        self.add_view(RenderView::new(name, camera, target, lighting))
    }

    /// Create an off-screen target of the configured size, add a view rendered
    /// into it and return the view index with the target's color texture
    pub fn add_offscreen_view(
        &mut self,
        name: impl Into<String>,
        camera: Camera,
        lighting: Lighting,
    ) -> Result<(usize, TextureHandle), EngineError> {
        let (width, height) = (self.config.offscreen.width, self.config.offscreen.height);
        let handle = self.backend.create_render_target(width, height)?;
        let target = RenderTarget::Offscreen { handle, width, height };
        Ok((self.add_view(RenderView::new(name, camera, target, lighting)), handle))
    }

    /// Add a view and return its index
    pub fn add_view(&mut self, view: RenderView) -> usize {
        log::debug!("Added view '{}' into {:?}", view.name, view.target);
        self.views.push(view);
        self.views.len() - 1
    }

    /// View by index
    pub fn view(&self, index: usize) -> Option<&RenderView> {
        self.views.get(index)
    }

    /// Mutable view by index
    pub fn view_mut(&mut self, index: usize) -> Option<&mut RenderView> {
        self.views.get_mut(index)
    }

    /// All views in render order
    pub fn views(&self) -> &[RenderView] {
        &self.views
    }

    /// Get the scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get mutable scene
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Get the input state
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Camera of `view` together with the input state, for controllers
    pub fn camera_and_input(&mut self, view: usize) -> Option<(&mut Camera, &InputManager)> {
        let view = self.views.get_mut(view)?;
        Some((&mut view.camera, &self.input))
    }

    /// Get the rendering backend
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// Get engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seconds of simulated time since the first frame
    pub fn elapsed_time(&self) -> f32 {
        self.timer.total_time()
    }

    /// Number of frames completed
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Check if the engine is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request engine shutdown after the current frame
    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.running = false;
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Render error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// An animator could not reach its target
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    /// Asset loading failed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

impl EngineError {
    fn from_app(error: AppError) -> Self {
        match error {
            AppError::Engine(e) => e,
            other => Self::ApplicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Animator, TranslationAnimation};
    use crate::foundation::math::Vec3;
    use crate::input::KeyCode;
    use crate::render::{Mesh, PassRecord};
    use crate::scene::{ObjectRef, SceneError, SceneObject, Surface};
    use approx::assert_relative_eq;

    const FRAME: Duration = Duration::from_millis(100);

    /// Adds one object, one security view and one screen view; counts hooks
    #[derive(Default)]
    struct TestApp {
        updates: Vec<f32>,
        e_presses: usize,
        cleaned_up: bool,
        quit_after: Option<usize>,
    }

    impl Application for TestApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let key = engine
                .scene_mut()
                .add_object(SceneObject::new(vec![Surface::new(Mesh::cube())]));
            let mut animator = Animator::new();
            animator.add_animation(
                TranslationAnimation::new(ObjectRef::root(key), 1.0, Vec3::new(1.0, 0.0, 0.0))
                    .map_err(EngineError::from)?,
            );
            engine.scene_mut().add_animator(animator);
            engine.scene_mut().start_all();

            let projection = engine.config().projection.clone();
            let camera =
                Camera::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.0, -1.0), &projection);
            let lighting = Lighting::directional(Vec3::new(0.0, 1.0, -1.0));
            engine.add_offscreen_view("security", camera.clone(), lighting)?;
            engine.add_screen_view("player", camera, Lighting::default());
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
            self.updates.push(delta_time);
            if engine.input().was_key_pressed(KeyCode::E) {
                self.e_presses += 1;
            }
            if Some(self.updates.len()) == self.quit_after {
                engine.quit();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    fn engine(frames: u64, platform: HeadlessPlatform) -> Engine {
        crate::foundation::logging::init_for_tests();
        Engine::headless(EngineConfig::default().with_max_frames(frames), platform, FRAME).unwrap()
    }

    fn headless(engine: &Engine) -> &HeadlessBackend {
        engine.backend().as_any().downcast_ref::<HeadlessBackend>().unwrap()
    }

    #[test]
    fn test_runs_configured_frame_count() {
        let mut engine = engine(5, HeadlessPlatform::new(800, 600));
        let mut app = TestApp::default();
        engine.run(&mut app).unwrap();

        assert_eq!(engine.frame_count(), 5);
        assert_eq!(headless(&engine).frames_presented(), 5);
        assert_eq!(app.updates.len(), 5);
        assert!(app.cleaned_up);
        assert!(!engine.is_running());
        // First frame has no previous sample
        assert_eq!(app.updates[0], 0.0);
        assert_relative_eq!(engine.elapsed_time(), 0.4, epsilon = 1e-5);
    }

    #[test]
    fn test_views_render_in_order() {
        let mut engine = engine(3, HeadlessPlatform::new(800, 600));
        engine.run(&mut TestApp::default()).unwrap();

        let frame: &[PassRecord] = headless(&engine).last_frame();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[0].target, RenderTarget::Offscreen { width: 256, height: 256, .. }));
        assert!(matches!(frame[1].target, RenderTarget::Screen { width: 800, height: 600 }));
        assert!(frame.iter().all(|pass| pass.clear == ClearFlags::all()));
        assert!(frame.iter().all(|pass| pass.draws.len() == 1));
    }

    #[test]
    fn test_both_views_see_the_same_tick() {
        let mut engine = engine(3, HeadlessPlatform::new(800, 600));
        engine.run(&mut TestApp::default()).unwrap();

        // 0.2s of a 1 unit per second translation
        let frame = headless(&engine).last_frame();
        assert_relative_eq!(frame[0].draws[0].world_position().x, 0.2, epsilon = 1e-5);
        assert_relative_eq!(frame[1].draws[0].world_position().x, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_screen_view_follows_resize() {
        let platform = HeadlessPlatform::new(800, 600)
            .with_event(1, AppEvent::WindowResized { width: 640, height: 480 });
        let mut engine = engine(2, platform);
        engine.run(&mut TestApp::default()).unwrap();

        assert!(matches!(
            headless(&engine).last_frame()[1].target,
            RenderTarget::Screen { width: 640, height: 480 }
        ));
        assert_eq!(engine.view(1).unwrap().target.size(), (640, 480));
    }

    #[test]
    fn test_key_press_seen_once() {
        let platform =
            HeadlessPlatform::new(800, 600).with_event(2, AppEvent::KeyPressed(KeyCode::E));
        let mut engine = engine(5, platform);
        let mut app = TestApp::default();
        engine.run(&mut app).unwrap();

        assert_eq!(app.e_presses, 1);
        assert!(engine.input().is_key_held(KeyCode::E));
    }

    #[test]
    fn test_close_request_stops_loop() {
        let platform =
            HeadlessPlatform::new(800, 600).with_event(1, AppEvent::WindowCloseRequested);
        let mut engine = engine(100, platform);
        engine.run(&mut TestApp::default()).unwrap();
        assert_eq!(engine.frame_count(), 2);
    }

    #[test]
    fn test_quit_from_update() {
        let mut engine = engine(100, HeadlessPlatform::new(800, 600));
        let mut app = TestApp {
            quit_after: Some(3),
            ..TestApp::default()
        };
        engine.run(&mut app).unwrap();
        assert_eq!(engine.frame_count(), 3);
    }

    #[test]
    fn test_destroyed_target_is_fatal() {
        struct Vanishing;

        impl Application for Vanishing {
            fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
                let key = engine.scene_mut().add_object(SceneObject::empty());
                let mut animator = Animator::new();
                animator.add_animation(
                    TranslationAnimation::new(ObjectRef::root(key), 1.0, Vec3::x())
                        .map_err(EngineError::from)?,
                );
                engine.scene_mut().add_animator(animator);
                engine.scene_mut().start_all();
                engine.scene_mut().remove_object(key);
                Ok(())
            }

            fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
                Ok(())
            }

            fn cleanup(&mut self, _engine: &mut Engine) {}
        }

        let mut engine = engine(10, HeadlessPlatform::new(800, 600));
        let result = engine.run(&mut Vanishing);
        assert!(matches!(
            result,
            Err(EngineError::Animation(AnimationError::Target(SceneError::ObjectDestroyed(_))))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_offscreen_size(0, 0);
        let result = Engine::headless(config, HeadlessPlatform::new(800, 600), FRAME);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }
}
