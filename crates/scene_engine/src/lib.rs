//! # Scene Engine
//!
//! A small 3D scene engine: a strictly owned scene graph, time-based animations
//! chained by animators, and a frame loop that renders the scene from several
//! cameras into several targets per frame.
//!
//! ## Features
//!
//! - **Scene graph**: objects own their children; world transforms compose down the tree
//! - **Animation**: rotation, translation, scale and material animations that apply
//!   an exact total over a fixed duration regardless of frame timing
//! - **Multi-view rendering**: off-screen views whose output can texture objects
//!   drawn by later views
//! - **Asset loading**: Wavefront OBJ models and PNG/JPEG/TGA textures
//! - **Headless**: a recording backend and a scripted platform for tests and CI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let cube = SceneObject::new(vec![Surface::new(Mesh::cube())]);
//!         engine.scene_mut().add_object(cube);
//!         let projection = engine.config().projection.clone();
//!         let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::z(), &projection);
//!         engine.add_screen_view("main", camera, Lighting::default());
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(60);
//!     let platform = HeadlessPlatform::new(config.window.width, config.window.height);
//!     let mut engine = Engine::headless(config, platform, Duration::from_millis(16))?;
//!     engine.run(&mut MyApp)?;
//!     Ok(())
//! }
//! ```

pub mod core;

pub mod animation;
pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod platform;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError, RenderView};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{
            Animation, AnimationError, Animator, MaterialAnimation, RotationAnimation,
            ScaleAnimation, TranslationAnimation,
        },
        assets::{AssetError, ModelLoader, ObjModelLoader},
        config::Config,
        core::config::EngineConfig,
        foundation::{
            math::{constants, Mat4, Vec3, Vec4},
            time::{Clock, ManualClock, SystemClock},
        },
        input::{InputManager, KeyCode},
        platform::{HeadlessPlatform, Platform, ScriptedEvent},
        render::{
            Camera, FirstPersonController, HeadlessBackend, Lighting, Mesh, RenderBackend,
            SweepController, Texture,
        },
        scene::{ObjectKey, ObjectRef, Scene, SceneError, SceneObject, Surface},
        AppError, AppEvent, Application, Engine, EngineError, RenderView,
    };
}
