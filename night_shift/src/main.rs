//! Night Shift demo application
//!
//! Builds the security office (or another demonstration scene), then runs the
//! frame loop headless for the configured number of frames, replaying scripted
//! key presses, and logs what each view drew.

mod config;
mod game;
mod scenes;


use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use scene_engine::config::Config;
use scene_engine::foundation::logging;
use scene_engine::platform::HeadlessPlatform;
use scene_engine::render::HeadlessBackend;
use scene_engine::Engine;

use crate::config::NightShiftConfig;
use crate::game::NightShift;

const DEFAULT_CONFIG: &str = "night_shift.toml";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("night_shift: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = NightShiftConfig::load_or_default(&path)?;
    logging::init(&config.engine.log_level);
    config.validate()?;
    log::info!("Using configuration {} ({:?} scene)", path.display(), config.scene);

    let platform = HeadlessPlatform::new(config.engine.window.width, config.engine.window.height)
        .with_script(config.script.iter().cloned());
    let frame_time = Duration::from_secs_f32(config.frame_seconds);
    let mut engine = Engine::headless(config.engine.clone(), platform, frame_time)?;

    let mut app = NightShift::new(config);
    engine.run(&mut app)?;

    report(&engine);
    Ok(())
}

fn report(engine: &Engine) {
    let Some(backend) = engine.backend().as_any().downcast_ref::<HeadlessBackend>() else {
        return;
    };

    log::info!(
        "{} frames presented, {} KiB of geometry submitted",
        backend.frames_presented(),
        backend.uploaded_bytes() / 1024
    );
    for (view, pass) in engine.views().iter().zip(backend.last_frame()) {
        let (width, height) = pass.target.size();
        log::info!(
            "View '{}': {} draws into {}x{} from {:?}",
            view.name,
            pass.draws.len(),
            width,
            height,
            view.camera.position
        );
    }
}
