//! Night Shift configuration
//!
//! Everything the demo reads from `night_shift.toml`: the engine settings, which
//! scene to build, gameplay tunables and the scripted input replayed by headless
//! runs.

use std::path::PathBuf;

use scene_engine::config::{Config, ConfigError};
use scene_engine::core::config::EngineConfig;
use scene_engine::foundation::math::{constants, Vec3};
use scene_engine::platform::ScriptedEvent;
use serde::{Deserialize, Serialize};

/// Which demonstration scene to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneChoice {
    /// A textured bunny turning once around Y
    Bunny,
    /// A marble textured floor
    MarbleSquare,
    /// A cube spinning around Y, then X
    Cube,
    /// A tiger riding a boat, each with its own animator
    LifeOfPi,
    /// Two copies of one model, one with a bright material
    Freddy,
    /// The security office with doors, cameras and the hallway chase
    #[default]
    SecurityOffice,
}

/// Walking player camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start position
    pub position: Vec3,
    /// Start heading in radians
    pub yaw: f32,
    /// Units per second
    pub move_speed: f32,
    /// Radians per second
    pub rotation_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            yaw: -constants::HALF_PI,
            move_speed: 3.0,
            rotation_speed: 2.0,
        }
    }
}

/// Panning security camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityCameraConfig {
    /// Fixed downward pitch in radians
    pub pitch: f32,
    /// Heading at start-up
    pub start_yaw: f32,
    /// Pan speed in radians per second
    pub pan_rate: f32,
    /// Lower heading limit
    pub min_yaw: f32,
    /// Upper heading limit
    pub max_yaw: f32,
}

impl Default for SecurityCameraConfig {
    fn default() -> Self {
        Self {
            pitch: -constants::QUARTER_PI,
            start_yaw: -constants::HALF_PI,
            pan_rate: constants::PI / 8.0,
            min_yaw: -3.0 * constants::QUARTER_PI,
            max_yaw: -constants::QUARTER_PI,
        }
    }
}

/// Hallway chase timing and speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Seconds after start-up when the chase may begin
    pub trigger_seconds: f32,
    /// Length of the window after `trigger_seconds` in which it begins
    pub trigger_window_seconds: f32,
    /// Base speed in units per second
    pub velocity: f32,
    /// Multiplier applied to the base speed
    pub acceleration: f32,
    /// Distance run diagonally out of the cove before turning down the hall
    pub turn_distance: f32,
    /// Distance at which the runner reaches the office door
    pub door_distance: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            trigger_seconds: 30.0,
            trigger_window_seconds: 1.0,
            velocity: 2.0,
            acceleration: 1.4,
            turn_distance: 8.0,
            door_distance: 32.0,
        }
    }
}

impl ChaseConfig {
    /// Distance covered per second
    pub fn speed(&self) -> f32 {
        self.acceleration * self.velocity
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightShiftConfig {
    /// Engine settings
    pub engine: EngineConfig,
    /// Scene to build
    pub scene: SceneChoice,
    /// Directory model and texture paths are relative to
    pub models_dir: PathBuf,
    /// Simulated seconds per frame for headless runs
    pub frame_seconds: f32,
    /// Player camera
    pub player: PlayerConfig,
    /// Security camera
    pub security_camera: SecurityCameraConfig,
    /// Hallway chase
    pub chase: ChaseConfig,
    /// Events replayed by the headless platform
    pub script: Vec<ScriptedEvent>,
}

impl Default for NightShiftConfig {
    fn default() -> Self {
        Self {
            // 40 simulated seconds, long enough for the chase to play out
            engine: EngineConfig::default().with_max_frames(2400),
            scene: SceneChoice::default(),
            models_dir: PathBuf::from("models"),
            frame_seconds: 1.0 / 60.0,
            player: PlayerConfig::default(),
            security_camera: SecurityCameraConfig::default(),
            chase: ChaseConfig::default(),
            script: Vec::new(),
        }
    }
}

impl NightShiftConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;

        if !(self.frame_seconds.is_finite() && self.frame_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_seconds must be positive, got {}",
                self.frame_seconds
            )));
        }

        let camera = &self.security_camera;
        if camera.min_yaw > camera.max_yaw {
            return Err(ConfigError::Invalid(
                "security_camera.min_yaw must not exceed max_yaw".to_string(),
            ));
        }

        let chase = &self.chase;
        if chase.speed() <= 0.0 {
            return Err(ConfigError::Invalid("Chase speed must be positive".to_string()));
        }
        if chase.turn_distance >= chase.door_distance {
            return Err(ConfigError::Invalid(
                "chase.turn_distance must be shorter than door_distance".to_string(),
            ));
        }

        Ok(())
    }
}

impl Config for NightShiftConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_engine::input::KeyCode;
    use scene_engine::AppEvent;

    #[test]
    fn test_defaults_are_valid() {
        let config = NightShiftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene, SceneChoice::SecurityOffice);
        assert_eq!(config.engine.frame.max_frames, Some(2400));
        assert!((config.chase.speed() - 2.8).abs() < 1e-6);
    }

    #[test]
    fn test_partial_toml() {
        let config: NightShiftConfig = toml_from_str(
            r#"
            scene = "life_of_pi"
            frame_seconds = 0.05

            [engine.frame]
            max_frames = 10

            [chase]
            trigger_seconds = 2.0

            [[script]]
            frame = 3
            event = { KeyPressed = "E" }
            "#,
        );

        assert_eq!(config.scene, SceneChoice::LifeOfPi);
        assert_eq!(config.engine.frame.max_frames, Some(10));
        assert_eq!(config.chase.trigger_seconds, 2.0);
        assert_eq!(config.chase.door_distance, 32.0);
        assert_eq!(
            config.script,
            vec![ScriptedEvent {
                frame: 3,
                event: AppEvent::KeyPressed(KeyCode::E),
            }]
        );
    }

    #[test]
    fn test_rejects_inverted_chase() {
        let mut config = NightShiftConfig::default();
        config.chase.turn_distance = 40.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_frame_time() {
        let config = NightShiftConfig {
            frame_seconds: 0.0,
            ..NightShiftConfig::default()
        };
        assert!(config.validate().is_err());
    }

    fn toml_from_str(contents: &str) -> NightShiftConfig {
        let path = std::env::temp_dir()
            .join(format!("night_shift_{}_partial.toml", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        let config = NightShiftConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        config
    }
}
