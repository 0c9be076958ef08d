//! # Core Engine Module
//!
//! Shared engine-wide settings. Subsystems read their slice of [`EngineConfig`]
//! rather than defining their own config files.

pub mod config;

pub use config::{
    Config, ConfigError, EngineConfig, FrameConfig, OffscreenConfig, ProjectionConfig,
    ShaderConfig, WindowConfig,
};
