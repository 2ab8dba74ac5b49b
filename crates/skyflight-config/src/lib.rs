//! Configuration system for the Skyflight viewer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Every tuning constant of the viewer (movement physics, camera, sky, scene
//! manifest) lives here, so scene variants are data rather than code.
//! Supports CLI overrides via clap and hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, DirectionalLightConfig, FloorConfig, InputConfig,
    LightConfig, ModelConfig, MovementConfig, SceneConfig, SkyConfig, ThrustConfig, WindowConfig,
    default_config_dir,
};
pub use error::ConfigError;
