//! Command-line argument parsing for the Skyflight viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Skyflight command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skyflight", about = "Free-flight viewer for large static scenes")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory that model and texture paths are resolved against.
    #[arg(long)]
    pub asset_root: Option<String>,

    /// Sun elevation in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub sun_elevation: Option<f64>,

    /// Sun azimuth in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub sun_azimuth: Option<f64>,

    /// Initial vertical field of view in degrees.
    #[arg(long)]
    pub fov: Option<f64>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref root) = args.asset_root {
            self.scene.asset_root = root.clone();
        }
        if let Some(elevation) = args.sun_elevation {
            self.sky.elevation_deg = elevation;
        }
        if let Some(azimuth) = args.sun_azimuth {
            self.sky.azimuth_deg = azimuth;
        }
        if let Some(fov) = args.fov {
            self.camera.fov_deg = fov;
        }
    }
}
