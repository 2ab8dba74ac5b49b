//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used under the OS config directory.
const APP_DIR: &str = "skyflight";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Movement integrator constants.
    pub movement: MovementConfig,
    /// Camera rig and projection settings.
    pub camera: CameraConfig,
    /// Atmospheric sky parameters.
    pub sky: SkyConfig,
    /// Scene manifest: models, floor, and lights.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Window title.
    pub title: String,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of yaw/pitch per pixel of pointer motion while locked.
    pub mouse_sensitivity: f64,
    /// Invert Y axis for camera.
    pub invert_y: bool,
    /// Degrees of field of view per pixel of wheel delta.
    pub zoom_sensitivity: f64,
}

/// Per-axis thrust constants of the movement integrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThrustConfig {
    /// Thrust along the camera's forward axis (W/S).
    pub forward: f64,
    /// Thrust along the camera's right axis (A/D).
    pub strafe: f64,
    /// Thrust along world Y (ascend/descend).
    pub vertical: f64,
}

/// Constants of the velocity-damped movement integrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal damping factor (per second).
    pub damping: f64,
    /// Gravitational acceleration.
    pub gravity: f64,
    /// Mass multiplier applied to gravity.
    pub mass: f64,
    /// Per-axis thrust.
    pub thrust: ThrustConfig,
    /// Upward velocity added by a jump.
    pub jump_impulse: f64,
    /// Height of the ground clamp plane.
    pub floor_height: f64,
}

/// Camera rig and projection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Spawn position of the camera.
    pub start_position: [f64; 3],
    /// Initial vertical field of view in degrees.
    pub fov_deg: f64,
    /// Lower bound of the zoom clamp in degrees.
    pub fov_min_deg: f64,
    /// Upper bound of the zoom clamp in degrees.
    pub fov_max_deg: f64,
    /// Near clip plane distance.
    pub near: f64,
    /// Far clip plane distance.
    pub far: f64,
    /// Maximum pitch in degrees, applied symmetrically.
    pub pitch_limit_deg: f64,
}

/// Atmospheric sky parameters and dome placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Atmospheric turbidity.
    pub turbidity: f64,
    /// Rayleigh scattering coefficient.
    pub rayleigh: f64,
    /// Mie scattering coefficient.
    pub mie_coefficient: f64,
    /// Mie phase anisotropy.
    pub mie_directional_g: f64,
    /// Sun elevation in degrees (90 = zenith).
    pub elevation_deg: f64,
    /// Sun azimuth in degrees.
    pub azimuth_deg: f64,
    /// Tone mapping exposure.
    pub exposure: f64,
    /// Uniform scale of the sky dome mesh.
    pub dome_scale: f64,
    /// Vertical offset of the sky dome.
    pub dome_height: f64,
}

/// A static model placed in the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Path relative to the asset root.
    pub path: String,
    /// World position.
    pub position: [f64; 3],
    /// Uniform scale.
    pub scale: f64,
}

/// The textured ground plane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FloorConfig {
    /// Texture path relative to the asset root.
    pub texture: String,
    /// Edge length of the square plane.
    pub size: f64,
    /// Height of the plane.
    pub height: f64,
    /// Texture repeat count along each axis.
    pub texture_repeat: u32,
}

/// An ambient light.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Packed 0xRRGGBB color.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f64,
}

/// A directional light aimed from `position` at `target`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DirectionalLightConfig {
    /// Packed 0xRRGGBB color.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f64,
    /// Light position.
    pub position: [f64; 3],
    /// Point the light is aimed at.
    pub target: [f64; 3],
}

/// Scene manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory that model and texture paths are relative to.
    pub asset_root: String,
    /// Number of background threads reading asset files.
    pub loader_threads: usize,
    /// Static models.
    pub models: Vec<ModelConfig>,
    /// Ground plane.
    pub floor: FloorConfig,
    /// Ambient light.
    pub ambient_light: LightConfig,
    /// Directional (sun) light.
    pub sun_light: DirectionalLightConfig,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log a frame-rate summary once per second.
    pub show_fps: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Frames longer than this many seconds are reported.
    pub long_frame_warn_s: f64,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            title: "Skyflight".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            invert_y: false,
            zoom_sensitivity: 0.05,
        }
    }
}

impl Default for ThrustConfig {
    fn default() -> Self {
        Self {
            forward: 500_000.0,
            strafe: 50_000.0,
            vertical: 5_000.0,
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            gravity: 9.8,
            mass: 100.0,
            thrust: ThrustConfig::default(),
            jump_impulse: 1000.0,
            floor_height: 1.6,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [-15.0, 1.6, 70.0],
            fov_deg: 75.0,
            fov_min_deg: 20.0,
            fov_max_deg: 150.0,
            near: 1.0,
            far: 9_000_000.0,
            pitch_limit_deg: 89.0,
        }
    }
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            turbidity: 0.3,
            rayleigh: 0.313,
            mie_coefficient: 0.012,
            mie_directional_g: 0.9994,
            elevation_deg: 0.1,
            azimuth_deg: -120.9,
            exposure: 1.0,
            dome_scale: 3_000_000.0,
            dome_height: 5_000.0,
        }
    }
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            texture: "textures/floor_texture.jpg".to_string(),
            size: 9_000_000.0,
            height: -300.0,
            texture_repeat: 100,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: 0x60_3B_06,
            intensity: 2.7,
        }
    }
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            color: 0xCB_80_13,
            intensity: 15.0,
            position: [-9_000.0, 0.0, 0.0],
            target: [0.0, 0.0, 5_000.0],
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: "assets".to_string(),
            loader_threads: 2,
            models: vec![
                ModelConfig {
                    path: "coast_sand_rocks_02_4k.gltf".to_string(),
                    position: [-50_000.0, 350_000.0, -800_500.0],
                    scale: 1_300.0,
                },
                ModelConfig {
                    path: "planet_two.gltf".to_string(),
                    position: [-285_000.0, 205_000.0, 5_000.0],
                    scale: 4_050.0,
                },
                ModelConfig {
                    path: "planet_three.gltf".to_string(),
                    position: [-185_000.0, 155_000.0, 5_000.0],
                    scale: 4_050.0,
                },
            ],
            floor: FloorConfig::default(),
            ambient_light: LightConfig::default(),
            sun_light: DirectionalLightConfig::default(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: false,
            log_level: "info".to_string(),
            long_frame_warn_s: 0.25,
        }
    }
}

/// Platform config directory for the viewer, if the OS exposes one.
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }
}
