//! What the scene should contain, resolved from configuration.

use std::path::{Path, PathBuf};

use glam::{DVec3, Vec3};
use skyflight_config::{DirectionalLightConfig, FloorConfig, LightConfig, ModelConfig, SceneConfig};

/// Decode a `0xRRGGBB` color into RGB components in `[0, 1]`.
#[must_use]
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

/// A model to stream in and place in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSpec {
    /// Display name, the file stem of `path`.
    pub name: String,
    /// Path relative to the asset root.
    pub path: PathBuf,
    pub position: DVec3,
    /// Uniform scale.
    pub scale: f64,
}

impl ModelSpec {
    #[must_use]
    pub fn from_config(config: &ModelConfig) -> Self {
        let path = PathBuf::from(&config.path);
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.path.clone());
        Self {
            name,
            path,
            position: DVec3::from_array(config.position),
            scale: config.scale,
        }
    }
}

/// The textured ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Floor {
    /// Texture path relative to the asset root.
    pub texture: PathBuf,
    /// Edge length of the square plane.
    pub size: f64,
    /// World-space height of the plane.
    pub height: f64,
    /// Texture repetitions along each edge.
    pub texture_repeat: u32,
}

impl Floor {
    #[must_use]
    pub fn from_config(config: &FloorConfig) -> Self {
        Self {
            texture: PathBuf::from(&config.texture),
            size: config.size,
            height: config.height,
            texture_repeat: config.texture_repeat,
        }
    }
}

/// Uniform ambient light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f64,
}

impl AmbientLight {
    #[must_use]
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            color: rgb_from_hex(config.color),
            intensity: config.intensity,
        }
    }
}

/// Directional light placed at `position` and aimed at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunLight {
    pub color: Vec3,
    pub intensity: f64,
    pub position: DVec3,
    pub target: DVec3,
}

impl SunLight {
    #[must_use]
    pub fn from_config(config: &DirectionalLightConfig) -> Self {
        Self {
            color: rgb_from_hex(config.color),
            intensity: config.intensity,
            position: DVec3::from_array(config.position),
            target: DVec3::from_array(config.target),
        }
    }

    /// Normalized direction the light travels, from `position` to `target`.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// The full scene description.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneManifest {
    pub asset_root: PathBuf,
    pub models: Vec<ModelSpec>,
    pub floor: Floor,
    pub ambient_light: AmbientLight,
    pub sun_light: SunLight,
}

impl SceneManifest {
    /// Build a manifest from the scene section of the config. Relative
    /// asset roots are kept as-is and resolved against the working directory.
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            asset_root: PathBuf::from(&config.asset_root),
            models: config.models.iter().map(ModelSpec::from_config).collect(),
            floor: Floor::from_config(&config.floor),
            ambient_light: AmbientLight::from_config(&config.ambient_light),
            sun_light: SunLight::from_config(&config.sun_light),
        }
    }

    /// Absolute (or working-directory relative) path of an asset.
    #[must_use]
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.asset_root.join(relative)
    }

    /// Number of files to stream: every model plus the floor texture.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.models.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_decodes_channels() {
        let c = rgb_from_hex(0xFF8000);
        assert_eq!(c, Vec3::new(1.0, 128.0 / 255.0, 0.0));
        assert_eq!(rgb_from_hex(0), Vec3::ZERO);
    }

    #[test]
    fn test_default_manifest_has_three_models() {
        let manifest = SceneManifest::from_config(&SceneConfig::default());
        assert_eq!(manifest.models.len(), 3);
        assert_eq!(manifest.asset_count(), 4);
        assert_eq!(manifest.floor.height, -300.0);
        assert_eq!(manifest.floor.texture_repeat, 100);
    }

    #[test]
    fn test_model_name_is_file_stem() {
        let model = ModelSpec::from_config(&ModelConfig {
            path: "models/planet_two.gltf".to_string(),
            position: [1.0, 2.0, 3.0],
            scale: 4.0,
        });
        assert_eq!(model.name, "planet_two");
        assert_eq!(model.position, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_sun_light_direction_points_at_target() {
        let sun = SunLight::from_config(&DirectionalLightConfig {
            color: 0xFFFFFF,
            intensity: 1.0,
            position: [-10.0, 0.0, 0.0],
            target: [0.0, 0.0, 0.0],
        });
        assert!((sun.direction() - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_resolve_joins_asset_root() {
        let mut manifest = SceneManifest::from_config(&SceneConfig::default());
        manifest.asset_root = PathBuf::from("/data/world");
        assert_eq!(
            manifest.resolve(Path::new("a/b.gltf")),
            PathBuf::from("/data/world/a/b.gltf")
        );
    }
}
