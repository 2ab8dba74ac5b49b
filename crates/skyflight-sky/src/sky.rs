//! Cached sky state with change-driven recomputation.

use glam::DVec3;
use skyflight_config::SkyConfig;
use tracing::debug;

use crate::parameterizer::{SkyParams, SkyUniform, SkyUniforms, SunDirection, recompute};

/// Placement of the sky dome mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyDome {
    /// Uniform scale of the unit dome.
    pub scale: f64,
    /// Dome centre.
    pub center: DVec3,
}

impl Default for SkyDome {
    fn default() -> Self {
        Self {
            scale: 3_000_000.0,
            center: DVec3::new(0.0, 5000.0, 0.0),
        }
    }
}

/// Current sky parameters plus the values derived from them.
///
/// The derived values only change through [`Sky::update`], which skips the
/// recomputation when nothing changed.
#[derive(Clone, Debug)]
pub struct Sky {
    params: SkyParams,
    sun: SunDirection,
    uniforms: SkyUniforms,
    dome: SkyDome,
}

impl Default for Sky {
    fn default() -> Self {
        Self::new(SkyParams::default(), SkyDome::default())
    }
}

impl Sky {
    #[must_use]
    pub fn new(params: SkyParams, dome: SkyDome) -> Self {
        let (sun, uniforms) = recompute(&params);
        Self {
            params,
            sun,
            uniforms,
            dome,
        }
    }

    #[must_use]
    pub fn from_config(config: &SkyConfig) -> Self {
        let dome = SkyDome {
            scale: config.dome_scale,
            center: DVec3::new(0.0, config.dome_height, 0.0),
        };
        Self::new(SkyParams::from_config(config), dome)
    }

    /// Replace the parameters. Returns `true` when the derived values were
    /// recomputed.
    pub fn update(&mut self, params: SkyParams) -> bool {
        if params == self.params {
            return false;
        }
        let (sun, uniforms) = recompute(&params);
        debug!(
            elevation = params.elevation_deg,
            azimuth = params.azimuth_deg,
            sun = ?sun.0,
            "sky recomputed"
        );
        self.params = params;
        self.sun = sun;
        self.uniforms = uniforms;
        true
    }

    /// Move the sun only, keeping the scattering parameters.
    pub fn set_sun_angles(&mut self, elevation_deg: f64, azimuth_deg: f64) -> bool {
        self.update(SkyParams {
            elevation_deg,
            azimuth_deg,
            ..self.params
        })
    }

    #[must_use]
    pub fn params(&self) -> &SkyParams {
        &self.params
    }

    #[must_use]
    pub fn sun_direction(&self) -> SunDirection {
        self.sun
    }

    #[must_use]
    pub fn uniforms(&self) -> &SkyUniforms {
        &self.uniforms
    }

    /// GPU-side uniform for the current parameters.
    #[must_use]
    pub fn gpu_uniform(&self) -> SkyUniform {
        self.uniforms.to_uniform()
    }

    #[must_use]
    pub fn dome(&self) -> SkyDome {
        self.dome
    }
}
