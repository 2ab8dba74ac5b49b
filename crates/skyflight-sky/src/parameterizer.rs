//! Sun direction and scattering uniforms derived from two sky angles.
//!
//! [`SkyUniforms`] is the CPU-side result of [`recompute`], while
//! [`SkyUniform`] is the GPU-side representation written to a uniform buffer
//! whenever the parameters change.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use skyflight_config::SkyConfig;

/// Inputs of the sky shader.
///
/// Values are not range-checked; whatever is configured reaches the shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyParams {
    pub turbidity: f64,
    pub rayleigh: f64,
    pub mie_coefficient: f64,
    pub mie_directional_g: f64,
    /// Sun height above the horizon in degrees.
    pub elevation_deg: f64,
    /// Sun bearing in degrees, measured from +Z towards +X.
    pub azimuth_deg: f64,
    /// Tone-mapping exposure.
    pub exposure: f64,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self::from_config(&SkyConfig::default())
    }
}

impl SkyParams {
    #[must_use]
    pub fn from_config(config: &SkyConfig) -> Self {
        Self {
            turbidity: config.turbidity,
            rayleigh: config.rayleigh,
            mie_coefficient: config.mie_coefficient,
            mie_directional_g: config.mie_directional_g,
            elevation_deg: config.elevation_deg,
            azimuth_deg: config.azimuth_deg,
            exposure: config.exposure,
        }
    }
}

/// Unit vector pointing from the origin towards the sun.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunDirection(pub DVec3);

impl SunDirection {
    #[must_use]
    pub fn as_dvec3(self) -> DVec3 {
        self.0
    }
}

/// Point on a sphere from its polar angle `phi` (measured from +Y) and
/// azimuthal angle `theta` (measured from +Z towards +X).
#[must_use]
pub fn spherical_to_cartesian(radius: f64, phi: f64, theta: f64) -> DVec3 {
    let sin_phi_radius = phi.sin() * radius;
    DVec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}

/// Sun direction for an elevation above the horizon and an azimuth, both in
/// degrees. Any real angle is accepted.
#[must_use]
pub fn sun_direction(elevation_deg: f64, azimuth_deg: f64) -> SunDirection {
    let phi = (90.0 - elevation_deg).to_radians();
    let theta = azimuth_deg.to_radians();
    SunDirection(spherical_to_cartesian(1.0, phi, theta))
}

/// CPU-side values handed to the sky shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyUniforms {
    pub turbidity: f64,
    pub rayleigh: f64,
    pub mie_coefficient: f64,
    pub mie_directional_g: f64,
    pub sun_position: DVec3,
    pub up: DVec3,
    pub exposure: f64,
}

impl SkyUniforms {
    /// Build the GPU-side uniform, narrowing to `f32`.
    #[must_use]
    pub fn to_uniform(&self) -> SkyUniform {
        let sun = self.sun_position.as_vec3();
        let up = self.up.as_vec3();
        SkyUniform {
            sun_position: [sun.x, sun.y, sun.z, 0.0],
            up: [up.x, up.y, up.z, 0.0],
            scattering: [
                self.turbidity as f32,
                self.rayleigh as f32,
                self.mie_coefficient as f32,
                self.mie_directional_g as f32,
            ],
            exposure_padding: [self.exposure as f32, 0.0, 0.0, 0.0],
        }
    }
}

/// GPU-side representation, 64 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SkyUniform {
    /// xyz = sun direction, w = padding.
    pub sun_position: [f32; 4],
    /// xyz = world up, w = padding.
    pub up: [f32; 4],
    /// x = turbidity, y = rayleigh, z = mie coefficient, w = mie directional g.
    pub scattering: [f32; 4],
    /// x = exposure, yzw = padding.
    pub exposure_padding: [f32; 4],
}

/// Derive the sun direction and the full uniform set from `params`.
#[must_use]
pub fn recompute(params: &SkyParams) -> (SunDirection, SkyUniforms) {
    let sun = sun_direction(params.elevation_deg, params.azimuth_deg);
    let uniforms = SkyUniforms {
        turbidity: params.turbidity,
        rayleigh: params.rayleigh,
        mie_coefficient: params.mie_coefficient,
        mie_directional_g: params.mie_directional_g,
        sun_position: sun.0,
        up: DVec3::Y,
        exposure: params.exposure,
    };
    (sun, uniforms)
}
