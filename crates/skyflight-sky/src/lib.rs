//! Procedural sky parameterization: sun direction, scattering uniforms and
//! dome placement.

mod parameterizer;
mod sky;

pub use parameterizer::{
    SkyParams, SkyUniform, SkyUniforms, SunDirection, recompute, spherical_to_cartesian,
    sun_direction,
};
pub use sky::{Sky, SkyDome};
