//! Perspective lens with wheel zoom.

use glam::DMat4;
use skyflight_config::{CameraConfig, InputConfig};

const DEFAULT_FOV_MIN_DEG: f64 = 20.0;
const DEFAULT_FOV_MAX_DEG: f64 = 150.0;

/// Perspective projection parameters plus the zoom clamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Lens {
    /// Vertical field of view in degrees, always within `[fov_min_deg, fov_max_deg]`.
    fov_deg: f64,
    fov_min_deg: f64,
    fov_max_deg: f64,
    /// Degrees per pixel of wheel delta.
    pub zoom_sensitivity: f64,
    /// Width / height.
    pub aspect_ratio: f64,
    /// Near clip plane distance.
    pub near: f64,
    /// Far clip plane distance.
    pub far: f64,
}

impl Default for Lens {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), &InputConfig::default())
    }
}

impl Lens {
    /// Build a lens from config. The initial FOV is clamped into range.
    ///
    /// Swapped bounds are reordered; a non-finite bound is replaced by its
    /// default.
    #[must_use]
    pub fn from_config(camera: &CameraConfig, input: &InputConfig) -> Self {
        let finite_or = |v: f64, default: f64| if v.is_finite() { v } else { default };
        let min = finite_or(camera.fov_min_deg, DEFAULT_FOV_MIN_DEG);
        let max = finite_or(camera.fov_max_deg, DEFAULT_FOV_MAX_DEG);
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let fov_deg = if camera.fov_deg.is_nan() {
            lo
        } else {
            camera.fov_deg.clamp(lo, hi)
        };
        Self {
            fov_deg,
            fov_min_deg: lo,
            fov_max_deg: hi,
            zoom_sensitivity: input.zoom_sensitivity,
            aspect_ratio: 16.0 / 9.0,
            near: camera.near,
            far: camera.far,
        }
    }

    /// Current vertical field of view in degrees.
    #[must_use]
    pub fn fov_deg(&self) -> f64 {
        self.fov_deg
    }

    /// Adjust the FOV by a wheel delta and clamp it.
    ///
    /// Positive deltas (wheel down) widen the view. The clamp holds for any
    /// delta, including infinities; a NaN delta leaves the FOV unchanged.
    pub fn apply_scroll(&mut self, delta: f64) {
        let next = self.fov_deg + delta * self.zoom_sensitivity;
        if next.is_nan() {
            return;
        }
        self.fov_deg = next.clamp(self.fov_min_deg, self.fov_max_deg);
    }

    /// Update the aspect ratio from a framebuffer size. Zero-sized
    /// (minimized) windows keep the previous ratio.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect_ratio = f64::from(width) / f64::from(height);
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}
