//! Pointer-lock camera rig: mouse look and the horizontal movement basis.

use glam::{DMat4, DQuat, DVec2, DVec3};
use skyflight_config::{CameraConfig, InputConfig};
use std::f64::consts::FRAC_PI_2;

const DEFAULT_PITCH_LIMIT_DEG: f64 = 89.0;

/// A usable pitch bound in radians: the magnitude of `limit`, at most a
/// quarter turn. Non-finite limits fall back to the default.
fn sanitize_pitch_limit(limit: f64) -> f64 {
    if limit.is_finite() {
        limit.abs().min(FRAC_PI_2)
    } else {
        DEFAULT_PITCH_LIMIT_DEG.to_radians()
    }
}

/// Yaw/pitch orientation driven by locked-pointer motion.
///
/// Rotation is yaw about world Y followed by pitch about the local X axis,
/// with no roll. Positive yaw turns left (counter-clockwise seen from above);
/// positive pitch looks up. Identity looks down -Z.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    /// Horizontal rotation in radians.
    pub yaw: f64,
    /// Vertical rotation in radians, kept within `±pitch_limit`.
    pub pitch: f64,
    /// Radians per pixel of pointer motion.
    pub mouse_sensitivity: f64,
    /// Maximum pitch magnitude in radians.
    pub pitch_limit: f64,
    /// Flip vertical look.
    pub invert_y: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            mouse_sensitivity: 0.002,
            pitch_limit: DEFAULT_PITCH_LIMIT_DEG.to_radians(),
            invert_y: false,
        }
    }
}

impl CameraRig {
    /// Build a level rig from the camera and input sections of the config.
    #[must_use]
    pub fn from_config(camera: &CameraConfig, input: &InputConfig) -> Self {
        Self {
            mouse_sensitivity: input.mouse_sensitivity,
            pitch_limit: sanitize_pitch_limit(camera.pitch_limit_deg.to_radians()),
            invert_y: input.invert_y,
            ..Self::default()
        }
    }

    /// The rotation quaternion for the current yaw and pitch.
    #[must_use]
    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.yaw) * DQuat::from_rotation_x(self.pitch)
    }

    /// Apply a pointer delta (pixels) to yaw and pitch.
    ///
    /// Non-finite deltas are dropped so a bad device event cannot poison the
    /// orientation.
    pub fn apply_look(&mut self, delta: DVec2) {
        if !delta.is_finite() {
            return;
        }
        let dy = if self.invert_y { -delta.y } else { delta.y };
        self.yaw -= delta.x * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        let limit = sanitize_pitch_limit(self.pitch_limit);
        self.pitch = self.pitch.clamp(-limit, limit);
    }

    /// The full view direction (-Z rotated), including pitch.
    #[must_use]
    pub fn look_direction(&self) -> DVec3 {
        self.rotation() * DVec3::NEG_Z
    }

    /// The translation basis used by the movement integrator.
    #[must_use]
    pub fn basis(&self) -> CameraBasis {
        let right = self.rotation() * DVec3::X;
        CameraBasis {
            right,
            forward: DVec3::Y.cross(right),
        }
    }

    /// Combine the orientation with a position into a pose.
    #[must_use]
    pub fn pose(&self, position: DVec3) -> CameraPose {
        CameraPose {
            position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// Camera-local horizontal axes.
///
/// `right` is the camera's local +X; `forward` is `up × right`, which stays
/// in the ground plane whatever the pitch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Camera-local +X.
    pub right: DVec3,
    /// Horizontal forward.
    pub forward: DVec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        CameraRig::default().basis()
    }
}

impl CameraBasis {
    /// Translate `position` by `distance` along the camera's right axis.
    pub fn move_right(&self, position: &mut DVec3, distance: f64) {
        *position += self.right * distance;
    }

    /// Translate `position` by `distance` along the horizontal forward axis.
    pub fn move_forward(&self, position: &mut DVec3, distance: f64) {
        *position += self.forward * distance;
    }
}

/// Where the camera is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
}

impl CameraPose {
    /// The rotation quaternion of this pose.
    #[must_use]
    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.yaw) * DQuat::from_rotation_x(self.pitch)
    }

    /// View matrix: inverse of the camera's world transform.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }
}
