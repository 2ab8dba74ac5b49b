//! Pointer-lock camera rig, lens zoom and the flight movement integrator.

pub mod camera_rig;
pub mod lens;
pub mod movement;

pub use camera_rig::{CameraBasis, CameraPose, CameraRig};
pub use lens::Lens;
pub use movement::{KinematicState, MovementIntegrator, StepReport, intent_direction};
