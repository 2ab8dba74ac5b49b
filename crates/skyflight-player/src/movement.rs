//! Velocity-damped flight integrator with a ground-plane clamp.
//!
//! One explicit Euler step per displayed frame. Horizontal velocity decays
//! exponentially, gravity pulls the camera down every step, and thrust is
//! applied along the camera's horizontal basis. The only collision is a
//! fixed floor height.

use glam::DVec3;
use skyflight_config::MovementConfig;
use skyflight_input::InputIntent;
use tracing::trace;

use crate::camera_rig::CameraBasis;

/// Position, velocity and floor contact of the flying camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Set when the last step ended on the floor clamp.
    pub grounded: bool,
}

impl KinematicState {
    /// A motionless state at `position`. `grounded` is set when the position
    /// already sits on (or below) the floor.
    #[must_use]
    pub fn at_rest(position: DVec3, floor_height: f64) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            grounded: position.y <= floor_height,
        }
    }
}

/// What a single [`MovementIntegrator::step`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// `false` when the step was skipped for an invalid `dt`.
    pub applied: bool,
    /// A jump impulse was added.
    pub jumped: bool,
    /// The state touched the floor after being airborne.
    pub landed: bool,
}

/// Normalized intent direction in camera-local axes.
///
/// `x` is right minus left, `y` is descend minus ascend and `z` is forward
/// minus backward. Opposing flags cancel; no flags yields zero.
#[must_use]
pub fn intent_direction(intent: &InputIntent) -> DVec3 {
    let axis = |pos: bool, neg: bool| f64::from(u8::from(pos)) - f64::from(u8::from(neg));
    DVec3::new(
        axis(intent.right, intent.left),
        axis(intent.descend, intent.ascend),
        axis(intent.forward, intent.backward),
    )
    .normalize_or_zero()
}

/// Advances a [`KinematicState`] from an [`InputIntent`].
#[derive(Clone, Debug, Default)]
pub struct MovementIntegrator {
    config: MovementConfig,
}

impl MovementIntegrator {
    #[must_use]
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Height the state is clamped to.
    #[must_use]
    pub fn floor_height(&self) -> f64 {
        self.config.floor_height
    }

    /// Advance `state` by `dt` seconds.
    ///
    /// A negative or non-finite `dt` leaves the state untouched and returns a
    /// report with `applied == false`. After any applied step
    /// `state.position.y >= floor_height`.
    pub fn step(
        &self,
        state: &mut KinematicState,
        intent: &InputIntent,
        basis: &CameraBasis,
        dt: f64,
    ) -> StepReport {
        if !dt.is_finite() || dt < 0.0 {
            trace!(dt, "skipping movement step with invalid dt");
            return StepReport::default();
        }

        let cfg = &self.config;
        let was_grounded = state.grounded;
        let v = &mut state.velocity;

        v.x -= v.x * cfg.damping * dt;
        v.z -= v.z * cfg.damping * dt;
        v.y -= cfg.gravity * cfg.mass * dt;

        let dir = intent_direction(intent);
        if intent.forward || intent.backward {
            v.z -= dir.z * cfg.thrust.forward * dt;
        }
        if intent.left || intent.right {
            v.x -= dir.x * cfg.thrust.strafe * dt;
        }
        if intent.ascend || intent.descend {
            v.y -= dir.y * cfg.thrust.vertical * dt;
        }

        let velocity = *v;
        basis.move_right(&mut state.position, -velocity.x * dt);
        basis.move_forward(&mut state.position, -velocity.z * dt);
        state.position.y += velocity.y * dt;

        // `<=` keeps a zero-dt step at rest on the floor from clearing `grounded`.
        if state.position.y <= cfg.floor_height {
            state.velocity.y = 0.0;
            state.position.y = cfg.floor_height;
            state.grounded = true;
        } else {
            state.grounded = false;
        }

        let mut report = StepReport {
            applied: true,
            jumped: false,
            landed: state.grounded && !was_grounded,
        };

        if intent.jump_requested && was_grounded {
            state.velocity.y += cfg.jump_impulse;
            state.grounded = false;
            report.jumped = true;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera_rig::CameraRig;

    const DT: f64 = 1.0 / 60.0;

    fn integrator() -> MovementIntegrator {
        MovementIntegrator::new(MovementConfig::default())
    }

    fn on_floor(x: f64, z: f64) -> KinematicState {
        KinematicState::at_rest(DVec3::new(x, 1.6, z), 1.6)
    }

    fn forward() -> InputIntent {
        InputIntent {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_direction_is_zero_not_nan() {
        let dir = intent_direction(&InputIntent::default());
        assert_eq!(dir, DVec3::ZERO);
        let opposed = InputIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(intent_direction(&opposed), DVec3::ZERO);
    }

    #[test]
    fn test_diagonal_direction_is_normalized() {
        let intent = InputIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let dir = intent_direction(&intent);
        assert!((dir.length() - 1.0).abs() < 1e-12);
        assert!((dir.x - dir.z).abs() < 1e-12);
    }

    #[test]
    fn test_idle_horizontal_speed_decays() {
        let mover = integrator();
        let basis = CameraRig::default().basis();
        let mut state = on_floor(0.0, 0.0);
        state.velocity = DVec3::new(300.0, 0.0, -800.0);

        let horizontal = |v: DVec3| DVec3::new(v.x, 0.0, v.z).length();
        let mut last = horizontal(state.velocity);
        for _ in 0..120 {
            mover.step(&mut state, &InputIntent::default(), &basis, DT);
            let speed = horizontal(state.velocity);
            assert!(speed < last);
            last = speed;
        }
        assert!(last < 1e-6);
    }

    #[test]
    fn test_falls_until_clamp_engages() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = KinematicState::at_rest(DVec3::new(0.0, 50.0, 0.0), 1.6);
        assert!(!state.grounded);

        let mut last_vy = state.velocity.y;
        let mut landed = false;
        for _ in 0..240 {
            let report = mover.step(&mut state, &InputIntent::default(), &basis, DT);
            if report.landed {
                landed = true;
                break;
            }
            assert!(state.velocity.y < last_vy);
            last_vy = state.velocity.y;
        }
        assert!(landed);
        assert!(state.grounded);
        assert_eq!(state.position.y, 1.6);
        assert_eq!(state.velocity.y, 0.0);
    }

    #[test]
    fn test_floor_invariant_holds_under_descend_and_large_dt() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(0.0, 0.0);
        let intent = InputIntent {
            descend: true,
            forward: true,
            ..Default::default()
        };
        for dt in [DT, 0.5, 3.0, 1e-6, 0.0] {
            mover.step(&mut state, &intent, &basis, dt);
            assert!(state.position.y >= mover.floor_height());
        }
    }

    #[test]
    fn test_zero_dt_at_rest_is_unchanged() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(-15.0, 70.0);
        let before = state;
        let report = mover.step(&mut state, &InputIntent::default(), &basis, 0.0);
        assert!(report.applied);
        assert_eq!(state, before);
    }

    #[test]
    fn test_invalid_dt_is_noop() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(1.0, 2.0);
        state.velocity = DVec3::new(5.0, 0.0, 5.0);
        let before = state;
        for dt in [-DT, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let report = mover.step(&mut state, &forward(), &basis, dt);
            assert!(!report.applied);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_jump_requires_grounded_and_fires_once() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(0.0, 0.0);
        let jump = InputIntent {
            jump_requested: true,
            ..Default::default()
        };

        let report = mover.step(&mut state, &jump, &basis, DT);
        assert!(report.jumped);
        assert!(!state.grounded);
        assert_eq!(state.velocity.y, 1000.0);

        // Requests while airborne are ignored.
        let mut impulses = 1;
        for _ in 0..5 {
            if mover.step(&mut state, &jump, &basis, DT).jumped {
                impulses += 1;
            }
        }
        assert_eq!(impulses, 1);
        assert!(state.position.y > 1.6);
    }

    #[test]
    fn test_jump_available_again_after_landing() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(0.0, 0.0);
        let jump = InputIntent {
            jump_requested: true,
            ..Default::default()
        };
        assert!(mover.step(&mut state, &jump, &basis, DT).jumped);

        let mut landed = false;
        for _ in 0..600 {
            if mover.step(&mut state, &InputIntent::default(), &basis, DT).landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(mover.step(&mut state, &jump, &basis, DT).jumped);
    }

    #[test]
    fn test_strafe_right_moves_along_plus_x() {
        let mover = integrator();
        let basis = CameraBasis::default();
        let mut state = on_floor(0.0, 0.0);
        let intent = InputIntent {
            right: true,
            ..Default::default()
        };
        for _ in 0..5 {
            mover.step(&mut state, &intent, &basis, DT);
        }
        assert!(state.position.x > 0.0);
        assert!(state.position.z.abs() < 1e-9);
    }

    #[test]
    fn test_pitch_does_not_lift_forward_motion() {
        let mover = integrator();
        let rig = CameraRig {
            pitch: 1.3,
            ..Default::default()
        };
        let mut state = on_floor(0.0, 0.0);
        for _ in 0..10 {
            mover.step(&mut state, &forward(), &rig.basis(), DT);
        }
        assert_eq!(state.position.y, 1.6);
        assert!(state.position.z < 0.0);
    }

    #[test]
    fn test_forward_ten_frames_matches_closed_form() {
        let mover = integrator();
        let basis = CameraRig::default().basis();
        let mut state = on_floor(0.0, 0.0);

        let n = 10;
        for _ in 0..n {
            mover.step(&mut state, &forward(), &basis, DT);
        }

        // v_n = -(T/k)(1 - r^n) with r = 1 - k*dt; displacement is the sum of -v_n*dt.
        let cfg = MovementConfig::default();
        let (t, k) = (cfg.thrust.forward, cfg.damping);
        let r = 1.0 - k * DT;
        let nf = f64::from(n);
        let expected_v = -(t / k) * (1.0 - r.powi(n));
        let expected_d = (t / k) * DT * (nf - r * (1.0 - r.powi(n)) / (1.0 - r));

        assert!((state.velocity.z - expected_v).abs() < 1e-6);
        assert!((-state.position.z - expected_d).abs() < 1e-6);
        assert!((expected_d - 4839.6).abs() < 0.1);
        assert!(state.position.x.abs() < 1e-9);
        assert_eq!(state.position.y, 1.6);
        assert!(state.grounded);
    }
}
