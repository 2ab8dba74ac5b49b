//! Per-frame viewer state and update order.

use glam::{DMat4, DVec3};
use skyflight_config::Config;
use skyflight_input::{Action, InputMap, IntentCollector, KeyboardState, MouseState};
use skyflight_player::{CameraPose, CameraRig, KinematicState, Lens, MovementIntegrator};
use skyflight_scene::{Scene, SceneGraph, SceneManifest};
use skyflight_sky::{Sky, SkyUniform};
use tracing::{debug, error};

/// Everything the draw callback needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot<'a> {
    /// Frame number, starting at 1.
    pub frame: u64,
    pub pose: CameraPose,
    pub view: DMat4,
    pub projection: DMat4,
    pub fov_deg: f64,
    pub grounded: bool,
    pub sun_direction: DVec3,
    pub sky: SkyUniform,
    pub scene: &'a SceneGraph,
}

/// Owns the camera, physics, sky, scene and input trackers.
pub struct Viewer {
    rig: CameraRig,
    lens: Lens,
    state: KinematicState,
    integrator: MovementIntegrator,
    sky: Sky,
    scene: Scene,
    keyboard: KeyboardState,
    mouse: MouseState,
    collector: IntentCollector,
    frame: u64,
}

impl Viewer {
    /// Build a viewer around an already constructed scene.
    pub fn new(config: &Config, input_map: InputMap, scene: Scene) -> Self {
        let start = DVec3::from_array(config.camera.start_position);
        Self {
            rig: CameraRig::from_config(&config.camera, &config.input),
            lens: Lens::from_config(&config.camera, &config.input),
            state: KinematicState::at_rest(start, config.movement.floor_height),
            integrator: MovementIntegrator::new(config.movement.clone()),
            sky: Sky::from_config(&config.sky),
            scene,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            collector: IntentCollector::new(input_map),
            frame: 0,
        }
    }

    /// Build a viewer and start streaming the configured scene. If streaming
    /// cannot start the viewer runs with an empty scene.
    pub fn from_config(config: &Config, input_map: InputMap) -> Self {
        let manifest = SceneManifest::from_config(&config.scene);
        let scene = match Scene::load(manifest.clone(), config.scene.loader_threads) {
            Ok(scene) => scene,
            Err(e) => {
                error!("Scene streaming unavailable: {e}");
                Scene::empty(manifest)
            }
        };
        Self::new(config, input_map, scene)
    }

    /// Advance one frame by `dt` seconds.
    ///
    /// Order: drain finished asset loads, collect input intent, apply mouse
    /// look (pointer locked only), apply zoom, integrate movement, then clear
    /// the trackers' per-frame transients.
    pub fn frame(&mut self, dt: f64) -> FrameSnapshot<'_> {
        self.frame += 1;
        self.scene.poll();

        let intent = self.collector.collect(&self.keyboard, &self.mouse);
        if self.mouse.is_locked() {
            self.rig.apply_look(intent.look_delta);
        }
        self.lens.apply_scroll(intent.scroll_delta);

        let report = self
            .integrator
            .step(&mut self.state, &intent, &self.rig.basis(), dt);
        if report.jumped {
            debug!(y = self.state.position.y, "jump");
        }
        if report.landed {
            debug!(position = ?self.state.position, "landed");
        }

        self.keyboard.clear_transients();
        self.mouse.clear_transients();

        let pose = self.rig.pose(self.state.position);
        FrameSnapshot {
            frame: self.frame,
            pose,
            view: pose.view_matrix(),
            projection: self.lens.projection_matrix(),
            fov_deg: self.lens.fov_deg(),
            grounded: self.state.grounded,
            sun_direction: self.sky.sun_direction().as_dvec3(),
            sky: self.sky.gpu_uniform(),
            scene: self.scene.graph(),
        }
    }

    /// `true` if the release-pointer action fired in the last frame.
    pub fn pointer_release_requested(&self) -> bool {
        self.collector
            .actions()
            .action_just_activated(Action::ReleasePointer)
    }

    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        self.lens.set_aspect_ratio(width, height);
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn sky_mut(&mut self) -> &mut Sky {
        &mut self.sky
    }

    pub fn kinematic_state(&self) -> &KinematicState {
        &self.state
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
