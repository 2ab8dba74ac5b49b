//! Window creation and event handling via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`] trait,
//! and a [`run`] function to start the event loop.

use skyflight_config::Config;
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame_clock::FrameClock;
use crate::viewer::{FrameSnapshot, Viewer};

/// Callback invoked once per frame with the frame's snapshot.
pub type DrawFn = Box<dyn FnMut(&FrameSnapshot<'_>)>;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Application state: the window, the viewer and the frame clock.
pub struct AppState {
    window: Option<Window>,
    config: Config,
    viewer: Viewer,
    clock: FrameClock,
    draw: Option<DrawFn>,
}

impl AppState {
    pub fn new(config: Config, viewer: Viewer) -> Self {
        let clock = FrameClock::new(config.debug.long_frame_warn_s);
        Self {
            window: None,
            config,
            viewer,
            clock,
            draw: None,
        }
    }

    /// Install the per-frame draw callback.
    #[must_use]
    pub fn with_draw(mut self, draw: DrawFn) -> Self {
        self.draw = Some(draw);
        self
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    fn set_pointer_locked(&mut self, locked: bool) {
        if let Some(window) = &self.window {
            self.viewer.mouse_mut().set_locked(window, locked);
        } else {
            self.viewer.mouse_mut().set_locked_flag(locked);
        }
    }

    /// Key-up and button-up events are not delivered while unfocused, so
    /// everything held is released along with the pointer.
    fn on_focus_lost(&mut self) {
        self.viewer.keyboard_mut().release_all();
        self.viewer.mouse_mut().release_all();
        self.set_pointer_locked(false);
    }

    fn redraw(&mut self) {
        let dt = self.clock.tick();
        let snapshot = self.viewer.frame(dt);
        if let Some(draw) = &mut self.draw {
            draw(&snapshot);
        }

        if self.viewer.pointer_release_requested() && self.viewer.mouse().is_locked() {
            self.set_pointer_locked(false);
        }

        if let Some(fps) = self.clock.take_fps_update()
            && self.config.debug.show_fps
            && let Some(window) = &self.window
        {
            window.set_title(&format!("{} ({fps:.0} fps)", self.config.window.title));
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = window_attributes_from_config(&self.config);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.viewer.set_aspect_ratio(size.width, size.height);
                info!(
                    "Window created: {}x{} (scale: {:.2})",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.viewer.set_aspect_ratio(new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => self.on_focus_lost(),
            WindowEvent::KeyboardInput { event, .. } => {
                self.viewer.keyboard_mut().process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.viewer.mouse_mut().on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed
                    && button == MouseButton::Left
                    && !self.viewer.mouse().is_locked()
                {
                    self.set_pointer_locked(true);
                }
                self.viewer.mouse_mut().on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.viewer.mouse_mut().on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.viewer.mouse_mut().on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Creates an event loop and runs the viewer until the window is closed.
///
/// # Errors
///
/// Returns an error if the event loop cannot be created or fails.
#[instrument(skip_all)]
pub fn run(app: AppState) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = app;
    event_loop.run_app(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyflight_input::InputMap;
    use skyflight_scene::{Scene, SceneManifest};
    use std::cell::Cell;
    use std::rc::Rc;

    fn app() -> AppState {
        let config = Config::default();
        let scene = Scene::empty(SceneManifest::from_config(&config.scene));
        let viewer = Viewer::new(&config, InputMap::default(), scene);
        AppState::new(config, viewer)
    }

    #[test]
    fn test_app_state_starts_without_window() {
        let state = app();
        assert!(state.window.is_none());
        assert!(!state.viewer().mouse().is_locked());
    }

    #[test]
    fn test_redraw_invokes_draw_callback() {
        let frames = Rc::new(Cell::new(0u64));
        let seen = Rc::clone(&frames);
        let mut state = app().with_draw(Box::new(move |snap| seen.set(snap.frame)));
        state.redraw();
        state.redraw();
        assert_eq!(frames.get(), 2);
    }

    #[test]
    fn test_pointer_lock_flag_without_window() {
        let mut state = app();
        state.set_pointer_locked(true);
        assert!(state.viewer().mouse().is_locked());
        state.set_pointer_locked(false);
        assert!(!state.viewer().mouse().is_locked());
    }

    #[test]
    fn test_focus_loss_stops_mouse_button_ascend() {
        let mut state = app();
        state.set_pointer_locked(true);
        state
            .viewer
            .mouse_mut()
            .on_button(MouseButton::Left, ElementState::Pressed);
        for _ in 0..10 {
            state.viewer.frame(1.0 / 60.0);
        }
        assert!(state.viewer().kinematic_state().position.y > 1.6);

        state.on_focus_lost();
        assert!(!state.viewer().mouse().is_locked());
        assert!(!state.viewer().mouse().is_button_pressed(MouseButton::Left));

        // Gravity wins once thrust is gone.
        for _ in 0..600 {
            state.viewer.frame(1.0 / 60.0);
        }
        assert!(state.viewer().kinematic_state().grounded);
    }

    #[test]
    fn test_window_attributes_from_default_config() {
        let attrs = window_attributes_from_config(&Config::default());
        assert_eq!(attrs.title, "Skyflight");
        assert!(attrs.fullscreen.is_none());
    }
}
