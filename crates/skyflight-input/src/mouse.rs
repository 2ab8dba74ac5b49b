//! Pointer, button, and wheel tracking with pointer-lock support.
//!
//! While the pointer is locked the cursor is hidden and only raw device
//! motion contributes to [`MouseState::delta`]; an unlocked pointer never
//! turns the camera.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Page pixels represented by one wheel line (one notch on most mice).
pub const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    pressed: bool,
    just_pressed: bool,
    just_released: bool,
}

fn button_index(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Per-frame mouse state.
///
/// 1. Forward winit events via the `on_*` methods.
/// 2. Query once per frame.
/// 3. Call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    buttons: [ButtonFrame; 3],
    wheel_lines: f32,
    locked: bool,
}

impl MouseState {
    /// Creates a new `MouseState` with all fields zeroed/false.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Process a `CursorMoved` event. Only tracks the cursor position.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x as f32, y as f32);
    }

    /// Process a `DeviceEvent::MouseMotion` raw delta. Ignored unless locked.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.locked {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `MouseInput` event. Buttons other than left/right/middle
    /// are not bindable and are dropped.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(idx) = button_index(button) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                self.buttons[idx].pressed = true;
                self.buttons[idx].just_pressed = true;
            }
            ElementState::Released => {
                self.buttons[idx].pressed = false;
                self.buttons[idx].just_released = true;
            }
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.wheel_lines += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.wheel_lines += pos.y as f32 / PIXELS_PER_LINE;
            }
        }
    }

    /// Lock or release the pointer on `window`.
    ///
    /// Tries [`CursorGrabMode::Locked`](winit::window::CursorGrabMode::Locked)
    /// first and falls back to `Confined` on platforms without true locking.
    pub fn set_locked(&mut self, window: &winit::window::Window, locked: bool) {
        use winit::window::CursorGrabMode;
        self.locked = locked;
        if locked {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                && let Err(e) = window.set_cursor_grab(CursorGrabMode::Confined)
            {
                tracing::warn!("pointer lock unavailable: {e}");
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        tracing::debug!(locked, "pointer lock changed");
    }

    /// Set the lock flag without touching a window.
    pub fn set_locked_flag(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Release every held button. Used on focus loss, when the matching
    /// button-up events will not be delivered.
    pub fn release_all(&mut self) {
        for b in self.buttons.iter_mut().filter(|b| b.pressed) {
            b.pressed = false;
            b.just_released = true;
        }
    }

    /// Clears per-frame transients: delta, wheel, button edges.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.wheel_lines = 0.0;
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Current cursor position in window coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Locked pointer motion since the last frame clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether a mouse button is currently held.
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        button_index(button).is_some_and(|i| self.buttons[i].pressed)
    }

    /// Whether a mouse button went down this frame.
    #[must_use]
    pub fn just_button_pressed(&self, button: MouseButton) -> bool {
        button_index(button).is_some_and(|i| self.buttons[i].just_pressed)
    }

    /// Wheel lines accumulated this frame (positive = scrolled up).
    #[must_use]
    pub fn wheel_lines(&self) -> f32 {
        self.wheel_lines
    }

    /// Wheel delta this frame in page pixels, positive when scrolled down.
    ///
    /// This is the sign convention of a browser `wheel` event's `deltaY`,
    /// which the zoom control is tuned for.
    #[must_use]
    pub fn wheel_pixels(&self) -> f32 {
        -self.wheel_lines * PIXELS_PER_LINE
    }

    /// Whether the pointer is locked for mouse-look.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_unlocked_motion_is_ignored() {
        let mut ms = MouseState::new();
        ms.on_raw_motion(10.0, 5.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_locked_motion_accumulates() {
        let mut ms = MouseState::new();
        ms.set_locked_flag(true);
        ms.on_raw_motion(10.0, 5.0);
        ms.on_raw_motion(2.0, -1.0);
        assert_eq!(ms.delta(), Vec2::new(12.0, 4.0));
    }

    #[test]
    fn test_cursor_move_does_not_produce_delta() {
        let mut ms = MouseState::new();
        ms.set_locked_flag(true);
        ms.on_cursor_moved(300.0, 200.0);
        assert_eq!(ms.position(), Vec2::new(300.0, 200.0));
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_button_press_and_release_tracked() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(ms.is_button_pressed(MouseButton::Right));
        assert!(ms.just_button_pressed(MouseButton::Right));

        ms.on_button(MouseButton::Right, ElementState::Released);
        assert!(!ms.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_release_all_drops_held_buttons() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.on_button(MouseButton::Right, ElementState::Pressed);
        ms.clear_transients();

        ms.release_all();
        assert!(!ms.is_button_pressed(MouseButton::Left));
        assert!(!ms.is_button_pressed(MouseButton::Right));
        assert!(!ms.just_button_pressed(MouseButton::Left));
        assert!(ms.buttons[0].just_released);
        assert!(!ms.buttons[2].just_released);
    }

    #[test]
    fn test_extra_buttons_ignored() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Back, ElementState::Pressed);
        assert!(!ms.is_button_pressed(MouseButton::Back));
    }

    #[test]
    fn test_wheel_down_is_positive_pixels() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        assert!((ms.wheel_pixels() - PIXELS_PER_LINE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pixel_delta_normalized_to_lines() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 50.0)));
        assert!((ms.wheel_lines() - 0.5).abs() < f32::EPSILON);
        assert!((ms.wheel_pixels() + 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_transients_reset_after_clear() {
        let mut ms = MouseState::new();
        ms.set_locked_flag(true);
        ms.on_raw_motion(1.0, 1.0);
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        ms.clear_transients();
        assert_eq!(ms.delta(), Vec2::ZERO);
        assert_eq!(ms.wheel_lines(), 0.0);
        assert!(!ms.just_button_pressed(MouseButton::Left));
        assert!(ms.is_button_pressed(MouseButton::Left));
    }
}
