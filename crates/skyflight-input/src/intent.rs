//! The per-frame input snapshot read by the movement core.

use crate::action_map::{Action, ActionResolver, ActionState, InputMap};
use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use glam::DVec2;

/// What the user is asking for this frame.
///
/// Direction flags are independent; opposing flags may both be set and
/// cancel out. `jump_requested` is an edge: it is set only on the frame the
/// jump action was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
    pub jump_requested: bool,
    /// Wheel delta in page pixels, positive when scrolled down (zoom out).
    pub scroll_delta: f64,
    /// Locked pointer motion in pixels.
    pub look_delta: DVec2,
}

impl InputIntent {
    /// `true` when no direction flag is set.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !(self.forward
            || self.backward
            || self.left
            || self.right
            || self.ascend
            || self.descend)
    }
}

/// Turns tracker state into an [`InputIntent`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct IntentCollector {
    map: InputMap,
    actions: ActionState,
}

impl IntentCollector {
    /// Collector driven by the given bindings.
    #[must_use]
    pub fn new(map: InputMap) -> Self {
        Self {
            map,
            actions: ActionState::new(),
        }
    }

    /// The active bindings.
    #[must_use]
    pub fn input_map(&self) -> &InputMap {
        &self.map
    }

    /// Action state from the most recent [`collect`](Self::collect).
    #[must_use]
    pub fn actions(&self) -> &ActionState {
        &self.actions
    }

    /// Resolve actions and snapshot them. Call exactly once per frame,
    /// before the trackers' transients are cleared.
    pub fn collect(&mut self, keyboard: &KeyboardState, mouse: &MouseState) -> InputIntent {
        ActionResolver::resolve(&self.map, keyboard, mouse, &mut self.actions);
        let a = &self.actions;
        InputIntent {
            forward: a.is_action_active(Action::MoveForward),
            backward: a.is_action_active(Action::MoveBack),
            left: a.is_action_active(Action::MoveLeft),
            right: a.is_action_active(Action::MoveRight),
            ascend: a.is_action_active(Action::Ascend),
            descend: a.is_action_active(Action::Descend),
            jump_requested: a.action_just_activated(Action::Jump),
            scroll_delta: f64::from(mouse.wheel_pixels()),
            look_delta: mouse.delta().as_dvec2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;
    use winit::event::MouseScrollDelta;
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn press(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::press(PhysicalKey::Code(code)));
    }

    #[test]
    fn test_no_input_is_idle() {
        let mut collector = IntentCollector::default();
        let intent = collector.collect(&KeyboardState::new(), &MouseState::new());
        assert!(intent.is_idle());
        assert_eq!(intent, InputIntent::default());
    }

    #[test]
    fn test_diagonal_intent() {
        let mut collector = IntentCollector::default();
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::KeyA);
        let intent = collector.collect(&kb, &MouseState::new());
        assert!(intent.forward && intent.left);
        assert!(!intent.backward && !intent.right);
    }

    #[test]
    fn test_held_jump_requests_once() {
        let mut collector = IntentCollector::default();
        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        press(&mut kb, KeyCode::Space);

        assert!(collector.collect(&kb, &mouse).jump_requested);
        kb.clear_transients();
        assert!(!collector.collect(&kb, &mouse).jump_requested);
        assert!(!collector.collect(&kb, &mouse).jump_requested);
    }

    #[test]
    fn test_jump_tapped_within_one_frame_is_requested() {
        let mut collector = IntentCollector::default();
        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        press(&mut kb, KeyCode::Space);
        kb.process_raw(RawKeyEvent::release(PhysicalKey::Code(KeyCode::Space)));

        assert!(collector.collect(&kb, &mouse).jump_requested);
        kb.clear_transients();
        assert!(!collector.collect(&kb, &mouse).jump_requested);
    }

    #[test]
    fn test_scroll_and_look_are_forwarded() {
        let mut collector = IntentCollector::default();
        let mut mouse = MouseState::new();
        mouse.set_locked_flag(true);
        mouse.on_raw_motion(4.0, -2.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, -2.0));
        let intent = collector.collect(&KeyboardState::new(), &mouse);
        assert_eq!(intent.look_delta, DVec2::new(4.0, -2.0));
        assert!((intent.scroll_delta - 200.0).abs() < 1e-9);
    }
}
