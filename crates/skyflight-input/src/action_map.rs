//! Action mapping: which physical inputs drive which flight actions.
//!
//! [`InputMap`] binds each [`Action`] to any number of keys or mouse buttons
//! (OR semantics). [`ActionResolver`] turns the current keyboard and mouse
//! state into an [`ActionState`] once per frame, keeping the previous frame
//! for edge detection.

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use winit::event::MouseButton;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Serde helper for [`KeyCode`], which has no serde support of its own.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug name (e.g., `"KeyW"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug name.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];

    fn string_to_keycode(s: &str) -> Option<KeyCode> {
        if let Some(letter) = s.strip_prefix("Key")
            && let [c] = letter.as_bytes()
            && c.is_ascii_uppercase()
        {
            return Some(LETTERS[usize::from(c - b'A')]);
        }
        Some(match s {
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "ControlRight" => KeyCode::ControlRight,
            "AltLeft" => KeyCode::AltLeft,
            "AltRight" => KeyCode::AltRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            _ => return None,
        })
    }
}

/// Flight actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Thrust along the camera's forward axis.
    MoveForward,
    /// Thrust backward.
    MoveBack,
    /// Strafe left.
    MoveLeft,
    /// Strafe right.
    MoveRight,
    /// Thrust up along world Y.
    Ascend,
    /// Thrust down along world Y.
    Descend,
    /// Jump off the floor.
    Jump,
    /// Release the pointer lock.
    ReleasePointer,
}

impl Action {
    /// Every action, in a stable order.
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Ascend,
        Action::Descend,
        Action::Jump,
        Action::ReleasePointer,
    ];
}

/// A physical input source that can be bound to an action.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
}

/// Serializable subset of [`winit::event::MouseButton`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

impl MouseButtonBinding {
    /// Convert to the winit [`MouseButton`] type.
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// Maps [`Action`]s to lists of [`InputBinding`]s.
///
/// Serializable to RON for a user-editable `input.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::default_flight()
    }
}

impl InputMap {
    /// Create an empty input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default flight bindings.
    ///
    /// WASD and the arrow keys move, Q/E and the left/right mouse buttons
    /// ascend/descend, Space jumps, Escape releases the pointer.
    #[must_use]
    pub fn default_flight() -> Self {
        use InputBinding::{Key, MouseButton};

        let mut map = Self::new();
        map.set_bindings(
            Action::MoveForward,
            vec![Key(KeyCode::KeyW), Key(KeyCode::ArrowUp)],
        );
        map.set_bindings(
            Action::MoveBack,
            vec![Key(KeyCode::KeyS), Key(KeyCode::ArrowDown)],
        );
        map.set_bindings(
            Action::MoveLeft,
            vec![Key(KeyCode::KeyA), Key(KeyCode::ArrowLeft)],
        );
        map.set_bindings(
            Action::MoveRight,
            vec![Key(KeyCode::KeyD), Key(KeyCode::ArrowRight)],
        );
        map.set_bindings(
            Action::Ascend,
            vec![Key(KeyCode::KeyQ), MouseButton(MouseButtonBinding::Left)],
        );
        map.set_bindings(
            Action::Descend,
            vec![Key(KeyCode::KeyE), MouseButton(MouseButtonBinding::Right)],
        );
        map.set_bindings(Action::Jump, vec![Key(KeyCode::Space)]);
        map.set_bindings(Action::ReleasePointer, vec![Key(KeyCode::Escape)]);
        map
    }

    /// Keys-only variant: vertical movement on Q/E without mouse buttons.
    #[must_use]
    pub fn keys_only() -> Self {
        let mut map = Self::default_flight();
        for action in [Action::Ascend, Action::Descend] {
            let keys = map
                .get_bindings(&action)
                .iter()
                .copied()
                .filter(|b| matches!(b, InputBinding::Key(_)))
                .collect();
            map.set_bindings(action, keys);
        }
        map
    }

    /// Set the bindings for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn get_bindings(&self, action: &Action) -> &[InputBinding] {
        self.bindings.get(action).map_or(&[], |v| v.as_slice())
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Per-frame action state computed by [`ActionResolver`].
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    active: HashSet<Action>,
    prev_active: HashSet<Action>,
    /// Actions with a binding that went down since the last resolve, even if
    /// it was released again before the frame was resolved.
    pressed: HashSet<Action>,
}

impl ActionState {
    /// Create a new empty action state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any binding of the action is held or was pressed this frame.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.active.contains(&action)
    }

    /// True on the frame the action went from inactive to active, or on any
    /// frame in which one of its bindings was pressed.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        self.pressed.contains(&action)
            || (self.active.contains(&action) && !self.prev_active.contains(&action))
    }

    /// True only on the frame the action went from active to inactive.
    #[must_use]
    pub fn action_just_deactivated(&self, action: Action) -> bool {
        !self.active.contains(&action) && self.prev_active.contains(&action)
    }
}

/// Reads input trackers and populates [`ActionState`] each frame.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve all actions from the current input state.
    ///
    /// Call once per frame after events have been forwarded to the trackers.
    pub fn resolve(
        input_map: &InputMap,
        keyboard: &KeyboardState,
        mouse: &MouseState,
        state: &mut ActionState,
    ) {
        std::mem::swap(&mut state.prev_active, &mut state.active);
        state.active.clear();
        state.pressed.clear();

        for (action, bindings) in &input_map.bindings {
            if bindings
                .iter()
                .any(|b| Self::read_press_edge(b, keyboard, mouse))
            {
                state.pressed.insert(*action);
                state.active.insert(*action);
            } else if bindings
                .iter()
                .any(|b| Self::read_binding(b, keyboard, mouse))
            {
                state.active.insert(*action);
            }
        }
    }

    fn read_binding(binding: &InputBinding, keyboard: &KeyboardState, mouse: &MouseState) -> bool {
        match binding {
            InputBinding::Key(code) => keyboard.is_pressed(PhysicalKey::Code(*code)),
            InputBinding::MouseButton(btn) => mouse.is_button_pressed(btn.to_winit()),
        }
    }

    fn read_press_edge(
        binding: &InputBinding,
        keyboard: &KeyboardState,
        mouse: &MouseState,
    ) -> bool {
        match binding {
            InputBinding::Key(code) => keyboard.just_pressed(PhysicalKey::Code(*code)),
            InputBinding::MouseButton(btn) => mouse.just_button_pressed(btn.to_winit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;
    use winit::event::ElementState;

    fn press_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::press(PhysicalKey::Code(code)));
    }

    fn release_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::release(PhysicalKey::Code(code)));
    }

    fn resolve(map: &InputMap, kb: &KeyboardState, mouse: &MouseState, state: &mut ActionState) {
        ActionResolver::resolve(map, kb, mouse, state);
    }

    #[test]
    fn test_key_activates_bound_action() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::KeyW);

        let mut state = ActionState::new();
        resolve(&map, &kb, &MouseState::new(), &mut state);

        assert!(state.is_action_active(Action::MoveForward));
        assert!(!state.is_action_active(Action::MoveBack));
    }

    #[test]
    fn test_arrow_keys_alias_wasd() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::ArrowLeft);

        let mut state = ActionState::new();
        resolve(&map, &kb, &MouseState::new(), &mut state);
        assert!(state.is_action_active(Action::MoveLeft));
    }

    #[test]
    fn test_mouse_buttons_drive_vertical_actions() {
        let map = InputMap::default();
        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);

        let mut state = ActionState::new();
        resolve(&map, &KeyboardState::new(), &mouse, &mut state);
        assert!(state.is_action_active(Action::Ascend));

        mouse.on_button(MouseButton::Left, ElementState::Released);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        resolve(&map, &KeyboardState::new(), &mouse, &mut state);
        assert!(!state.is_action_active(Action::Ascend));
        assert!(state.is_action_active(Action::Descend));
    }

    #[test]
    fn test_keys_only_map_ignores_mouse_buttons() {
        let map = InputMap::keys_only();
        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);

        let mut state = ActionState::new();
        resolve(&map, &KeyboardState::new(), &mouse, &mut state);
        assert!(!state.is_action_active(Action::Ascend));
        assert_eq!(map.get_bindings(&Action::Ascend), &[InputBinding::Key(KeyCode::KeyQ)]);
    }

    #[test]
    fn test_unbound_action_is_inactive() {
        let map = InputMap::new();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::Space);
        let mut state = ActionState::new();
        resolve(&map, &kb, &MouseState::new(), &mut state);
        assert!(!state.is_action_active(Action::Jump));
    }

    #[test]
    fn test_rebinding_at_runtime() {
        let mut map = InputMap::default();
        map.set_bindings(Action::Jump, vec![InputBinding::Key(KeyCode::KeyJ)]);

        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::Space);
        resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.is_action_active(Action::Jump));

        press_key(&mut kb, KeyCode::KeyJ);
        resolve(&map, &kb, &mouse, &mut state);
        assert!(state.is_action_active(Action::Jump));
    }

    #[test]
    fn test_just_activated_only_on_first_frame() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::Space);
        resolve(&map, &kb, &mouse, &mut state);
        assert!(state.action_just_activated(Action::Jump));
        kb.clear_transients();

        resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.action_just_activated(Action::Jump));
        assert!(state.is_action_active(Action::Jump));

        release_key(&mut kb, KeyCode::Space);
        resolve(&map, &kb, &mouse, &mut state);
        assert!(state.action_just_deactivated(Action::Jump));
    }

    #[test]
    fn test_key_tapped_between_resolves_still_activates() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        let mouse = MouseState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::Space);
        release_key(&mut kb, KeyCode::Space);
        resolve(&map, &kb, &mouse, &mut state);
        assert!(state.action_just_activated(Action::Jump));
        assert!(state.is_action_active(Action::Jump));

        kb.clear_transients();
        resolve(&map, &kb, &mouse, &mut state);
        assert!(!state.action_just_activated(Action::Jump));
        assert!(!state.is_action_active(Action::Jump));
    }

    #[test]
    fn test_button_clicked_between_resolves_still_activates() {
        let map = InputMap::default();
        let mut mouse = MouseState::new();
        let mut state = ActionState::new();

        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_button(MouseButton::Left, ElementState::Released);
        resolve(&map, &KeyboardState::new(), &mouse, &mut state);
        assert!(state.action_just_activated(Action::Ascend));
    }

    #[test]
    fn test_every_action_has_a_default_binding() {
        let map = InputMap::default();
        for action in Action::ALL {
            assert!(!map.get_bindings(&action).is_empty(), "{action:?} unbound");
        }
    }

    #[test]
    fn test_letter_keys_parse_from_ron() {
        let map = InputMap::from_ron(r#"(bindings: {Jump: [Key("KeyZ")]})"#).unwrap();
        assert_eq!(map.get_bindings(&Action::Jump), &[InputBinding::Key(KeyCode::KeyZ)]);
    }

    #[test]
    fn test_unknown_key_name_rejected() {
        assert!(InputMap::from_ron(r#"(bindings: {Jump: [Key("KeyAA")]})"#).is_err());
        assert!(InputMap::from_ron(r#"(bindings: {Jump: [Key("Hyper")]})"#).is_err());
    }
}
