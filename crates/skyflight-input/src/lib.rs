//! Input collection: keyboard and mouse trackers, a configurable action map,
//! and the per-frame [`InputIntent`] snapshot consumed by the movement core.

pub mod action_map;
pub mod intent;
pub mod keybindings;
pub mod keyboard;
pub mod mouse;

pub use action_map::{Action, ActionResolver, ActionState, InputBinding, InputMap, MouseButtonBinding};
pub use intent::{InputIntent, IntentCollector};
pub use keybindings::Conflict;
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::{MouseState, PIXELS_PER_LINE};
