//! Keybinding persistence and conflict detection.
//!
//! The action map lives in `input.ron` next to `config.ron`. A missing or
//! malformed file never stops the viewer: it falls back to the default
//! flight bindings with a warning.

use crate::action_map::{Action, InputBinding, InputMap};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// File name of the persisted action map.
pub const INPUT_FILE_NAME: &str = "input.ron";

/// The same [`InputBinding`] bound to more than one action.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The duplicated binding.
    pub binding: InputBinding,
    /// Actions that share this binding.
    pub actions: Vec<Action>,
}

impl InputMap {
    /// Detect bindings shared by several actions.
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<InputBinding, Vec<Action>> = HashMap::new();
        for (action, bindings) in &self.bindings {
            for binding in bindings {
                seen.entry(*binding).or_default().push(*action);
            }
        }

        seen.into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(binding, actions)| Conflict { binding, actions })
            .collect()
    }

    /// Save the input map to a RON file at `path`.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load an input map from a RON file at `path`.
    ///
    /// Falls back to [`InputMap::default`] if the file is missing or
    /// malformed, and warns about any conflicting bindings it finds.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let map = match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Malformed keybinding file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Could not read keybinding file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        };
        for conflict in map.detect_conflicts() {
            warn!(
                binding = ?conflict.binding,
                actions = ?conflict.actions,
                "binding drives several actions"
            );
        }
        map
    }
}
