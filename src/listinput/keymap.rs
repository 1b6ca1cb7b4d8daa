//! Key bindings for the list input component.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// Keyboard bindings used while the control has focus.
///
/// Text entry itself belongs to the host's native inputs; these bindings
/// only cover button activation and moving focus between the control's
/// elements.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Activates the focused add or remove control.
    pub activate: Binding,
    /// Moves focus to the next element in tab order.
    pub next_focus: Binding,
    /// Moves focus to the previous element in tab order.
    pub prev_focus: Binding,
}

/// The default bindings: enter/space to activate, tab and shift+tab to move.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        activate: new_binding(vec![
            with_keys_str(&["enter", "space"]),
            with_help("enter", "activate"),
        ]),
        next_focus: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "next")]),
        prev_focus: new_binding(vec![
            with_keys_str(&["shift+tab"]),
            with_help("shift+tab", "previous"),
        ]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.activate, &self.next_focus]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.activate], vec![&self.next_focus, &self.prev_focus]]
    }
}
