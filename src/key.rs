//! Type-safe key bindings for keyboard-driven components.
//!
//! A [`Binding`] is a set of key presses plus optional help text. Components
//! group their bindings in a struct and implement [`KeyMap`] so hosts can
//! render contextual help. Bindings are matched against the
//! [`bubbletea_rs::KeyMsg`] events the host forwards.
//!
//! ```rust
//! use minutes_widgets::key::{matches_binding, new_binding, with_help, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let activate = new_binding(vec![
//!     with_keys_str(&["enter", "space"]),
//!     with_help("enter", "activate"),
//! ]);
//!
//! let msg = KeyMsg { key: KeyCode::Enter, modifiers: KeyModifiers::NONE };
//! assert!(matches_binding(&msg, &activate));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short rendering of the keys, e.g. `"enter"`.
    pub key: String,
    /// What the binding does, e.g. `"activate"`.
    pub desc: String,
}

/// A set of key presses that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The key presses this binding responds to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The binding's help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether `msg` is one of this binding's key presses.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == msg.key && k.mods == msg.modifiers)
    }
}

/// Option applied by [`new_binding`].
#[derive(Debug, Clone)]
pub enum BindingOpt {
    /// Adds key presses.
    Keys(Vec<KeyPress>),
    /// Sets the help text.
    Help(Help),
    /// Starts the binding disabled.
    Disabled,
}

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys.extend(keys),
            BindingOpt::Help(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Adds keys given by name, e.g. `"enter"`, `"space"`, `"shift+tab"`, `"ctrl+a"`.
///
/// Unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    BindingOpt::Keys(keys.iter().flat_map(|k| parse_key_str(k)).collect())
}

/// Sets the help text shown for a binding.
pub fn with_help(key: impl Into<String>, desc: impl Into<String>) -> BindingOpt {
    BindingOpt::Help(Help {
        key: key.into(),
        desc: desc.into(),
    })
}

/// Starts the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

/// Reports whether `msg` matches any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Reports whether `msg` matches `binding`.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches(msg)
}

/// Implemented by a component's binding set to expose help.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

// Terminals report shift+tab as BackTab, some with SHIFT still set.
fn parse_key_str(s: &str) -> Vec<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();
    let Some(name) = parts.pop() else {
        return Vec::new();
    };
    for part in parts {
        match part {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "alt" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            _ => return Vec::new(),
        }
    }

    let code = match name {
        "enter" => KeyCode::Enter,
        "space" => KeyCode::Char(' '),
        "tab" if mods.contains(KeyModifiers::SHIFT) => {
            let rest = mods.difference(KeyModifiers::SHIFT);
            return vec![
                KeyPress::from((KeyCode::BackTab, rest)),
                KeyPress::from((KeyCode::BackTab, rest | KeyModifiers::SHIFT)),
            ];
        }
        "tab" => KeyCode::Tab,
        "esc" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Vec::new(),
            }
        }
    };
    vec![KeyPress::from((code, mods))]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_with_keys_str_named_keys() {
        let b = new_binding(vec![with_keys_str(&["enter", "space", "ctrl+a"])]);
        assert!(b.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::Char('a'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&key(KeyCode::Char('a'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_tab_matches_backtab_with_or_without_shift() {
        let b = new_binding(vec![with_keys_str(&["shift+tab"])]);
        assert!(b.matches(&key(KeyCode::BackTab, KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(!b.matches(&key(KeyCode::Tab, KeyModifiers::NONE)));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let b = new_binding(vec![with_keys_str(&["hyper+x", "nonsense"])]);
        assert!(b.keys().is_empty());
        assert!(!b.enabled());
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_disabled()]);
        let msg = key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!b.matches(&msg));
        b.set_enabled(true);
        assert!(matches(&msg, &[&b]));
    }
}
