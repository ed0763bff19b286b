//! Key bindings with help text and enabled/disabled state.
//!
//! Bindings that are disabled match no key events and are skipped by the
//! help view, which is how commands like Start/Stop/Reset are gated on the
//! engine's state.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys that must be held.
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

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// The key label, e.g. "enter/s".
    pub key: String,
    /// What the binding does, e.g. "start".
    pub desc: String,
}

/// A key binding: the keys that trigger it, its help text, and whether it
/// is currently available.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given key combinations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use countdown_tui::key::Binding;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let start = Binding::new(vec![KeyCode::Enter, KeyCode::Char('s')])
    ///     .with_help("enter/s", "start");
    /// let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
    ///     .with_help("ctrl+c", "quit");
    /// ```
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<KeyPress>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns whether the binding is currently available.
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Enables or disables the binding. A disabled binding matches no key
    /// events and is omitted from help views.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if the key event triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.code == msg.key && k.mods == msg.modifiers)
    }
}

/// Implemented by models that expose their bindings to the help view.
pub trait KeyMap {
    /// Bindings for the one-line help view, in display order.
    fn short_help(&self) -> Vec<&Binding>;
    /// Binding columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
