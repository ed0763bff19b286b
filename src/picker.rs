//! A focusable value picker, the terminal stand-in for a dropdown.
//!
//! Cycles through an integer range with prev/next keys and renders as
//! `‹ N Unit ›`, pluralizing the unit label. Only a focused picker
//! consumes key events, so several pickers can share the screen.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss::AdaptiveColor;
use lipgloss_extras::prelude::*;

/// Key bindings for changing the picked value.
#[derive(Debug, Clone)]
pub struct PickerKeyMap {
    /// Step to the previous value. Default keys: Down Arrow, 'j'
    pub prev: key::Binding,
    /// Step to the next value. Default keys: Up Arrow, 'k'
    pub next: key::Binding,
}

impl Default for PickerKeyMap {
    fn default() -> Self {
        Self {
            prev: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "lower"),
            next: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "raise"),
        }
    }
}

impl KeyMapTrait for PickerKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.next, &self.prev]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.next, &self.prev]]
    }
}

/// Styles for the picker's focused and blurred renderings.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style for the value while the picker has focus.
    pub focused_value: Style,
    /// Style for the value while blurred.
    pub blurred_value: Style,
    /// Style for the unit label.
    pub label: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            focused_value: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#874BFD",
                Dark: "#7D56F4",
            }),
            blurred_value: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            label: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
        }
    }
}

/// A picker over the inclusive range `0..=max`.
#[derive(Debug, Clone)]
pub struct Model {
    /// Singular unit label, e.g. "Hour"; pluralized in the view.
    pub unit: String,
    /// Largest selectable value.
    pub max: u32,
    /// Key bindings.
    pub keymap: PickerKeyMap,
    /// Visual styling.
    pub styles: Styles,
    value: u32,
    focused: bool,
}

impl Model {
    /// Creates a blurred picker over `0..=max` starting at 0.
    pub fn new(unit: impl Into<String>, max: u32) -> Self {
        Self {
            unit: unit.into(),
            max,
            keymap: PickerKeyMap::default(),
            styles: Styles::default(),
            value: 0,
            focused: false,
        }
    }

    /// Sets the initial value, clamped to the range.
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value.min(self.max);
        self
    }

    /// The currently picked value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Sets the value, clamped to `0..=max`.
    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    /// Steps to the next value, wrapping past `max` to 0.
    pub fn next(&mut self) {
        self.value = if self.value == self.max {
            0
        } else {
            self.value + 1
        };
    }

    /// Steps to the previous value, wrapping past 0 to `max`.
    pub fn prev(&mut self) {
        self.value = if self.value == 0 {
            self.max
        } else {
            self.value - 1
        };
    }

    /// Handles key events while focused. Returns true if the value changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focused {
            return false;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next.matches(key_msg) {
                self.next();
                return true;
            } else if self.keymap.prev.matches(key_msg) {
                self.prev();
                return true;
            }
        }
        false
    }

    /// Renders the picker as `‹ N Unit ›` (arrows only while focused).
    pub fn view(&self) -> String {
        let plural = if self.value == 1 { "" } else { "s" };
        let label = self
            .styles
            .label
            .clone()
            .inline(true)
            .render(&format!("{}{}", self.unit, plural));

        if self.focused {
            let value = self
                .styles
                .focused_value
                .clone()
                .inline(true)
                .render(&format!("‹ {} ›", self.value));
            format!("{} {}", value, label)
        } else {
            let value = self
                .styles
                .blurred_value
                .clone()
                .inline(true)
                .render(&format!("  {}  ", self.value));
            format!("{} {}", value, label)
        }
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
