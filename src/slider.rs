//! A focusable horizontal slider for picking the seconds value.
//!
//! Renders a filled/empty track in the manner of a progress bar, with the
//! current value shown in a `Seconds: N` label above it. Steps by one with
//! the arrow keys and by five with shift held; values clamp at the range
//! ends rather than wrapping.

use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::{AdaptiveColor, Color};
use lipgloss_extras::prelude::*;

const DEFAULT_WIDTH: usize = 24;
const BIG_STEP: u32 = 5;

/// Key bindings for moving the slider.
#[derive(Debug, Clone)]
pub struct SliderKeyMap {
    /// Decrease by one. Default keys: Left Arrow, 'h'
    pub decrease: key::Binding,
    /// Increase by one. Default keys: Right Arrow, 'l'
    pub increase: key::Binding,
    /// Decrease by five. Default key: Shift+Left
    pub decrease_big: key::Binding,
    /// Increase by five. Default key: Shift+Right
    pub increase_big: key::Binding,
}

impl Default for SliderKeyMap {
    fn default() -> Self {
        Self {
            decrease: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "less"),
            increase: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "more"),
            decrease_big: key::Binding::new(vec![(KeyCode::Left, KeyModifiers::SHIFT)])
                .with_help("shift+←", "less by 5"),
            increase_big: key::Binding::new(vec![(KeyCode::Right, KeyModifiers::SHIFT)])
                .with_help("shift+→", "more by 5"),
        }
    }
}

impl KeyMapTrait for SliderKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.decrease, &self.increase]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.decrease,
            &self.increase,
            &self.decrease_big,
            &self.increase_big,
        ]]
    }
}

/// A slider over the inclusive range `0..=max`.
#[derive(Debug, Clone)]
pub struct Model {
    /// Label shown above the track, e.g. "Seconds".
    pub label: String,
    /// Largest selectable value.
    pub max: u32,
    /// Track width in characters.
    pub width: usize,
    /// Character for the filled portion of the track.
    pub full: char,
    /// Character for the empty portion of the track.
    pub empty: char,
    /// Key bindings.
    pub keymap: SliderKeyMap,
    /// Style for the filled portion.
    pub full_style: Style,
    /// Style for the empty portion.
    pub empty_style: Style,
    /// Style for the label.
    pub label_style: Style,
    value: u32,
    focused: bool,
}

impl Model {
    /// Creates a blurred slider over `0..=max` starting at 0.
    pub fn new(label: impl Into<String>, max: u32) -> Self {
        Self {
            label: label.into(),
            max,
            width: DEFAULT_WIDTH,
            full: '█',
            empty: '░',
            keymap: SliderKeyMap::default(),
            full_style: Style::new().foreground(Color::from("#7571F9")),
            empty_style: Style::new().foreground(Color::from("#606060")),
            label_style: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            value: 0,
            focused: false,
        }
    }

    /// Sets the track width in characters.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// The current slider value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Sets the value, clamped to `0..=max`.
    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.max);
    }

    /// Moves the slider by `delta`, clamping at the range ends.
    pub fn step(&mut self, delta: i64) {
        let next = self.value as i64 + delta;
        self.value = next.clamp(0, self.max as i64) as u32;
    }

    /// Handles key events while focused. Returns true if the value changed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.focused {
            return false;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let before = self.value;
            if self.keymap.decrease_big.matches(key_msg) {
                self.step(-(BIG_STEP as i64));
            } else if self.keymap.increase_big.matches(key_msg) {
                self.step(BIG_STEP as i64);
            } else if self.keymap.decrease.matches(key_msg) {
                self.step(-1);
            } else if self.keymap.increase.matches(key_msg) {
                self.step(1);
            } else {
                return false;
            }
            return self.value != before;
        }
        false
    }

    /// Renders the label line and the track.
    pub fn view(&self) -> String {
        let label = self
            .label_style
            .clone()
            .inline(true)
            .render(&format!("{}: {}", self.label, self.value));
        format!("{}\n{}", label, self.track_view())
    }

    // The filled/empty track for the current value.
    fn track_view(&self) -> String {
        let ratio = if self.max == 0 {
            0.0
        } else {
            self.value as f64 / self.max as f64
        };
        let filled = ((self.width as f64) * ratio).round() as usize;
        let filled = filled.min(self.width);

        let full_part = self
            .full_style
            .clone()
            .inline(true)
            .render(&self.full.to_string())
            .repeat(filled);
        let empty_part = self
            .empty_style
            .clone()
            .inline(true)
            .render(&self.empty.to_string())
            .repeat(self.width - filled);

        format!("{}{}", full_part, empty_part)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Component;
    use lipgloss_extras::lipgloss;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn shifted(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::SHIFT,
        })
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_new_starts_at_zero() {
        let slider = Model::new("Seconds", 59);
        assert_eq!(slider.value(), 0);
        assert!(!slider.focused());
    }

    #[test]
    fn test_step_clamps_at_both_ends() {
        let mut slider = Model::new("Seconds", 59);
        slider.step(-1);
        assert_eq!(slider.value(), 0);

        slider.set_value(59);
        slider.step(1);
        assert_eq!(slider.value(), 59);

        slider.step(-100);
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = Model::new("Seconds", 59);
        slider.set_value(200);
        assert_eq!(slider.value(), 59);
    }

    #[test]
    fn test_blurred_slider_ignores_keys() {
        let mut slider = Model::new("Seconds", 59);
        assert!(!slider.update(&key(KeyCode::Right)));
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn test_focused_slider_steps() {
        let mut slider = Model::new("Seconds", 59);
        slider.focus();

        assert!(slider.update(&key(KeyCode::Right)));
        assert_eq!(slider.value(), 1);
        assert!(slider.update(&key(KeyCode::Char('l'))));
        assert_eq!(slider.value(), 2);
        assert!(slider.update(&key(KeyCode::Left)));
        assert_eq!(slider.value(), 1);
    }

    #[test]
    fn test_shift_steps_by_five() {
        let mut slider = Model::new("Seconds", 59);
        slider.focus();

        assert!(slider.update(&shifted(KeyCode::Right)));
        assert_eq!(slider.value(), 5);
        assert!(slider.update(&shifted(KeyCode::Left)));
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn test_step_at_limit_reports_no_change() {
        let mut slider = Model::new("Seconds", 59);
        slider.focus();
        assert!(!slider.update(&key(KeyCode::Left))); // already at 0
    }

    #[test]
    fn test_track_width_is_constant() {
        let mut slider = Model::new("Seconds", 59).with_width(20);
        for value in [0, 1, 30, 59] {
            slider.set_value(value);
            let track = slider.view().lines().nth(1).unwrap().to_string();
            assert_eq!(lipgloss::width_visible(&track), 20);
        }
    }

    #[test]
    fn test_track_fill_tracks_value() {
        let mut slider = Model::new("Seconds", 59).with_width(20);
        let fill_count = |s: &Model| {
            plain(&s.view())
                .chars()
                .filter(|&c| c == s.full)
                .count()
        };

        assert_eq!(fill_count(&slider), 0);
        slider.set_value(59);
        assert_eq!(fill_count(&slider), 20);
        slider.set_value(30);
        let half = fill_count(&slider);
        assert!(half > 0 && half < 20);
    }

    #[test]
    fn test_view_shows_label_and_value() {
        let mut slider = Model::new("Seconds", 59);
        slider.set_value(30);
        assert!(plain(&slider.view()).starts_with("Seconds: 30"));
    }
}
