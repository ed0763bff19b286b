//! The countdown screen: display, pickers, slider, and command handling.
//!
//! Owns one [`engine::Model`] and the three input widgets. Focus moves
//! between the widgets with tab/shift-tab; any widget change feeds the
//! engine through `set_input` directly. The Start/Stop/Reset bindings are
//! re-gated from the engine's predicates on every update, so unavailable
//! commands neither fire nor show up in the help bar.

use crate::engine::{self, FinishedMsg};
use crate::help;
use crate::key::{self};
use crate::picker;
use crate::slider;
use crate::Component;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::{self, AdaptiveColor, Color};
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;

static DISPLAY_STYLE: Lazy<Style> = Lazy::new(|| {
    Style::new().bold(true).foreground(AdaptiveColor {
        Light: "#874BFD",
        Dark: "#7D56F4",
    })
});

static STATUS_STYLE: Lazy<Style> = Lazy::new(|| {
    Style::new().foreground(AdaptiveColor {
        Light: "#B2B2B2",
        Dark: "#4A4A4A",
    })
});

static FINISHED_STYLE: Lazy<Style> =
    Lazy::new(|| Style::new().bold(true).foreground(Color::from("#EE6FF8")));

/// Which input widget currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Hours,
    Minutes,
    Seconds,
}

/// Application-level key bindings.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Start the countdown. Gated on time being on the clock.
    pub start: key::Binding,
    /// Pause the countdown. Gated on the countdown running.
    pub stop: key::Binding,
    /// Clear the clock and the inputs. Gated on the clock being nonzero.
    pub reset: key::Binding,
    /// Move focus to the next input widget.
    pub next_field: key::Binding,
    /// Move focus to the previous input widget.
    pub prev_field: key::Binding,
    /// Toggle the expanded help view.
    pub toggle_help: key::Binding,
    /// Leave the program.
    pub quit: key::Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            start: key::Binding::new(vec![KeyCode::Enter, KeyCode::Char('s')])
                .with_help("enter/s", "start"),
            stop: key::Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "stop"),
            reset: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            next_field: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            prev_field: key::Binding::new(vec![
                (KeyCode::BackTab, KeyModifiers::NONE),
                (KeyCode::BackTab, KeyModifiers::SHIFT),
            ])
            .with_help("shift+tab", "prev field"),
            toggle_help: key::Binding::new(vec![
                (KeyCode::Char('?'), KeyModifiers::NONE),
                (KeyCode::Char('?'), KeyModifiers::SHIFT),
            ])
            .with_help("?", "more"),
            quit: key::Binding::new(vec![
                (KeyCode::Char('q'), KeyModifiers::NONE),
                (KeyCode::Char('c'), KeyModifiers::CONTROL),
            ])
            .with_help("q", "quit"),
        }
    }
}

/// The single-screen countdown application.
#[derive(Debug, Clone)]
pub struct App {
    /// The countdown engine.
    pub engine: engine::Model,
    /// Hours picker, 0–23.
    pub hours: picker::Model,
    /// Minutes picker, 0–59.
    pub minutes: picker::Model,
    /// Seconds slider, 0–59.
    pub seconds: slider::Model,
    /// Application key bindings.
    pub keymap: AppKeyMap,
    /// The footer help bar.
    pub help: help::Model,
    focus: Field,
    finished: bool,
}

impl App {
    // Re-derives command availability from the engine's predicates.
    fn sync_command_gates(&mut self) {
        self.keymap.start.set_enabled(self.engine.can_start());
        self.keymap.stop.set_enabled(self.engine.can_stop());
        self.keymap.reset.set_enabled(self.engine.can_reset());
    }

    fn focus_field(&mut self, field: Field) {
        self.hours.blur();
        self.minutes.blur();
        self.seconds.blur();
        self.focus = field;
        match field {
            Field::Hours => self.hours.focus(),
            Field::Minutes => self.minutes.focus(),
            Field::Seconds => self.seconds.focus(),
        };
    }

    fn focus_next(&mut self) {
        let next = match self.focus {
            Field::Hours => Field::Minutes,
            Field::Minutes => Field::Seconds,
            Field::Seconds => Field::Hours,
        };
        self.focus_field(next);
    }

    fn focus_prev(&mut self) {
        let prev = match self.focus {
            Field::Hours => Field::Seconds,
            Field::Minutes => Field::Hours,
            Field::Seconds => Field::Minutes,
        };
        self.focus_field(prev);
    }

    // Feeds the engine the current widget values.
    fn apply_input(&mut self) {
        self.engine
            .set_input(self.hours.value(), self.minutes.value(), self.seconds.value());
    }

    fn handle_key(&mut self, key_msg: &KeyMsg, msg: &Msg) -> Option<Cmd> {
        if self.keymap.quit.matches(key_msg) {
            return Some(quit());
        }
        if self.keymap.toggle_help.matches(key_msg) {
            self.help.show_all = !self.help.show_all;
            return None;
        }
        if self.keymap.start.matches(key_msg) {
            self.finished = false;
            return self.engine.start();
        }
        if self.keymap.stop.matches(key_msg) {
            self.engine.stop();
            return None;
        }
        if self.keymap.reset.matches(key_msg) {
            self.engine.reset();
            self.finished = false;
            self.hours.set_value(0);
            self.minutes.set_value(0);
            self.seconds.set_value(0);
            return None;
        }
        if self.keymap.next_field.matches(key_msg) {
            self.focus_next();
            return None;
        }
        if self.keymap.prev_field.matches(key_msg) {
            self.focus_prev();
            return None;
        }

        let changed = match self.focus {
            Field::Hours => self.hours.update(msg),
            Field::Minutes => self.minutes.update(msg),
            Field::Seconds => self.seconds.update(msg),
        };
        if changed {
            // Inputs write straight through, even mid-countdown.
            self.finished = false;
            self.apply_input();
        }
        None
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let mut app = App {
            engine: engine::new(),
            hours: picker::Model::new("Hour", engine::MAX_HOURS),
            minutes: picker::Model::new("Minute", engine::MAX_MINUTES),
            seconds: slider::Model::new("Seconds", engine::MAX_SECONDS),
            keymap: AppKeyMap::default(),
            help: help::Model::new(),
            focus: Field::Hours,
            finished: false,
        };
        app.focus_field(Field::Hours);
        app.sync_command_gates();
        (app, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = size.width as usize;
            None
        } else if let Some(done) = msg.downcast_ref::<FinishedMsg>() {
            if done.id == self.engine.id() {
                self.finished = true;
            }
            None
        } else if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg, &msg)
        } else {
            self.engine.update(&msg)
        };

        self.sync_command_gates();
        cmd
    }

    fn view(&self) -> String {
        let display = DISPLAY_STYLE.clone().render(&self.engine.view());

        let hours = self.hours.view();
        let minutes = self.minutes.view();
        let pickers =
            lipgloss::join_horizontal(lipgloss::TOP, &[hours.as_str(), "    ", minutes.as_str()]);

        let status = if self.finished {
            FINISHED_STYLE.clone().render("Time's up!")
        } else if self.engine.is_running() {
            STATUS_STYLE.clone().render("counting down")
        } else {
            String::new()
        };

        format!(
            "\n  {}\n\n  {}\n\n  {}\n\n  {}\n\n  {}\n",
            display,
            pickers,
            self.seconds.view().replace('\n', "\n  "),
            status,
            self.help.view(self)
        )
    }
}

impl key::KeyMap for App {
    fn short_help(&self) -> Vec<&key::Binding> {
        let mut bindings = match self.focus {
            Field::Hours => self.hours.keymap.short_help(),
            Field::Minutes => self.minutes.keymap.short_help(),
            Field::Seconds => self.seconds.keymap.short_help(),
        };
        bindings.extend([
            &self.keymap.start,
            &self.keymap.stop,
            &self.keymap.reset,
            &self.keymap.next_field,
            &self.keymap.toggle_help,
            &self.keymap.quit,
        ]);
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        let mut groups = match self.focus {
            Field::Hours => self.hours.keymap.full_help(),
            Field::Minutes => self.minutes.keymap.full_help(),
            Field::Seconds => self.seconds.keymap.full_help(),
        };
        groups.push(vec![
            &self.keymap.start,
            &self.keymap.stop,
            &self.keymap.reset,
        ]);
        groups.push(vec![&self.keymap.next_field, &self.keymap.prev_field]);
        groups.push(vec![&self.keymap.toggle_help, &self.keymap.quit]);
        groups
    }
}
