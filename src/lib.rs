#![warn(missing_docs)]

//! # countdown-tui
//!
//! A single-screen countdown timer for the terminal, built with
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! The user picks hours and minutes with value pickers, seconds with a
//! slider, and starts/stops/resets a countdown rendered as `HH:MM:SS`.
//! Each piece follows the Elm Architecture pattern: a `Model` with
//! `update()` and `view()` methods, driven by messages from the
//! bubbletea-rs runtime.
//!
//! ## Modules
//!
//! - [`engine`] — the countdown state machine: remaining seconds, run
//!   state, the 1-second tick chain, and `HH:MM:SS` formatting
//! - [`picker`] — dropdown-style value picker for hours and minutes
//! - [`slider`] — horizontal slider for seconds
//! - [`key`] — key bindings with help text and enabled/disabled state
//! - [`help`] — the footer help bar
//! - [`app`] — the screen wiring everything together
//!
//! ## Example
//!
//! The engine can be driven without any terminal at all:
//!
//! ```rust
//! use countdown_tui::engine;
//!
//! let mut engine = engine::new();
//! engine.set_input(0, 1, 30);
//! assert_eq!(engine.view(), "00:01:30");
//!
//! let _tick_cmd = engine.start();
//! assert!(engine.is_running());
//!
//! engine.stop(); // pause: remaining time is kept
//! assert_eq!(engine.view(), "00:01:30");
//! ```

pub mod app;
pub mod engine;
pub mod help;
pub mod key;
pub mod picker;
pub mod slider;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// Focused components receive key events; blurred ones ignore them. The
/// app moves focus between the two pickers and the slider with tab and
/// shift-tab.
pub trait Component {
    /// Sets the component to focused state. May return a command for
    /// initialization work.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use app::App;
pub use engine::{
    format_hms, new as engine_new, FinishedMsg, Model as Engine, RunState, Selection,
    TickMsg as EngineTickMsg,
};
pub use help::Model as HelpModel;
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use picker::Model as Picker;
pub use slider::Model as Slider;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::engine::{
        format_hms, new as engine_new, FinishedMsg, Model as Engine, RunState, Selection,
        TickMsg as EngineTickMsg,
    };
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
    pub use crate::picker::Model as Picker;
    pub use crate::slider::Model as Slider;
    pub use crate::Component;
}
