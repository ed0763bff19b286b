//! The countdown engine: remaining seconds, run state, and the 1-second
//! tick chain.
//!
//! The engine owns countdown state and produces the commands that keep the
//! tick chain alive. It is driven entirely by messages: a [`TickMsg`]
//! decrements the remaining time and schedules the next tick, and a
//! [`FinishedMsg`] is emitted when the countdown reaches zero.
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use countdown_tui::engine::{self, FinishedMsg};
//!
//! struct MyApp {
//!     engine: engine::Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut engine = engine::new();
//!         engine.set_input(0, 1, 30); // 90 seconds
//!         (Self { engine }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(done) = msg.downcast_ref::<FinishedMsg>() {
//!             if done.id == self.engine.id() {
//!                 // Countdown finished!
//!             }
//!         }
//!         self.engine.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.engine.view()
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for engine instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Largest selectable hour value.
pub const MAX_HOURS: u32 = 23;
/// Largest selectable minute value.
pub const MAX_MINUTES: u32 = 59;
/// Largest selectable second value.
pub const MAX_SECONDS: u32 = 59;

/// Whether the countdown is ticking.
///
/// `Idle` is both the initial and the resting state; `Running` exists only
/// while a tick chain is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not counting down. Remaining time holds its last value.
    #[default]
    Idle,
    /// Counting down, one decrement per second.
    Running,
}

/// The user-configured duration, one field per input widget.
///
/// Fields are clamped to their valid ranges on the way in; the selection
/// is separate from the remaining time and feeds it through
/// [`Model::set_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Hours, 0–23.
    pub hours: u32,
    /// Minutes, 0–59.
    pub minutes: u32,
    /// Seconds, 0–59.
    pub seconds: u32,
}

impl Selection {
    /// The selection converted to a total number of seconds.
    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Message sent on every engine tick, once per second while running.
///
/// Ticks carry the engine's instance id and a generation tag; messages
/// with a stale tag (from a tick chain that was superseded by a later
/// `start()`) or a foreign id are ignored, so at most one chain ever
/// drives the countdown.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The id of the engine that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Message sent when the countdown reaches zero.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// The id of the engine that finished.
    pub id: i64,
}

/// The countdown engine model.
#[derive(Debug, Clone)]
pub struct Model {
    remaining: u32,
    selection: Selection,
    state: RunState,
    interval: Duration,
    id: i64,
    tag: i64,
}

/// Creates an idle engine with nothing selected.
pub fn new() -> Model {
    Model {
        remaining: 0,
        selection: Selection::default(),
        state: RunState::Idle,
        interval: Duration::from_secs(1),
        id: next_id(),
        tag: 0,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Returns the unique identifier of this engine instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The current user selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The current run state.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Returns true while the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Whether Start is available: there must be time on the clock.
    pub fn can_start(&self) -> bool {
        self.remaining > 0
    }

    /// Whether Stop is available: only while running.
    pub fn can_stop(&self) -> bool {
        self.is_running()
    }

    /// Whether Reset is available: whenever the clock is not already zero.
    pub fn can_reset(&self) -> bool {
        self.remaining != 0
    }

    /// Starts the countdown.
    ///
    /// Returns the command that schedules the first tick, or `None` when
    /// there is nothing to do: starting with zero remaining is a no-op,
    /// and starting while already running keeps the existing tick chain
    /// rather than registering a second one.
    pub fn start(&mut self) -> Option<Cmd> {
        if self.is_running() || self.remaining == 0 {
            return None;
        }
        self.state = RunState::Running;
        self.tag += 1;
        Some(self.tick())
    }

    /// Stops the countdown, keeping the remaining time (pause, not reset).
    ///
    /// No-op if idle. The live tick chain is released here: the tag bump
    /// makes any in-flight tick message inert.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = RunState::Idle;
        self.tag += 1;
    }

    /// Stops the countdown and clears both the clock and the selection.
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = 0;
        self.selection = Selection::default();
    }

    /// Records a new H/M/S selection and recomputes the remaining time.
    ///
    /// Fields are clamped to their valid ranges. The recomputation is
    /// unconditional: changing an input mid-countdown overwrites the
    /// remaining time, matching the behavior of the inputs this engine
    /// was built for.
    pub fn set_input(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.selection = Selection {
            hours: hours.min(MAX_HOURS),
            minutes: minutes.min(MAX_MINUTES),
            seconds: seconds.min(MAX_SECONDS),
        };
        self.remaining = self.selection.total_seconds();
    }

    // Schedules the next tick for the current chain.
    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    // Delivers FinishedMsg on the next pass through the event loop.
    fn finished(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }

    /// Processes engine messages.
    ///
    /// A valid tick decrements the clock by one second and schedules the
    /// next tick; the tick that lands on zero transitions to idle and
    /// emits [`FinishedMsg`] instead. Ticks are rejected when idle, when
    /// the id does not match, or when the tag belongs to a superseded
    /// chain.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if !self.is_running() || tick_msg.id != self.id || tick_msg.tag != self.tag {
                return None;
            }

            // A stale tick can land after the clock already hit zero;
            // clamp and go idle rather than wrapping.
            if self.remaining == 0 {
                self.state = RunState::Idle;
                return None;
            }

            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state = RunState::Idle;
                self.tag += 1;
                return Some(self.finished());
            }
            return Some(self.tick());
        }

        None
    }

    /// The remaining time rendered as `HH:MM:SS`.
    pub fn view(&self) -> String {
        format_hms(self.remaining)
    }
}

/// Formats a number of seconds as zero-padded `HH:MM:SS`.
///
/// # Examples
///
/// ```rust
/// use countdown_tui::engine::format_hms;
///
/// assert_eq!(format_hms(0), "00:00:00");
/// assert_eq!(format_hms(90), "00:01:30");
/// assert_eq!(format_hms(86399), "23:59:59");
/// ```
pub fn format_hms(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Runs one tick through the engine, as the event loop would.
    fn deliver_tick(engine: &mut Model) -> Option<Cmd> {
        let msg: Msg = Box::new(TickMsg {
            id: engine.id,
            tag: engine.tag,
        });
        engine.update(&msg)
    }

    fn parse_hms(s: &str) -> u32 {
        let mut parts = s.split(':').map(|p| p.parse::<u32>().unwrap());
        let h = parts.next().unwrap();
        let m = parts.next().unwrap();
        let sec = parts.next().unwrap();
        h * 3600 + m * 60 + sec
    }

    #[test]
    fn test_new_engine_is_idle_and_empty() {
        let engine = new();
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.selection(), Selection::default());
        assert_eq!(engine.run_state(), RunState::Idle);
        assert!(engine.id() > 0);
    }

    #[test]
    fn test_unique_ids() {
        let a = new();
        let b = new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_set_input_computes_total_seconds() {
        let mut engine = new();
        for (h, m, s) in [(0, 0, 0), (0, 1, 30), (1, 0, 0), (23, 59, 59), (2, 30, 15)] {
            engine.set_input(h, m, s);
            assert_eq!(engine.remaining(), h * 3600 + m * 60 + s);
        }
    }

    #[test]
    fn test_set_input_clamps_out_of_range_fields() {
        let mut engine = new();
        engine.set_input(99, 75, 200);
        assert_eq!(
            engine.selection(),
            Selection {
                hours: 23,
                minutes: 59,
                seconds: 59,
            }
        );
        assert_eq!(engine.remaining(), 86399);
    }

    #[test]
    fn test_format_round_trips_over_input_domain() {
        for total in 0..86400u32 {
            let formatted = format_hms(total);
            assert_eq!(parse_hms(&formatted), total);
            assert_eq!(format_hms(parse_hms(&formatted)), formatted);
        }
    }

    #[test]
    fn test_start_with_zero_remaining_is_a_noop() {
        let mut engine = new();
        assert!(engine.start().is_none());
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn test_start_twice_keeps_one_tick_chain() {
        let mut engine = new();
        engine.set_input(0, 0, 10);

        assert!(engine.start().is_some());
        let tag_after_first = engine.tag;
        assert!(engine.start().is_none()); // no second registration
        assert_eq!(engine.tag, tag_after_first);
        assert!(engine.is_running());
    }

    #[test]
    fn test_ticks_decrement_while_running() {
        let mut engine = new();
        engine.set_input(0, 0, 10);
        engine.start();

        for n in 1..=5 {
            let cmd = deliver_tick(&mut engine);
            assert!(cmd.is_some());
            assert_eq!(engine.remaining(), 10 - n);
        }
        assert_eq!(engine.run_state(), RunState::Running);
    }

    #[test]
    fn test_final_tick_goes_idle_and_clamps() {
        let mut engine = new();
        engine.set_input(0, 0, 1);
        engine.start();

        let cmd = deliver_tick(&mut engine);
        assert!(cmd.is_some()); // the FinishedMsg command
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.run_state(), RunState::Idle);

        // No further decrement: a stale tick is rejected outright.
        let stale: Msg = Box::new(TickMsg {
            id: engine.id,
            tag: engine.tag - 1,
        });
        assert!(engine.update(&stale).is_none());
        assert_eq!(engine.remaining(), 0);
    }

    #[test]
    fn test_tick_rejected_when_idle() {
        let mut engine = new();
        engine.set_input(0, 0, 5);
        let msg: Msg = Box::new(TickMsg {
            id: engine.id,
            tag: engine.tag,
        });
        assert!(engine.update(&msg).is_none());
        assert_eq!(engine.remaining(), 5);
    }

    #[test]
    fn test_tick_rejected_on_wrong_id_or_tag() {
        let mut engine = new();
        engine.set_input(0, 0, 5);
        engine.start();

        let wrong_id: Msg = Box::new(TickMsg {
            id: engine.id + 999,
            tag: engine.tag,
        });
        assert!(engine.update(&wrong_id).is_none());

        let wrong_tag: Msg = Box::new(TickMsg {
            id: engine.id,
            tag: engine.tag + 1,
        });
        assert!(engine.update(&wrong_tag).is_none());

        assert_eq!(engine.remaining(), 5);
    }

    #[test]
    fn test_stop_pauses_without_clearing() {
        let mut engine = new();
        engine.set_input(0, 0, 10);
        engine.start();
        deliver_tick(&mut engine);
        deliver_tick(&mut engine);

        engine.stop();
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.remaining(), 8); // pause, not reset

        // The chain released by stop() no longer ticks.
        assert!(deliver_tick(&mut engine).is_none());
        assert_eq!(engine.remaining(), 8);
    }

    #[test]
    fn test_stop_when_idle_is_a_noop() {
        let mut engine = new();
        engine.set_input(0, 0, 3);
        let tag = engine.tag;
        engine.stop();
        assert_eq!(engine.tag, tag);
        assert_eq!(engine.remaining(), 3);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = new();
        engine.set_input(1, 2, 3);
        engine.start();
        deliver_tick(&mut engine);

        engine.reset();
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.selection(), Selection::default());
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn test_reset_from_idle() {
        let mut engine = new();
        engine.set_input(0, 5, 0);
        engine.reset();
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.selection(), Selection::default());
    }

    #[test]
    fn test_set_input_while_running_overwrites_remaining() {
        // Inputs write straight through even mid-countdown.
        let mut engine = new();
        engine.set_input(0, 0, 30);
        engine.start();
        deliver_tick(&mut engine);
        assert_eq!(engine.remaining(), 29);

        engine.set_input(0, 2, 0);
        assert_eq!(engine.remaining(), 120);
        assert!(engine.is_running());
    }

    #[test]
    fn test_predicates_track_state() {
        let mut engine = new();
        assert!(!engine.can_start());
        assert!(!engine.can_stop());
        assert!(!engine.can_reset());

        engine.set_input(0, 0, 5);
        assert!(engine.can_start());
        assert!(!engine.can_stop());
        assert!(engine.can_reset());

        engine.start();
        assert!(engine.can_stop());
    }

    #[test]
    fn test_ninety_second_scenario() {
        let mut engine = new();
        engine.set_input(0, 1, 30);
        assert_eq!(engine.remaining(), 90);
        assert_eq!(engine.view(), "00:01:30");

        engine.start();
        for _ in 0..90 {
            deliver_tick(&mut engine);
        }
        assert_eq!(engine.remaining(), 0);
        assert_eq!(engine.run_state(), RunState::Idle);
        assert_eq!(engine.view(), "00:00:00");
    }

    #[test]
    fn test_format_hms_fields() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(60), "00:01:00");
        assert_eq!(format_hms(3599), "00:59:59");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(86399), "23:59:59");
    }
}
