//! Stacked spinner displays.
//!
//! Spinners created through [`Console::spinner`](crate::console::Console::spinner)
//! form a stack: starting a new spinner suspends the one currently shown, and
//! dropping a spinner brings the previous one back. Only the top of the stack
//! ever renders, so nested operations can each report their own status
//! without fighting over the terminal.
//!
//! # Examples
//!
//! ```rust
//! use banter::{Console, DisplayState};
//!
//! let console = Console::new();
//! let outer = console.spinner("Syncing projects");
//! {
//!     let inner = console.spinner("Fetching [bold]index[/bold]");
//!     assert_eq!(outer.state(), DisplayState::Suspended);
//!     assert_eq!(inner.state(), DisplayState::Active);
//! }
//! // Dropping the inner spinner reactivates the outer one.
//! assert_eq!(outer.state(), DisplayState::Active);
//! ```

use crate::console::Console;
use crate::strings;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Frames of the spinner animation, an arc spinning inside brackets.
///
/// The final empty frame keeps the line clean when the spinner settles.
pub const SPINNER_FRAMES: [&str; 7] = ["[◜]", "[◠]", "[◝]", "[◞]", "[◡]", "[◟]", ""];

/// Delay between two spinner frames.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Lifecycle of a stacked display.
///
/// A display starts out `Idle`, becomes `Active` when it owns the terminal,
/// `Suspended` while another display or a pause hides it, and `Removed` once
/// it leaves the stack for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Created but not yet rendering.
    Idle,
    /// Currently rendering at the top of the stack.
    Active,
    /// Temporarily hidden, either by a newer display or by a stack pause.
    Suspended,
    /// Taken off the stack; the display will not render again.
    Removed,
}

/// Shared handle to a display's lifecycle state.
pub(crate) type SharedState = Arc<Mutex<DisplayState>>;

pub(crate) fn set_shared_state(state: &SharedState, value: DisplayState) {
    if let Ok(mut guard) = state.lock() {
        *guard = value;
    }
}

pub(crate) fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap()
        .tick_strings(&SPINNER_FRAMES)
}

/// A spinner and its state handle, as kept on the stack.
pub(crate) struct StackEntry {
    bar: ProgressBar,
    state: SharedState,
}

impl StackEntry {
    pub(crate) fn new(bar: ProgressBar, state: SharedState) -> Self {
        Self { bar, state }
    }

    /// Whether this entry belongs to the given state handle.
    pub(crate) fn is(&self, state: &SharedState) -> bool {
        Arc::ptr_eq(&self.state, state)
    }

    pub(crate) fn bar_handle(&self) -> ProgressBar {
        self.bar.clone()
    }

    /// Connects the spinner to the terminal and starts its animation.
    pub(crate) fn activate(&self) {
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.enable_steady_tick(SPINNER_INTERVAL);
        set_shared_state(&self.state, DisplayState::Active);
    }

    /// Stops the animation and disconnects the spinner, clearing its line.
    pub(crate) fn suspend(&self) {
        self.bar.disable_steady_tick();
        self.bar.set_draw_target(ProgressDrawTarget::hidden());
        set_shared_state(&self.state, DisplayState::Suspended);
    }

    /// Clears the spinner for good.
    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
        set_shared_state(&self.state, DisplayState::Removed);
    }
}

/// The stack of spinner displays owned by a [`Console`].
pub(crate) struct StatusStack {
    pub(crate) entries: Vec<StackEntry>,
    pub(crate) paused: bool,
}

impl StatusStack {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            paused: false,
        }
    }
}

/// A live spinner tied to a [`Console`].
///
/// The spinner renders until the value is dropped; dropping removes it from
/// the stack and reactivates the spinner below it, if any. When the console
/// is in verbose mode the spinner is inert: the message is logged once and no
/// live display is created.
///
/// Spinner messages accept the same markup as [`Console::print`].
pub struct Spinner {
    console: Console,
    bar: Option<ProgressBar>,
    state: SharedState,
}

impl Spinner {
    pub(crate) fn live(console: Console, bar: ProgressBar, state: SharedState) -> Self {
        Self {
            console,
            bar: Some(bar),
            state,
        }
    }

    pub(crate) fn inert(console: Console, state: SharedState) -> Self {
        Self {
            console,
            bar: None,
            state,
        }
    }

    /// Returns the current lifecycle state of this spinner.
    pub fn state(&self) -> DisplayState {
        self.state.lock().map(|state| *state).unwrap_or(DisplayState::Removed)
    }

    /// Replaces the spinner message.
    ///
    /// The message is indentation-normalized and rendered through the
    /// console's theme. Inert spinners ignore updates.
    pub fn update(&self, message: &str) {
        if let Some(bar) = &self.bar {
            let message = strings::normalize_indent(message);
            bar.set_message(self.console.render_str(&message));
        }
    }

    /// Replaces the spinner message with already rendered text.
    ///
    /// The text is displayed verbatim, bypassing markup rendering. Useful
    /// when the caller has prepared styled output ahead of time.
    pub fn update_rendered(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.set_message(message);
        }
    }

    /// Returns the message currently attached to the spinner.
    ///
    /// Inert spinners have no message.
    pub fn message(&self) -> Option<String> {
        self.bar.as_ref().map(ProgressBar::message)
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.console.finish_display(&self.state);
    }
}
