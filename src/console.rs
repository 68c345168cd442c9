//! Shared console service.
//!
//! A [`Console`] owns everything the crate needs to talk to the terminal: the
//! theme used to render markup, the stack of spinner displays, and the flags
//! coordinating who currently owns the live region. Cloning a `Console` is
//! cheap and every clone refers to the same terminal state, so a single
//! instance can be handed to logging, spinners and progress bars alike.
//!
//! # Examples
//!
//! ```rust
//! use banter::Console;
//!
//! let console = Console::new();
//! console.print("Ready to [info]start[/info]");
//! let spinner = console.spinner("Working");
//! spinner.update("Working harder");
//! drop(spinner);
//! assert!(!console.is_live());
//! ```

use crate::status::{DisplayState, SharedState, Spinner, StackEntry, StatusStack};
use crate::theme::Theme;
use console::Term;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Handle to the shared console state.
///
/// All clones share the terminal, theme, display stack and coordination
/// flags. The handle is `Send + Sync` and safe to use from multiple threads.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    term: Term,
    theme: Theme,
    /// Whether a live region (spinner or progress bar) currently renders.
    live: AtomicBool,
    /// Whether verbose logging replaces live displays with plain log lines.
    verbose: AtomicBool,
    stack: Mutex<StatusStack>,
    /// The bar currently owning the live region, used to route printed lines
    /// above it instead of through it.
    live_display: Mutex<Option<ProgressBar>>,
}

impl Console {
    /// Creates a console with the default theme, writing to standard error.
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    /// Creates a console with a custom theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            inner: Arc::new(ConsoleInner {
                term: Term::stderr(),
                theme,
                live: AtomicBool::new(false),
                verbose: AtomicBool::new(false),
                stack: Mutex::new(StatusStack::new()),
                live_display: Mutex::new(None),
            }),
        }
    }

    /// Returns the theme used for markup rendering.
    pub fn theme(&self) -> &Theme {
        &self.inner.theme
    }

    /// Whether a live display currently owns the terminal.
    pub fn is_live(&self) -> bool {
        self.inner.live.load(Ordering::SeqCst)
    }

    /// Marks the live region as owned or free.
    ///
    /// Spinners and progress bars maintain this flag themselves; setting it
    /// manually is only useful when driving a custom live display.
    pub fn set_live(&self, live: bool) {
        self.inner.live.store(live, Ordering::SeqCst);
    }

    /// Whether verbose mode is on.
    ///
    /// In verbose mode spinners are replaced with plain log lines so that
    /// detailed logging and live rendering do not garble each other.
    pub fn is_verbose(&self) -> bool {
        self.inner.verbose.load(Ordering::SeqCst)
    }

    /// Switches verbose mode on or off.
    ///
    /// Usually called by [`logging::init`](crate::logging::init) when the
    /// requested log level includes debug output.
    pub fn set_verbose(&self, verbose: bool) {
        self.inner.verbose.store(verbose, Ordering::SeqCst);
    }

    /// Renders markup to terminal text using the console theme.
    pub fn render_str(&self, text: &str) -> String {
        self.inner.theme.render(text)
    }

    /// Wraps a value in the tags of a resolved style.
    pub fn stylize(&self, value: &str, style: &str) -> String {
        self.inner.theme.stylize(value, style)
    }

    /// Renders markup and prints it as a line.
    ///
    /// The line lands above any live display instead of overwriting it.
    pub fn print(&self, text: &str) {
        let line = self.render_str(text);
        self.print_line(&line);
    }

    /// Prints an already rendered line, routing it around live displays.
    pub(crate) fn print_line(&self, line: &str) {
        let bar = self.inner.live_display.lock().ok().and_then(|bar| bar.clone());
        match bar {
            Some(bar) => {
                bar.suspend(|| {
                    let _ = self.inner.term.write_line(line);
                });
            }
            None => {
                let _ = self.inner.term.write_line(line);
            }
        }
    }

    /// Starts a spinner with the given message and pushes it on the stack.
    ///
    /// The message accepts markup. The spinner below the new one, if any, is
    /// suspended until the returned [`Spinner`] is dropped. In verbose mode
    /// no live display is created; the message is logged instead and the
    /// returned spinner is inert.
    pub fn spinner(&self, message: &str) -> Spinner {
        let state: SharedState = Arc::new(Mutex::new(DisplayState::Idle));
        if self.is_verbose() {
            log::info!("{message}");
            return Spinner::inert(self.clone(), state);
        }
        let bar = ProgressBar::hidden();
        bar.set_style(crate::status::spinner_style());
        bar.set_message(self.render_str(message));
        self.push_display(&bar, &state);
        Spinner::live(self.clone(), bar, state)
    }

    /// Suspends the whole spinner stack.
    ///
    /// The top spinner stops rendering and the stack is marked paused so a
    /// later [`resume_stack`](Self::resume_stack) can bring it back. Pausing
    /// an empty stack does nothing, and pausing twice is a no-op.
    pub fn pause_stack(&self) {
        let Ok(mut stack) = self.inner.stack.lock() else {
            return;
        };
        if stack.entries.is_empty() {
            return;
        }
        self.set_live(false);
        stack.paused = true;
        if let Some(top) = stack.entries.last() {
            top.suspend();
        }
        self.set_live_display(None);
    }

    /// Resumes a stack previously suspended by [`pause_stack`](Self::pause_stack).
    ///
    /// Only a paused stack resumes; a stack that was never paused, or whose
    /// top was suspended by a newer spinner, is left alone.
    pub fn resume_stack(&self) {
        let Ok(mut stack) = self.inner.stack.lock() else {
            return;
        };
        if stack.entries.is_empty() || !stack.paused {
            return;
        }
        self.set_live(true);
        if let Some(top) = stack.entries.last() {
            top.activate();
            self.set_live_display(Some(top.bar_handle()));
        }
        stack.paused = false;
    }

    /// Whether the spinner stack is currently paused.
    pub fn is_paused(&self) -> bool {
        self.inner.stack.lock().map(|stack| stack.paused).unwrap_or(false)
    }

    /// Number of spinners currently on the stack.
    pub fn stack_len(&self) -> usize {
        self.inner
            .stack
            .lock()
            .map(|stack| stack.entries.len())
            .unwrap_or(0)
    }

    /// Pushes a new display on the stack, suspending the previous top.
    pub(crate) fn push_display(&self, bar: &ProgressBar, state: &SharedState) {
        let Ok(mut stack) = self.inner.stack.lock() else {
            return;
        };
        if let Some(top) = stack.entries.last() {
            top.suspend();
        }
        self.set_live(true);
        let entry = StackEntry::new(bar.clone(), state.clone());
        entry.activate();
        self.set_live_display(Some(bar.clone()));
        stack.entries.push(entry);
    }

    /// Removes a display from the stack and reactivates the one below it.
    ///
    /// Displays are matched by identity, so out-of-order drops remove the
    /// right entry without disturbing the rest of the stack. Removing the
    /// last display clears the live flag.
    pub(crate) fn finish_display(&self, state: &SharedState) {
        let Ok(mut stack) = self.inner.stack.lock() else {
            return;
        };
        let Some(index) = stack.entries.iter().position(|entry| entry.is(state)) else {
            // Inert displays never joined the stack.
            crate::status::set_shared_state(state, DisplayState::Removed);
            return;
        };
        let was_top = index + 1 == stack.entries.len();
        let entry = stack.entries.remove(index);
        entry.finish();
        if was_top {
            match stack.entries.last() {
                Some(top) => {
                    top.activate();
                    self.set_live_display(Some(top.bar_handle()));
                }
                None => {
                    self.set_live(false);
                    self.set_live_display(None);
                }
            }
        }
    }

    /// Points log-line routing at the bar owning the live region.
    pub(crate) fn set_live_display(&self, bar: Option<ProgressBar>) {
        if let Ok(mut display) = self.inner.live_display.lock() {
            *display = bar;
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
